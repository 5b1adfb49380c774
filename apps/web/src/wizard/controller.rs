//! The wizard state machine.
//!
//! A session is `{step 1..=4} × {idle, submitting(id)} × {result hidden, shown}`.
//! Every transition is a method that either applies fully or returns a
//! `WizardError` and leaves the session untouched. Validation failures are not
//! errors: they are recorded in `errors` and reported through `StepChange`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::webhook_client::LetterContent;
use crate::wizard::step_indicator::{step_indicator, StepMarker};
use crate::wizard::types::{
    Field, FormData, Notice, ValidationErrors, ViewMode, WizardStep,
};
use crate::wizard::validation::validate_step;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("a submission is already in progress")]
    Busy,

    #[error("invalid action: {0}")]
    InvalidAction(String),

    #[error("no cover letter has been generated yet")]
    NothingToExport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SubmissionPhase {
    Idle,
    Submitting { submission_id: u64 },
}

/// Result of a `next` attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChange {
    Advanced { from: WizardStep, to: WizardStep },
    Blocked { field: Field },
}

/// Handed out by `begin_submission`; carries what the request needs so the
/// session lock can be released while the webhook is in flight.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub session_id: Uuid,
    pub submission_id: u64,
    pub form: FormData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The session moved on (new letter, or a newer submission); the outcome was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct WizardSession {
    id: Uuid,
    step: WizardStep,
    form: FormData,
    errors: ValidationErrors,
    phase: SubmissionPhase,
    /// Monotonic; never reset, so ids stay unique for the session's lifetime.
    last_submission_id: u64,
    result: Option<String>,
    result_open: bool,
    view_mode: ViewMode,
    notice: Option<Notice>,
    last_touched: DateTime<Utc>,
}

impl WizardSession {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            step: WizardStep::FIRST,
            form: FormData::default(),
            errors: ValidationErrors::new(),
            phase: SubmissionPhase::Idle,
            last_submission_id: 0,
            result: None,
            result_open: false,
            view_mode: ViewMode::default(),
            notice: None,
            last_touched: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Submitting { .. })
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn is_result_open(&self) -> bool {
        self.result_open
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Removes the pending notice; notices are shown once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn last_touched(&self) -> DateTime<Utc> {
        self.last_touched
    }

    pub fn touch(&mut self) {
        self.last_touched = Utc::now();
    }

    // ── transitions ─────────────────────────────────────────────────────────

    /// Updates a field. Clears that field's error if it had one; no re-validation.
    pub fn edit_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value.into());
        self.errors.clear(field);
    }

    pub fn next(&mut self) -> Result<StepChange, WizardError> {
        self.ensure_idle()?;
        let Some(to) = self.step.next() else {
            return Err(WizardError::InvalidAction(
                "the last step submits instead of advancing".to_string(),
            ));
        };

        self.errors = validate_step(self.step, &self.form);
        if let Some(field) = self.errors.fields().next() {
            return Ok(StepChange::Blocked { field });
        }

        let from = self.step;
        self.step = to;
        Ok(StepChange::Advanced { from, to })
    }

    pub fn previous(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_idle()?;
        let to = self.step.previous().ok_or_else(|| {
            WizardError::InvalidAction("already at the first step".to_string())
        })?;
        self.step = to;
        Ok(to)
    }

    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, WizardError> {
        self.ensure_idle()?;
        if !self.step.is_last() {
            return Err(WizardError::InvalidAction(format!(
                "submit is only available on step {}",
                WizardStep::LAST.number()
            )));
        }

        // Step 4 has no required fields; kept so a future requirement is enforced here.
        self.errors = validate_step(self.step, &self.form);
        if let Some(field) = self.errors.fields().next() {
            return Err(WizardError::InvalidAction(format!("{field} is invalid")));
        }

        self.last_submission_id += 1;
        self.phase = SubmissionPhase::Submitting {
            submission_id: self.last_submission_id,
        };
        Ok(SubmissionTicket {
            session_id: self.id,
            submission_id: self.last_submission_id,
            form: self.form.clone(),
        })
    }

    pub fn complete_submission<E>(
        &mut self,
        submission_id: u64,
        outcome: Result<LetterContent, E>,
    ) -> Completion {
        if self.phase != (SubmissionPhase::Submitting { submission_id }) {
            return Completion::Stale;
        }

        self.phase = SubmissionPhase::Idle;
        match outcome {
            Ok(content) => {
                self.result = Some(content.into_text());
                self.result_open = true;
                self.notice = Some(Notice::submitted());
            }
            Err(_) => {
                self.result_open = false;
                self.notice = Some(Notice::submission_failed());
            }
        }
        Completion::Applied
    }

    pub fn close_result(&mut self) -> Result<(), WizardError> {
        if !self.result_open {
            return Err(WizardError::InvalidAction(
                "the result panel is not open".to_string(),
            ));
        }
        self.result_open = false;
        Ok(())
    }

    pub fn toggle_view(&mut self) -> Result<ViewMode, WizardError> {
        if self.result.is_none() {
            return Err(WizardError::NothingToExport);
        }
        self.view_mode = self.view_mode.toggled();
        Ok(self.view_mode)
    }

    /// Starts over. Any submission still in flight becomes stale.
    pub fn new_letter(&mut self) -> Result<(), WizardError> {
        if !self.result_open {
            return Err(WizardError::InvalidAction(
                "a new letter can be started from the result panel".to_string(),
            ));
        }
        self.step = WizardStep::FIRST;
        self.form = FormData::default();
        self.errors = ValidationErrors::new();
        self.phase = SubmissionPhase::Idle;
        self.result = None;
        self.result_open = false;
        self.view_mode = ViewMode::default();
        self.notice = None;
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), WizardError> {
        if self.is_submitting() {
            return Err(WizardError::Busy);
        }
        Ok(())
    }

    // ── read model ──────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> SessionSnapshot {
        let idle = !self.is_submitting();
        SessionSnapshot {
            id: self.id,
            step: self.step,
            steps: step_indicator(self.step),
            form: self.form.clone(),
            errors: self.errors.clone(),
            phase: self.phase,
            result: self.result.clone(),
            result_open: self.result_open,
            view_mode: self.view_mode,
            notice: self.notice.clone(),
            actions: AvailableActions {
                previous: idle && self.step.previous().is_some(),
                next: idle && !self.step.is_last(),
                submit: idle && self.step.is_last(),
                new_letter: self.result_open,
                export: self.result.is_some(),
            },
        }
    }
}

/// Serializable view of a session for the JSON API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub step: WizardStep,
    pub steps: Vec<StepMarker>,
    pub form: FormData,
    pub errors: ValidationErrors,
    pub phase: SubmissionPhase,
    pub result: Option<String>,
    pub result_open: bool,
    pub view_mode: ViewMode,
    pub notice: Option<Notice>,
    pub actions: AvailableActions,
}

/// Which controls are enabled in the current state.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableActions {
    pub previous: bool,
    pub next: bool,
    pub submit: bool,
    pub new_letter: bool,
    pub export: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> WizardSession {
        WizardSession::new(Uuid::new_v4())
    }

    fn letter(text: &str) -> Result<LetterContent, ()> {
        Ok(LetterContent::RawText {
            text: text.to_string(),
        })
    }

    /// A session on step 4 with every required field filled.
    fn on_details_step() -> WizardSession {
        let mut s = session();
        s.edit_field(Field::Name, "Jane Doe");
        s.next().unwrap();
        s.edit_field(Field::Company, "Acme");
        s.next().unwrap();
        s.edit_field(Field::Role, "Engineer");
        s.next().unwrap();
        assert_eq!(s.step().number(), 4);
        s
    }

    fn with_result() -> WizardSession {
        let mut s = on_details_step();
        let ticket = s.begin_submission().unwrap();
        assert_eq!(
            s.complete_submission(ticket.submission_id, letter("Dear Acme, ...")),
            Completion::Applied
        );
        s
    }

    #[test]
    fn test_initial_state() {
        let s = session();
        assert_eq!(s.step(), WizardStep::FIRST);
        assert_eq!(s.form(), &FormData::default());
        assert!(s.errors().is_empty());
        assert_eq!(s.phase(), SubmissionPhase::Idle);
        assert!(!s.is_result_open());
        assert_eq!(s.view_mode(), ViewMode::Preview);
    }

    #[test]
    fn test_next_blocked_on_each_required_step() {
        let fields = [Field::Name, Field::Company, Field::Role];
        for (index, field) in fields.iter().enumerate() {
            let mut s = session();
            for earlier in &fields[..index] {
                s.edit_field(*earlier, "filled");
                s.next().unwrap();
            }
            let before = s.step();

            assert_eq!(s.next(), Ok(StepChange::Blocked { field: *field }));
            assert_eq!(s.step(), before);
            assert_eq!(s.errors().len(), 1);
            assert!(s.errors().contains(*field));
        }
    }

    #[test]
    fn test_next_advances_and_clears_errors() {
        let mut s = session();
        s.next().unwrap();
        assert!(s.errors().contains(Field::Name));

        s.form.name = "Jane".to_string(); // bypass edit_field so the error survives
        let change = s.next().unwrap();
        assert_eq!(
            change,
            StepChange::Advanced {
                from: WizardStep::new(1).unwrap(),
                to: WizardStep::new(2).unwrap()
            }
        );
        assert!(s.errors().is_empty());
    }

    #[test]
    fn test_next_rejected_on_last_step() {
        let mut s = on_details_step();
        assert!(matches!(s.next(), Err(WizardError::InvalidAction(_))));
        assert_eq!(s.step(), WizardStep::LAST);
    }

    #[test]
    fn test_previous_decrements_regardless_of_fields() {
        let mut s = on_details_step();
        s.edit_field(Field::Role, "");
        s.edit_field(Field::Company, "");
        for expected in [3, 2, 1] {
            assert_eq!(s.previous().unwrap().number(), expected);
            assert_eq!(s.step().number(), expected);
        }
        assert!(matches!(s.previous(), Err(WizardError::InvalidAction(_))));
    }

    #[test]
    fn test_edit_clears_only_that_fields_error() {
        let mut s = session();
        s.errors.insert(Field::Name, "Name is required");
        s.errors.insert(Field::Company, "Company name is required");

        s.edit_field(Field::Name, "J");

        assert!(!s.errors().contains(Field::Name));
        assert!(s.errors().contains(Field::Company));
        assert_eq!(s.form().name, "J");
    }

    #[test]
    fn test_edit_without_error_leaves_errors_alone() {
        let mut s = session();
        s.errors.insert(Field::Company, "Company name is required");
        s.edit_field(Field::AdditionalInfo, "Rust, 5 years");
        assert_eq!(s.errors().len(), 1);
    }

    #[test]
    fn test_submit_only_on_last_step() {
        let mut s = session();
        assert!(matches!(
            s.begin_submission(),
            Err(WizardError::InvalidAction(_))
        ));
    }

    #[test]
    fn test_submitting_disables_navigation() {
        let mut s = on_details_step();
        let ticket = s.begin_submission().unwrap();
        assert!(s.is_submitting());
        assert_eq!(ticket.form.company, "Acme");

        assert_eq!(s.next(), Err(WizardError::Busy));
        assert_eq!(s.previous(), Err(WizardError::Busy));
        assert!(matches!(s.begin_submission(), Err(WizardError::Busy)));
        assert!(!s.snapshot().actions.submit);
    }

    #[test]
    fn test_successful_submission_shows_result() {
        let s = with_result();
        assert_eq!(s.result(), Some("Dear Acme, ..."));
        assert!(s.is_result_open());
        assert!(!s.is_submitting());
        assert_eq!(s.notice(), Some(&Notice::submitted()));
    }

    #[test]
    fn test_failed_submission_keeps_data_on_last_step() {
        let mut s = on_details_step();
        let ticket = s.begin_submission().unwrap();

        let outcome: Result<LetterContent, &str> = Err("HTTP 500");
        assert_eq!(
            s.complete_submission(ticket.submission_id, outcome),
            Completion::Applied
        );

        assert_eq!(s.result(), None);
        assert!(!s.is_result_open());
        assert_eq!(s.step(), WizardStep::LAST);
        assert_eq!(s.form().name, "Jane Doe");
        assert_eq!(s.notice(), Some(&Notice::submission_failed()));
        assert!(s.snapshot().actions.submit);
    }

    #[test]
    fn test_new_letter_resets_everything() {
        let mut s = with_result();
        s.toggle_view().unwrap();

        s.new_letter().unwrap();

        assert_eq!(s.form(), &FormData::default());
        assert_eq!(s.step(), WizardStep::FIRST);
        assert_eq!(s.result(), None);
        assert!(!s.is_result_open());
        assert_eq!(s.view_mode(), ViewMode::Preview);
    }

    #[test]
    fn test_new_letter_requires_open_result() {
        let mut s = session();
        assert!(matches!(s.new_letter(), Err(WizardError::InvalidAction(_))));
    }

    #[test]
    fn test_completion_after_new_letter_is_stale() {
        let mut s = with_result();
        s.close_result().unwrap();
        let ticket = s.begin_submission().unwrap();
        s.result_open = true; // result panel reopened while the resubmission runs
        s.new_letter().unwrap();

        assert_eq!(
            s.complete_submission(ticket.submission_id, letter("late")),
            Completion::Stale
        );
        assert_eq!(s.result(), None);
        assert!(!s.is_result_open());
    }

    #[test]
    fn test_completion_with_superseded_id_is_stale() {
        let mut s = on_details_step();
        let first = s.begin_submission().unwrap();
        let _ = s.complete_submission(first.submission_id, Err::<LetterContent, _>(()));
        let second = s.begin_submission().unwrap();
        assert!(second.submission_id > first.submission_id);

        assert_eq!(
            s.complete_submission(first.submission_id, letter("old")),
            Completion::Stale
        );
        assert!(s.is_submitting());
        assert_eq!(
            s.complete_submission(second.submission_id, letter("new")),
            Completion::Applied
        );
        assert_eq!(s.result(), Some("new"));
    }

    #[test]
    fn test_toggle_view_requires_result() {
        let mut s = session();
        assert_eq!(s.toggle_view(), Err(WizardError::NothingToExport));

        let mut s = with_result();
        assert_eq!(s.toggle_view(), Ok(ViewMode::Raw));
        assert_eq!(s.toggle_view(), Ok(ViewMode::Preview));
    }

    #[test]
    fn test_close_result_keeps_text() {
        let mut s = with_result();
        s.close_result().unwrap();
        assert!(!s.is_result_open());
        assert_eq!(s.result(), Some("Dear Acme, ..."));
        assert!(s.snapshot().actions.export);
    }

    #[test]
    fn test_take_notice_is_one_shot() {
        let mut s = with_result();
        assert!(s.take_notice().is_some());
        assert!(s.take_notice().is_none());
    }
}
