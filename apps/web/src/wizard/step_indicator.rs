use serde::Serialize;

use crate::wizard::types::WizardStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// One marker of the progress bar.
#[derive(Debug, Clone, Serialize)]
pub struct StepMarker {
    pub number: u8,
    pub label: &'static str,
    pub status: StepStatus,
    /// Connector drawn after this marker; `None` on the last one.
    pub connector_filled: Option<bool>,
}

impl StepMarker {
    pub fn is_completed(&self) -> bool {
        self.status == StepStatus::Completed
    }

    pub fn css_class(&self) -> &'static str {
        match self.status {
            StepStatus::Completed => "step completed",
            StepStatus::Current => "step current",
            StepStatus::Upcoming => "step upcoming",
        }
    }

    pub fn connector_class(&self) -> Option<&'static str> {
        self.connector_filled
            .map(|filled| if filled { "connector filled" } else { "connector" })
    }
}

pub fn step_indicator(current: WizardStep) -> Vec<StepMarker> {
    WizardStep::all()
        .map(|step| {
            let status = if step < current {
                StepStatus::Completed
            } else if step == current {
                StepStatus::Current
            } else {
                StepStatus::Upcoming
            };
            StepMarker {
                number: step.number(),
                label: step.label(),
                status,
                connector_filled: (!step.is_last()).then_some(step < current),
            }
        })
        .collect()
}
