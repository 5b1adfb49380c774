use chrono::NaiveDate;
use serde::Serialize;

use crate::wizard::types::{FormData, ViewMode};

pub const CLOSING: &str = "Sincerely,";

/// Letterhead, body and closing, shared by the preview and the PDF export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterComposition {
    pub sender: String,
    /// Long form, e.g. "April 5, 2024".
    pub date: String,
    pub subject: String,
    pub body: String,
    pub closing: &'static str,
    pub signature: String,
}

impl LetterComposition {
    pub fn compose(form: &FormData, body: &str, date: NaiveDate) -> Self {
        Self {
            sender: form.name.clone(),
            date: long_date(date),
            subject: subject_line(form),
            body: body.to_string(),
            closing: CLOSING,
            signature: form.name.clone(),
        }
    }
}

/// What the result panel shows for the active view mode.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum LetterView {
    Preview(LetterComposition),
    Raw { text: String },
}

impl LetterView {
    pub fn for_mode(mode: ViewMode, form: &FormData, body: &str, date: NaiveDate) -> Self {
        match mode {
            ViewMode::Preview => LetterView::Preview(LetterComposition::compose(form, body, date)),
            ViewMode::Raw => LetterView::Raw {
                text: body.to_string(),
            },
        }
    }
}

pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn subject_line(form: &FormData) -> String {
    format!(
        "Application for {} position at {}",
        form.role, form.company
    )
}

/// `Cover_Letter_<company>_<role>.pdf`, values inserted as typed.
pub fn export_filename(form: &FormData) -> String {
    format!("Cover_Letter_{}_{}.pdf", form.company, form.role)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> FormData {
        FormData {
            name: "Jane Doe".to_string(),
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            additional_info: String::new(),
        }
    }

    fn april_5() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 5).unwrap()
    }

    #[test]
    fn test_long_date_has_no_padding() {
        assert_eq!(long_date(april_5()), "April 5, 2024");
        assert_eq!(
            long_date(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()),
            "December 25, 2024"
        );
    }

    #[test]
    fn test_compose_preview() {
        let letter = LetterComposition::compose(&jane(), "Dear Acme,\n\nHello.", april_5());
        assert_eq!(letter.sender, "Jane Doe");
        assert_eq!(letter.date, "April 5, 2024");
        assert_eq!(letter.subject, "Application for Engineer position at Acme");
        assert_eq!(letter.body, "Dear Acme,\n\nHello.");
        assert_eq!(letter.closing, "Sincerely,");
        assert_eq!(letter.signature, "Jane Doe");
    }

    #[test]
    fn test_raw_view_is_unmodified() {
        match LetterView::for_mode(ViewMode::Raw, &jane(), "  text\n", april_5()) {
            LetterView::Raw { text } => assert_eq!(text, "  text\n"),
            other => panic!("expected raw view, got {other:?}"),
        }
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(&jane()), "Cover_Letter_Acme_Engineer.pdf");
    }
}
