//! Value types shared by the wizard controller, the webhook client and the renderers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Form data
// ────────────────────────────────────────────────────────────────────────────

/// Everything the user enters across the four steps.
///
/// Serialized camelCase; the same shape is posted to the webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub name: String,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub additional_info: String,
}

impl FormData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Company => &self.company,
            Field::Role => &self.role,
            Field::AdditionalInfo => &self.additional_info,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Company => &mut self.company,
            Field::Role => &mut self.role,
            Field::AdditionalInfo => &mut self.additional_info,
        };
        *slot = value;
    }
}

/// Identifies one input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Company,
    Role,
    AdditionalInfo,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::Company,
        Field::Role,
        Field::AdditionalInfo,
    ];

    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Company => "company",
            Field::Role => "role",
            Field::AdditionalInfo => "additionalInfo",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown field '{s}'"))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation errors
// ────────────────────────────────────────────────────────────────────────────

/// Sparse map from field to message. Only failing fields have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drops the entry for `field`, returning whether one existed.
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wizard step
// ────────────────────────────────────────────────────────────────────────────

/// A step number, always within `1..=WizardStep::COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct WizardStep(u8);

impl WizardStep {
    pub const COUNT: u8 = 4;
    pub const FIRST: WizardStep = WizardStep(1);
    pub const LAST: WizardStep = WizardStep(Self::COUNT);

    pub fn new(number: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&number).then_some(WizardStep(number))
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn is_last(&self) -> bool {
        *self == Self::LAST
    }

    pub fn next(&self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        Self::new(self.0.saturating_sub(1))
    }

    /// The field this step collects.
    pub fn field(&self) -> Field {
        match self.0 {
            1 => Field::Name,
            2 => Field::Company,
            3 => Field::Role,
            _ => Field::AdditionalInfo,
        }
    }

    /// Short label shown under the step marker.
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Name",
            2 => "Company",
            3 => "Role",
            _ => "Details",
        }
    }

    pub fn all() -> impl Iterator<Item = WizardStep> {
        (1..=Self::COUNT).map(WizardStep)
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::FIRST
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Result presentation
// ────────────────────────────────────────────────────────────────────────────

/// Which of the two mutually exclusive result views is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Preview,
    Raw,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Preview => ViewMode::Raw,
            ViewMode::Raw => ViewMode::Preview,
        }
    }
}

/// Transient user-facing message, shown once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Failure,
}

impl Notice {
    pub fn submitted() -> Self {
        Notice {
            kind: NoticeKind::Success,
            title: "Cover letter request submitted!".to_string(),
            description: "View your generated cover letter.".to_string(),
        }
    }

    pub fn submission_failed() -> Self {
        Notice {
            kind: NoticeKind::Failure,
            title: "Something went wrong".to_string(),
            description: "Please try again later.".to_string(),
        }
    }
}
