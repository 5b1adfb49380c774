// The four-step cover letter wizard: state machine, validation, session registry.
// All HTTP surfaces (JSON API and HTML pages) drive sessions through `controller`.

pub mod controller;
pub mod handlers;
pub mod step_indicator;
pub mod store;
pub mod submission;
pub mod types;
pub mod validation;
