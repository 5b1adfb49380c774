//! Server-rendered page: header, wizard card, result panel, feature list, footer.
//!
//! The page is a pure function of one session. Forms post back to
//! `/letters/:id` with an `action`, so the wizard works without client script.

use askama::Template;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::render::letter::{export_filename, LetterComposition};
use crate::wizard::controller::WizardSession;
use crate::wizard::step_indicator::{step_indicator, StepMarker};
use crate::wizard::types::{Field, Notice, NoticeKind, ViewMode};

pub mod handlers;

pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURES: &[Feature] = &[
    Feature {
        title: "Custom Content",
        description: "Personalized cover letters tailored to your specific skills, experience, and the job you're applying for.",
    },
    Feature {
        title: "Save Time",
        description: "Generate a professional cover letter in minutes, not hours. Focus on your job search, not writing.",
    },
    Feature {
        title: "Professional Results",
        description: "Stand out with perfectly formatted, compelling cover letters that highlight your strengths.",
    },
    Feature {
        title: "ATS Friendly",
        description: "Our cover letters are designed to pass through Applicant Tracking Systems with flying colors.",
    },
];

/// Copy for the single input shown on each step.
pub struct FieldCopy {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub hint: &'static str,
}

pub fn field_copy(field: Field) -> FieldCopy {
    match field {
        Field::Name => FieldCopy {
            label: "Your Full Name",
            placeholder: "John Doe",
            hint: "This will be used in your cover letter signature and header.",
        },
        Field::Company => FieldCopy {
            label: "Company Name",
            placeholder: "Acme Corporation",
            hint: "The company you're applying to work at.",
        },
        Field::Role => FieldCopy {
            label: "Job Role",
            placeholder: "Software Engineer",
            hint: "The position you're applying for.",
        },
        Field::AdditionalInfo => FieldCopy {
            label: "Additional Information",
            placeholder: "Share relevant experience, skills, or why you're interested in this role...",
            hint: "Include any specific achievements, skills, or information you'd like to highlight in your cover letter.",
        },
    }
}

#[derive(Template)]
#[template(
    source = r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Cover Letter Generator</title>
    <style>{{ styles|safe }}</style>
  </head>
  <body>
    <header class="site-header">
      <h1>Cover Letter Generator</h1>
      <p>Create a professional, personalized cover letter in minutes. Simply fill in your details and let us do the rest.</p>
    </header>

    <main>
      {% if has_notice %}
      <div class="notice {{ notice_class }}" role="status">
        <strong>{{ notice_title }}</strong>
        <span>{{ notice_description }}</span>
      </div>
      {% endif %}

      <section id="generate-now" class="card">
        <h2>Cover Letter Generator</h2>
        <p class="muted">Fill in the details to generate a personalized cover letter for your job application</p>

        <ol class="steps">
          {% for marker in steps %}
          <li class="{{ marker.css_class() }}">
            <span class="marker">{% if marker.is_completed() %}&#10003;{% else %}{{ marker.number }}{% endif %}</span>
            <span class="label">{{ marker.label }}</span>
          </li>
          {% if let Some(connector) = marker.connector_class() %}
          <li class="{{ connector }}" aria-hidden="true"></li>
          {% endif %}
          {% endfor %}
        </ol>

        <form method="post" action="/letters/{{ session_id }}">
          <label for="{{ field_name }}">{{ field_label }}</label>
          {% if multiline %}
          <textarea id="{{ field_name }}" name="{{ field_name }}" rows="6" placeholder="{{ field_placeholder }}">{{ field_value }}</textarea>
          {% else %}
          <input id="{{ field_name }}" name="{{ field_name }}" value="{{ field_value }}" placeholder="{{ field_placeholder }}"{% if has_error %} class="invalid"{% endif %} />
          {% endif %}
          {% if has_error %}<p class="error">{{ field_error }}</p>{% endif %}
          <p class="muted">{{ field_hint }}</p>

          <div class="actions">
            <button type="submit" name="action" value="previous" class="outline"{% if !can_go_back %} disabled{% endif %}>&larr; Back</button>
            {% if is_last_step %}
            <button type="submit" name="action" value="submit"{% if submitting %} disabled{% endif %}>{% if submitting %}Processing...{% else %}Submit{% endif %}</button>
            {% else %}
            <button type="submit" name="action" value="next"{% if submitting %} disabled{% endif %}>Next &rarr;</button>
            {% endif %}
          </div>
        </form>
      </section>

      {% if result_open %}
      <section class="card result" aria-label="Your Cover Letter">
        <h2>Your Cover Letter</h2>
        <p class="muted">Generated for {{ role }} at {{ company }}</p>

        <form method="post" action="/letters/{{ session_id }}">
          <button type="submit" name="action" value="toggle-view" class="outline">{% if preview_mode %}View Raw Text{% else %}View Preview{% endif %}</button>
          <button type="submit" name="action" value="close" class="outline">Close</button>
        </form>

        {% if preview_mode %}
        <article class="letter">
          <div class="letterhead">
            <p class="sender">{{ letter.sender }}</p>
            <p class="muted">{{ letter.date }}</p>
            <p>{{ letter.subject }}</p>
          </div>
          <div class="letter-body">{{ letter.body }}</div>
          <div class="closing">
            <p class="sender">{{ letter.closing }}</p>
            <p>{{ letter.signature }}</p>
          </div>
        </article>
        {% else %}
        <pre class="raw">{{ letter.body }}</pre>
        {% endif %}

        <div class="actions">
          <form method="post" action="/letters/{{ session_id }}">
            <button type="submit" name="action" value="new-letter" class="outline">Create New Letter</button>
          </form>
          {% if can_export %}
          <a class="button" href="/letters/{{ session_id }}/export" download="{{ export_name }}">Download as PDF</a>
          {% else %}
          <button type="button" disabled>Download as PDF</button>
          {% endif %}
        </div>
      </section>
      {% endif %}

      <section class="features">
        <h2>Why Use Our Generator?</h2>
        <p class="muted">Create professional, customized cover letters that make you stand out from the competition.</p>
        <div class="grid">
          {% for feature in features %}
          <div class="card">
            <h3>{{ feature.title }}</h3>
            <p class="muted">{{ feature.description }}</p>
          </div>
          {% endfor %}
        </div>
        <p><a href="#generate-now">Generate your cover letter now &rarr;</a></p>
      </section>
    </main>

    <footer class="site-footer">
      <p>Cover Letter Generator &middot; v{{ version }}</p>
    </footer>
  </body>
</html>"##,
    ext = "html"
)]
pub struct LetterPage {
    pub session_id: Uuid,
    pub steps: Vec<StepMarker>,
    pub field_name: &'static str,
    pub field_label: &'static str,
    pub field_placeholder: &'static str,
    pub field_hint: &'static str,
    pub field_value: String,
    pub multiline: bool,
    pub has_error: bool,
    pub field_error: String,
    pub can_go_back: bool,
    pub is_last_step: bool,
    pub submitting: bool,
    pub has_notice: bool,
    pub notice_class: &'static str,
    pub notice_title: String,
    pub notice_description: String,
    pub result_open: bool,
    pub preview_mode: bool,
    pub can_export: bool,
    pub export_name: String,
    pub role: String,
    pub company: String,
    pub letter: LetterComposition,
    pub features: &'static [Feature],
    pub version: &'static str,
    pub styles: &'static str,
}

impl LetterPage {
    /// Builds the page for `session`. `notice` is passed separately because
    /// showing it consumes it.
    pub fn from_session(session: &WizardSession, notice: Option<Notice>, today: NaiveDate) -> Self {
        let step = session.step();
        let field = step.field();
        let copy = field_copy(field);
        let form = session.form();
        let field_error = session.errors().get(field).map(str::to_string);

        let (notice_class, notice_title, notice_description) = match &notice {
            Some(n) => (
                match n.kind {
                    NoticeKind::Success => "success",
                    NoticeKind::Failure => "failure",
                },
                n.title.clone(),
                n.description.clone(),
            ),
            None => ("", String::new(), String::new()),
        };

        LetterPage {
            session_id: session.id(),
            steps: step_indicator(step),
            field_name: field.as_str(),
            field_label: copy.label,
            field_placeholder: copy.placeholder,
            field_hint: copy.hint,
            field_value: form.get(field).to_string(),
            multiline: field == Field::AdditionalInfo,
            has_error: field_error.is_some(),
            field_error: field_error.unwrap_or_default(),
            can_go_back: !session.is_submitting() && step.previous().is_some(),
            is_last_step: step.is_last(),
            submitting: session.is_submitting(),
            has_notice: notice.is_some(),
            notice_class,
            notice_title,
            notice_description,
            result_open: session.is_result_open(),
            preview_mode: session.view_mode() == ViewMode::Preview,
            can_export: session.result().is_some(),
            export_name: export_filename(form),
            role: form.role.clone(),
            company: form.company.clone(),
            letter: LetterComposition::compose(form, session.result().unwrap_or_default(), today),
            features: FEATURES,
            version: env!("CARGO_PKG_VERSION"),
            styles: STYLES,
        }
    }
}

const STYLES: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #0f172a; background: #f8fafc; }
.site-header { padding: 2rem 1rem; text-align: center; color: #fff; background: linear-gradient(90deg, #4f46e5, #4338ca); }
main { max-width: 48rem; margin: 0 auto; padding: 2rem 1rem; }
.card { background: #fff; border: 2px solid #e2e8f0; border-radius: .5rem; padding: 1.5rem; margin-bottom: 1.5rem; }
.muted { color: #64748b; font-size: .875rem; }
.steps { display: flex; justify-content: space-between; list-style: none; padding: 0; }
.step { display: flex; flex-direction: column; align-items: center; font-size: .75rem; }
.step .marker { width: 2.5rem; height: 2.5rem; border-radius: 50%; display: flex; align-items: center; justify-content: center; background: #e2e8f0; }
.step.completed .marker, .step.current .marker { background: #4f46e5; color: #fff; }
.step.current .marker { box-shadow: 0 0 0 4px #c7d2fe; }
.connector { flex: 1; height: 2px; margin: 1.25rem .5rem 0; background: #e2e8f0; }
.connector.filled { background: #4f46e5; }
label { display: block; font-weight: 600; margin-bottom: .5rem; }
input, textarea { width: 100%; box-sizing: border-box; padding: .5rem; border: 1px solid #cbd5e1; border-radius: .375rem; }
textarea { resize: none; }
.invalid { border-color: #dc2626; }
.error { color: #dc2626; font-size: .875rem; }
.actions { display: flex; justify-content: space-between; gap: .75rem; margin-top: 1.5rem; }
button, .button { padding: .5rem 1rem; border-radius: .375rem; border: 0; background: #4f46e5; color: #fff; text-decoration: none; cursor: pointer; }
button.outline { background: #fff; color: #0f172a; border: 1px solid #cbd5e1; }
button:disabled { opacity: .5; cursor: not-allowed; }
.notice { padding: 1rem; border-radius: .375rem; margin-bottom: 1rem; display: flex; flex-direction: column; }
.notice.success { background: #ecfdf5; border: 1px solid #10b981; }
.notice.failure { background: #fef2f2; border: 1px solid #dc2626; }
.letter { border: 1px solid #e2e8f0; border-radius: .375rem; padding: 1.5rem; }
.letterhead { margin-bottom: 2rem; }
.letter-body { white-space: pre-line; font-family: Georgia, serif; }
.closing { margin-top: 2rem; }
.sender { font-weight: 600; }
.raw { background: #f1f5f9; padding: 1rem; border-radius: .375rem; white-space: pre-wrap; font-size: .875rem; }
.features .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(10rem, 1fr)); gap: 1rem; }
.site-footer { text-align: center; padding: 2rem 1rem; color: #64748b; font-size: .875rem; }
"#;
