//! Declarative form schemas.
//!
//! Each submitted form is a plain serde struct that also describes its fields
//! through [`FormSchema::FIELDS`]. Handlers call [`FormSchema::validate`] at the
//! boundary and render [`FormSchema::view`] back into the templates. Submitted
//! forms also carry a signed token, checked by [`FormSchema::validate_submission`].

pub mod cafe;
pub mod csrf;
pub mod search;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::Config;
use crate::utils::links::is_valid_url;

pub use cafe::{CafeDraft, CafeForm};
pub use search::{SearchCategory, SearchForm};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_URL_MESSAGE: &str = "Invalid URL.";
pub const INVALID_CHOICE_MESSAGE: &str = "Not a valid choice.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Url,
    Choice(&'static [&'static str]),
}

impl FieldKind {
    fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Url => "url",
            FieldKind::Choice(_) => "select",
        }
    }

    fn choices(&self) -> &'static [&'static str] {
        match *self {
            FieldKind::Choice(choices) => choices,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str, required: bool) -> Self {
        Self { name, label, kind: FieldKind::Text, required }
    }

    pub const fn url(name: &'static str, label: &'static str) -> Self {
        Self { name, label, kind: FieldKind::Url, required: true }
    }

    pub const fn choice(
        name: &'static str,
        label: &'static str,
        choices: &'static [&'static str],
    ) -> Self {
        Self { name, label, kind: FieldKind::Choice(choices), required: true }
    }

    /// First failing constraint for `value`, if any.
    pub fn check(&self, value: &str) -> Option<&'static str> {
        match self.kind {
            FieldKind::Text if self.required && value.trim().is_empty() => Some(REQUIRED_MESSAGE),
            FieldKind::Text => None,
            FieldKind::Url if !is_valid_url(value) => Some(INVALID_URL_MESSAGE),
            FieldKind::Url => None,
            FieldKind::Choice(choices) if !choices.contains(&value) => {
                Some(INVALID_CHOICE_MESSAGE)
            }
            FieldKind::Choice(_) => None,
        }
    }
}

/// Field name to messages, for every field that failed.
pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

/// What a template needs to draw one input.
#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub choices: &'static [&'static str],
    pub value: String,
    pub errors: Vec<String>,
}

pub trait FormSchema {
    const FIELDS: &'static [FieldSpec];

    /// Submitted value of `field`, empty if the field is not part of the form.
    fn value(&self, field: &str) -> &str;

    /// Anti-forgery token sent back with the form.
    fn csrf_token(&self) -> &str;

    fn validate(&self) -> Result<(), FieldErrors> {
        let errors: FieldErrors = Self::FIELDS
            .iter()
            .filter_map(|spec| {
                spec.check(self.value(spec.name))
                    .map(|message| (spec.name, vec![message.to_string()]))
            })
            .collect();

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Field validation plus the token check every POSTed form must pass.
    fn validate_submission(&self, config: &Config) -> Result<(), FieldErrors> {
        let mut errors = self.validate().err().unwrap_or_default();
        if let Err(message) = csrf::verify(config, self.csrf_token()) {
            errors.insert(csrf::FIELD_NAME, vec![message.to_string()]);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn view(&self, errors: &FieldErrors) -> Vec<FieldView> {
        Self::FIELDS
            .iter()
            .map(|spec| FieldView {
                name: spec.name,
                label: spec.label,
                input_type: spec.kind.input_type(),
                choices: spec.kind.choices(),
                value: self.value(spec.name).to_string(),
                errors: errors.get(spec.name).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_rejects_blank() {
        let spec = FieldSpec::text("cafe", "Cafe Name", true);
        assert_eq!(spec.check("   "), Some(REQUIRED_MESSAGE));
        assert_eq!(spec.check("Blue Bottle"), None);
    }

    #[test]
    fn test_optional_text_accepts_blank() {
        let spec = FieldSpec::text("query", "Search", false);
        assert_eq!(spec.check(""), None);
    }

    #[test]
    fn test_url_field() {
        let spec = FieldSpec::url("map", "Map");
        assert_eq!(spec.check(""), Some(INVALID_URL_MESSAGE));
        assert_eq!(spec.check("not a url"), Some(INVALID_URL_MESSAGE));
        assert_eq!(spec.check("https://maps.example.com/x"), None);
    }

    #[test]
    fn test_choice_field() {
        let spec = FieldSpec::choice("wifi", "WiFi", &["Yes", "No"]);
        assert_eq!(spec.check("Maybe"), Some(INVALID_CHOICE_MESSAGE));
        assert_eq!(spec.check(""), Some(INVALID_CHOICE_MESSAGE));
        assert_eq!(spec.check("No"), None);
    }

    #[test]
    fn test_submission_requires_a_signed_token() {
        let config = Config::default();
        let mut form = cafe::sample_form("blue bottle");

        let errors = form.validate_submission(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[csrf::FIELD_NAME], vec![csrf::MISSING_MESSAGE]);

        form.csrf_token = csrf::issue(&config).unwrap();
        assert!(form.validate_submission(&config).is_ok());

        let other = Config {
            secret_key: "rotated-key".to_string(),
            ..Config::default()
        };
        let errors = form.validate_submission(&other).unwrap_err();
        assert_eq!(errors[csrf::FIELD_NAME], vec![csrf::INVALID_MESSAGE]);
    }

    #[test]
    fn test_token_error_joins_field_errors() {
        let config = Config::default();
        let mut form = cafe::sample_form("");
        form.csrf_token = "forged".to_string();

        let errors = form.validate_submission(&config).unwrap_err();
        assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec!["cafe", csrf::FIELD_NAME]);
    }
}
