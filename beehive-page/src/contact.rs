//! Contact form validation and feedback.

use crate::{Document, PageError, Result};
use beehive_i18n::Dictionary;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Whether `value` (trimmed) looks like an email address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

/// Submitted values of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// Fields that carry an `error-{field}` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Subject,
        Field::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    /// Id of the element showing this field's error.
    pub fn error_element_id(&self) -> String {
        format!("error-{}", self.as_str())
    }
}

/// A failed check and the message to show for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

fn validation_message(dictionary: Option<&Dictionary>, key: &str) -> String {
    dictionary
        .and_then(|d| d.lookup_str(&format!("contact.validation.{}", key)))
        .unwrap_or_default()
        .to_string()
}

impl ContactForm {
    /// Check every rule; messages come from `contact.validation.*`.
    ///
    /// Phone is optional and never checked.
    pub fn validate(&self, dictionary: Option<&Dictionary>) -> Vec<FieldError> {
        let checks = [
            (Field::Name, self.name.trim().chars().count() >= 2, "nameRequired"),
            (Field::Email, is_valid_email(&self.email), "emailInvalid"),
            (Field::Subject, self.subject.trim().chars().count() >= 2, "subjectRequired"),
            (Field::Message, self.message.trim().chars().count() >= 10, "messageMin"),
        ];

        checks
            .into_iter()
            .filter(|(_, ok, _)| !ok)
            .map(|(field, _, key)| FieldError {
                field,
                message: validation_message(dictionary, key),
            })
            .collect()
    }
}

/// Outcome of a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    Rejected(Vec<FieldError>),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted)
    }
}

/// The `contactForm` element and its feedback elements.
#[derive(Debug, Clone, Copy)]
pub struct ContactFormView {
    form: crate::NodeId,
}

impl ContactFormView {
    pub fn attach(doc: &dyn Document) -> Result<Self> {
        let form = doc
            .element_by_id("contactForm")
            .ok_or_else(|| PageError::MissingElement("contactForm".to_string()))?;
        Ok(Self { form })
    }

    pub fn form(&self) -> crate::NodeId {
        self.form
    }

    /// Validate, then either show the field errors or the success notice.
    /// Nothing is sent anywhere.
    pub fn submit(
        &self,
        doc: &dyn Document,
        form: &ContactForm,
        dictionary: Option<&Dictionary>,
    ) -> Submission {
        for field in Field::ALL {
            show_error(doc, field, "");
        }
        let success = doc.element_by_id("formSuccess");
        if let Some(node) = success {
            doc.set_attribute(node, "hidden", "");
        }

        let errors = form.validate(dictionary);
        if !errors.is_empty() {
            for error in &errors {
                show_error(doc, error.field, &error.message);
            }
            return Submission::Rejected(errors);
        }

        if let Some(node) = success {
            doc.remove_attribute(node, "hidden");
        }
        Submission::Accepted
    }
}

fn show_error(doc: &dyn Document, field: Field, message: &str) {
    let Some(node) = doc.element_by_id(&field.error_element_id()) else {
        return;
    };
    doc.set_text(node, message);
    if message.is_empty() {
        doc.set_attribute(node, "hidden", "");
    } else {
        doc.remove_attribute(node, "hidden");
    }
}
