//! Contact form validation
//!
//! [`validate`] is pure and reports every failing field at once. An empty
//! result means the form may be submitted.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum message length, in UTF-16 code units after trimming
pub const MIN_MESSAGE_LEN: usize = 10;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Input with a validation slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
    /// Privacy-policy consent checkbox
    Privacy,
}

impl Field {
    pub const ALL: [Field; 5] = [Field::Name, Field::Email, Field::Subject, Field::Message, Field::Privacy];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
            Field::Privacy => "privacy",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Field to error message; empty iff submission is allowed
pub type ValidationErrors = BTreeMap<Field, &'static str>;

/// Text inputs of the contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactFields {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Value of a text field; `Privacy` has none
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Email => Some(&self.email),
            Field::Subject => Some(&self.subject),
            Field::Message => Some(&self.message),
            Field::Privacy => None,
        }
    }

    /// Set a text field; returns false for `Privacy`
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
            Field::Privacy => return false,
        };
        *slot = value.into();
        true
    }
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

/// Whether `email` looks like an address (checked untrimmed)
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(email))
}

/// Validate every field of the form
pub fn validate(fields: &ContactFields, consent_given: bool) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if fields.name.trim().is_empty() {
        errors.insert(Field::Name, "Name is required");
    }

    if fields.email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !is_valid_email(&fields.email) {
        errors.insert(Field::Email, "Please enter a valid email address");
    }

    if fields.subject.trim().is_empty() {
        errors.insert(Field::Subject, "Subject is required");
    }

    let message = fields.message.trim();
    if message.is_empty() {
        errors.insert(Field::Message, "Message is required");
    } else if message.encode_utf16().count() < MIN_MESSAGE_LEN {
        errors.insert(Field::Message, "Message must be at least 10 characters long");
    }

    if !consent_given {
        errors.insert(Field::Privacy, "You must agree to the privacy policy");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = validate(&ContactFields::default(), false);

        assert_eq!(errors.len(), 5);
        assert_eq!(errors[&Field::Name], "Name is required");
        assert_eq!(errors[&Field::Email], "Email is required");
        assert_eq!(errors[&Field::Subject], "Subject is required");
        assert_eq!(errors[&Field::Message], "Message is required");
        assert_eq!(errors[&Field::Privacy], "You must agree to the privacy policy");
    }

    #[test]
    fn test_bad_email_and_short_message() {
        let fields = ContactFields::new("A", "bad", "S", "short");
        let errors = validate(&fields, true);

        assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec![Field::Email, Field::Message]);
        assert_eq!(errors[&Field::Email], "Please enter a valid email address");
        assert_eq!(errors[&Field::Message], "Message must be at least 10 characters long");
    }

    #[test]
    fn test_valid_form_passes() {
        let fields = ContactFields::new("A", "a@b.com", "S", "this is long enough");
        assert!(validate(&fields, true).is_empty());
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let fields = ContactFields::new("   ", " \t", "\n", "          ");
        let errors = validate(&fields, true);

        assert_eq!(errors[&Field::Name], "Name is required");
        assert_eq!(errors[&Field::Email], "Email is required");
        assert_eq!(errors[&Field::Message], "Message is required");
    }

    #[test]
    fn test_email_is_matched_untrimmed() {
        assert!(is_valid_email("someone@example.org"));
        assert!(!is_valid_email(" someone@example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@@b.c"));
    }

    #[test]
    fn test_message_length_is_trimmed_utf16() {
        let padded = ContactFields::new("A", "a@b.co", "S", "   123456789   ");
        assert!(validate(&padded, true).contains_key(&Field::Message));

        // Each emoji is two UTF-16 units
        let emoji = ContactFields::new("A", "a@b.co", "S", "\u{1F600}\u{1F600}\u{1F600}\u{1F600}\u{1F600}");
        assert!(validate(&emoji, true).is_empty());
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("phone"), None);

        let mut fields = ContactFields::default();
        assert!(fields.set(Field::Subject, "Hello"));
        assert!(!fields.set(Field::Privacy, "yes"));
        assert_eq!(fields.get(Field::Subject), Some("Hello"));
    }
}
