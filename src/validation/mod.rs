//! Declarative request-body validation.
//!
//! Every validator variant is a `const` table of [`FieldRule`]s. A rule names one
//! body field, the single message reported when the field is rejected, whether
//! the field may be absent, and an ordered list of [`Step`]s. Sanitizing steps
//! rewrite the working value; checking steps test it. A rule fails when any of
//! its checks fail, and then contributes its message exactly once.
//!
//! Running a [`Validator`] evaluates every rule of its variant against the same
//! snapshot of the body, collects failures into an [`Outcome`] in declaration
//! order, and writes the sanitized value of each passing field back into the
//! body so downstream handlers see cleaned input.

pub mod email;
pub mod middleware;
pub mod rules;

use crate::error::AppError;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use std::borrow::Cow;

pub use email::normalize_email;
pub use middleware::validate_request;
pub use rules::Variant;

lazy_static! {
    // 7 to 15 digits, optional leading '+', single spaces or hyphens between groups
    static ref MOBILE_PHONE_REGEX: Regex = Regex::new(r"^\+?\d(?:[ -]?\d){6,14}$").unwrap();
}

/// Reported when a confirmation pair is enforced and the two values differ.
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// Whether a rule applies when its field is missing from the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// A missing field is evaluated as an empty string.
    Required,
    /// A missing field skips the rule entirely. An explicit `null` does not.
    Optional,
}

/// One link of a rule's chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Strips leading and trailing whitespace.
    Trim,
    /// Canonicalizes an email address. Only applied while the rule is still passing.
    NormalizeEmail,
    /// Fails on the empty string.
    NotEmpty,
    /// Bounds the number of characters, inclusive on both ends.
    Length { min: Option<u64>, max: Option<u64> },
    /// Fails unless the value is a syntactically valid email address.
    Email,
    /// Fails unless the value looks like a mobile phone number.
    MobilePhone,
}

impl Step {
    /// Shorthand for a minimum-length check.
    pub const fn min_len(min: u64) -> Step {
        Step::Length {
            min: Some(min),
            max: None,
        }
    }

    /// Shorthand for an exact-length check.
    pub const fn exact_len(len: u64) -> Step {
        Step::Length {
            min: Some(len),
            max: Some(len),
        }
    }

    fn accepts(&self, value: &str) -> bool {
        match *self {
            Step::Trim | Step::NormalizeEmail => true,
            Step::NotEmpty => !value.is_empty(),
            Step::Length { min, max } => validator::validate_length(value, min, max, None),
            Step::Email => validator::validate_email(value),
            Step::MobilePhone => MOBILE_PHONE_REGEX.is_match(value),
        }
    }
}

/// A named chain of steps applied to one body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub message: &'static str,
    pub presence: Presence,
    pub steps: &'static [Step],
}

/// What happened when a single rule ran.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Verdict {
    /// Optional field absent.
    Skipped,
    /// All checks passed; carries the sanitized value when the field was present.
    Passed(Option<String>),
    Failed,
}

impl FieldRule {
    pub const fn required(
        field: &'static str,
        message: &'static str,
        steps: &'static [Step],
    ) -> Self {
        Self {
            field,
            message,
            presence: Presence::Required,
            steps,
        }
    }

    pub const fn optional(
        field: &'static str,
        message: &'static str,
        steps: &'static [Step],
    ) -> Self {
        Self {
            field,
            message,
            presence: Presence::Optional,
            steps,
        }
    }

    fn evaluate(&self, body: &Map<String, Value>) -> Verdict {
        let (mut value, present) = match text_of(body.get(self.field)) {
            FieldText::Absent if self.presence == Presence::Optional => return Verdict::Skipped,
            FieldText::Absent => (String::new(), false),
            FieldText::Null => (String::new(), true),
            FieldText::Text(text) => (text.into_owned(), true),
            FieldText::Structured => return Verdict::Failed,
        };

        let mut passing = true;
        for step in self.steps {
            match step {
                Step::Trim => value = value.trim().to_string(),
                Step::NormalizeEmail => {
                    if passing {
                        value = normalize_email(&value);
                    }
                }
                check => passing &= check.accepts(&value),
            }
        }

        if !passing {
            Verdict::Failed
        } else if present {
            Verdict::Passed(Some(value))
        } else {
            Verdict::Passed(None)
        }
    }
}

enum FieldText<'a> {
    Absent,
    /// An explicit `null`, checked as the empty string even on optional rules.
    Null,
    Text(Cow<'a, str>),
    Structured,
}

// Scalars are checked by their textual form; arrays and objects never pass.
fn text_of(value: Option<&Value>) -> FieldText<'_> {
    match value {
        None => FieldText::Absent,
        Some(Value::Null) => FieldText::Null,
        Some(Value::String(s)) => FieldText::Text(Cow::Borrowed(s)),
        Some(Value::Number(n)) => FieldText::Text(Cow::Owned(n.to_string())),
        Some(Value::Bool(b)) => FieldText::Text(Cow::Owned(b.to_string())),
        Some(Value::Array(_)) | Some(Value::Object(_)) => FieldText::Structured,
    }
}

fn passed_value<'v>(verdicts: &'v [(&FieldRule, Verdict)], field: &str) -> Option<&'v str> {
    verdicts.iter().find_map(|(rule, verdict)| match verdict {
        Verdict::Passed(Some(value)) if rule.field == field => Some(value.as_str()),
        _ => None,
    })
}

/// The ordered messages produced by one validator run. Empty means success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    messages: Vec<&'static str>,
}

impl Outcome {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[&'static str] {
        &self.messages
    }

    /// The messages joined the way the failure response carries them.
    pub fn joined(&self) -> String {
        self.messages.join(", ")
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidFields(self.messages))
        }
    }
}

/// A validator variant plus the options it runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    variant: Variant,
    confirm_passwords: bool,
}

impl Validator {
    pub const fn new(variant: Variant) -> Self {
        Self {
            variant,
            confirm_passwords: false,
        }
    }

    /// Also require the variant's confirmation pair to match, when it has one.
    pub const fn with_confirmation(self) -> Self {
        Self {
            confirm_passwords: true,
            ..self
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Runs every rule against `body` and rewrites the fields that passed.
    ///
    /// A body that is not a JSON object is treated as having no fields and is
    /// left untouched.
    pub fn run(&self, body: &mut Value) -> Outcome {
        let empty = Map::new();
        let fields = body.as_object().unwrap_or(&empty);

        let verdicts: Vec<(&FieldRule, Verdict)> = self
            .variant
            .rules()
            .iter()
            .map(|rule| (rule, rule.evaluate(fields)))
            .collect();

        let mut outcome = Outcome::default();
        for (rule, verdict) in &verdicts {
            if *verdict == Verdict::Failed {
                outcome.messages.push(rule.message);
            }
        }

        if self.confirm_passwords {
            if let Some((first, second)) = self.variant.confirmation_pair() {
                if let (Some(a), Some(b)) =
                    (passed_value(&verdicts, first), passed_value(&verdicts, second))
                {
                    if a != b {
                        outcome.messages.push(PASSWORD_MISMATCH);
                    }
                }
            }
        }

        if let Some(fields) = body.as_object_mut() {
            for (rule, verdict) in verdicts {
                if let Verdict::Passed(Some(value)) = verdict {
                    fields.insert(rule.field.to_string(), Value::String(value));
                }
            }
        }

        outcome
    }
}
