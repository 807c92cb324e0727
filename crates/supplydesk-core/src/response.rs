//! Uniform response envelopes.
//!
//! Every handler answers with the same shape, whether it failed on input
//! validation or on a business rule:
//!
//! ```text
//! {"success": true,  "data": <payload or null>}
//! {"success": false, "errors": ["...", "..."]}
//! ```
//!
//! [`shape`] decides between the two purely from [`Notifier::has_notifications`].
//! [`shape_from_validation`] is the funnel for input validation: field errors
//! are recorded into the notifier first, then shaped like any other failure.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, Serializer, ser::SerializeStruct};
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::notification::Notifier;

/// The success/failure wrapper returned to API callers.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success { data: Option<T> },
    Failure { errors: Vec<String> },
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    /// Collected messages of a failure envelope, empty on success.
    pub fn errors(&self) -> &[String] {
        match self {
            Envelope::Success { .. } => &[],
            Envelope::Failure { errors } => errors,
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Envelope", 2)?;
        match self {
            Envelope::Success { data } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Envelope::Failure { errors } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("errors", errors)?;
            }
        }
        state.end()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = if self.is_success() {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        };

        (status, Json(self)).into_response()
    }
}

/// Builds the envelope for the current request from the notifier's state.
///
/// When anything was recorded the payload is dropped and the failure
/// envelope carries the messages in recording order.
pub fn shape<T>(notifier: &Notifier, result: Option<T>) -> Envelope<T> {
    if notifier.has_notifications() {
        Envelope::Failure {
            errors: notifier.all(),
        }
    } else {
        Envelope::Success { data: result }
    }
}

/// Records every field error into `notifier`, then shapes the response.
///
/// Each error contributes one notification: its cause when one is attached,
/// otherwise its message. Fields are visited in order, and errors within a
/// field keep their order.
pub fn shape_from_validation<T>(notifier: &mut Notifier, field_errors: &FieldErrors) -> Envelope<T> {
    for (_, errors) in field_errors.iter() {
        for error in errors {
            notifier.record(error.text());
        }
    }

    shape(notifier, None)
}

/// One failed check on one input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub message: String,
    pub cause: Option<String>,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// The text surfaced to the caller: the underlying cause if present.
    pub fn text(&self) -> &str {
        self.cause.as_deref().unwrap_or(&self.message)
    }
}

/// Field name to ordered list of errors, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: Vec<(String, Vec<FieldError>)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `error` under `field`, keeping the field's first position.
    pub fn add(&mut self, field: impl Into<String>, error: FieldError) {
        let field = field.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, errors)) => errors.push(error),
            None => self.fields.push((field, vec![error])),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldError])> {
        self.fields
            .iter()
            .map(|(field, errors)| (field.as_str(), errors.as_slice()))
    }
}

impl From<&ValidationErrors> for FieldErrors {
    /// Field order from `validator` is unspecified, so fields are sorted by
    /// path to keep the resulting messages stable. Nested structs contribute
    /// dotted paths (`address.city`), list items an index (`items[0].name`).
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = Vec::new();
        collect_field_errors(errors, None, &mut fields);
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let mut field_errors = FieldErrors::new();
        for (field, errors) in fields {
            for error in errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                field_errors.add(field.clone(), FieldError::new(message));
            }
        }
        field_errors
    }
}

fn collect_field_errors<'a>(
    errors: &'a ValidationErrors,
    prefix: Option<&str>,
    out: &mut Vec<(String, &'a [ValidationError])>,
) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(errors) => out.push((path, errors.as_slice())),
            ValidationErrorsKind::Struct(nested) => collect_field_errors(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let item_path = format!("{}[{}]", path, index);
                    collect_field_errors(nested, Some(&item_path), out);
                }
            }
        }
    }
}

impl From<&JsonRejection> for FieldErrors {
    fn from(rejection: &JsonRejection) -> Self {
        let mut field_errors = FieldErrors::new();
        let body_text = rejection.body_text();

        if let Some(field) = body_text
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
        {
            field_errors.add(field, FieldError::new(format!("{} is required", field)));
            return field_errors;
        }

        let error = match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                FieldError::new("Missing 'Content-Type: application/json' header")
            }
            JsonRejection::JsonDataError(_) => {
                FieldError::new("Invalid field type in request").with_cause(body_text)
            }
            _ => FieldError::new("Invalid request body").with_cause(body_text),
        };
        field_errors.add("body", error);
        field_errors
    }
}
