//! Request-scoped collection of failure messages.
//!
//! Handlers never return business or validation failures as errors. They
//! record a [`Notification`] and keep going (or return early), and the
//! response is shaped at the end from whatever was recorded. See
//! [`crate::response::shape`].
//!
//! A [`Notifier`] lives for exactly one request. The axum extractor below
//! builds a fresh, empty one each time it runs, so two requests can never see
//! each other's messages.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

/// A single validation or business-rule failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    message: String,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Ordered accumulator of [`Notification`]s for one request.
///
/// Deliberately not `Clone`: a notifier is owned by the handler that
/// extracted it.
#[derive(Debug, Default)]
pub struct Notifier {
    notifications: Vec<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notification. No deduplication, no limit.
    pub fn record(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification::new(message));
    }

    /// True iff at least one notification has been recorded.
    pub fn has_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }

    /// Messages in recording order. Does not clear the notifier.
    pub fn all(&self) -> Vec<String> {
        self.notifications
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}

impl<S> FromRequestParts<S> for Notifier
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Notifier::new())
    }
}
