//! Form controllers: validate input, call the gateway, write the result
//! into state and queue a notification.
//!
//! Each controller owns a busy flag. A submit that arrives while the
//! previous one is still awaiting the service is dropped.

mod auth;
mod lookup;

#[cfg(test)]
mod fake;

pub use auth::AuthForm;
pub use lookup::LookupForm;

use std::cell::Cell;

use crate::error::ApiError;
use crate::validation::FieldErrors;

/// Result of one form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    Completed(T),
    /// Rejected by client-side validation; nothing was sent.
    Invalid(FieldErrors),
    /// The service call failed; the user has been notified.
    Failed(ApiError),
    /// Another submission is still in flight.
    Busy,
}

impl<T> SubmitOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed(_))
    }
}

/// Holds a busy flag for the duration of a submission.
struct BusyGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
