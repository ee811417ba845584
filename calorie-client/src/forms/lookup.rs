//! Calorie lookup form.

use std::cell::Cell;
use std::rc::Rc;

use calorie_common::{LookupResult, MealRequest};

use crate::error::ApiError;
use crate::gateway::{CalorieApi, LOOKUP_FAILED};
use crate::history::SharedHistory;
use crate::notify::Notifications;
use crate::validation::validate_meal;

use super::{BusyGuard, SubmitOutcome};

const LOOKUP_SUCCEEDED: &str = "Got the calories!";

pub struct LookupForm {
    api: Rc<dyn CalorieApi>,
    history: SharedHistory,
    notifications: Rc<Notifications>,
    busy: Cell<bool>,
}

impl LookupForm {
    pub fn new(
        api: Rc<dyn CalorieApi>,
        history: SharedHistory,
        notifications: Rc<Notifications>,
    ) -> Self {
        Self {
            api,
            history,
            notifications,
            busy: Cell::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Validate, look the dish up, and record the result.
    ///
    /// On success the result becomes the current one and is prepended to
    /// the history once. On failure the message lands in the history's
    /// last error and in a notification.
    pub async fn submit(&self, request: MealRequest) -> SubmitOutcome<LookupResult> {
        if let Err(errors) = validate_meal(&request) {
            return SubmitOutcome::Invalid(errors);
        }
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            tracing::debug!("Lookup already in flight, ignoring submit");
            return SubmitOutcome::Busy;
        };

        self.history.borrow_mut().clear_error();
        tracing::info!(dish = %request.dish_name, servings = request.servings, "Looking up calories");

        match self.api.lookup(&request).await {
            Ok(response) => {
                let result = LookupResult::from_response(&response);
                {
                    let mut history = self.history.borrow_mut();
                    history.set_current_result(result.clone());
                    history.add_to_history(result.clone());
                }
                self.notifications.success(LOOKUP_SUCCEEDED);
                SubmitOutcome::Completed(result)
            }
            Err(err) => {
                tracing::warn!(error = %err, status = ?err.status(), "Calorie lookup failed");
                let message = failure_message(&err);
                self.history.borrow_mut().set_error(message.clone());
                self.notifications.error(message);
                SubmitOutcome::Failed(err)
            }
        }
    }
}

/// Text shown for a failed lookup. Without a response there is nothing
/// specific to say.
fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Network(_) => LOOKUP_FAILED.to_string(),
        other => match other.user_message() {
            "" => LOOKUP_FAILED.to_string(),
            msg => msg.to_string(),
        },
    }
}
