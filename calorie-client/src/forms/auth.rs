//! Sign-in and sign-up form.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use calorie_common::{AuthResponse, LoginRequest, RegisterRequest, User};

use crate::error::ApiResult;
use crate::gateway::CalorieApi;
use crate::navigation::{Router, View};
use crate::notify::Notifications;
use crate::session::SharedSession;
use crate::validation::{validate_login, validate_register, FieldErrors};

use super::{BusyGuard, SubmitOutcome};

const AUTH_FAILED: &str = "Something went wrong";

pub struct AuthForm {
    api: Rc<dyn CalorieApi>,
    session: SharedSession,
    router: Rc<Router>,
    notifications: Rc<Notifications>,
    busy: Cell<bool>,
}

impl AuthForm {
    pub fn new(
        api: Rc<dyn CalorieApi>,
        session: SharedSession,
        router: Rc<Router>,
        notifications: Rc<Notifications>,
    ) -> Self {
        Self {
            api,
            session,
            router,
            notifications,
            busy: Cell::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub async fn submit_login(&self, request: LoginRequest) -> SubmitOutcome<User> {
        let validation = validate_login(&request);
        self.submit(validation, "Welcome back!", || self.api.login(&request))
            .await
    }

    pub async fn submit_register(&self, request: RegisterRequest) -> SubmitOutcome<User> {
        let validation = validate_register(&request);
        self.submit(validation, "Account created!", || self.api.register(&request))
            .await
    }

    async fn submit<F, Fut>(
        &self,
        validation: Result<(), FieldErrors>,
        welcome: &str,
        call: F,
    ) -> SubmitOutcome<User>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<AuthResponse>>,
    {
        if let Err(errors) = validation {
            return SubmitOutcome::Invalid(errors);
        }
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            return SubmitOutcome::Busy;
        };

        match call().await {
            Ok(AuthResponse { token, user }) => {
                self.session.borrow_mut().login(token, user.clone());
                self.notifications.success(welcome);
                self.router.navigate(View::Dashboard);
                SubmitOutcome::Completed(user)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Authentication request failed");
                let message = match err.user_message() {
                    "" => AUTH_FAILED.to_string(),
                    msg => msg.to_string(),
                };
                self.notifications.error(message);
                SubmitOutcome::Failed(err)
            }
        }
    }
}
