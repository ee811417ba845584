//! Application context shared by the presentation layer.

use std::rc::Rc;

use crate::config::Config;
use crate::forms::{AuthForm, LookupForm};
use crate::gateway::{ApiClient, CalorieApi};
use crate::history::{LookupHistory, SharedHistory};
use crate::navigation::{Router, View};
use crate::notify::Notifications;
use crate::session::{SessionState, SharedSession};
use crate::storage::PersistedStore;

/// Everything a view needs: state handles, the router and the forms.
///
/// Thread-confined; all handles are `Rc`.
pub struct AppState {
    pub config: Config,
    pub session: SharedSession,
    pub history: SharedHistory,
    pub router: Rc<Router>,
    pub notifications: Rc<Notifications>,
    pub api: Rc<ApiClient>,
    pub auth_form: AuthForm,
    pub lookup_form: LookupForm,
}

impl AppState {
    /// Restore persisted state from the configured directory and wire up
    /// the gateway client.
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let store = PersistedStore::on_disk(config.storage.resolve_dir());
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: PersistedStore) -> Result<Self, reqwest::Error> {
        let session = SessionState::shared(store.clone());
        let history = LookupHistory::shared(store);
        let router = Rc::new(Router::new(View::Home));
        let notifications = Rc::new(Notifications::new());
        let api = Rc::new(ApiClient::new(&config.api, session.clone(), router.clone())?);

        let dyn_api: Rc<dyn CalorieApi> = api.clone();
        let auth_form = AuthForm::new(
            dyn_api.clone(),
            session.clone(),
            router.clone(),
            notifications.clone(),
        );
        let lookup_form = LookupForm::new(dyn_api, history.clone(), notifications.clone());

        Ok(Self {
            config,
            session,
            history,
            router,
            notifications,
            api,
            auth_form,
            lookup_form,
        })
    }
}
