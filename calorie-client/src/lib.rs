//! Calorie Tracker client core.
//!
//! Session and lookup-history state persisted to named slots, kept in
//! sync with the calorie REST service through a bearer-token gateway.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod forms;
pub mod gateway;
pub mod history;
pub mod navigation;
pub mod notify;
pub mod session;
pub mod state;
pub mod storage;
pub mod validation;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use forms::{AuthForm, LookupForm, SubmitOutcome};
pub use gateway::{ApiClient, CalorieApi};
pub use history::{LookupHistory, SharedHistory, MAX_HISTORY};
pub use navigation::{Router, View};
pub use notify::Notifications;
pub use session::{Session, SessionState, SharedSession};
pub use state::AppState;
pub use storage::{PersistedStore, StorageBackend};
