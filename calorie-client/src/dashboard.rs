//! Dashboard summary for the signed-in user.

use calorie_common::LookupResult;

use crate::history::LookupHistory;
use crate::navigation::{require_auth, Router};
use crate::session::SessionState;

/// Number of recent lookups shown on the dashboard.
pub const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub first_name: String,
    pub total_lookups: usize,
    /// Mean of `total_calories` over the history, rounded. 0 when empty.
    pub average_calories: i64,
    /// `total_calories` of the most recent lookup.
    pub latest_calories: Option<f64>,
    pub recent: Vec<LookupResult>,
    /// Lookups not included in `recent`.
    pub more: usize,
}

impl DashboardSummary {
    /// Build the summary, or redirect to login and return `None` when
    /// nobody is signed in.
    pub fn build(
        router: &Router,
        session: &SessionState,
        history: &LookupHistory,
    ) -> Option<Self> {
        if !require_auth(router, session) {
            return None;
        }

        let entries = history.entries();
        let recent: Vec<_> = entries.iter().take(RECENT_LIMIT).cloned().collect();

        Some(Self {
            first_name: session
                .user()
                .map(|u| u.first_name.clone())
                .unwrap_or_default(),
            total_lookups: entries.len(),
            average_calories: average_calories(entries),
            latest_calories: entries.first().map(|e| e.total_calories),
            more: entries.len() - recent.len(),
            recent,
        })
    }

    pub fn greeting(&self) -> String {
        format!("Welcome back, {}!", self.first_name)
    }
}

pub fn average_calories(entries: &[LookupResult]) -> i64 {
    if entries.is_empty() {
        return 0;
    }
    let total: f64 = entries.iter().map(|e| e.total_calories).sum();
    (total / entries.len() as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::View;
    use crate::storage::PersistedStore;
    use calorie_common::User;
    use chrono::Utc;

    fn entry(total: f64) -> LookupResult {
        LookupResult {
            id: uuid::Uuid::new_v4().to_string(),
            dish_name: "dish".to_string(),
            servings: 1.0,
            calories_per_serving: total,
            total_calories: total,
            source: String::new(),
            timestamp: Utc::now(),
        }
    }

    fn signed_in() -> SessionState {
        let mut session = SessionState::restore(PersistedStore::in_memory());
        session.login(
            "tok",
            User {
                id: "1".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            },
        );
        session
    }

    #[test]
    fn test_average_calories() {
        assert_eq!(average_calories(&[]), 0);
        assert_eq!(average_calories(&[entry(100.0), entry(51.0)]), 76);
    }

    #[test]
    fn test_summary_for_signed_in_user() {
        let router = Router::new(View::Dashboard);
        let mut history = LookupHistory::restore(PersistedStore::in_memory());
        for total in [100.0, 200.0, 300.0, 400.0, 500.0] {
            history.add_to_history(entry(total));
        }

        let summary = DashboardSummary::build(&router, &signed_in(), &history).unwrap();
        assert_eq!(summary.greeting(), "Welcome back, Ada!");
        assert_eq!(summary.total_lookups, 5);
        assert_eq!(summary.average_calories, 300);
        assert_eq!(summary.latest_calories, Some(500.0));
        assert_eq!(summary.recent.len(), 3);
        assert_eq!(summary.recent[0].total_calories, 500.0);
        assert_eq!(summary.more, 2);
    }

    #[test]
    fn test_empty_history_has_no_latest() {
        let router = Router::new(View::Dashboard);
        let history = LookupHistory::restore(PersistedStore::in_memory());

        let summary = DashboardSummary::build(&router, &signed_in(), &history).unwrap();
        assert_eq!(summary.total_lookups, 0);
        assert_eq!(summary.average_calories, 0);
        assert_eq!(summary.latest_calories, None);
        assert!(summary.recent.is_empty());
        assert_eq!(summary.more, 0);
    }

    #[test]
    fn test_signed_out_redirects() {
        let router = Router::new(View::Dashboard);
        let session = SessionState::restore(PersistedStore::in_memory());
        let history = LookupHistory::restore(PersistedStore::in_memory());

        assert!(DashboardSummary::build(&router, &session, &history).is_none());
        assert_eq!(router.current(), View::Login);
    }
}
