//! Action log: every dispatched action goes to `tracing`, in summary form.

use tui_dispatch::{ActionSummary, Middleware};

use crate::action::Action;

/// Logs each action after the reducer ran. Animation frames only show up
/// at `trace` level; everything else is `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMiddleware;

impl Middleware<Action> for TracingMiddleware {
    fn before(&mut self, _action: &Action) {}

    fn after(&mut self, action: &Action, state_changed: bool) {
        if matches!(action, Action::Tick(_)) {
            tracing::trace!(state_changed, "tick");
            return;
        }
        tracing::debug!(
            action = %action.summary(),
            category = action.category().unwrap_or("uncategorized"),
            state_changed,
            "action processed"
        );
    }
}
