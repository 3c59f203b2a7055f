use std::time::Duration;

use crate::action::Action;
use crate::state::AppState;

/// Picture edits closer together than this share one undo step
pub const DEFAULT_HISTORY_WINDOW: Duration = Duration::from_millis(1000);

/// Folds actions into new editor states.
///
/// Picture edits that arrive within `window` of the last recorded step are
/// grouped: only the first of them pushes the previous picture onto the
/// history, so a whole drag undoes in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryReducer {
    pub window: Duration,
}

impl Default for HistoryReducer {
    fn default() -> Self {
        Self {
            window: DEFAULT_HISTORY_WINDOW,
        }
    }
}

impl HistoryReducer {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    /// Compute the state that follows `state` once `action` is applied at `now`
    pub fn next_state(&self, state: &AppState, action: Action, now: Duration) -> AppState {
        if action.undo {
            let mut history = state.history.clone();
            return match history.pop_front() {
                Some(picture) => AppState {
                    picture,
                    history,
                    history_timestamp: Some(now),
                    ..state.clone()
                },
                None => state.clone(),
            };
        }

        let opens_step = action.picture.is_some() && self.window_elapsed(state, now);

        let mut next = state.merge(action);
        if opens_step {
            next.history.push_front(state.picture.clone());
            next.history_timestamp = Some(now);
        }
        next
    }

    fn window_elapsed(&self, state: &AppState, now: Duration) -> bool {
        match state.history_timestamp {
            Some(last) => now.saturating_sub(last) > self.window,
            None => true,
        }
    }
}

/// [`HistoryReducer::next_state`] with the default window
pub fn next_state(state: &AppState, action: Action, now: Duration) -> AppState {
    HistoryReducer::default().next_state(state, action, now)
}
