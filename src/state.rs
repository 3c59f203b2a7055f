use egui::Color32;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crate::action::Action;
use crate::config::EditorConfig;
use crate::history::HistoryReducer;
use crate::picture::{Picture, PictureRef};
use crate::tools::ToolName;
use crate::util::time::{Clock, SystemClock};

/// Everything the editor knows about the current session.
///
/// Replaced as a whole on every dispatch; never modified in place.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub tool: ToolName,
    pub color: Color32,
    pub picture: PictureRef,
    /// Earlier pictures, most recent first
    pub history: VecDeque<PictureRef>,
    /// When the current undo step was opened; `None` before the first edit
    pub history_timestamp: Option<Duration>,
}

impl AppState {
    pub fn new(tool: ToolName, color: Color32, picture: impl Into<PictureRef>) -> Self {
        Self {
            tool,
            color,
            picture: picture.into(),
            history: VecDeque::new(),
            history_timestamp: None,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(
            config.tool,
            config.color,
            Picture::empty(config.width, config.height, config.background),
        )
    }

    /// Shallow merge: fields set in `action` replace ours
    pub fn merge(&self, action: Action) -> Self {
        Self {
            tool: action.tool.unwrap_or(self.tool),
            color: action.color.unwrap_or(self.color),
            picture: action.picture.unwrap_or_else(|| self.picture.clone()),
            history: self.history.clone(),
            history_timestamp: self.history_timestamp,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

/// Owns the editor state and applies actions to it.
///
/// The UI only reads [`EditorContext::state`]; all changes go through
/// [`EditorContext::dispatch`].
pub struct EditorContext {
    state: Arc<AppState>,
    reducer: HistoryReducer,
    clock: Box<dyn Clock>,
}

impl EditorContext {
    pub fn new(state: AppState, reducer: HistoryReducer, clock: Box<dyn Clock>) -> Self {
        Self {
            state: Arc::new(state),
            reducer,
            clock,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(
            AppState::from_config(config),
            HistoryReducer::new(config.history_window),
            Box::new(SystemClock),
        )
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Apply one action and replace the current state with the result
    pub fn dispatch(&mut self, action: Action) {
        log::debug!("dispatch {}", action.describe());

        let next = self.reducer.next_state(&self.state, action, self.clock.now());
        if next.history.len() != self.state.history.len() {
            log::debug!("history depth {} -> {}", self.state.history.len(), next.history.len());
        }
        self.state = Arc::new(next);
    }
}

impl std::fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorContext")
            .field("state", &self.state)
            .field("reducer", &self.reducer)
            .finish()
    }
}
