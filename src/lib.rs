#![warn(clippy::all, rust_2018_idioms)]

pub mod action;
pub mod app;
pub mod color;
pub mod config;
pub mod file_handler;
pub mod history;
pub mod input;
pub mod io;
pub mod panels;
pub mod picture;
pub mod renderer;
pub mod state;
pub mod tools;
pub mod util;

pub use action::Action;
pub use app::PixelEditorApp;
pub use config::EditorConfig;
pub use history::{HistoryReducer, next_state};
pub use picture::{Picture, PictureError, PictureRef, PixelEdit, Point};
pub use renderer::Renderer;
pub use state::{AppState, EditorContext};
pub use tools::{ToolName, ToolSession};
