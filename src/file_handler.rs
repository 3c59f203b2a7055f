use eframe::egui;
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};

use crate::io::{ImportError, decode_picture};
use crate::picture::Picture;

/// Extensions offered by the open dialog
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Collects files the user picked or dropped onto the window and decodes
/// them into pictures
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
    max_import_size: u32,
    // Completed picks, in completion order
    completed_tx: UnboundedSender<Result<Picture, ImportError>>,
    completed_rx: UnboundedReceiver<Result<Picture, ImportError>>,
}

impl FileHandler {
    pub fn new(max_import_size: u32) -> Self {
        let (completed_tx, completed_rx) = unbounded();
        Self {
            dropped_files: Vec::new(),
            max_import_size,
            completed_tx,
            completed_rx,
        }
    }

    /// Ask the user for an image file.
    ///
    /// The decoded picture shows up in [`FileHandler::completed_imports`];
    /// cancelling the dialog produces nothing.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_file_dialog(&self, ctx: &egui::Context) {
        let Some(path) = rfd::FileDialog::new().add_filter("Images", IMAGE_EXTENSIONS).pick_file() else {
            log::info!("Open dialog cancelled");
            return;
        };

        log::info!("Importing image from path: {}", path.display());
        self.complete(crate::io::load_picture(&path, self.max_import_size));
        ctx.request_repaint();
    }

    /// Ask the user for an image file.
    ///
    /// The browser dialog resolves on a later frame; the decoded picture shows
    /// up in [`FileHandler::completed_imports`]. Cancelling produces nothing.
    #[cfg(target_arch = "wasm32")]
    pub fn open_file_dialog(&self, ctx: &egui::Context) {
        let completed = self.completed_tx.clone();
        let max_import_size = self.max_import_size;
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let Some(file) = rfd::AsyncFileDialog::new()
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
                .await
            else {
                log::info!("Open dialog cancelled");
                return;
            };

            let bytes = file.read().await;
            log::info!("Importing image from memory: {} ({} bytes)", file.file_name(), bytes.len());
            if completed.unbounded_send(decode_picture(&bytes, max_import_size)).is_err() {
                log::warn!("Editor closed before {} finished loading", file.file_name());
            }
            ctx.request_repaint();
        });
    }

    /// Hand a finished import to the next frame
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub(crate) fn complete(&self, result: Result<Picture, ImportError>) {
        if self.completed_tx.unbounded_send(result).is_err() {
            log::warn!("Import finished after the editor shut down");
        }
    }

    /// Imports that finished since the last call, oldest first
    pub fn completed_imports(&mut self) -> Vec<Result<Picture, ImportError>> {
        let mut results = Vec::new();
        while let Ok(Some(result)) = self.completed_rx.try_next() {
            results.push(result);
        }
        results
    }

    /// Pick up files dropped this frame.
    /// Returns true if any were found.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
            }
        });
        !self.dropped_files.is_empty()
    }

    /// Decode the pending dropped files, in drop order.
    ///
    /// Files without any accessible data are skipped.
    pub fn process_dropped_files(&mut self) -> Vec<Result<Picture, ImportError>> {
        let mut pictures = Vec::new();

        for file in self.dropped_files.drain(..) {
            let file_name = if let Some(path) = &file.path {
                path.display().to_string()
            } else if !file.name.is_empty() {
                file.name.clone()
            } else {
                "unknown".to_owned()
            };

            if let Some(bytes) = &file.bytes {
                log::info!("Importing image from memory: {} ({} bytes)", file_name, bytes.len());
                pictures.push(decode_picture(bytes, self.max_import_size));
            } else if let Some(path) = &file.path {
                #[cfg(not(target_arch = "wasm32"))]
                {
                    log::info!("Importing image from path: {}", path.display());
                    pictures.push(crate::io::load_picture(path, self.max_import_size));
                }

                #[cfg(target_arch = "wasm32")]
                {
                    log::warn!("File path access not supported on WASM: {}", path.display());
                }
            } else {
                log::warn!("Dropped file has no accessible data: {}", file_name);
            }
        }

        pictures
    }

    /// Darken the window while files are dragged over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        let hovered = ctx.input(|i| {
            i.raw
                .hovered_files
                .iter()
                .map(|file| match &file.path {
                    Some(path) => path.display().to_string(),
                    None => file.mime.clone(),
                })
                .collect::<Vec<_>>()
        });
        if hovered.is_empty() {
            return;
        }

        let text = format!("Drop to load:\n{}", hovered.join("\n"));
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(20.0),
            Color32::WHITE,
        );
    }
}
