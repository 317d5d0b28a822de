//! UI module binding the gallery window to the preview animators.
//!
//! Threading model:
//! - everything touching an animator or the thumbnail model runs on the Slint UI thread
//! - `slint::spawn_local` + `async_std::task::spawn_blocking`: decoding and manifest
//!   reads, resumed on the UI thread once the blocking work finishes
//! - `rayon`: parallel decode of the slides of one slideshow

pub mod carousel;
pub mod gallery_view;
pub mod handlers;
pub mod slint_host;
pub mod viewport;

use crate::Thumbnail;
use log::error;
use slint::{ComponentHandle, Model, VecModel};

pub use handlers::setup_handlers;

/// Applies `update` to one row of the thumbnail model, if it still exists.
pub fn update_row(model: &VecModel<Thumbnail>, row: usize, update: impl FnOnce(&mut Thumbnail)) {
    if let Some(mut thumbnail) = model.row_data(row) {
        update(&mut thumbnail);
        model.set_row_data(row, thumbnail);
    }
}

/// Shows a status line in the toolbar.
pub fn set_status(ui: &crate::AppWindow, message: &str) {
    ui.global::<crate::GalleryState>()
        .set_status_message(message.into());
}

/// Logs the error and shows it in the toolbar with a prefix.
pub fn set_error_with_prefix(ui: &crate::AppWindow, prefix: &str, error: String) {
    let error_message = format!("{}: {}", prefix, error);
    error!("{}", error_message);
    set_status(ui, &error_message);
}
