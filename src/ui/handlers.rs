//! Event handlers for UI callbacks.
//!
//! Hover and scroll callbacks drive the animators directly on the UI thread.
//! Opening a manifest uses `slint::spawn_local` because `AsyncFileDialog` must
//! run on the main thread.

use super::gallery_view::show_gallery;
use super::viewport::{Viewport, visible_tiles};
use crate::config::VIEWPORT_MARGIN;
use crate::gallery;
use crate::state::AppState;
use log::debug;
use rfd::AsyncFileDialog;
use slint::ComponentHandle;
use std::path::PathBuf;
use std::rc::Rc;

/// Loads the manifest at `path` off the UI thread and shows it.
pub fn open_gallery(ui: slint::Weak<crate::AppWindow>, state: Rc<AppState>, path: PathBuf) {
    let _ = slint::spawn_local(async move {
        let result =
            async_std::task::spawn_blocking(move || gallery::load_manifest(&path)).await;

        let Some(ui) = ui.upgrade() else {
            return;
        };
        match result {
            Ok(gallery) => show_gallery(&ui, &state, gallery),
            Err(e) => super::set_error_with_prefix(&ui, "Failed to open gallery", e.to_string()),
        }
    });
}

/// Sets up all UI event handlers for the application.
pub fn setup_handlers(ui: &crate::AppWindow, state: Rc<AppState>) {
    // Hover handler
    ui.global::<crate::Logic>().on_hover_changed({
        let state = state.clone();
        move |row, hovering| {
            let Some(animator) = usize::try_from(row).ok().and_then(|row| state.animator(row))
            else {
                return;
            };
            let mut animator = animator.borrow_mut();
            if hovering {
                animator.on_pointer_enter();
            } else {
                animator.on_pointer_leave();
            }
            debug!(
                "Tile {} hover={} frame={} timer={} asset={:?}",
                row,
                hovering,
                animator.state().current_frame,
                animator.state().has_timer(),
                animator.asset_phase()
            );
        }
    });

    // Scroll / resize handler
    ui.global::<crate::Logic>().on_viewport_changed({
        let state = state.clone();
        move |scroll_top, height, tile_height, columns| {
            let viewport = Viewport {
                scroll_top,
                height,
                tile_height,
                columns: usize::try_from(columns).unwrap_or(1),
            };
            let count = state.animators.borrow().len();
            let range = visible_tiles(&viewport, count, VIEWPORT_MARGIN);
            let changes = state.visibility.borrow_mut().update(range);

            for (row, visible) in changes {
                if let Some(animator) = state.animator(row) {
                    animator.borrow_mut().on_visibility_change(visible);
                }
            }
        }
    });

    // Manifest selection handler
    ui.global::<crate::Logic>().on_open_gallery({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || {
            let ui_handle = ui_handle.clone();
            let state = state.clone();
            let _ = slint::spawn_local(async move {
                let Some(file_handle) = AsyncFileDialog::new()
                    .add_filter("Gallery manifest", &["toml"])
                    .pick_file()
                    .await
                else {
                    if let Some(ui) = ui_handle.upgrade() {
                        super::set_status(&ui, "No gallery selected");
                    }
                    return;
                };

                open_gallery(ui_handle, state, file_handle.path().to_path_buf());
            });
        }
    });
}
