//! Populates the thumbnail grid from a loaded gallery.

use super::slint_host::bind_animator;
use crate::Thumbnail;
use crate::gallery::Gallery;
use crate::state::AppState;
use log::{info, warn};
use slint::{ComponentHandle, Image, ModelRc};
use std::rc::Rc;

fn load_static_image(item: &crate::gallery::GalleryItem) -> Image {
    Image::load_from_path(&item.static_image).unwrap_or_else(|_| {
        warn!(
            "Failed to load static image {} for {:?}",
            item.static_image.display(),
            item.title
        );
        Image::default()
    })
}

/// Replaces the current gallery with `gallery`.
///
/// Previous animators are destroyed first, so no timer of the old gallery
/// can write into the new rows.
pub fn show_gallery(ui: &crate::AppWindow, state: &Rc<AppState>, gallery: Gallery) {
    state.destroy_all();

    let rows: Vec<Thumbnail> = gallery
        .items
        .iter()
        .map(|item| Thumbnail {
            title: item.title.as_str().into(),
            static_image: load_static_image(item),
            ..Default::default()
        })
        .collect();
    state.thumbnails.set_vec(rows);

    ui.global::<crate::GalleryState>()
        .set_thumbnails(ModelRc::from(state.thumbnails.clone()));

    if state.animations_enabled.get() {
        let animators = gallery
            .items
            .iter()
            .enumerate()
            .map(|(row, item)| {
                bind_animator(
                    row,
                    item,
                    state.thumbnails.clone(),
                    state.sprite_cache.clone(),
                )
            })
            .collect::<Vec<_>>();

        let active = animators
            .iter()
            .filter(|animator| animator.borrow().is_active())
            .count();
        info!("Initialized {} animated thumbnails", active);
        *state.animators.borrow_mut() = animators;
    } else {
        info!("Animated thumbnails disabled, showing static images only");
    }

    if gallery.is_empty() {
        super::set_status(ui, "Gallery is empty");
    } else {
        super::set_status(ui, &format!("{} thumbnails", gallery.len()));
    }
    ui.invoke_refresh_viewport();
}
