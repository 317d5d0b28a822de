//! [`PreviewHost`] backed by the Slint event loop.
//!
//! Each tile owns one `SlintHost`. Timers are `slint::Timer`s that call back
//! into the animator through a weak reference, and every visual change is a
//! write to the tile's row in the thumbnail model.

use super::carousel::SlideCarousel;
use super::update_row;
use crate::Thumbnail;
use crate::error::{PreviewError, Result};
use crate::gallery::GalleryItem;
use crate::preview::attributes::PreviewSource;
use crate::preview::host::RepeatingTimer;
use crate::preview::{
    CarouselOptions, PreloadTicket, PreviewAnimator, PreviewConfig, PreviewHost,
};
use crate::sprite_cache::{CachedSprite, SpriteCache};
use crate::sprite_loader;
use log::{debug, warn};
use slint::{ModelRc, Timer, TimerMode, VecModel};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::{Rc, Weak};
use std::time::Duration;

pub type SharedAnimator = Rc<RefCell<PreviewAnimator<SlintHost>>>;

pub struct SlintHost {
    row: usize,
    title: String,
    model: Rc<VecModel<Thumbnail>>,
    cache: Rc<RefCell<SpriteCache>>,
    animator: Weak<RefCell<PreviewAnimator<SlintHost>>>,
    slideshow: bool,
    /// Decoded assets of the last completed preload, in request order.
    decoded: Rc<RefCell<Vec<CachedSprite>>>,
}

/// Creates the animator of gallery row `row`.
pub fn bind_animator(
    row: usize,
    item: &GalleryItem,
    model: Rc<VecModel<Thumbnail>>,
    cache: Rc<RefCell<SpriteCache>>,
) -> SharedAnimator {
    let config = PreviewConfig::from_markup(&item.markup);
    let slideshow = config.as_ref().is_ok_and(|config| config.is_slideshow());
    let frame_count = config
        .as_ref()
        .map(|config| config.frame_count.get() as i32)
        .unwrap_or(0);
    let frame_size = match config.as_ref().map(|config| &config.source) {
        Ok(PreviewSource::SpriteSheet(sheet)) => (sheet.frame_width, sheet.frame_height),
        _ => (0, 0),
    };

    update_row(&model, row, |thumbnail| {
        thumbnail.slideshow = slideshow;
        thumbnail.frame_count = frame_count;
        thumbnail.frame_width = i32::try_from(frame_size.0).unwrap_or(i32::MAX);
        thumbnail.frame_height = i32::try_from(frame_size.1).unwrap_or(i32::MAX);
    });

    Rc::new_cyclic(|weak| {
        let host = SlintHost {
            row,
            title: item.title.clone(),
            model,
            cache,
            animator: weak.clone(),
            slideshow,
            decoded: Rc::default(),
        };
        RefCell::new(PreviewAnimator::new(host, config))
    })
}

impl RepeatingTimer for Timer {
    fn cancel(&mut self) {
        self.stop();
    }
}

impl PreviewHost for SlintHost {
    type Timer = Timer;
    type Carousel = SlideCarousel;

    fn start_repeating(&mut self, interval: Duration) -> Timer {
        let timer = Timer::default();
        let animator = self.animator.clone();
        timer.start(TimerMode::Repeated, interval, move || {
            if let Some(animator) = animator.upgrade() {
                animator.borrow_mut().on_frame_tick();
            }
        });
        timer
    }

    fn paint_sprite_offset(&mut self, percent: f32) {
        update_row(&self.model, self.row, |thumbnail| {
            thumbnail.sprite_offset = percent;
        });
    }

    fn mark_ready(&mut self) {
        let images: Vec<slint::Image> = self
            .decoded
            .take()
            .iter()
            .map(sprite_loader::create_slint_image)
            .collect();
        if images.is_empty() {
            warn!("No decoded preview assets for {:?}", self.title);
            return;
        }

        let slideshow = self.slideshow;
        update_row(&self.model, self.row, move |thumbnail| {
            if slideshow {
                thumbnail.slides = ModelRc::new(VecModel::from(images));
            } else if let Some(sprite) = images.into_iter().next() {
                thumbnail.sprite = sprite;
            }
            thumbnail.ready = true;
        });
    }

    fn construct_carousel(
        &mut self,
        options: &CarouselOptions,
    ) -> Result<SlideCarousel> {
        SlideCarousel::construct(self.row, self.model.clone(), options)
    }

    fn preload(&mut self, paths: &[PathBuf], ticket: PreloadTicket) -> Result<()> {
        let requested = paths.to_vec();
        let (hits, missing) = split_cached(&mut self.cache.borrow_mut(), paths);
        debug!(
            "Preloading {} assets for {:?} ({} cached)",
            paths.len(),
            self.title,
            hits.len()
        );

        let cache = self.cache.clone();
        let slot = self.decoded.clone();
        let animator = self.animator.clone();
        // The completion always crosses an await point, so it never runs
        // while the animator is still inside this call.
        slint::spawn_local(async move {
            let decoded = async_std::task::spawn_blocking(move || {
                sprite_loader::decode_all_blocking(&missing)
            })
            .await;

            let outcome = decoded
                .and_then(|sprites| complete_preload(&cache, &requested, hits, sprites))
                .map(|assets| {
                    *slot.borrow_mut() = assets;
                });

            if let Some(animator) = animator.upgrade() {
                animator.borrow_mut().on_preload_complete(ticket, outcome);
            }
        })
        .map_err(|e| PreviewError::AssetLoadFailed(format!("Failed to schedule preload: {}", e)))?;

        Ok(())
    }

    fn diagnostic(&mut self, error: &PreviewError) {
        warn!("Thumbnail {:?} stays static: {}", self.title, error);
    }
}

/// Copies already decoded assets out of the cache and returns them together
/// with the paths still to decode.
fn split_cached(
    cache: &mut SpriteCache,
    paths: &[PathBuf],
) -> (Vec<(PathBuf, CachedSprite)>, Vec<PathBuf>) {
    let mut hits = Vec::new();
    let mut missing = Vec::new();
    for path in paths {
        match cache.get(path) {
            Some(sprite) => hits.push((path.clone(), sprite)),
            None => missing.push(path.clone()),
        }
    }
    (hits, missing)
}

/// Stores freshly decoded assets in the shared cache and orders every asset
/// of the request. The result never depends on what the cache evicts.
fn complete_preload(
    cache: &RefCell<SpriteCache>,
    requested: &[PathBuf],
    hits: Vec<(PathBuf, CachedSprite)>,
    decoded: Vec<(PathBuf, CachedSprite)>,
) -> Result<Vec<CachedSprite>> {
    {
        let mut cache = cache.borrow_mut();
        for (path, sprite) in &decoded {
            cache.put(path.clone(), sprite.clone());
        }
    }

    let by_path: HashMap<PathBuf, CachedSprite> = hits.into_iter().chain(decoded).collect();
    requested
        .iter()
        .map(|path| {
            by_path.get(path).cloned().ok_or_else(|| {
                PreviewError::AssetLoadFailed(format!("{} was not decoded", path.display()))
            })
        })
        .collect()
}
