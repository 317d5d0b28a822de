//! State management for the gallery window.
//!
//! Lives on the UI thread only; shared between callbacks through `Rc`.

use crate::Thumbnail;
use crate::config::SPRITE_CACHE_CAPACITY;
use crate::sprite_cache::SpriteCache;
use crate::ui::slint_host::SharedAnimator;
use crate::ui::viewport::VisibilityTracker;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use slint::VecModel;

/// Application-wide state container.
pub struct AppState {
    /// One row per gallery tile.
    pub thumbnails: Rc<VecModel<Thumbnail>>,
    /// Animator of each row, empty while animations are disabled.
    pub animators: RefCell<Vec<SharedAnimator>>,
    /// LRU cache for decoded sprite sheets and slides.
    pub sprite_cache: Rc<RefCell<SpriteCache>>,
    pub visibility: RefCell<VisibilityTracker>,
    pub animations_enabled: Cell<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            thumbnails: Rc::new(VecModel::default()),
            animators: RefCell::new(Vec::new()),
            sprite_cache: Rc::new(RefCell::new(SpriteCache::new(SPRITE_CACHE_CAPACITY))),
            visibility: RefCell::new(VisibilityTracker::new()),
            animations_enabled: Cell::new(true),
        }
    }

    /// Animator of tile `row`, if that tile is animated.
    pub fn animator(&self, row: usize) -> Option<SharedAnimator> {
        self.animators.borrow().get(row).cloned()
    }

    /// Destroys every animator and forgets which tiles were visible.
    pub fn destroy_all(&self) {
        let animators = std::mem::take(&mut *self.animators.borrow_mut());
        for animator in &animators {
            animator.borrow_mut().destroy();
        }
        self.visibility.borrow_mut().reset();
    }
}
