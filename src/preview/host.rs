//! Capabilities the surrounding UI shell provides to an animator.
//!
//! The animator never talks to an event loop, a widget toolkit or the file
//! system itself. Everything with a side effect goes through [`PreviewHost`].

use crate::config::SLIDE_TRANSITION;
use crate::error::PreviewError;
use log::warn;
use std::path::PathBuf;
use std::time::Duration;

/// Handle to a repeating callback scheduled on the host event loop.
///
/// Implementations must also stop the callback when dropped.
pub trait RepeatingTimer {
    fn cancel(&mut self);
}

/// Carousel widget used by slideshow previews. Treated as opaque.
pub trait Carousel {
    /// Transitions to slide `index` over `transition`.
    fn go_to_slide(&mut self, index: usize, transition: Duration);
    /// Releases the widget. Called at most once.
    fn destroy(&mut self);
}

/// Options handed to the carousel factory.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselOptions {
    pub slides: Vec<PathBuf>,
    pub looping: bool,
    pub transition: Duration,
}

impl CarouselOptions {
    pub fn for_slides(slides: Vec<PathBuf>) -> Self {
        Self {
            slides,
            looping: true,
            transition: SLIDE_TRANSITION,
        }
    }
}

/// Identifies one preload request so late completions can be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadTicket(pub(crate) u64);

/// Host side of one thumbnail.
pub trait PreviewHost {
    type Timer: RepeatingTimer;
    type Carousel: Carousel;

    /// Schedules `PreviewAnimator::on_frame_tick` every `interval`.
    fn start_repeating(&mut self, interval: Duration) -> Self::Timer;

    /// Moves the sprite sheet so the frame at `percent` of its width is shown.
    fn paint_sprite_offset(&mut self, percent: f32);

    /// Flags the thumbnail as fully loaded. Cosmetic only.
    fn mark_ready(&mut self);

    fn construct_carousel(
        &mut self,
        options: &CarouselOptions,
    ) -> Result<Self::Carousel, PreviewError>;

    /// Starts fetching `paths` out of band. The result must be reported later
    /// through `PreviewAnimator::on_preload_complete` with the same ticket,
    /// never from inside this call.
    fn preload(&mut self, paths: &[PathBuf], ticket: PreloadTicket) -> Result<(), PreviewError>;

    /// Advisory report of a degraded thumbnail.
    fn diagnostic(&mut self, error: &PreviewError) {
        warn!("Thumbnail preview disabled: {}", error);
    }
}
