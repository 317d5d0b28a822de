//! Hover preview state machine.
//!
//! One [`PreviewAnimator`] per thumbnail. The host calls `on_pointer_enter`,
//! `on_pointer_leave`, `on_visibility_change`, `on_frame_tick` and
//! `on_preload_complete`; the animator answers through its [`PreviewHost`].

use super::attributes::{PreviewConfig, PreviewSource};
use super::frame::{compute_frame_position, next_frame};
use super::host::{Carousel, CarouselOptions, PreloadTicket, PreviewHost, RepeatingTimer};
use crate::config::SLIDE_TRANSITION;
use crate::error::PreviewError;
use log::debug;
use std::num::NonZeroUsize;

/// Progress of the out-of-band asset fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Mutable per-thumbnail state.
pub struct AnimatorState<T> {
    pub is_hovering: bool,
    /// Carousel built (slideshow only).
    pub is_initialized: bool,
    pub current_frame: usize,
    /// Frame the surface currently shows.
    painted_frame: usize,
    timer: Option<T>,
}

impl<T> Default for AnimatorState<T> {
    fn default() -> Self {
        Self {
            is_hovering: false,
            is_initialized: false,
            current_frame: 0,
            painted_frame: 0,
            timer: None,
        }
    }
}

impl<T> AnimatorState<T> {
    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }
}

pub struct PreviewAnimator<H: PreviewHost> {
    host: H,
    config: Option<PreviewConfig>,
    state: AnimatorState<H::Timer>,
    carousel: Option<H::Carousel>,
    asset: AssetPhase,
    pending_ticket: Option<PreloadTicket>,
    next_ticket: u64,
    degraded: bool,
    destroyed: bool,
}

impl<H: PreviewHost> PreviewAnimator<H> {
    /// Binds an animator to its host.
    ///
    /// An invalid config is reported once and leaves the thumbnail static.
    pub fn new(mut host: H, config: Result<PreviewConfig, PreviewError>) -> Self {
        let config = match config {
            Ok(config) => {
                debug!(
                    "Preview bound: {} frames every {:?}",
                    config.frame_count, config.frame_interval
                );
                Some(config)
            }
            Err(error) => {
                host.diagnostic(&error);
                None
            }
        };

        Self {
            degraded: config.is_none(),
            host,
            config,
            state: AnimatorState::default(),
            carousel: None,
            asset: AssetPhase::Idle,
            pending_ticket: None,
            next_ticket: 0,
            destroyed: false,
        }
    }

    /// Whether hovering can still animate this thumbnail.
    pub fn is_active(&self) -> bool {
        !self.degraded && !self.destroyed
    }

    pub fn state(&self) -> &AnimatorState<H::Timer> {
        &self.state
    }

    pub fn asset_phase(&self) -> AssetPhase {
        self.asset
    }

    #[cfg(test)]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn on_pointer_enter(&mut self) {
        if !self.is_active() || self.state.is_hovering {
            return;
        }

        self.state.is_hovering = true;
        self.state.current_frame = 0;
        self.prepare();

        let Some((frame_count, interval)) = self
            .config
            .as_ref()
            .map(|config| (config.frame_count, config.frame_interval))
        else {
            return;
        };
        if !self.is_active() || frame_count.get() < 2 {
            return;
        }

        self.cancel_timer();
        self.state.timer = Some(self.host.start_repeating(interval));
    }

    pub fn on_pointer_leave(&mut self) {
        if self.destroyed {
            return;
        }

        self.state.is_hovering = false;
        self.cancel_timer();
        self.state.current_frame = 0;
        if self.state.painted_frame != 0 {
            self.paint(0);
        }
    }

    /// Entering the viewport runs the same one-time preparation as a hover.
    pub fn on_visibility_change(&mut self, visible: bool) {
        if visible && self.is_active() {
            self.prepare();
        }
    }

    /// Called by the host timer; advances one frame.
    pub fn on_frame_tick(&mut self) {
        if !self.is_active() || !self.state.is_hovering || self.state.timer.is_none() {
            return;
        }
        let Some(frame_count) = self.frame_count() else {
            return;
        };

        self.state.current_frame = next_frame(self.state.current_frame, frame_count);
        self.paint(self.state.current_frame);
    }

    /// Completion of a fetch started through `PreviewHost::preload`.
    pub fn on_preload_complete(&mut self, ticket: PreloadTicket, result: Result<(), PreviewError>) {
        if self.destroyed || self.pending_ticket != Some(ticket) {
            debug!("Ignoring stale preload completion {:?}", ticket);
            return;
        }
        self.pending_ticket = None;

        match result {
            Ok(()) => {
                self.asset = AssetPhase::Ready;
                self.host.mark_ready();
            }
            Err(error) => self.fail_asset(error),
        }
    }

    /// Cancels the timer and releases the carousel. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.state.is_hovering = false;
        self.pending_ticket = None;
        self.cancel_timer();

        if let Some(mut carousel) = self.carousel.take() {
            carousel.destroy();
        }
        self.state.is_initialized = false;
    }

    fn frame_count(&self) -> Option<NonZeroUsize> {
        self.config.as_ref().map(|config| config.frame_count)
    }

    /// One-time setup: preload and, for slideshows, carousel construction.
    fn prepare(&mut self) {
        if self.asset == AssetPhase::Idle {
            self.request_preload();
        }

        let wants_carousel = self
            .config
            .as_ref()
            .is_some_and(|config| config.is_slideshow());
        if wants_carousel && self.is_active() && !self.state.is_initialized {
            self.build_carousel();
        }
    }

    fn request_preload(&mut self) {
        let Some(paths) = self.config.as_ref().map(|config| config.asset_paths()) else {
            return;
        };

        let ticket = PreloadTicket(self.next_ticket);
        self.next_ticket += 1;
        self.asset = AssetPhase::Loading;
        self.pending_ticket = Some(ticket);

        if let Err(error) = self.host.preload(&paths, ticket) {
            self.pending_ticket = None;
            self.fail_asset(error);
        }
    }

    fn build_carousel(&mut self) {
        let Some(PreviewSource::SlideShow { slides }) =
            self.config.as_ref().map(|config| &config.source)
        else {
            return;
        };

        let options = CarouselOptions::for_slides(slides.clone());
        match self.host.construct_carousel(&options) {
            Ok(carousel) => {
                debug!("Carousel initialized with {} slides", options.slides.len());
                self.carousel = Some(carousel);
                self.state.is_initialized = true;
            }
            Err(error) => self.degrade(error),
        }
    }

    fn fail_asset(&mut self, error: PreviewError) {
        self.asset = AssetPhase::Failed;
        self.degrade(error);
    }

    /// Falls back to the static image. Only touches the surface while hovered.
    fn degrade(&mut self, error: PreviewError) {
        self.degraded = true;
        self.host.diagnostic(&error);

        if self.state.is_hovering {
            self.cancel_timer();
            self.state.current_frame = 0;
            if self.state.painted_frame != 0 {
                self.paint(0);
            }
        }
    }

    fn paint(&mut self, index: usize) {
        let Some(config) = self.config.as_ref() else {
            return;
        };

        match &config.source {
            PreviewSource::SpriteSheet(_) => {
                let percent = compute_frame_position(index, config.frame_count);
                self.host.paint_sprite_offset(percent);
            }
            PreviewSource::SlideShow { .. } => match self.carousel.as_mut() {
                Some(carousel) => carousel.go_to_slide(index, SLIDE_TRANSITION),
                None => return,
            },
        }
        self.state.painted_frame = index;
    }

    fn cancel_timer(&mut self) {
        if let Some(mut timer) = self.state.timer.take() {
            timer.cancel();
        }
    }
}

impl<H: PreviewHost> Drop for PreviewAnimator<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}
