//! Virtual-time host used by the animator tests.

use super::animator::PreviewAnimator;
use super::host::{Carousel, CarouselOptions, PreloadTicket, PreviewHost, RepeatingTimer};
use crate::error::PreviewError;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

struct TimerSlot {
    interval: Duration,
    next_due: Duration,
    live: bool,
}

#[derive(Default)]
pub struct ManualClock {
    now: Duration,
    timers: Vec<TimerSlot>,
}

impl ManualClock {
    pub fn live(&self) -> usize {
        self.timers.iter().filter(|slot| slot.live).count()
    }

    fn stop(&mut self, id: usize) {
        if let Some(slot) = self.timers.get_mut(id) {
            slot.live = false;
        }
    }

    /// Moves the clock to the next due tick not later than `target`.
    fn pop_due(&mut self, target: Duration) -> bool {
        let due = self
            .timers
            .iter_mut()
            .filter(|slot| slot.live && slot.next_due <= target)
            .min_by_key(|slot| slot.next_due);

        match due {
            Some(slot) => {
                self.now = slot.next_due;
                slot.next_due += slot.interval;
                true
            }
            None => {
                self.now = target;
                false
            }
        }
    }
}

pub struct ManualTimer {
    id: usize,
    clock: Rc<RefCell<ManualClock>>,
}

impl RepeatingTimer for ManualTimer {
    fn cancel(&mut self) {
        self.clock.borrow_mut().stop(self.id);
    }
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.clock.borrow_mut().stop(self.id);
    }
}

/// Surface change observed by the test host.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SpriteOffset(f32),
    Slide(usize),
    Ready,
}

#[derive(Default)]
pub struct Record {
    pub mutations: Vec<Mutation>,
    pub diagnostics: Vec<PreviewError>,
    pub preloads: Vec<(Vec<PathBuf>, PreloadTicket)>,
    pub carousels_built: usize,
    pub carousels_destroyed: usize,
}

impl Record {
    pub fn frame_offsets(&self) -> Vec<f32> {
        self.mutations
            .iter()
            .filter_map(|mutation| match mutation {
                Mutation::SpriteOffset(percent) => Some(*percent),
                _ => None,
            })
            .collect()
    }
}

pub struct RecordingCarousel {
    record: Rc<RefCell<Record>>,
}

impl Carousel for RecordingCarousel {
    fn go_to_slide(&mut self, index: usize, _transition: Duration) {
        self.record.borrow_mut().mutations.push(Mutation::Slide(index));
    }

    fn destroy(&mut self) {
        self.record.borrow_mut().carousels_destroyed += 1;
    }
}

pub struct TestHost {
    clock: Rc<RefCell<ManualClock>>,
    pub record: Rc<RefCell<Record>>,
    pub fail_carousel: bool,
    pub fail_preload_start: bool,
}

impl TestHost {
    pub fn new() -> Self {
        Self {
            clock: Rc::new(RefCell::new(ManualClock::default())),
            record: Rc::new(RefCell::new(Record::default())),
            fail_carousel: false,
            fail_preload_start: false,
        }
    }

    pub fn clock(&self) -> Rc<RefCell<ManualClock>> {
        self.clock.clone()
    }

    pub fn live_timers(&self) -> usize {
        self.clock.borrow().live()
    }

    pub fn timers_started(&self) -> usize {
        self.clock.borrow().timers.len()
    }
}

impl PreviewHost for TestHost {
    type Timer = ManualTimer;
    type Carousel = RecordingCarousel;

    fn start_repeating(&mut self, interval: Duration) -> ManualTimer {
        let mut clock = self.clock.borrow_mut();
        let next_due = clock.now + interval;
        clock.timers.push(TimerSlot {
            interval,
            next_due,
            live: true,
        });
        ManualTimer {
            id: clock.timers.len() - 1,
            clock: self.clock.clone(),
        }
    }

    fn paint_sprite_offset(&mut self, percent: f32) {
        self.record
            .borrow_mut()
            .mutations
            .push(Mutation::SpriteOffset(percent));
    }

    fn mark_ready(&mut self) {
        self.record.borrow_mut().mutations.push(Mutation::Ready);
    }

    fn construct_carousel(
        &mut self,
        _options: &CarouselOptions,
    ) -> Result<RecordingCarousel, PreviewError> {
        if self.fail_carousel {
            return Err(PreviewError::WidgetConstructFailed(
                "widget threw".to_string(),
            ));
        }
        self.record.borrow_mut().carousels_built += 1;
        Ok(RecordingCarousel {
            record: self.record.clone(),
        })
    }

    fn preload(&mut self, paths: &[PathBuf], ticket: PreloadTicket) -> Result<(), PreviewError> {
        self.record
            .borrow_mut()
            .preloads
            .push((paths.to_vec(), ticket));
        if self.fail_preload_start {
            return Err(PreviewError::AssetLoadFailed("no worker".to_string()));
        }
        Ok(())
    }

    fn diagnostic(&mut self, error: &PreviewError) {
        self.record.borrow_mut().diagnostics.push(error.clone());
    }
}

/// Advances virtual time by `by`, firing every tick that falls due.
pub fn advance(animator: &mut PreviewAnimator<TestHost>, by: Duration) {
    let clock = animator.host().clock();
    let target = clock.borrow().now + by;
    while clock.borrow_mut().pop_due(target) {
        animator.on_frame_tick();
    }
}
