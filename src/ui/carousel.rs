//! Slideshow carousel over one row of the thumbnail model.

use super::update_row;
use crate::Thumbnail;
use crate::error::PreviewError;
use crate::preview::{Carousel, CarouselOptions};
use log::debug;
use slint::{Model, VecModel};
use std::rc::Rc;
use std::time::Duration;

/// Shows one slide of a tile at a time. The crossfade itself lives in the markup.
pub struct SlideCarousel {
    row: usize,
    model: Rc<VecModel<Thumbnail>>,
    slide_count: usize,
    looping: bool,
}

impl SlideCarousel {
    pub fn construct(
        row: usize,
        model: Rc<VecModel<Thumbnail>>,
        options: &CarouselOptions,
    ) -> Result<Self, PreviewError> {
        if options.slides.is_empty() {
            return Err(PreviewError::WidgetConstructFailed(
                "carousel needs at least one slide".to_string(),
            ));
        }
        if row >= model.row_count() {
            return Err(PreviewError::WidgetConstructFailed(format!(
                "no tile at row {}",
                row
            )));
        }

        update_row(&model, row, |thumbnail| {
            thumbnail.slideshow = true;
            thumbnail.current_slide = 0;
            thumbnail.slide_transition = millis(options.transition);
        });

        Ok(Self {
            row,
            model,
            slide_count: options.slides.len(),
            looping: options.looping,
        })
    }

    fn clamp(&self, index: usize) -> usize {
        if self.looping {
            index % self.slide_count
        } else {
            index.min(self.slide_count - 1)
        }
    }
}

/// Slint `duration` values are whole milliseconds.
fn millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

impl Carousel for SlideCarousel {
    fn go_to_slide(&mut self, index: usize, transition: Duration) {
        let index = self.clamp(index);
        debug!("Tile {} -> slide {} over {:?}", self.row, index, transition);
        update_row(&self.model, self.row, |thumbnail| {
            thumbnail.current_slide = index as i32;
            thumbnail.slide_transition = millis(transition);
        });
    }

    fn destroy(&mut self) {
        update_row(&self.model, self.row, |thumbnail| {
            thumbnail.current_slide = 0;
            thumbnail.ready = false;
        });
    }
}
