//! Hover preview animation for gallery thumbnails.
//!
//! The animator is host-agnostic; `crate::ui::slint_host` binds it to the
//! Slint event loop.

pub mod animator;
pub mod attributes;
pub mod frame;
pub mod host;
#[cfg(test)]
mod testing;

pub use animator::PreviewAnimator;
pub use attributes::{PreviewConfig, ThumbnailMarkup};
pub use host::{Carousel, CarouselOptions, PreloadTicket, PreviewHost};
