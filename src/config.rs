//! Application configuration constants.

use std::time::Duration;

/// Supported image file extensions for scanning slide directories.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Frame interval used by sprite sheets that do not declare one.
pub const DEFAULT_SPRITE_INTERVAL: Duration = Duration::from_millis(800);

/// Frame interval used by slideshows that do not declare one.
pub const DEFAULT_SLIDE_INTERVAL: Duration = Duration::from_millis(1000);

/// Duration of the carousel transition between two slides.
pub const SLIDE_TRANSITION: Duration = Duration::from_millis(300);

/// Tiles closer than this to the viewport edge count as visible.
pub const VIEWPORT_MARGIN: f32 = 100.0;

/// Windows at most this wide (logical pixels) only show static thumbnails.
pub const NARROW_VIEWPORT_WIDTH: f32 = 768.0;

/// Number of decoded sprite sheets and slides kept in memory.
pub const SPRITE_CACHE_CAPACITY: usize = 64;
