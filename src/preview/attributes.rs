//! Preview configuration read from thumbnail markup attributes.

use crate::config::{DEFAULT_SLIDE_INTERVAL, DEFAULT_SPRITE_INTERVAL};
use crate::error::{PreviewError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// `frame-interval` value: a number with an optional `ms` or `s` unit.
/// A bare number is seconds.
static INTERVAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([0-9]+(?:\.[0-9]*)?|\.[0-9]+)\s*(ms|s)?\s*$").expect("valid interval regex")
});

/// Raw declaration of one thumbnail, as found in the gallery manifest.
#[derive(Debug, Clone, Default)]
pub struct ThumbnailMarkup {
    pub attributes: BTreeMap<String, String>,
    /// Slide images in display order (SlideShow only).
    pub slides: Vec<PathBuf>,
    /// Directory relative asset locations are resolved against.
    pub base_dir: Option<PathBuf>,
}

impl ThumbnailMarkup {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Sprite sheet layout: every frame `frame_width` wide, side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    pub url: PathBuf,
    pub frame_width: u32,
    pub frame_height: u32,
}

/// What the preview animates, tagged by mode.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewSource {
    SpriteSheet(SpriteSheet),
    SlideShow { slides: Vec<PathBuf> },
}

/// Validated, read-only animation parameters of one thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewConfig {
    pub source: PreviewSource,
    pub frame_count: NonZeroUsize,
    pub frame_interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    SpriteSheet,
    SlideShow,
}

impl PreviewConfig {
    /// Parses and validates the markup of one thumbnail.
    pub fn from_markup(markup: &ThumbnailMarkup) -> Result<Self> {
        let mode = parse_mode(markup.attr("mode"))?;

        let frame_interval = match markup.attr("frame-interval") {
            Some(raw) => parse_interval(raw)?,
            None if mode == Mode::SlideShow => DEFAULT_SLIDE_INTERVAL,
            None => DEFAULT_SPRITE_INTERVAL,
        };

        match mode {
            Mode::SpriteSheet => {
                let frame_count = required_positive(markup, "frame-count")?;
                let url = markup
                    .attr("sprite-url")
                    .map(|url| markup.resolve(url))
                    .ok_or_else(|| missing("sprite-url"))?;
                let frame_width = required_positive(markup, "sprite-width")?;
                let frame_height = required_positive(markup, "sprite-height")?;

                Ok(Self {
                    source: PreviewSource::SpriteSheet(SpriteSheet {
                        url,
                        frame_width: to_u32(frame_width, "sprite-width")?,
                        frame_height: to_u32(frame_height, "sprite-height")?,
                    }),
                    frame_count: NonZeroUsize::new(frame_count).ok_or_else(|| missing("frame-count"))?,
                    frame_interval,
                })
            }
            Mode::SlideShow => {
                let slides: Vec<PathBuf> = markup
                    .slides
                    .iter()
                    .map(|slide| match slide.to_str() {
                        Some(location) => markup.resolve(location),
                        None => slide.clone(),
                    })
                    .collect();
                let available = NonZeroUsize::new(slides.len()).ok_or_else(|| {
                    PreviewError::ConfigInvalid("slideshow declares no slides".to_string())
                })?;

                let frame_count = match markup.attr("frame-count") {
                    Some(_) => {
                        let declared = required_positive(markup, "frame-count")?;
                        if declared > available.get() {
                            return Err(PreviewError::ConfigInvalid(format!(
                                "frame-count {} exceeds the {} available slides",
                                declared, available
                            )));
                        }
                        NonZeroUsize::new(declared).unwrap_or(available)
                    }
                    None => available,
                };

                Ok(Self {
                    source: PreviewSource::SlideShow { slides },
                    frame_count,
                    frame_interval,
                })
            }
        }
    }

    /// Every location the preview needs before it can animate.
    pub fn asset_paths(&self) -> Vec<PathBuf> {
        match &self.source {
            PreviewSource::SpriteSheet(sheet) => vec![sheet.url.clone()],
            PreviewSource::SlideShow { slides } => {
                slides.iter().take(self.frame_count.get()).cloned().collect()
            }
        }
    }

    pub fn is_slideshow(&self) -> bool {
        matches!(self.source, PreviewSource::SlideShow { .. })
    }
}

fn missing(name: &str) -> PreviewError {
    PreviewError::ConfigInvalid(format!("missing or non-positive `{}`", name))
}

fn parse_mode(raw: Option<&str>) -> Result<Mode> {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        None | Some("sprite") | Some("sprite-sheet") | Some("spritesheet") => Ok(Mode::SpriteSheet),
        Some("slideshow") | Some("slide-show") | Some("chapter") => Ok(Mode::SlideShow),
        Some(other) => Err(PreviewError::ConfigInvalid(format!(
            "unknown mode `{}`",
            other
        ))),
    }
}

fn required_positive(markup: &ThumbnailMarkup, name: &str) -> Result<usize> {
    markup
        .attr(name)
        .and_then(|raw| raw.parse::<usize>().ok())
        .filter(|value| *value > 0)
        .ok_or_else(|| missing(name))
}

fn to_u32(value: usize, name: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| PreviewError::ConfigInvalid(format!("`{}` is too large", name)))
}

/// Parses a `frame-interval` attribute. `0.8` and `800ms` are the same.
pub fn parse_interval(raw: &str) -> Result<Duration> {
    let invalid =
        || PreviewError::ConfigInvalid(format!("invalid frame-interval `{}`", raw.trim()));

    let captures = INTERVAL_PATTERN.captures(raw).ok_or_else(invalid)?;
    let value: f64 = captures[1].parse().map_err(|_| invalid())?;
    let seconds = match captures.get(2).map(|unit| unit.as_str()) {
        Some("ms") => value / 1000.0,
        _ => value,
    };

    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(invalid());
    }
    // Below one nanosecond rounds to zero.
    match Duration::try_from_secs_f64(seconds) {
        Ok(interval) if !interval.is_zero() => Ok(interval),
        _ => Err(invalid()),
    }
}
