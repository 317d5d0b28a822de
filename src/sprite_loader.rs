//! Blocking decode of sprite sheets and slides.
//!
//! Runs on worker threads only; the UI thread turns the pixels into
//! `slint::Image` with [`create_slint_image`].

use crate::error::{PreviewError, Result};
use crate::sprite_cache::CachedSprite;
use rayon::prelude::*;
use slint::{Image, Rgba8Pixel, SharedPixelBuffer};
use std::path::{Path, PathBuf};

/// Decodes one image file into RGBA8 pixels.
pub fn decode_blocking(path: &Path) -> Result<CachedSprite> {
    let image = image::ImageReader::open(path)
        .map_err(|e| PreviewError::AssetLoadFailed(format!("{}: {}", path.display(), e)))?
        .with_guessed_format()
        .map_err(|e| PreviewError::AssetLoadFailed(format!("{}: {}", path.display(), e)))?
        .decode()?;

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(CachedSprite::new(rgba.into_raw(), width, height))
}

/// Decodes every path in parallel. Fails as a whole if any asset fails.
pub fn decode_all_blocking(paths: &[PathBuf]) -> Result<Vec<(PathBuf, CachedSprite)>> {
    paths
        .par_iter()
        .map(|path| decode_blocking(path).map(|sprite| (path.clone(), sprite)))
        .collect()
}

pub fn create_slint_image(sprite: &CachedSprite) -> Image {
    let buffer =
        SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(&sprite.data, sprite.width, sprite.height);
    Image::from_rgba8(buffer)
}
