//! Gallery manifest loading.
//!
//! A manifest is a TOML file listing thumbnails:
//!
//! ```toml
//! [[thumbnail]]
//! title = "P61 Family Reunion"
//! static-image = "thumbs/p61.jpg"
//! slides-dir = "chapters/p61"
//!
//! [thumbnail.attributes]
//! mode = "chapter"
//! frame-interval = "1s"
//! ```
//!
//! Attribute values may be written as TOML strings or numbers; they are handed
//! to the preview layer as strings, exactly like markup attributes.

use crate::error::{PreviewError, Result};
use crate::file_utils;
use crate::preview::ThumbnailMarkup;
use log::{info, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default, rename = "thumbnail")]
    thumbnails: Vec<ThumbnailEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ThumbnailEntry {
    title: String,
    static_image: PathBuf,
    #[serde(default)]
    slides: Vec<PathBuf>,
    slides_dir: Option<PathBuf>,
    #[serde(default)]
    attributes: BTreeMap<String, toml::Value>,
}

/// One tile of the gallery.
#[derive(Debug, Clone)]
pub struct GalleryItem {
    pub title: String,
    pub static_image: PathBuf,
    pub markup: ThumbnailMarkup,
}

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    pub items: Vec<GalleryItem>,
}

impl Gallery {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Reads a manifest file. Relative paths resolve against its directory.
pub fn load_manifest(path: &Path) -> Result<Gallery> {
    let path = fs::canonicalize(path)?;
    let text = fs::read_to_string(&path)?;
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| PreviewError::Manifest(format!("{} has no parent", path.display())))?;

    let gallery = parse_manifest(&text, &base_dir)?;
    info!(
        "Loaded gallery {} with {} thumbnails",
        path.display(),
        gallery.len()
    );
    Ok(gallery)
}

/// Parses manifest text. `base_dir` should be absolute.
pub fn parse_manifest(text: &str, base_dir: &Path) -> Result<Gallery> {
    let manifest: ManifestFile = toml::from_str(text)?;

    let items = manifest
        .thumbnails
        .into_iter()
        .map(|entry| build_item(entry, base_dir))
        .collect();

    Ok(Gallery { items })
}

fn build_item(entry: ThumbnailEntry, base_dir: &Path) -> GalleryItem {
    let mut slides: Vec<PathBuf> = entry
        .slides
        .into_iter()
        .map(|slide| resolve(base_dir, slide))
        .collect();

    if let Some(dir) = entry.slides_dir {
        let dir = resolve(base_dir, dir);
        match file_utils::scan_directory(&dir) {
            Ok(found) => slides.extend(found),
            // The thumbnail degrades to static when it ends up with no slides.
            Err(e) => warn!("Failed to scan slides of {:?}: {}", entry.title, e),
        }
    }

    let attributes = entry
        .attributes
        .into_iter()
        .map(|(name, value)| (name, attribute_string(value)))
        .collect();

    GalleryItem {
        title: entry.title,
        static_image: resolve(base_dir, entry.static_image),
        markup: ThumbnailMarkup {
            attributes,
            slides,
            base_dir: Some(base_dir.to_path_buf()),
        },
    }
}

fn resolve(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        base_dir.join(path)
    } else {
        path
    }
}

fn attribute_string(value: toml::Value) -> String {
    match value {
        toml::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::PreviewConfig;
    use std::time::Duration;

    const MANIFEST: &str = r#"
[[thumbnail]]
title = "Reunion"
static-image = "thumbs/reunion.jpg"

[thumbnail.attributes]
mode = "sprite"
frame-count = 4
frame-interval = 0.8
sprite-url = "sprites/reunion.jpg"
sprite-width = 160
sprite-height = 90

[[thumbnail]]
title = "Chapters"
static-image = "/abs/chapters.jpg"
slides = ["c/1.jpg", "c/2.jpg"]

[thumbnail.attributes]
mode = "chapter"
"#;

    #[test]
    fn test_parse_manifest_items() {
        let gallery = parse_manifest(MANIFEST, Path::new("/gallery")).unwrap();
        assert_eq!(gallery.len(), 2);

        let reunion = &gallery.items[0];
        assert_eq!(reunion.title, "Reunion");
        assert_eq!(
            reunion.static_image,
            PathBuf::from("/gallery/thumbs/reunion.jpg")
        );
        assert_eq!(reunion.markup.attributes["frame-count"], "4");
        assert_eq!(reunion.markup.attributes["frame-interval"], "0.8");

        let config = PreviewConfig::from_markup(&reunion.markup).unwrap();
        assert_eq!(config.frame_interval, Duration::from_millis(800));
        assert_eq!(
            config.asset_paths(),
            vec![PathBuf::from("/gallery/sprites/reunion.jpg")]
        );

        let chapters = &gallery.items[1];
        assert_eq!(chapters.static_image, PathBuf::from("/abs/chapters.jpg"));
        assert_eq!(
            chapters.markup.slides,
            vec![
                PathBuf::from("/gallery/c/1.jpg"),
                PathBuf::from("/gallery/c/2.jpg")
            ]
        );
        let config = PreviewConfig::from_markup(&chapters.markup).unwrap();
        assert_eq!(config.frame_count.get(), 2);
    }

    #[test]
    fn test_empty_manifest_is_empty_gallery() {
        let gallery = parse_manifest("", Path::new("/gallery")).unwrap();
        assert!(gallery.is_empty());
    }

    #[test]
    fn test_malformed_manifest_is_error() {
        let result = parse_manifest("[[thumbnail]]\ntitle = 3", Path::new("/gallery"));
        assert!(matches!(result, Err(PreviewError::Manifest(_))));
    }

    #[test]
    fn test_load_manifest_scans_slides_dir() {
        let dir = tempfile::tempdir().unwrap();
        let slides = dir.path().join("chapters");
        fs::create_dir(&slides).unwrap();
        for name in ["02.jpg", "01.jpg", "readme.md"] {
            fs::write(slides.join(name), b"x").unwrap();
        }
        let manifest = dir.path().join("gallery.toml");
        fs::write(
            &manifest,
            "[[thumbnail]]\ntitle = \"T\"\nstatic-image = \"t.jpg\"\nslides-dir = \"chapters\"\n\
             [thumbnail.attributes]\nmode = \"slideshow\"\n",
        )
        .unwrap();

        let gallery = load_manifest(&manifest).unwrap();
        let names: Vec<_> = gallery.items[0]
            .markup
            .slides
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["01.jpg", "02.jpg"]);
    }

    #[test]
    fn test_missing_slides_dir_degrades_item_only() {
        let gallery = parse_manifest(
            "[[thumbnail]]\ntitle = \"T\"\nstatic-image = \"t.jpg\"\nslides-dir = \"nowhere\"\n\
             [thumbnail.attributes]\nmode = \"slideshow\"\n",
            Path::new("/definitely/not/here"),
        )
        .unwrap();
        assert!(gallery.items[0].markup.slides.is_empty());
        assert!(PreviewConfig::from_markup(&gallery.items[0].markup).is_err());
    }

    #[test]
    fn test_missing_manifest_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_manifest(&dir.path().join("nope.toml")).is_err());
    }
}
