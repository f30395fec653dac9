//! # Image Loading and Saving
//!
//! The core never touches the filesystem. Callers go through
//! [`ImageProvider`] and [`ImageWriter`]; [`FsImageStore`] implements both
//! on top of the `image` crate.
//!
//! Saving picks the format from the output extension. Stick to lossless
//! formats (PNG, BMP, TIFF): JPEG re-encoding destroys the LSB plane.

use image::{GenericImageView, RgbImage};
use log::{debug, warn};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, StegoError};
use crate::processing::channel::{Channel, PixelChannel};

/// Extensions picked up when scanning a directory for images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff"];

/// Supplies decoded RGB images.
pub trait ImageProvider {
    fn load_rgb(&self, path: &Path) -> Result<RgbImage>;

    /// Load one colour plane of the image at `path`.
    fn load_channel(&self, path: &Path, channel: Channel) -> Result<PixelChannel> {
        let image = self.load_rgb(path)?;
        PixelChannel::from_rgb(&image, channel)
    }
}

/// Persists RGB images.
pub trait ImageWriter {
    fn save_rgb(&self, image: &RgbImage, path: &Path) -> Result<()>;
}

/// Filesystem-backed image store.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageStore;

impl ImageProvider for FsImageStore {
    fn load_rgb(&self, path: &Path) -> Result<RgbImage> {
        let image = image::open(path).map_err(|source| StegoError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded {} ({}x{})", path.display(), image.width(), image.height());
        Ok(image.to_rgb8())
    }
}

impl ImageWriter for FsImageStore {
    fn save_rgb(&self, image: &RgbImage, path: &Path) -> Result<()> {
        if is_lossy(path) {
            warn!(
                "{} uses a lossy format; the hidden message will not survive",
                path.display()
            );
        }
        image.save(path).map_err(|source| StegoError::ImageWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn is_lossy(path: &Path) -> bool {
    matches!(
        extension_lowercase(path).as_deref(),
        Some("jpg") | Some("jpeg")
    )
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Append `.png` when `name` has no known image extension.
pub fn with_image_extension(name: &str) -> PathBuf {
    let path = PathBuf::from(name);
    match extension_lowercase(&path) {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => path,
        _ => PathBuf::from(format!("{}.png", name)),
    }
}

/// List the images directly inside `dir`, sorted and without duplicates.
///
/// Matching is case-insensitive on [`IMAGE_EXTENSIONS`].
pub fn find_images(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut found = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(ext) = extension_lowercase(&path) {
            if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                found.insert(path);
            }
        }
    }
    Ok(found.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_png_round_trip_preserves_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        let img = RgbImage::from_fn(6, 4, |x, y| Rgb([(x * 40) as u8, (y * 60) as u8, 7]));

        FsImageStore.save_rgb(&img, &path).unwrap();
        let loaded = FsImageStore.load_rgb(&path).unwrap();
        assert_eq!(loaded, img);

        let green = FsImageStore.load_channel(&path, Channel::Green).unwrap();
        assert_eq!(green.samples()[6], 60);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = FsImageStore
            .load_rgb(Path::new("/nonexistent/picture.png"))
            .unwrap_err();
        assert!(matches!(err, StegoError::ImageLoad { .. }));
    }

    #[test]
    fn test_find_images_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.PNG", "a.jpg", "notes.txt", "c.tiff"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let names: Vec<String> = find_images(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.PNG", "c.tiff"]);
    }

    #[test]
    fn test_with_image_extension() {
        assert_eq!(with_image_extension("out"), PathBuf::from("out.png"));
        assert_eq!(with_image_extension("out.PNG"), PathBuf::from("out.PNG"));
        assert_eq!(with_image_extension("out.bmp"), PathBuf::from("out.bmp"));
    }
}
