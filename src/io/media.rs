// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading.
//!
//! Files are decoded into RGBA rasters with the `image` crate. The original
//! bytes are kept alongside so a saved project embeds exactly what was
//! imported.

use crate::models::item::{ImageItem, Raster};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Decode an in-memory image file.
pub fn decode_image(bytes: Vec<u8>) -> Result<Raster> {
    let format = image::guess_format(&bytes).context("Unrecognised image format")?;
    let pixels = image::load_from_memory_with_format(&bytes, format)
        .context("Failed to decode image")?
        .to_rgba8();
    Ok(Raster::new(pixels, bytes, format.to_mime_type()))
}

/// Load a single image file.
pub fn load_image(path: &Path) -> Result<Raster> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    decode_image(bytes).with_context(|| format!("Failed to load {}", path.display()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

/// Load several files as image items, ordered by file name.
///
/// Files that are not images are skipped with a warning; it is an error only
/// if nothing could be loaded.
pub fn load_images(mut paths: Vec<PathBuf>) -> Result<Vec<ImageItem>> {
    paths.sort_by_key(|path| file_name(path));

    let mut items = Vec::with_capacity(paths.len());
    for path in &paths {
        match load_image(path) {
            Ok(raster) => {
                log::info!("Loaded image: {} ({}x{})", path.display(), raster.width(), raster.height());
                items.push(ImageItem::new(file_name(path), raster));
            }
            Err(e) => log::warn!("Skipping {}: {:#}", path.display(), e),
        }
    }

    if items.is_empty() {
        bail!("None of the {} selected files could be loaded as images", paths.len());
    }
    Ok(items)
}

#[cfg(test)]
pub(crate) fn encode_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255])))
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png() {
        let raster = decode_image(encode_png(7, 5)).unwrap();
        assert_eq!((raster.width(), raster.height()), (7, 5));
        assert_eq!(raster.mime, "image/png");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_image(b"not an image at all".to_vec()).is_err());
    }

    #[test]
    fn test_load_images_sorted_by_name_and_skips_bad_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        std::fs::write(dir.join("b.png"), encode_png(4, 4)).unwrap();
        std::fs::write(dir.join("a.png"), encode_png(2, 3)).unwrap();
        std::fs::write(dir.join("notes.txt"), b"hello").unwrap();

        let items = load_images(vec![dir.join("notes.txt"), dir.join("b.png"), dir.join("a.png")]).unwrap();
        let names: Vec<_> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
        assert_eq!(items[0].natural_size().w, 2.0);
    }

    #[test]
    fn test_load_images_fails_when_nothing_loads() {
        assert!(load_images(vec![PathBuf::from("/definitely/not/here.png")]).is_err());
    }
}
