//! Image file loading.
//!
//! Decodes still images into the 8-bit grayscale [`Bitmap`] form the project
//! model carries. Format detection and decoding are delegated to the `image`
//! crate.

use std::path::Path;

use crate::error::{Error, Result};
use crate::project::Bitmap;

/// Loads an image file as an 8-bit grayscale bitmap.
///
/// Color inputs are converted to luma; the pixel layout is row-major, one
/// byte per pixel, matching what the project model and the device expect.
pub fn load_grayscale_bitmap(path: impl AsRef<Path>) -> Result<Bitmap> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let luma = decoded.to_luma8();
    let (width, height) = luma.dimensions();
    log::debug!(
        "loaded {} as {}x{} grayscale",
        path.display(),
        width,
        height
    );
    Bitmap::new(width, height, luma.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_grayscale_bitmap("/nonexistent/missing.png").unwrap_err();
        match err {
            Error::ImageLoad { path, .. } => {
                assert!(path.ends_with("missing.png"));
            }
            other => panic!("expected ImageLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_decodes_generated_png() {
        // Write a tiny PNG through the image crate and read it back.
        let dir = std::env::temp_dir().join("dmd-host-media-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("gradient.png");

        let img = image::GrayImage::from_fn(4, 2, |x, y| image::Luma([(x + y * 4) as u8 * 10]));
        img.save(&path).unwrap();

        let bitmap = load_grayscale_bitmap(&path).unwrap();
        assert_eq!(bitmap.width(), 4);
        assert_eq!(bitmap.height(), 2);
        assert_eq!(bitmap.get(1, 3), Some(70));

        std::fs::remove_file(&path).ok();
    }
}
