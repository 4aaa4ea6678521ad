//! Procedural test pattern generation.
//!
//! Generates the complementary checkerboard bitmap pair used by the
//! checkerboard demo: one board plus its tonal inverse, at a fixed tile size.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::project::Bitmap;

/// Tile geometry for checkerboard generation.
///
/// The defaults (50 px wide, 100 px tall) are fixed constants of the test
/// pattern, not derived from the target bitmap size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckerboardConfig {
    /// Width of each checkerboard tile in pixels.
    pub tile_width: u32,
    /// Height of each checkerboard tile in pixels.
    pub tile_height: u32,
}

impl Default for CheckerboardConfig {
    fn default() -> Self {
        Self {
            tile_width: 50,
            tile_height: 100,
        }
    }
}

fn flip(value: u8) -> u8 {
    if value == 0 {
        255
    } else {
        0
    }
}

/// Generates a checkerboard bitmap and its tonal inverse.
///
/// The scan flips the row's first value every `tile_height` rows and the pixel
/// value every `tile_width` columns, with the flip check firing at index 0 in
/// both dimensions. The net effect: the top-left tile is black (0), and tile
/// value alternates with `(row / tile_height + col / tile_width)` parity.
///
/// Fully deterministic; both returned bitmaps are freshly allocated, the
/// second being the pixel-for-pixel complement of the first.
pub fn checkerboard_pair(
    width: u32,
    height: u32,
    config: &CheckerboardConfig,
) -> Result<(Bitmap, Bitmap)> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidGeometry { width, height });
    }
    if config.tile_width == 0 || config.tile_height == 0 {
        return Err(Error::InvalidGeometry {
            width: config.tile_width,
            height: config.tile_height,
        });
    }

    let mut data = Vec::with_capacity(width as usize * height as usize);

    // The check at row 0 flips this to 0, so the first tile row starts black.
    let mut first = 255u8;
    for row in 0..height {
        if row % config.tile_height == 0 {
            first = flip(first);
        }
        // Likewise the check at column 0 flips back to the row's first value.
        let mut value = flip(first);
        for col in 0..width {
            if col % config.tile_width == 0 {
                value = flip(value);
            }
            data.push(value);
        }
    }

    let board = Bitmap::new(width, height, data)?;
    let inverse = board.complement();
    Ok((board, inverse))
}
