//! Average Hash (aHash) implementation.
//!
//! aHash works by:
//! 1. Converting to grayscale with ITU-R 601-2 weights
//! 2. Resizing the image to hash_size x hash_size (Lanczos3)
//! 3. Computing the mean brightness
//! 4. For each pixel: if brighter than the mean, set bit to 1, else 0

use super::traits::{HashAlgorithm, ImageHash};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use tracing::debug;

/// Average Hash (aHash) implementation
#[derive(Debug, Clone)]
pub struct AverageHasher {
    /// Size of the hash (width and height)
    hash_size: u32,
}

impl AverageHasher {
    /// Create a new aHash hasher
    pub fn new(hash_size: u32) -> Self {
        Self { hash_size }
    }
}

/// Grayscale with ITU-R 601-2 weights in 16-bit fixed point.
///
/// Hashes stay comparable with ones made by PIL's `convert("L")`; the image
/// crate's `to_luma8` uses Rec. 709 weights, which can reorder pixel
/// brightness and flip bits. Alpha is ignored.
pub fn luma_601(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    ImageBuffer::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let weighted = u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000;
        Luma([(weighted >> 16) as u8])
    })
}

impl HashAlgorithm for AverageHasher {
    fn hash_image(&self, image: &DynamicImage) -> ImageHash {
        let gray = luma_601(image);
        let small = imageops::resize(&gray, self.hash_size, self.hash_size, FilterType::Lanczos3);

        let count = f64::from(small.width() * small.height());
        let total: f64 = small.pixels().map(|p| f64::from(p[0])).sum();
        let mean = total / count;

        let hash = ImageHash::from_bits(small.pixels().map(|p| f64::from(p[0]) > mean));
        debug!(hash_size = self.hash_size, mean, hash = %hash, "computed average hash");
        hash
    }

    fn hash_size(&self) -> u32 {
        self.hash_size
    }
}
