//! Image decoding with format-specific fast paths.
//!
//! Uses zune-jpeg for JPEG files (1.5-2x faster than image crate),
//! falls back to image crate for other formats.

mod source;

pub use source::{read_file_bytes, FileBytes};

use crate::error::ImageDecodeError;
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageError, Luma, Rgb, Rgba};
use std::path::Path;
use tracing::debug;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Image formats the decoder distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
    Bmp,
    Tiff,
    Other,
}

impl ImageFormat {
    /// Detect format from the leading magic bytes
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::Jpeg
        } else if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            Self::Png
        } else if bytes.starts_with(b"GIF8") {
            Self::Gif
        } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
            Self::WebP
        } else if bytes.starts_with(b"BM") {
            Self::Bmp
        } else if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            Self::Tiff
        } else {
            Self::Other
        }
    }

    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("jpg" | "jpeg") => Self::Jpeg,
            Some("png") => Self::Png,
            Some("gif") => Self::Gif,
            Some("webp") => Self::WebP,
            Some("bmp") => Self::Bmp,
            Some("tif" | "tiff") => Self::Tiff,
            _ => Self::Other,
        }
    }

    /// Magic bytes win; the extension is only consulted when they are unknown.
    pub fn detect(bytes: &[u8], path: &Path) -> Self {
        match Self::sniff(bytes) {
            Self::Other => Self::from_path(path),
            format => format,
        }
    }
}

/// Image decoder that picks the fastest available decoder per format
pub struct FastDecoder;

impl FastDecoder {
    /// Decode an image file into pixel data.
    ///
    /// - JPEG: zune-jpeg, falling back to the image crate on failure
    /// - Other formats: image crate
    pub fn decode(path: &Path) -> Result<DynamicImage, ImageDecodeError> {
        let bytes = read_file_bytes(path)?;
        Self::decode_bytes(&bytes, path)
    }

    /// Decode already-loaded bytes. `path` is used for format hints and errors.
    pub fn decode_bytes(bytes: &[u8], path: &Path) -> Result<DynamicImage, ImageDecodeError> {
        let format = ImageFormat::detect(bytes, path);
        debug!(path = %path.display(), ?format, "decoding image");

        let image = match format {
            ImageFormat::Jpeg => Self::decode_jpeg(bytes, path).or_else(|e| {
                debug!(path = %path.display(), error = %e, "zune-jpeg failed, using image crate");
                Self::decode_fallback(bytes, path)
            })?,
            _ => Self::decode_fallback(bytes, path)?,
        };

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageDecodeError::EmptyImage {
                path: path.to_path_buf(),
            });
        }

        Ok(image)
    }

    /// Fast JPEG decoding using zune-jpeg
    fn decode_jpeg(bytes: &[u8], path: &Path) -> Result<DynamicImage, ImageDecodeError> {
        let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
        let mut decoder = JpegDecoder::new_with_options(bytes, options);

        let pixels = decoder.decode().map_err(|e| ImageDecodeError::Decode {
            path: path.to_path_buf(),
            reason: format!("zune-jpeg decode failed: {:?}", e),
        })?;

        let info = decoder.info().ok_or_else(|| ImageDecodeError::Decode {
            path: path.to_path_buf(),
            reason: "Failed to get image info".to_string(),
        })?;

        let width = info.width as u32;
        let height = info.height as u32;

        let buffer_error = |kind: &str| ImageDecodeError::Decode {
            path: path.to_path_buf(),
            reason: format!("Failed to create {kind} buffer"),
        };

        // The decoder may override the requested colorspace (e.g. grayscale JPEGs)
        let out_colorspace = decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB);

        let image = match out_colorspace {
            ColorSpace::RGB => {
                let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| buffer_error("RGB"))?;
                DynamicImage::ImageRgb8(buffer)
            }
            ColorSpace::RGBA => {
                let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| buffer_error("RGBA"))?;
                DynamicImage::ImageRgba8(buffer)
            }
            ColorSpace::Luma => {
                let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| buffer_error("Luma"))?;
                DynamicImage::ImageLuma8(buffer)
            }
            other => {
                return Err(ImageDecodeError::Decode {
                    path: path.to_path_buf(),
                    reason: format!("unsupported JPEG colorspace {:?}", other),
                });
            }
        };

        Ok(image)
    }

    fn decode_fallback(bytes: &[u8], path: &Path) -> Result<DynamicImage, ImageDecodeError> {
        image::load_from_memory(bytes).map_err(|e| match e {
            ImageError::Unsupported(_) => ImageDecodeError::UnsupportedFormat {
                path: path.to_path_buf(),
            },
            other => ImageDecodeError::Decode {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })
    }
}
