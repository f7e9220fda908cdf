//! Image normalization.
//!
//! Every uploaded image is decoded, resized to the configured target
//! dimensions, and re-encoded before it reaches the blob store. Pure
//! transformation; no side effects and no partial output.

use std::io::Cursor;

use image::imageops::FilterType;
use image::ImageFormat;
use imagevault_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Container format images are re-encoded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// PNG (lossless, the default).
    #[default]
    Png,
    /// JPEG.
    Jpeg,
}

impl OutputFormat {
    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }

    /// MIME type corresponding to this format.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// Normalizer resizing images to fixed target dimensions.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    width: u32,
    height: u32,
    format: OutputFormat,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(500, 500, OutputFormat::Png)
    }
}

impl Normalizer {
    /// Create a normalizer with the given target dimensions and output format.
    pub fn new(width: u32, height: u32, format: OutputFormat) -> Self {
        Self {
            width,
            height,
            format,
        }
    }

    /// Decode, resize, and re-encode raw image bytes.
    ///
    /// The image is stretched to exactly the target dimensions; aspect ratio
    /// is NOT preserved. This is a known quirk kept from the reference
    /// behavior.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<u8>)` - The normalized image in the configured format
    /// * `Err(Error::Decode)` - The input is not a decodable raster image
    /// * `Err(Error::Encode)` - Re-encoding could not produce output
    pub fn normalize(&self, data: &[u8]) -> Result<Vec<u8>> {
        let img = image::load_from_memory(data).map_err(|e| Error::decode(e.to_string()))?;

        let resized = img.resize_exact(self.width, self.height, FilterType::Lanczos3);

        let mut buf = Cursor::new(Vec::new());
        resized
            .write_to(&mut buf, self.format.image_format())
            .map_err(|e| Error::encode(e.to_string()))?;

        Ok(buf.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut img = image::RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([0, 128, 255]);
        }
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_normalize_resizes_to_target() {
        let normalizer = Normalizer::default();
        let out = normalizer.normalize(&png_bytes(20, 10)).unwrap();

        let img = image::load_from_memory(&out).unwrap();
        assert_eq!(img.width(), 500);
        assert_eq!(img.height(), 500);
    }

    #[test]
    fn test_normalize_does_not_preserve_aspect_ratio() {
        // A wide input still comes out square.
        let normalizer = Normalizer::new(100, 100, OutputFormat::Png);
        let out = normalizer.normalize(&png_bytes(400, 50)).unwrap();

        let img = image::load_from_memory(&out).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 100);
    }

    #[test]
    fn test_normalize_output_is_configured_format() {
        let normalizer = Normalizer::new(50, 50, OutputFormat::Jpeg);
        let out = normalizer.normalize(&png_bytes(10, 10)).unwrap();
        assert_eq!(
            image::guess_format(&out).unwrap(),
            ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let normalizer = Normalizer::default();
        let err = normalizer.normalize(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_normalize_rejects_empty_input() {
        let normalizer = Normalizer::default();
        let err = normalizer.normalize(&[]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_output_format_content_type() {
        assert_eq!(OutputFormat::Png.content_type(), "image/png");
        assert_eq!(OutputFormat::Jpeg.content_type(), "image/jpeg");
    }
}
