//! # Decoder Module
//!
//! Turns an asset's raw bytes into a pixel grid.
//!
//! The format is sniffed from the content, never from the filename, so a
//! mislabelled upload still decodes and a `.jpg` full of garbage is reported
//! as unreadable. JPEGs go through zune-jpeg first and fall back to the
//! image crate; everything else uses the image crate directly.
//!
//! Decoding only borrows the input. Failures are returned per asset and
//! never abort the surrounding batch.

use crate::error::DecodeError;
use image::{DynamicImage, ImageBuffer, ImageError, ImageFormat, Luma, Rgb, Rgba};
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// A decoded image with at least one pixel in each dimension
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
}

impl DecodedImage {
    /// Wrap an already decoded image, rejecting empty grids
    pub fn new(image: DynamicImage) -> Result<Self, DecodeError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(DecodeError::ZeroDimensions {
                width: image.width(),
                height: image.height(),
            });
        }
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying image
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}

/// Content-sniffing image decoder
pub struct ImageDecoder;

impl ImageDecoder {
    /// Decode a byte buffer into a pixel grid.
    ///
    /// Fails with `EmptyInput` for zero bytes, `UnknownFormat` when the
    /// content matches no supported format, and `Corrupt` when the format
    /// is recognised but the data does not decode.
    pub fn decode(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        let format = image::guess_format(bytes).map_err(|_| DecodeError::UnknownFormat)?;

        let image = match format {
            ImageFormat::Jpeg => {
                Self::decode_jpeg(bytes).or_else(|_| Self::decode_fallback(bytes, format))?
            }
            _ => Self::decode_fallback(bytes, format)?,
        };

        DecodedImage::new(image)
    }

    /// Fast JPEG decoding using zune-jpeg
    fn decode_jpeg(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
        let corrupt = |reason: String| DecodeError::Corrupt {
            format: "Jpeg".to_string(),
            reason,
        };

        let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
        let mut decoder = JpegDecoder::new_with_options(bytes, options);

        let pixels = decoder
            .decode()
            .map_err(|e| corrupt(format!("zune-jpeg decode failed: {:?}", e)))?;

        let info = decoder
            .info()
            .ok_or_else(|| corrupt("missing frame header".to_string()))?;

        let width = info.width as u32;
        let height = info.height as u32;

        let out_colorspace = decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB);

        let image = match out_colorspace {
            ColorSpace::RGB => {
                let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| corrupt("RGB buffer size mismatch".to_string()))?;
                DynamicImage::ImageRgb8(buffer)
            }
            ColorSpace::RGBA => {
                let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| corrupt("RGBA buffer size mismatch".to_string()))?;
                DynamicImage::ImageRgba8(buffer)
            }
            ColorSpace::Luma => {
                let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| corrupt("Luma buffer size mismatch".to_string()))?;
                DynamicImage::ImageLuma8(buffer)
            }
            other => {
                return Err(corrupt(format!("unsupported output colorspace {:?}", other)));
            }
        };

        Ok(image)
    }

    /// Decode with the image crate
    fn decode_fallback(bytes: &[u8], format: ImageFormat) -> Result<DynamicImage, DecodeError> {
        image::load_from_memory_with_format(bytes, format).map_err(|e| match e {
            ImageError::Unsupported(_) => DecodeError::UnknownFormat,
            other => DecodeError::Corrupt {
                format: format!("{:?}", format),
                reason: other.to_string(),
            },
        })
    }
}
