use anyhow::{anyhow, Result};
use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

/// Output format for normalized images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    WebP,
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "webp" => Ok(OutputFormat::WebP),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            _ => Err(anyhow!("Invalid format: {}", s)),
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::WebP => "image/webp",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::WebP => "webp",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

/// Decode raw bytes into a bitmap.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, data: &[u8]) -> Result<DynamicImage>;
}

/// Resample a bitmap to target dimensions in a single pass.
pub trait ImageResampler: Send + Sync {
    fn resample(&self, img: &DynamicImage, width: u32, height: u32) -> DynamicImage;
}

/// Re-encode a bitmap into an output format at a 0.0-1.0 quality.
pub trait ImageReencoder: Send + Sync {
    fn encode(&self, img: &DynamicImage, format: OutputFormat, quality: f32) -> Result<Bytes>;
}

/// Format-sniffing decoder: trusts the bytes, not the declared content type.
pub struct SniffDecoder;

impl ImageDecoder for SniffDecoder {
    fn decode(&self, data: &[u8]) -> Result<DynamicImage> {
        let img = image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()?
            .decode()?;
        Ok(img)
    }
}

/// Lanczos3 resampler.
pub struct LanczosResampler;

impl ImageResampler for LanczosResampler {
    fn resample(&self, img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        img.resize_exact(width, height, FilterType::Lanczos3)
    }
}

/// Encoder for the web-friendly output formats.
pub struct WebEncoder;

impl ImageReencoder for WebEncoder {
    fn encode(&self, img: &DynamicImage, format: OutputFormat, quality: f32) -> Result<Bytes> {
        let quality = quality.clamp(0.0, 1.0);
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(anyhow!("Cannot encode empty surface"));
        }

        match format {
            OutputFormat::WebP => {
                let rgba = img.to_rgba8();
                let encoder = webp::Encoder::from_rgba(&rgba, width, height);
                let webp_data = encoder.encode(quality * 100.0);
                if webp_data.is_empty() {
                    return Err(anyhow!("WebP encoder returned no data"));
                }
                Ok(Bytes::copy_from_slice(&webp_data))
            }
            OutputFormat::Jpeg => {
                let rgb = img.to_rgb8();
                let mut buffer = Vec::new();
                let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                    Cursor::new(&mut buffer),
                    (quality * 100.0).round() as u8,
                );
                rgb.write_with_encoder(encoder)?;
                Ok(Bytes::from(buffer))
            }
            OutputFormat::Png => {
                let mut buffer = Vec::new();
                img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
                Ok(Bytes::from(buffer))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255])))
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("webp").unwrap(), OutputFormat::WebP);
        assert_eq!(OutputFormat::parse("JPG").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("png").unwrap(), OutputFormat::Png);
        assert!(OutputFormat::parse("avif").is_err());
    }

    #[test]
    fn test_mime_and_extension() {
        assert_eq!(OutputFormat::WebP.mime_type(), "image/webp");
        assert_eq!(OutputFormat::WebP.extension(), "webp");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn test_sniff_decoder_ignores_wrong_extension_claims() {
        let img = test_image(10, 10);
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();

        let decoded = SniffDecoder.decode(&buffer).unwrap();
        assert_eq!(decoded.dimensions(), (10, 10));
    }

    #[test]
    fn test_sniff_decoder_rejects_garbage() {
        assert!(SniffDecoder.decode(b"definitely not an image").is_err());
    }

    #[test]
    fn test_resampler_produces_exact_dimensions() {
        let img = test_image(100, 50);
        let resized = LanczosResampler.resample(&img, 40, 20);
        assert_eq!(resized.dimensions(), (40, 20));
    }

    #[test]
    fn test_webp_encode_produces_riff_container() {
        let data = WebEncoder
            .encode(&test_image(32, 32), OutputFormat::WebP, 0.8)
            .unwrap();
        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(&data[8..12], b"WEBP");
    }

    #[test]
    fn test_jpeg_and_png_encode_are_decodable() {
        for format in [OutputFormat::Jpeg, OutputFormat::Png] {
            let data = WebEncoder.encode(&test_image(16, 16), format, 0.8).unwrap();
            let decoded = SniffDecoder.decode(&data).unwrap();
            assert_eq!(decoded.dimensions(), (16, 16));
        }
    }

    #[test]
    fn test_quality_out_of_range_is_clamped() {
        let data = WebEncoder
            .encode(&test_image(16, 16), OutputFormat::WebP, 7.5)
            .unwrap();
        assert!(!data.is_empty());
    }
}
