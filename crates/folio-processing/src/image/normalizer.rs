//! Image normalizer: bounded-dimension resize + re-encode before upload.
//!
//! `normalize` is a total function: every internal failure (undecodable
//! bytes, encoder trouble, degenerate dimensions) degrades to returning the
//! original input unchanged. A broken or unusual image must never block a
//! content update.

use bytes::Bytes;
use image::GenericImageView;

use super::codec::{
    ImageDecoder, ImageReencoder, ImageResampler, LanczosResampler, OutputFormat, SniffDecoder,
    WebEncoder,
};

/// Raw user-supplied file, as received from the upload widget.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub data: Bytes,
    pub content_type: String,
    pub file_name: String,
}

/// Normalization output. Either the re-encoded image or, on any
/// short-circuit or recoverable failure, the source passed through
/// byte-for-byte with its original name and content type.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub data: Bytes,
    pub content_type: String,
    pub file_name: String,
}

impl NormalizedImage {
    fn pass_through(source: SourceImage) -> Self {
        NormalizedImage {
            data: source.data,
            content_type: source.content_type,
            file_name: source.file_name,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Size bounds, quality, and minimum-size threshold for normalization.
#[derive(Debug, Clone, Copy)]
pub struct NormalizationPolicy {
    pub max_width: u32,
    pub max_height: u32,
    /// Encoder quality, 0.0-1.0.
    pub quality: f32,
    /// Files below this byte size are passed through untouched.
    pub min_size_to_process: usize,
    pub output_format: OutputFormat,
}

impl Default for NormalizationPolicy {
    fn default() -> Self {
        NormalizationPolicy {
            max_width: 1920,
            max_height: 1080,
            quality: 0.8,
            min_size_to_process: 50 * 1024,
            output_format: OutputFormat::WebP,
        }
    }
}

impl NormalizationPolicy {
    /// Compute target dimensions preserving aspect ratio.
    ///
    /// Only the dominant axis is checked against its bound: landscape images
    /// are clamped by `max_width` alone, portrait and square images by
    /// `max_height` alone. This matches the admin console's historical
    /// behavior and is kept deliberately (see DESIGN.md).
    pub fn target_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        if width > height {
            if width > self.max_width {
                let scaled =
                    (height as f64 * self.max_width as f64 / width as f64).round() as u32;
                return (self.max_width, scaled);
            }
        } else if height > self.max_height {
            let scaled = (width as f64 * self.max_height as f64 / height as f64).round() as u32;
            return (scaled, self.max_height);
        }
        (width, height)
    }
}

/// The normalizer, wired with swappable decode/resample/encode capabilities.
pub struct ImageNormalizer {
    decoder: Box<dyn ImageDecoder>,
    resampler: Box<dyn ImageResampler>,
    encoder: Box<dyn ImageReencoder>,
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        ImageNormalizer {
            decoder: Box::new(SniffDecoder),
            resampler: Box::new(LanczosResampler),
            encoder: Box::new(WebEncoder),
        }
    }
}

impl ImageNormalizer {
    pub fn new(
        decoder: Box<dyn ImageDecoder>,
        resampler: Box<dyn ImageResampler>,
        encoder: Box<dyn ImageReencoder>,
    ) -> Self {
        ImageNormalizer {
            decoder,
            resampler,
            encoder,
        }
    }

    /// Normalize a user-supplied image file.
    ///
    /// Short-circuits, in order: non-image content type, then files below the
    /// policy's minimum-size threshold. The re-encoded output is returned
    /// regardless of whether it is smaller than the source; format
    /// normalization is preferred even when it does not shrink the payload.
    pub fn normalize(&self, source: SourceImage, policy: &NormalizationPolicy) -> NormalizedImage {
        if !source.content_type.starts_with("image/") {
            return NormalizedImage::pass_through(source);
        }

        if source.data.len() < policy.min_size_to_process {
            return NormalizedImage::pass_through(source);
        }

        let img = match self.decoder.decode(&source.data) {
            Ok(img) => img,
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    file_name = %source.file_name,
                    content_type = %source.content_type,
                    "Image decode failed, keeping original"
                );
                return NormalizedImage::pass_through(source);
            }
        };

        let (width, height) = img.dimensions();
        let (new_width, new_height) = policy.target_dimensions(width, height);
        if new_width == 0 || new_height == 0 {
            tracing::debug!(
                width = width,
                height = height,
                file_name = %source.file_name,
                "Degenerate target dimensions, keeping original"
            );
            return NormalizedImage::pass_through(source);
        }

        let img = if (new_width, new_height) != (width, height) {
            self.resampler.resample(&img, new_width, new_height)
        } else {
            img
        };

        let encoded = match self.encoder.encode(&img, policy.output_format, policy.quality) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    file_name = %source.file_name,
                    "Image encode failed, keeping original"
                );
                return NormalizedImage::pass_through(source);
            }
        };

        tracing::debug!(
            file_name = %source.file_name,
            original_bytes = source.data.len(),
            encoded_bytes = encoded.len(),
            width = new_width,
            height = new_height,
            "Image normalized"
        );

        NormalizedImage {
            file_name: derive_file_name(&source.file_name, policy.output_format),
            content_type: policy.output_format.mime_type().to_string(),
            data: encoded,
        }
    }
}

/// Replace the final extension (if any) with the output format's.
fn derive_file_name(name: &str, format: OutputFormat) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && !ext.contains('/') => {
            format!("{}.{}", stem, format.extension())
        }
        _ => format!("{}.{}", name, format.extension()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
        buffer
    }

    fn gradient_image(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
        });
        DynamicImage::ImageRgba8(img)
    }

    fn source(data: Vec<u8>, content_type: &str, file_name: &str) -> SourceImage {
        SourceImage {
            data: Bytes::from(data),
            content_type: content_type.to_string(),
            file_name: file_name.to_string(),
        }
    }

    /// Policy with the size threshold disabled so small synthetic test images
    /// still get processed.
    fn processing_policy() -> NormalizationPolicy {
        NormalizationPolicy {
            min_size_to_process: 0,
            ..Default::default()
        }
    }

    fn decode_dims(data: &[u8]) -> (u32, u32) {
        image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .unwrap()
            .decode()
            .unwrap()
            .dimensions()
    }

    #[test]
    fn test_non_image_content_type_is_byte_identical() {
        let payload = vec![0u8; 100_000];
        let src = source(payload.clone(), "application/pdf", "resume.pdf");

        let result = ImageNormalizer::default().normalize(src, &NormalizationPolicy::default());

        assert_eq!(result.data.as_ref(), payload.as_slice());
        assert_eq!(result.content_type, "application/pdf");
        assert_eq!(result.file_name, "resume.pdf");
    }

    #[test]
    fn test_undersized_image_is_passed_through() {
        let img = gradient_image(200, 200);
        let png = encode(&img, ImageFormat::Png);
        assert!(png.len() < 50 * 1024, "test image must stay below threshold");
        let src = source(png.clone(), "image/png", "icon.png");

        let result = ImageNormalizer::default().normalize(src, &NormalizationPolicy::default());

        assert_eq!(result.data.as_ref(), png.as_slice());
        assert_eq!(result.content_type, "image/png");
        assert_eq!(result.file_name, "icon.png");
    }

    #[test]
    fn test_corrupt_bytes_claiming_image_type_pass_through() {
        let garbage = vec![0xAB; 200_000];
        let src = source(garbage.clone(), "image/png", "broken.png");

        let result = ImageNormalizer::default().normalize(src, &NormalizationPolicy::default());

        assert_eq!(result.data.as_ref(), garbage.as_slice());
        assert_eq!(result.file_name, "broken.png");
    }

    #[test]
    fn test_oversized_landscape_is_bounded_by_max_width() {
        let jpeg = encode(&gradient_image(4000, 2000), ImageFormat::Jpeg);
        let src = source(jpeg, "image/jpeg", "banner.jpg");

        let result = ImageNormalizer::default().normalize(src, &processing_policy());

        assert_eq!(result.content_type, "image/webp");
        assert_eq!(result.file_name, "banner.webp");
        assert_eq!(decode_dims(&result.data), (1920, 960));
    }

    #[test]
    fn test_oversized_portrait_is_bounded_by_max_height() {
        let jpeg = encode(&gradient_image(1000, 3000), ImageFormat::Jpeg);
        let src = source(jpeg, "image/jpeg", "tower.jpg");

        let result = ImageNormalizer::default().normalize(src, &processing_policy());

        assert_eq!(decode_dims(&result.data), (360, 1080));
    }

    #[test]
    fn test_landscape_within_width_bound_is_reencoded_not_resized() {
        // 1000x500: width within max_width; the height bound is never
        // consulted for landscape images, so dimensions stay untouched but
        // the payload is still converted to WebP.
        let jpeg = encode(&gradient_image(1000, 500), ImageFormat::Jpeg);
        let src = source(jpeg, "image/jpeg", "photo.jpg");

        let result = ImageNormalizer::default().normalize(src, &processing_policy());

        assert_eq!(result.content_type, "image/webp");
        assert_eq!(decode_dims(&result.data), (1000, 500));
    }

    #[test]
    fn test_square_image_is_bounded_by_max_height_only() {
        let jpeg = encode(&gradient_image(2500, 2500), ImageFormat::Jpeg);
        let src = source(jpeg, "image/jpeg", "square.jpg");

        let result = ImageNormalizer::default().normalize(src, &processing_policy());

        assert_eq!(decode_dims(&result.data), (1080, 1080));
    }

    #[test]
    fn test_aspect_ratio_preserved_within_rounding() {
        let jpeg = encode(&gradient_image(3333, 1111), ImageFormat::Jpeg);
        let src = source(jpeg, "image/jpeg", "wide.jpg");

        let result = ImageNormalizer::default().normalize(src, &processing_policy());

        let (w, h) = decode_dims(&result.data);
        assert_eq!(w, 1920);
        let expected = (1111f64 * 1920.0 / 3333.0).round() as u32;
        assert!(h.abs_diff(expected) <= 1);
    }

    #[test]
    fn test_renormalizing_output_keeps_dimensions_and_type() {
        let jpeg = encode(&gradient_image(4000, 2000), ImageFormat::Jpeg);
        let first = ImageNormalizer::default().normalize(
            source(jpeg, "image/jpeg", "banner.jpg"),
            &processing_policy(),
        );

        let second = ImageNormalizer::default().normalize(
            SourceImage {
                data: first.data.clone(),
                content_type: first.content_type.clone(),
                file_name: first.file_name.clone(),
            },
            &processing_policy(),
        );

        assert_eq!(second.content_type, "image/webp");
        assert_eq!(second.file_name, "banner.webp");
        assert_eq!(decode_dims(&second.data), decode_dims(&first.data));
    }

    #[test]
    fn test_output_returned_even_when_larger_than_input() {
        // A small, already well-compressed image often grows when re-encoded;
        // format normalization still wins over size.
        let jpeg = encode(&gradient_image(300, 200), ImageFormat::Jpeg);
        let src = source(jpeg, "image/jpeg", "thumb.jpg");

        let result = ImageNormalizer::default().normalize(src, &processing_policy());

        assert_eq!(result.content_type, "image/webp");
        assert_eq!(result.file_name, "thumb.webp");
    }

    #[test]
    fn test_target_dimensions_one_axis_rule() {
        let policy = NormalizationPolicy::default();

        // Landscape: only max_width applies, even when height also exceeds
        // max_height.
        assert_eq!(policy.target_dimensions(2500, 2000), (1920, 1536));
        // Portrait: only max_height applies.
        assert_eq!(policy.target_dimensions(1000, 3000), (360, 1080));
        // Square goes through the height branch.
        assert_eq!(policy.target_dimensions(2500, 2500), (1080, 1080));
        // Within bounds: untouched.
        assert_eq!(policy.target_dimensions(1920, 1080), (1920, 1080));
        assert_eq!(policy.target_dimensions(100, 50), (100, 50));
    }

    #[test]
    fn test_derive_file_name() {
        assert_eq!(
            derive_file_name("photo.jpg", OutputFormat::WebP),
            "photo.webp"
        );
        assert_eq!(
            derive_file_name("archive.tar.gz", OutputFormat::WebP),
            "archive.tar.webp"
        );
        assert_eq!(derive_file_name("noext", OutputFormat::WebP), "noext.webp");
        assert_eq!(
            derive_file_name("photo.JPG", OutputFormat::Jpeg),
            "photo.jpg"
        );
    }
}
