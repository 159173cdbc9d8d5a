//! Image normalization module
//!
//! Decode, resample, and encode are separate capability traits so codecs and
//! filters can be swapped without touching the orchestration in `normalizer`.

pub mod codec;
pub mod normalizer;

pub use codec::{
    ImageDecoder, ImageResampler, ImageReencoder, LanczosResampler, OutputFormat, SniffDecoder,
    WebEncoder,
};
pub use normalizer::{ImageNormalizer, NormalizationPolicy, NormalizedImage, SourceImage};
