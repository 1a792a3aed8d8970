//! Photo normalization.
//!
//! Every uploaded photo is decoded, flattened to RGB, shrunk to fit a
//! 1024 x 1024 box and re-encoded as JPEG before it reaches the object store.

mod normalizer;

pub use normalizer::{
    JPEG_QUALITY, MAX_DIMENSION, NormalizeError, NormalizedImage, OUTPUT_CONTENT_TYPE,
    OUTPUT_EXTENSION, normalize, sniff_format,
};

use clinic_shared::AppError;

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::Decode(_) => Self::invalid_input(err.to_string()),
            NormalizeError::Encode(e) => Self::Internal(e.to_string()),
        }
    }
}
