//! Shared helpers for codec operations

pub mod validation;

pub use validation::{
    validate_compressed_frame, validate_pcm_bytes, validate_pcm_frame, validate_stream_length,
};
