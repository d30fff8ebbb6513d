//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait splits pixel work into three operations:
//! decode the source once, report its dimensions, and render a variant from
//! the decoded image. Rendering takes the decoded image by shared reference,
//! so any number of variants can be derived from one decode, in parallel,
//! without a variant ever observing another's resize.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), backed by the `image`
//! crate.

use super::calculations::Dimensions;
use super::params::RenderParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
///
/// `Sync` so operations can fan out across rayon workers with a shared
/// backend and a shared decoded image.
pub trait ImageBackend: Sync {
    /// Decoded, immutable in-memory image.
    type Image: Sync;

    /// Decode encoded image bytes.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Image, BackendError>;

    /// Native pixel dimensions of a decoded image.
    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Resize a copy of `image` and encode it.
    fn render(&self, image: &Self::Image, params: &RenderParams) -> Result<Vec<u8>, BackendError>;
}
