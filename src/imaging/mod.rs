//! Image processing: dimension math plus a pluggable pixel backend.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Variant dimensions** | [`calculate_resized_dimensions`] (pure) |
//! | **Encoder selection** | [`OutputFormat::from_extension`] |
//! | **Decode / resize / encode** | `image` crate via [`RustBackend`] |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{Dimensions, calculate_resized_dimensions};
pub use operations::{
    NamingConfig, RenderedVariant, VariantPlan, plan_variants, render_variants,
};
pub use params::{OutputFormat, RenderParams};
pub use rust_backend::{RustBackend, supported_input_extensions};
