//! # Design Renderer
//!
//! Raster preview exporter for the design canvas. Renders a
//! [`design_core::Surface`] through an SVG intermediate and the
//! resvg/tiny-skia pipeline into base64 PNG data URIs, and provides the
//! image utilities hosts need for user uploads.
//!
//! This crate implements [`design_core::DesignExporter`]; the engine
//! itself never depends on the rasterization stack.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod image;

pub use error::{RenderError, RenderResult};
pub use export::{ExportLayers, SurfaceExporter};
pub use image::{decode_data_uri, dimensions_of, png_data_uri, SniffedFormat};
