//! density-strip: an idempotent kernel-density strip chart.
//!
//! The chart estimates a density curve from a sample set, highlights one
//! value on it and renders heading, legend and SVG paths into a retained
//! [`render::Document`]. Re-rendering upserts the same elements, so create,
//! update and resize all share a single draw path.

pub mod api;
pub mod core;
pub mod error;
pub mod platform;
pub mod render;
pub mod telemetry;

pub use api::{ChartProps, ChartPropsPatch, DensityChart, DensityStrip, Target};
pub use error::{ChartError, ChartResult};
