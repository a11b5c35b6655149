//! earmark-export
//!
//! Printable audiogram charts. Produces standalone SVG from a render plan;
//! the PDF service rasterizes it alongside the rest of the report.

pub mod error;
pub mod styles;
pub mod svg;

pub use svg::{export_audiogram, render_svg};
