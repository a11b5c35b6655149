//! earmark-audiogram
//!
//! Interactive audiogram editing, independent of any UI toolkit. Maps
//! pointer coordinates to frequency/level values, turns clicks into
//! threshold changes, and describes what to draw as a [`render::RenderPlan`].
//!
//! The editor never owns threshold data: the caller passes its
//! [`Audiogram`](earmark_core::models::audiogram::Audiogram) into every call
//! and persists the [`ThresholdChange`](earmark_core::models::audiogram::ThresholdChange)s
//! it gets back.

pub mod editor;
pub mod error;
pub mod render;
pub mod scale;
pub mod transform;

pub use editor::{AudiogramEditor, EditorEffect, EditorEvent, EditorListener, EditorState};
pub use error::AudiogramError;
pub use render::RenderPlan;
pub use scale::AudiogramScale;
pub use transform::{ChartArea, ChartTransform};
