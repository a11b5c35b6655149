//! Toolkit-neutral description of an audiogram chart.
//!
//! Everything here is recomputed from the scale, the chart area and the
//! caller's stored values on each call. Marker positions come from stored
//! levels, never from pointer coordinates.

use earmark_core::models::audiogram::Audiogram;
use earmark_core::models::ear::Ear;
use earmark_core::models::threshold::{Frequency, HearingLevel};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::editor::{EditorState, HoverPoint};
use crate::transform::{ChartArea, ChartTransform};

/// Fixed per-ear marker shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MarkerSymbol {
    Circle,
    Cross,
}

impl MarkerSymbol {
    pub fn for_ear(ear: Ear) -> Self {
        match ear {
            Ear::Right => MarkerSymbol::Circle,
            Ear::Left => MarkerSymbol::Cross,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A vertical line at a frequency, or a horizontal line at a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GridLine {
    /// x for frequency lines, y for level lines.
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Marker {
    pub ear: Ear,
    pub frequency: Frequency,
    pub level: HearingLevel,
    pub symbol: MarkerSymbol,
    pub x: f64,
    pub y: f64,
    /// The stored value lay outside the chart and was drawn at the edge.
    pub clamped: bool,
}

/// Line joining one ear's markers in ascending frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Trace {
    pub ear: Ear,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HoverHighlight {
    pub point: HoverPoint,
    pub x: f64,
    pub y: f64,
    /// What the hovered ear currently stores at this frequency.
    pub stored: Option<HearingLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RenderPlan {
    pub area: ChartArea,
    pub normal_band: Rect,
    pub frequency_lines: Vec<GridLine>,
    pub level_lines: Vec<GridLine>,
    pub markers: Vec<Marker>,
    pub traces: Vec<Trace>,
    pub hover: Option<HoverHighlight>,
    pub active_ear: Ear,
}

impl RenderPlan {
    pub fn markers_for(&self, ear: Ear) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| m.ear == ear)
    }
}

pub(crate) fn plan(
    transform: &ChartTransform<'_>,
    audiogram: &Audiogram,
    state: &EditorState,
) -> RenderPlan {
    let scale = transform.scale();
    let area = transform.area();

    let band_top = transform.level_to_y(scale.normal_band.upper);
    let band_bottom = transform.level_to_y(scale.normal_band.lower);
    let normal_band = Rect {
        x: area.left,
        y: band_top,
        width: area.width,
        height: band_bottom - band_top,
    };

    let frequency_lines = scale
        .frequencies
        .iter()
        .map(|&f| GridLine {
            position: transform.frequency_to_x(f),
            label: f.label(),
        })
        .collect();

    let level_lines = scale
        .levels()
        .map(|level| GridLine {
            position: transform.level_to_y(level),
            label: level.db().to_string(),
        })
        .collect();

    let mut markers = Vec::new();
    let mut traces = Vec::new();
    for ear in Ear::ALL {
        let ear_markers: Vec<Marker> = audiogram
            .ear(ear)
            .iter()
            .map(|(frequency, level)| marker(transform, ear, frequency, level))
            .collect();
        if ear_markers.len() > 1 {
            traces.push(Trace {
                ear,
                points: ear_markers.iter().map(|m| [m.x, m.y]).collect(),
            });
        }
        markers.extend(ear_markers);
    }

    let hover = state.hover.map(|point| HoverHighlight {
        point,
        x: transform.frequency_to_x(point.frequency),
        y: transform.level_to_y(point.level),
        stored: audiogram.ear(point.ear).get(point.frequency),
    });

    RenderPlan {
        area,
        normal_band,
        frequency_lines,
        level_lines,
        markers,
        traces,
        hover,
        active_ear: state.active_ear,
    }
}

fn marker(
    transform: &ChartTransform<'_>,
    ear: Ear,
    frequency: Frequency,
    level: HearingLevel,
) -> Marker {
    let scale = transform.scale();
    let off_scale = !scale.contains_frequency(frequency);
    let out_of_range = scale.clamp_level(level) != level;
    if off_scale || out_of_range {
        tracing::warn!(
            %ear,
            hz = frequency.hz(),
            db = level.db(),
            "stored threshold off the chart grid"
        );
    }
    Marker {
        ear,
        frequency,
        level,
        symbol: MarkerSymbol::for_ear(ear),
        x: transform.frequency_to_x(frequency),
        y: transform.level_to_y(level),
        clamped: off_scale || out_of_range,
    }
}
