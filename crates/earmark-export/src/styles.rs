use earmark_core::models::ear::Ear;
use serde::{Deserialize, Serialize};

/// Visual styling for exported charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyles {
    /// Font for axis labels and the title (e.g. "Helvetica").
    pub font_family: String,

    /// Label font size in pixels.
    pub font_size: f64,

    /// Right ear markers and trace. Red by clinical convention.
    pub right_ear_color: String,

    /// Left ear markers and trace. Blue by clinical convention.
    pub left_ear_color: String,

    pub grid_color: String,

    pub axis_color: String,

    /// Fill for the normal-hearing band.
    pub normal_band_color: String,

    /// Marker half-size in pixels.
    pub marker_radius: f64,

    pub stroke_width: f64,

    /// Blank space right of and below the plotted area.
    pub margin: f64,
}

impl Default for ChartStyles {
    fn default() -> Self {
        Self {
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            font_size: 12.0,
            right_ear_color: "#c62828".to_string(),
            left_ear_color: "#1565c0".to_string(),
            grid_color: "#d0d0d0".to_string(),
            axis_color: "#333333".to_string(),
            normal_band_color: "#e6f2e6".to_string(),
            marker_radius: 6.0,
            stroke_width: 1.5,
            margin: 24.0,
        }
    }
}

impl ChartStyles {
    pub fn ear_color(&self, ear: Ear) -> &str {
        match ear {
            Ear::Right => &self.right_ear_color,
            Ear::Left => &self.left_ear_color,
        }
    }
}
