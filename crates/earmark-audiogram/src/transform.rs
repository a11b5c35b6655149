//! Mapping between chart values and pixel coordinates.
//!
//! Frequency runs left to right on a logarithmic axis spanning the lowest
//! and highest plotted frequency. Hearing level runs top to bottom on a
//! linear axis, quietest level at the top as audiograms are read.
//!
//! A [`ChartTransform`] borrows the scale and copies the area, so callers
//! build a fresh one from the current chart size every time they need it.
//! Construction validates both, so every mapping below has a non-empty
//! frequency list and non-zero spans to work with.

use earmark_core::models::threshold::{Frequency, HearingLevel};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::AudiogramError;
use crate::scale::AudiogramScale;

/// The plotted rectangle in pixel space, excluding axis labels and margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChartArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ChartArea {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Result<Self, AudiogramError> {
        let area = Self {
            left,
            top,
            width,
            height,
        };
        area.validate()?;
        Ok(area)
    }

    pub fn validate(&self) -> Result<(), AudiogramError> {
        let finite = [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(AudiogramError::InvalidChartArea {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Inclusive of the edges. NaN coordinates are never inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChartTransform<'a> {
    scale: &'a AudiogramScale,
    area: ChartArea,
    log_min: f64,
    log_span: f64,
}

impl<'a> ChartTransform<'a> {
    /// Validate `scale` and `area` and build the transform between them.
    pub fn new(scale: &'a AudiogramScale, area: ChartArea) -> Result<Self, AudiogramError> {
        scale.validate()?;
        area.validate()?;
        Ok(Self::from_validated(scale, area))
    }

    /// Both `scale` and `area` must already have passed validation.
    pub(crate) fn from_validated(scale: &'a AudiogramScale, area: ChartArea) -> Self {
        let log_min = f64::from(scale.lowest_frequency().hz()).ln();
        let log_max = f64::from(scale.highest_frequency().hz()).ln();
        Self {
            scale,
            area,
            log_min,
            log_span: log_max - log_min,
        }
    }

    pub fn area(&self) -> ChartArea {
        self.area
    }

    pub fn scale(&self) -> &'a AudiogramScale {
        self.scale
    }

    /// Horizontal pixel of a frequency, clamped to the plotted range.
    pub fn frequency_to_x(&self, frequency: Frequency) -> f64 {
        self.hz_to_x(f64::from(frequency.hz()))
    }

    fn hz_to_x(&self, hz: f64) -> f64 {
        let t = ((hz.max(f64::MIN_POSITIVE).ln() - self.log_min) / self.log_span).clamp(0.0, 1.0);
        self.area.left + t * self.area.width
    }

    /// Continuous frequency at a horizontal pixel. Pixels outside the area
    /// extrapolate along the same log scale.
    pub fn x_to_frequency(&self, x: f64) -> f64 {
        let t = (x - self.area.left) / self.area.width;
        (self.log_min + t * self.log_span).exp()
    }

    /// Vertical pixel of a level, clamped to the level range.
    pub fn level_to_y(&self, level: HearingLevel) -> f64 {
        let min = f64::from(self.scale.min_level.db());
        let max = f64::from(self.scale.max_level.db());
        let t = ((f64::from(level.db()) - min) / (max - min)).clamp(0.0, 1.0);
        self.area.top + t * self.area.height
    }

    /// Continuous dB value at a vertical pixel.
    pub fn y_to_level(&self, y: f64) -> f64 {
        let min = f64::from(self.scale.min_level.db());
        let max = f64::from(self.scale.max_level.db());
        let t = (y - self.area.top) / self.area.height;
        min + t * (max - min)
    }

    /// The plotted frequency whose column is closest to `x`. Ties go to the
    /// lower frequency.
    pub fn nearest_frequency(&self, x: f64) -> Frequency {
        let mut best = self.scale.lowest_frequency();
        let mut best_distance = f64::INFINITY;
        for &frequency in &self.scale.frequencies {
            let distance = (self.frequency_to_x(frequency) - x).abs();
            if distance < best_distance {
                best = frequency;
                best_distance = distance;
            }
        }
        best
    }

    /// Snapped grid level at a vertical pixel. `None` if `y` is not finite.
    pub fn snapped_level(&self, y: f64) -> Option<HearingLevel> {
        self.scale.snap_level(self.y_to_level(y))
    }
}
