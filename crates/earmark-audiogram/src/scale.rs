use earmark_core::models::threshold::{Frequency, HearingLevel};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::AudiogramError;

/// Standard pure-tone test frequencies.
pub const STANDARD_FREQUENCIES: [u32; 9] = [125, 250, 500, 1000, 2000, 3000, 4000, 6000, 8000];

/// Upper bound on horizontal grid lines a scale may produce.
pub const MAX_LEVELS: i64 = 1_000;

/// The vertical band of levels considered normal hearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NormalBand {
    /// Quietest edge, drawn nearest the top.
    pub upper: HearingLevel,
    /// Loudest edge still counted as normal.
    pub lower: HearingLevel,
}

/// Definition of the chart grid: which frequencies are plotted, the level
/// range, and the snap increment for pointer input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AudiogramScale {
    pub frequencies: Vec<Frequency>,
    pub min_level: HearingLevel,
    pub max_level: HearingLevel,
    /// Grid and snap increment in dB.
    pub level_step: i32,
    pub normal_band: NormalBand,
}

impl Default for AudiogramScale {
    fn default() -> Self {
        Self {
            frequencies: STANDARD_FREQUENCIES.iter().copied().map(Frequency).collect(),
            min_level: HearingLevel(-10),
            max_level: HearingLevel(120),
            level_step: 5,
            normal_band: NormalBand {
                upper: HearingLevel(-10),
                lower: HearingLevel(20),
            },
        }
    }
}

impl AudiogramScale {
    pub fn validate(&self) -> Result<(), AudiogramError> {
        if self.frequencies.len() < 2 {
            return Err(AudiogramError::TooFewFrequencies(self.frequencies.len()));
        }
        if self.frequencies[0].hz() == 0 {
            return Err(AudiogramError::ZeroFrequency);
        }
        for pair in self.frequencies.windows(2) {
            if pair[1] <= pair[0] {
                return Err(AudiogramError::FrequenciesNotAscending {
                    previous: pair[0].hz(),
                    next: pair[1].hz(),
                });
            }
        }

        let (min, max) = (self.min_level.db(), self.max_level.db());
        if min >= max {
            return Err(AudiogramError::EmptyLevelRange { min, max });
        }
        if self.level_step <= 0 {
            return Err(AudiogramError::InvalidLevelStep(self.level_step));
        }
        let span = i64::from(max) - i64::from(min);
        let step = i64::from(self.level_step);
        if span % step != 0 {
            return Err(AudiogramError::LevelRangeNotMultiple {
                min,
                max,
                step: self.level_step,
            });
        }
        let count = span / step + 1;
        if count > MAX_LEVELS {
            return Err(AudiogramError::TooManyLevels {
                count,
                max: MAX_LEVELS,
            });
        }

        let (upper, lower) = (self.normal_band.upper.db(), self.normal_band.lower.db());
        if upper > lower || upper < min || lower > max {
            return Err(AudiogramError::NormalBandOutOfRange {
                upper,
                lower,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Only called on validated scales, which have at least two frequencies.
    pub(crate) fn lowest_frequency(&self) -> Frequency {
        self.frequencies[0]
    }

    pub(crate) fn highest_frequency(&self) -> Frequency {
        self.frequencies[self.frequencies.len() - 1]
    }

    pub fn contains_frequency(&self, frequency: Frequency) -> bool {
        self.frequencies.binary_search(&frequency).is_ok()
    }

    /// Every level on the vertical grid, quietest first.
    pub fn levels(&self) -> impl Iterator<Item = HearingLevel> + '_ {
        (self.min_level.db()..=self.max_level.db())
            .step_by(self.level_step.max(1) as usize)
            .map(HearingLevel)
    }

    pub fn is_valid_level(&self, level: HearingLevel) -> bool {
        let db = level.db();
        self.level_step > 0
            && db >= self.min_level.db()
            && db <= self.max_level.db()
            && (i64::from(db) - i64::from(self.min_level.db())) % i64::from(self.level_step) == 0
    }

    /// Snap a continuous dB value to the nearest grid level, clamped to the
    /// scale bounds. `None` for NaN or infinite input.
    pub fn snap_level(&self, db: f64) -> Option<HearingLevel> {
        if !db.is_finite() || self.level_step <= 0 {
            return None;
        }
        let min = self.min_level.db();
        let steps = ((db - f64::from(min)) / f64::from(self.level_step)).round();
        let snapped = f64::from(min) + steps * f64::from(self.level_step);
        let clamped = snapped.clamp(f64::from(min), f64::from(self.max_level.db()));
        Some(HearingLevel(clamped as i32))
    }

    pub fn clamp_level(&self, level: HearingLevel) -> HearingLevel {
        HearingLevel(level.db().clamp(self.min_level.db(), self.max_level.db()))
    }
}
