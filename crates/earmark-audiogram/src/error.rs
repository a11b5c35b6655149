use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AudiogramError {
    #[error("an audiogram needs at least two frequencies, got {0}")]
    TooFewFrequencies(usize),

    #[error("frequencies must be positive and strictly ascending ({previous} Hz then {next} Hz)")]
    FrequenciesNotAscending { previous: u32, next: u32 },

    #[error("frequency must be positive")]
    ZeroFrequency,

    #[error("level range is empty: min {min} dB must be below max {max} dB")]
    EmptyLevelRange { min: i32, max: i32 },

    #[error("level step must be positive, got {0}")]
    InvalidLevelStep(i32),

    #[error("level range {min}..{max} dB is not a multiple of the {step} dB step")]
    LevelRangeNotMultiple { min: i32, max: i32, step: i32 },

    #[error("level range would draw {count} grid lines, more than the {max} allowed")]
    TooManyLevels { count: i64, max: i64 },

    #[error("normal band {upper}..{lower} dB must lie within {min}..{max} dB")]
    NormalBandOutOfRange {
        upper: i32,
        lower: i32,
        min: i32,
        max: i32,
    },

    #[error("chart area must have finite positive size, got {width}x{height}")]
    InvalidChartArea { width: f64, height: f64 },
}
