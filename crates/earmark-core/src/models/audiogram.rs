use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::ear::Ear;
use super::threshold::{Frequency, HearingLevel, ThresholdSet};

/// Left and right threshold sets for one hearing test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Audiogram {
    #[serde(default)]
    pub left: ThresholdSet,
    #[serde(default)]
    pub right: ThresholdSet,
}

impl Audiogram {
    pub fn ear(&self, ear: Ear) -> &ThresholdSet {
        match ear {
            Ear::Left => &self.left,
            Ear::Right => &self.right,
        }
    }

    pub fn ear_mut(&mut self, ear: Ear) -> &mut ThresholdSet {
        match ear {
            Ear::Left => &mut self.left,
            Ear::Right => &mut self.right,
        }
    }

    /// Persist a change emitted by the editor. Returns the value that was
    /// stored before.
    pub fn apply(&mut self, change: &ThresholdChange) -> Option<HearingLevel> {
        let set = self.ear_mut(change.ear);
        match change.level {
            Some(level) => set.set(change.frequency, level),
            None => set.clear(change.frequency),
        }
    }
}

/// A single point-level mutation request. `level: None` clears the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ThresholdChange {
    pub ear: Ear,
    pub frequency: Frequency,
    pub level: Option<HearingLevel>,
}

impl ThresholdChange {
    pub fn set(ear: Ear, frequency: Frequency, level: HearingLevel) -> Self {
        Self {
            ear,
            frequency,
            level: Some(level),
        }
    }

    pub fn clear(ear: Ear, frequency: Frequency) -> Self {
        Self {
            ear,
            frequency,
            level: None,
        }
    }

    pub fn is_clear(&self) -> bool {
        self.level.is_none()
    }
}
