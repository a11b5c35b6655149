use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An audiometric test frequency in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Frequency(pub u32);

impl Frequency {
    pub fn hz(self) -> u32 {
        self.0
    }

    /// Short axis label: `"500"`, `"1k"`, `"1.5k"`.
    pub fn label(self) -> String {
        if self.0 < 1000 {
            return self.0.to_string();
        }
        let whole = self.0 / 1000;
        let tenths = (self.0 % 1000) / 100;
        if tenths == 0 {
            format!("{whole}k")
        } else {
            format!("{whole}.{tenths}k")
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}

/// A hearing level in dB HL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct HearingLevel(pub i32);

impl HearingLevel {
    pub fn db(self) -> i32 {
        self.0
    }
}

impl fmt::Display for HearingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dB HL", self.0)
    }
}

/// Thresholds for one ear, keyed by frequency.
///
/// A missing key means the frequency was not tested. Iteration is in
/// ascending frequency order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ThresholdSet(BTreeMap<Frequency, HearingLevel>);

impl ThresholdSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, frequency: Frequency) -> Option<HearingLevel> {
        self.0.get(&frequency).copied()
    }

    /// Store a level, returning the previous one.
    pub fn set(&mut self, frequency: Frequency, level: HearingLevel) -> Option<HearingLevel> {
        self.0.insert(frequency, level)
    }

    /// Remove a level, returning it if one was stored.
    pub fn clear(&mut self, frequency: Frequency) -> Option<HearingLevel> {
        self.0.remove(&frequency)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Frequency, HearingLevel)> + '_ {
        self.0.iter().map(|(f, l)| (*f, *l))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Frequency, HearingLevel)> for ThresholdSet {
    fn from_iter<I: IntoIterator<Item = (Frequency, HearingLevel)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
