use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which ear a threshold belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Ear {
    Left,
    Right,
}

impl Ear {
    /// Both ears, in drawing order.
    pub const ALL: [Ear; 2] = [Ear::Right, Ear::Left];

    pub fn as_str(self) -> &'static str {
        match self {
            Ear::Left => "left",
            Ear::Right => "right",
        }
    }
}

impl fmt::Display for Ear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
