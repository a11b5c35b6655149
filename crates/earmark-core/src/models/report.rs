use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::audiogram::{Audiogram, ThresholdChange};
use crate::error::CoreError;

/// A hearing-test report as kept in the clinic's record store.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HearingReport {
    pub id: Uuid,
    pub client_id: Uuid,
    pub test_date: jiff::civil::Date,
    pub audiologist: Option<String>,
    #[serde(default)]
    pub audiogram: Audiogram,
    pub notes: Option<String>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl HearingReport {
    pub fn new(client_id: Uuid, test_date: jiff::civil::Date, now: jiff::Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            test_date,
            audiologist: None,
            audiogram: Audiogram::default(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an editor change and bump `updated_at`.
    pub fn apply(&mut self, change: &ThresholdChange, now: jiff::Timestamp) {
        self.audiogram.apply(change);
        self.updated_at = now;
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, CoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
