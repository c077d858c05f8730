//! Print Queue Entry Model

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One generated barcode retained for printing
///
/// Entries are immutable once queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Time-derived id, strictly increasing within a queue
    pub id: u64,
    /// Standalone SVG markup of the rendered tag
    pub rendered_graphic: String,
    /// Encoded barcode data (`CB|RM|Kingston`)
    pub payload: String,
    /// Human-readable caption (`Cebu - Ram - Kingston`)
    pub label: String,
    /// Creation time (ms since epoch)
    pub created_at: i64,
}

impl QueueEntry {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at).single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_at_utc() {
        let entry = QueueEntry {
            id: 1,
            rendered_graphic: "<svg/>".into(),
            payload: "CB|RM|Kingston".into(),
            label: "Cebu - Ram - Kingston".into(),
            created_at: 1_700_000_000_000,
        };
        let ts = entry.created_at_utc().unwrap();
        assert_eq!(ts.timestamp_millis(), 1_700_000_000_000);
    }
}
