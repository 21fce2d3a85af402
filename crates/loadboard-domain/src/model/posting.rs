use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_STATUS: &str = "available";
pub const DEFAULT_EQUIPMENT: &str = "Van";
pub const DEFAULT_BROKER: &str = "Unknown";

/// A stored load posting, as returned by both endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingRecord {
    pub id: String,
    pub origin: String,
    pub destination: String,
    /// Miles
    pub distance: i64,
    pub rate: f64,
    /// Computed by the store as `round(rate / distance, 2)`
    pub rate_per_mile: Option<f64>,
    pub equipment: String,
    pub broker: String,
    pub broker_email: String,
    pub pickup_date: Option<NaiveDate>,
    pub commodity: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl PostingRecord {
    /// Rate per mile, derived from rate and distance when the store left it unset
    pub fn effective_rate_per_mile(&self) -> f64 {
        match self.rate_per_mile {
            Some(rpm) => rpm,
            None if self.distance > 0 => self.rate / self.distance as f64,
            None => 0.0,
        }
    }
}

/// A validated posting ready to be inserted. Identifier and creation
/// timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPosting {
    pub origin: String,
    pub destination: String,
    pub distance: i64,
    pub rate: f64,
    pub equipment: String,
    pub broker: String,
    pub broker_email: String,
    pub pickup_date: Option<NaiveDate>,
    pub commodity: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rate: f64, distance: i64, rate_per_mile: Option<f64>) -> PostingRecord {
        PostingRecord {
            id: "a1".to_string(),
            origin: "Chicago, IL".to_string(),
            destination: "Dallas, TX".to_string(),
            distance,
            rate,
            rate_per_mile,
            equipment: DEFAULT_EQUIPMENT.to_string(),
            broker: DEFAULT_BROKER.to_string(),
            broker_email: String::new(),
            pickup_date: None,
            commodity: String::new(),
            status: DEFAULT_STATUS.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_rate_prefers_stored_value() {
        let r = record(1800.0, 967, Some(1.86));
        assert!((r.effective_rate_per_mile() - 1.86).abs() < f64::EPSILON);
    }

    #[test]
    fn test_effective_rate_derived_when_missing() {
        let r = record(1000.0, 500, None);
        assert!((r.effective_rate_per_mile() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serializes_pickup_date_as_calendar_date() {
        let mut r = record(1800.0, 967, None);
        r.pickup_date = NaiveDate::from_ymd_opt(2025, 3, 14);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["pickup_date"], "2025-03-14");
        assert!(json["rate_per_mile"].is_null());
    }
}
