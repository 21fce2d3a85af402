//! Raw ingestion payload, before validation

use serde::{Deserialize, Serialize};

/// A numeric field as callers send it: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl From<f64> for NumericField {
    fn from(value: f64) -> Self {
        NumericField::Number(value)
    }
}

impl From<i64> for NumericField {
    fn from(value: i64) -> Self {
        NumericField::Number(value as f64)
    }
}

impl From<&str> for NumericField {
    fn from(value: &str) -> Self {
        NumericField::Text(value.to_string())
    }
}

impl From<String> for NumericField {
    fn from(value: String) -> Self {
        NumericField::Text(value)
    }
}

/// Posting payload accepted by the ingestion endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestRequest {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub distance: Option<NumericField>,
    #[serde(default)]
    pub rate: Option<NumericField>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub broker: Option<String>,
    #[serde(default)]
    pub broker_email: Option<String>,
    #[serde(default)]
    pub pickup_date: Option<String>,
    #[serde(default)]
    pub commodity: Option<String>,
}

impl IngestRequest {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        distance: impl Into<NumericField>,
        rate: impl Into<NumericField>,
    ) -> Self {
        Self {
            origin: Some(origin.into()),
            destination: Some(destination.into()),
            distance: Some(distance.into()),
            rate: Some(rate.into()),
            ..Default::default()
        }
    }

    pub fn with_equipment(mut self, equipment: impl Into<String>) -> Self {
        self.equipment = Some(equipment.into());
        self
    }

    pub fn with_broker(mut self, broker: impl Into<String>) -> Self {
        self.broker = Some(broker.into());
        self
    }

    pub fn with_broker_email(mut self, broker_email: impl Into<String>) -> Self {
        self.broker_email = Some(broker_email.into());
        self
    }

    pub fn with_pickup_date(mut self, pickup_date: impl Into<String>) -> Self {
        self.pickup_date = Some(pickup_date.into());
        self
    }

    pub fn with_commodity(mut self, commodity: impl Into<String>) -> Self {
        self.commodity = Some(commodity.into());
        self
    }
}
