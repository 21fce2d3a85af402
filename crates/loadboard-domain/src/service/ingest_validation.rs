//! Validation and coercion of ingestion payloads

use chrono::NaiveDate;
use loadboard_types::ValidationError;

use crate::model::{
    IngestRequest, NewPosting, NumericField, DEFAULT_BROKER, DEFAULT_EQUIPMENT, DEFAULT_STATUS,
};

/// Longest lane accepted, in miles
const MAX_DISTANCE_MILES: i64 = 100_000;

/// Validate a raw payload and apply defaults.
///
/// `origin`, `destination`, `distance` and `rate` are required; an absent,
/// empty, or zero value counts as missing. Every missing field is reported at
/// once. Distance is truncated to whole miles and must lie in
/// `1..=MAX_DISTANCE_MILES`. Text fields are stored trimmed.
pub fn validate_ingest(req: &IngestRequest) -> Result<NewPosting, ValidationError> {
    let origin = text(&req.origin);
    let destination = text(&req.destination);
    let distance = numeric(&req.distance);
    let rate = numeric(&req.rate);

    let mut missing = Vec::new();
    if origin.is_none() {
        missing.push("origin");
    }
    if destination.is_none() {
        missing.push("destination");
    }
    if distance.is_none() {
        missing.push("distance");
    }
    if rate.is_none() {
        missing.push("rate");
    }

    let (Some(origin), Some(destination), Some(distance), Some(rate)) =
        (origin, destination, distance, rate)
    else {
        return Err(ValidationError::MissingFields(missing));
    };

    let distance = coerce_distance(distance)?;
    let rate = coerce_rate(rate)?;
    let pickup_date = text(&req.pickup_date)
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                ValidationError::InvalidField {
                    field: "pickup_date",
                    value: raw.to_string(),
                }
            })
        })
        .transpose()?;

    Ok(NewPosting {
        origin: origin.to_string(),
        destination: destination.to_string(),
        distance,
        rate,
        equipment: text(&req.equipment).unwrap_or(DEFAULT_EQUIPMENT).to_string(),
        broker: text(&req.broker).unwrap_or(DEFAULT_BROKER).to_string(),
        broker_email: text(&req.broker_email).unwrap_or_default().to_string(),
        pickup_date,
        commodity: text(&req.commodity).unwrap_or_default().to_string(),
        status: DEFAULT_STATUS.to_string(),
    })
}

fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Numeric fields keep their raw text so that errors can echo it back
enum Numeric<'a> {
    Value(f64),
    Unparsed(&'a str),
}

fn numeric(value: &Option<NumericField>) -> Option<Numeric<'_>> {
    match value.as_ref()? {
        NumericField::Number(n) if *n == 0.0 => None,
        NumericField::Number(n) => Some(Numeric::Value(*n)),
        NumericField::Text(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            match raw.parse::<f64>() {
                Ok(n) if n == 0.0 => None,
                Ok(n) if n.is_finite() => Some(Numeric::Value(n)),
                _ => Some(Numeric::Unparsed(raw)),
            }
        }
    }
}

fn coerce_distance(value: Numeric<'_>) -> Result<i64, ValidationError> {
    match value {
        Numeric::Value(n) if (1.0..=MAX_DISTANCE_MILES as f64).contains(&n.trunc()) => {
            Ok(n.trunc() as i64)
        }
        Numeric::Value(n) => Err(ValidationError::InvalidField {
            field: "distance",
            value: n.to_string(),
        }),
        Numeric::Unparsed(raw) => Err(ValidationError::InvalidField {
            field: "distance",
            value: raw.to_string(),
        }),
    }
}

fn coerce_rate(value: Numeric<'_>) -> Result<f64, ValidationError> {
    match value {
        Numeric::Value(n) if n > 0.0 => Ok(n),
        Numeric::Value(n) => Err(ValidationError::InvalidField {
            field: "rate",
            value: n.to_string(),
        }),
        Numeric::Unparsed(raw) => Err(ValidationError::InvalidField {
            field: "rate",
            value: raw.to_string(),
        }),
    }
}
