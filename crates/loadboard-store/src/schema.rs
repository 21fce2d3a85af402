pub(crate) const TABLE: &str = "mock_loads";

pub(crate) const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS mock_loads (
    id            TEXT PRIMARY KEY NOT NULL,
    origin        TEXT NOT NULL,
    destination   TEXT NOT NULL,
    distance      INTEGER NOT NULL CHECK (distance > 0),
    rate          REAL NOT NULL CHECK (rate > 0),
    rate_per_mile REAL GENERATED ALWAYS AS (ROUND(rate / distance, 2)) STORED,
    equipment     TEXT NOT NULL DEFAULT 'Van',
    broker        TEXT NOT NULL DEFAULT 'Unknown',
    broker_email  TEXT NOT NULL DEFAULT '',
    pickup_date   TEXT,
    commodity     TEXT NOT NULL DEFAULT '',
    status        TEXT NOT NULL DEFAULT 'available',
    created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
CREATE INDEX IF NOT EXISTS idx_mock_loads_status_created
    ON mock_loads (status, created_at);
";

/// Column order expected by the row decoder
pub(crate) const POSTING_COLUMNS: &str = "id, origin, destination, distance, rate, rate_per_mile, \
     equipment, broker, broker_email, pickup_date, commodity, status, created_at";
