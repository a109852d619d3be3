use std::str::FromStr;

use gatewatch_core::{
    ArrivalStatus, BookingStatus, Coordinate, DataMessage, DriverId, DriverRecord, UserId,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::ResultExt;
use tracing::warn;

use crate::error::{TrackingMessageError, tracking_message_error::TrackingMessageSnafu};

/// Envelope shapes observed on the feed: an object wrapping an array under
/// `data`, a bare array, or a single record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TrackingMessage {
    Wrapped { data: Vec<Value> },
    Batch(Vec<Value>),
    Single(Value),
}

impl TrackingMessage {
    fn candidates(self) -> Vec<Value> {
        match self {
            TrackingMessage::Wrapped { data } => data,
            TrackingMessage::Batch(values) => values,
            TrackingMessage::Single(value) => vec![value],
        }
    }
}

/// One driver record as it appears on the wire. Canonical field names are
/// snake_case; the PascalCase/camelCase spellings of the legacy relay are
/// declared as aliases here so the accepted forms stay in one place.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawDriverRecord {
    #[serde(default, alias = "ID")]
    pub id: i64,
    #[serde(default, alias = "UserID", alias = "userId")]
    pub user_id: String,
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Lat")]
    pub lat: f64,
    #[serde(default, alias = "Lng")]
    pub lng: f64,
    #[serde(default, alias = "Status")]
    pub status: String,
    #[serde(default, alias = "ArrivalStatus", alias = "arrivalStatus")]
    pub arrival_status: String,
    #[serde(default, alias = "PortName", alias = "portName")]
    pub port_name: String,
    #[serde(default, alias = "TerminalName", alias = "terminalName")]
    pub terminal_name: String,
    #[serde(default, alias = "ZoneName", alias = "zoneName")]
    pub zone_name: String,
    #[serde(default = "default_active", alias = "IsActive", alias = "isActive")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl From<RawDriverRecord> for DriverRecord {
    fn from(raw: RawDriverRecord) -> Self {
        let RawDriverRecord {
            id,
            user_id,
            name,
            lat,
            lng,
            status,
            arrival_status,
            port_name,
            terminal_name,
            zone_name,
            is_active,
        } = raw;

        let status = match status.as_str() {
            "" => BookingStatus::None,
            s => BookingStatus::from_str(s).unwrap_or_else(|_| {
                warn!("unknown booking status: {s}");
                BookingStatus::Strange
            }),
        };

        let arrival_status = ArrivalStatus::from_str(&arrival_status).unwrap_or_default();

        DriverRecord {
            id: DriverId::new(id),
            user_id: UserId::new(user_id),
            name,
            position: Coordinate::new(lat, lng),
            status,
            arrival_status,
            is_active,
            port_name: none_if_empty(port_name),
            terminal_name: none_if_empty(terminal_name),
            zone_name: none_if_empty(zone_name),
        }
    }
}

fn none_if_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Normalizes one feed line into canonical driver records. Non-object
/// candidates and records that fail to deserialize are dropped with a
/// diagnostic; only an unparseable line is an error.
pub fn parse_message(message: &str) -> Result<DataMessage, TrackingMessageError> {
    let envelope: TrackingMessage = serde_json::from_str(message).context(TrackingMessageSnafu)?;

    let mut data_message = DataMessage::default();
    for candidate in envelope.candidates() {
        if !candidate.is_object() {
            continue;
        }
        match serde_json::from_value::<RawDriverRecord>(candidate) {
            Ok(raw) => data_message.positions.push(raw.into()),
            Err(e) => warn!("dropping malformed driver record: {e:?}"),
        }
    }

    Ok(data_message)
}

#[cfg(feature = "test")]
mod test {
    use super::*;

    impl RawDriverRecord {
        pub fn test_default(id: i64) -> RawDriverRecord {
            RawDriverRecord {
                id,
                user_id: format!("user-{id}"),
                name: "Surya".to_string(),
                lat: -6.1044,
                lng: 106.88,
                status: "fit".to_string(),
                arrival_status: "on_time".to_string(),
                port_name: "Tanjung Priok".to_string(),
                terminal_name: "NPCT1".to_string(),
                zone_name: String::new(),
                is_active: true,
            }
        }
    }
}
