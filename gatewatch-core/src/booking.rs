use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::{ArrivalStatus, BookingStatus};

/// Role decoded from the dashboard bearer token.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, EnumString, AsRefStr, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Driver,
}

/// An assignment record served by the bookings endpoint. Read-only from the
/// dashboard's perspective.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Booking {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub user_id: i64,
    #[serde(default)]
    pub port_name: Option<String>,
    #[serde(default)]
    pub terminal_name: Option<String>,
    #[serde(default)]
    pub container_no: Option<String>,
    #[serde(default)]
    pub container_type: Option<String>,
    #[serde(default)]
    pub container_size: Option<String>,
    #[serde(default)]
    pub container_status: Option<String>,
    pub gate_in_time: DateTime<Utc>,
    #[serde(default)]
    pub shift_in_plan: Option<String>,
    #[serde(default)]
    pub iso_code: Option<String>,
    #[serde(default)]
    pub stid: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub arrival_status: ArrivalStatus,
}

fn default_active() -> bool {
    true
}

/// The bookings visible to a token holder, oldest gate-in first. Admins see
/// everything; drivers only their own rows. A driver claim without a usable
/// numeric user id sees nothing.
pub fn visible_bookings(
    mut bookings: Vec<Booking>,
    role: Role,
    user_id: Option<i64>,
) -> Vec<Booking> {
    match role {
        Role::Admin => {}
        Role::Driver => bookings.retain(|b| Some(b.user_id) == user_id),
    }
    bookings.sort_by_key(|b| b.gate_in_time);
    bookings
}

#[cfg(feature = "test")]
mod test {
    use chrono::TimeZone;

    use super::*;

    impl Booking {
        pub fn test_default(id: i64, user_id: i64) -> Booking {
            Booking {
                id,
                name: Some("Surya".to_string()),
                user_id,
                port_name: Some("Tanjung Priok".to_string()),
                terminal_name: Some("NPCT1".to_string()),
                container_no: Some("MRKU2803811".to_string()),
                container_type: Some("GP".to_string()),
                container_size: Some("40".to_string()),
                container_status: Some("FCL".to_string()),
                gate_in_time: Utc.timestamp_opt(1_700_000_000 + id, 0).unwrap(),
                shift_in_plan: None,
                iso_code: Some("42G1".to_string()),
                stid: None,
                is_active: true,
                status: BookingStatus::Fit,
                arrival_status: ArrivalStatus::OnTime,
            }
        }
    }
}
