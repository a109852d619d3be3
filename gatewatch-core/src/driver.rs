use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::Coordinate;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Default,
)]
pub struct DriverId(i64);

impl DriverId {
    pub fn new(value: i64) -> DriverId {
        DriverId(value)
    }

    pub fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Default)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> UserId {
        UserId(value.into())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cache key for a driver: the numeric id and the user id together identify
/// one tracked marker. The `Display` form is the concatenated key the
/// original relay used.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriverKey {
    pub id: DriverId,
    pub user_id: UserId,
}

impl Display for DriverKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.id, self.user_id)
    }
}

/// Booking state of a driver's current assignment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Deserialize,
    Serialize,
    EnumString,
    AsRefStr,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BookingStatus {
    Fit,
    None,
    Error,
    #[default]
    Strange,
    /// Legacy feeds spell this `not_match`.
    #[serde(alias = "not_match")]
    #[strum(to_string = "wrong_destination", serialize = "not_match")]
    WrongDestination,
}

/// Whether a driver is ahead of, on, or behind its gate-in schedule.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Deserialize,
    Serialize,
    EnumString,
    AsRefStr,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ArrivalStatus {
    /// Legacy feeds spell this `ontime`.
    #[serde(alias = "ontime")]
    #[strum(to_string = "on_time", serialize = "ontime")]
    OnTime,
    Early,
    Late,
    Outside,
    #[default]
    Unknown,
}

/// Fixed badge palette for status chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Green,
    Blue,
    Yellow,
    Red,
    Gray,
}

impl BadgeColor {
    pub fn css_value(&self) -> &'static str {
        match self {
            BadgeColor::Green => "#16A34A",
            BadgeColor::Blue => "#2563EB",
            BadgeColor::Yellow => "#CA8A04",
            BadgeColor::Red => "#DC2626",
            BadgeColor::Gray => "#6B7280",
        }
    }
}

impl BookingStatus {
    pub fn badge_color(&self) -> BadgeColor {
        match self {
            BookingStatus::Fit => BadgeColor::Green,
            BookingStatus::WrongDestination => BadgeColor::Yellow,
            BookingStatus::Error => BadgeColor::Red,
            BookingStatus::None | BookingStatus::Strange => BadgeColor::Gray,
        }
    }
}

impl ArrivalStatus {
    pub fn badge_color(&self) -> BadgeColor {
        match self {
            ArrivalStatus::OnTime => BadgeColor::Green,
            ArrivalStatus::Early => BadgeColor::Blue,
            ArrivalStatus::Late => BadgeColor::Red,
            ArrivalStatus::Outside | ArrivalStatus::Unknown => BadgeColor::Gray,
        }
    }
}

/// Canonical driver state, overwritten on every inbound feed message for the
/// same identity.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverRecord {
    pub id: DriverId,
    pub user_id: UserId,
    pub name: String,
    pub position: Coordinate,
    pub status: BookingStatus,
    pub arrival_status: ArrivalStatus,
    pub is_active: bool,
    pub port_name: Option<String>,
    pub terminal_name: Option<String>,
    pub zone_name: Option<String>,
}

impl DriverRecord {
    pub fn key(&self) -> DriverKey {
        DriverKey {
            id: self.id,
            user_id: self.user_id.clone(),
        }
    }

    /// Hard visibility filter: inactive drivers and zero coordinate pairs
    /// never reach the rendered set.
    pub fn is_visible(&self) -> bool {
        self.is_active && !self.position.is_zero()
    }
}

/// Payload of the consumer to tracker channel.
#[derive(Debug, Clone, Default)]
pub struct DataMessage {
    pub positions: Vec<DriverRecord>,
}

#[cfg(feature = "test")]
mod test {
    use rand::random;

    use super::*;

    impl DriverRecord {
        pub fn test_default(id: Option<i64>) -> DriverRecord {
            let id = id.unwrap_or_else(|| i64::from(random::<u16>()));
            DriverRecord {
                id: DriverId::new(id),
                user_id: UserId::new(format!("user-{id}")),
                name: "Surya".to_string(),
                position: Coordinate::new(-6.1044, 106.88),
                status: BookingStatus::Fit,
                arrival_status: ArrivalStatus::OnTime,
                is_active: true,
                port_name: Some("Tanjung Priok".to_string()),
                terminal_name: Some("NPCT1".to_string()),
                zone_name: None,
            }
        }
    }
}
