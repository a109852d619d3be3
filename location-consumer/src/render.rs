use gatewatch_core::{
    ArrivalStatus, BadgeColor, BookingStatus, Coordinate, DriverKey, Zone, ZoneShape,
};

use crate::tracker::DriverTracker;

/// A geofence overlay ready to draw beneath the markers.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneOverlay {
    pub name: String,
    pub color: &'static str,
    pub shape: ZoneShape,
}

/// One marker per visible driver, positioned at its animated coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverMarker {
    pub key: DriverKey,
    pub name: String,
    pub position: Coordinate,
    pub status: BookingStatus,
    pub status_color: BadgeColor,
    pub arrival_status: ArrivalStatus,
    pub arrival_color: BadgeColor,
    pub port_name: Option<String>,
    pub terminal_name: Option<String>,
    pub inside_zone: Option<String>,
}

/// A composed snapshot of the live map: static geofence overlays beneath one
/// marker per visible driver. Every driver and zone is rendered
/// unconditionally; there is no clustering or virtualization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapScene {
    pub overlays: Vec<ZoneOverlay>,
    pub markers: Vec<DriverMarker>,
}

impl MapScene {
    pub fn compose(tracker: &DriverTracker, zones: &[Zone]) -> MapScene {
        let overlays = zones
            .iter()
            .map(|zone| ZoneOverlay {
                name: zone.name.clone(),
                color: zone.category.color(),
                shape: zone.shape.clone(),
            })
            .collect();

        let mut markers: Vec<DriverMarker> = tracker
            .visible_drivers()
            .map(|record| {
                let key = record.key();
                let position = tracker.displayed_position(&key).unwrap_or(record.position);
                // The feed's zone name wins; otherwise derive it from the
                // geofences the marker currently sits in.
                let inside_zone = record.zone_name.clone().or_else(|| {
                    zones
                        .iter()
                        .find(|zone| zone.contains(&position))
                        .map(|zone| zone.name.clone())
                });

                DriverMarker {
                    name: record.name.clone(),
                    position,
                    status: record.status,
                    status_color: record.status.badge_color(),
                    arrival_status: record.arrival_status,
                    arrival_color: record.arrival_status.badge_color(),
                    port_name: record.port_name.clone(),
                    terminal_name: record.terminal_name.clone(),
                    inside_zone,
                    key,
                }
            })
            .collect();

        // Stable marker order keeps successive scenes diffable.
        markers.sort_by(|a, b| a.key.cmp(&b.key));

        MapScene { overlays, markers }
    }
}
