use std::fmt::{self, Display};

use geo::{Contains, Coord, LineString, Point, Polygon};
use geoutils::Location;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct ZoneId(i64);

impl ZoneId {
    pub fn new(value: i64) -> ZoneId {
        ZoneId(value)
    }

    pub fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of a geofence, which determines its render color.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Deserialize,
    Serialize,
    EnumString,
    AsRefStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ZoneCategory {
    Port,
    Terminal,
    Depo,
    #[default]
    Other,
}

impl ZoneCategory {
    pub fn color(&self) -> &'static str {
        match self {
            ZoneCategory::Port => "#1E90FF",
            ZoneCategory::Terminal => "#32CD32",
            ZoneCategory::Depo => "#FF8C00",
            ZoneCategory::Other => "#999999",
        }
    }
}

/// Geometry of a geofence: an ordered polygon ring or a circular region.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneShape {
    Polygon(Vec<Coordinate>),
    Circle {
        center: Coordinate,
        radius_meters: f64,
    },
}

/// A static geofence area. Loaded once per session and immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub category: ZoneCategory,
    pub shape: ZoneShape,
}

impl Zone {
    pub fn contains(&self, position: &Coordinate) -> bool {
        match &self.shape {
            ZoneShape::Polygon(ring) => {
                let exterior = LineString::from(
                    ring.iter()
                        .map(|c| Coord { x: c.lng, y: c.lat })
                        .collect::<Vec<_>>(),
                );
                Polygon::new(exterior, Vec::new())
                    .contains(&Point::new(position.lng, position.lat))
            }
            ZoneShape::Circle {
                center,
                radius_meters,
            } => {
                let center = Location::new(center.lat, center.lng);
                let position = Location::new(position.lat, position.lng);
                match center.distance_to(&position) {
                    Ok(distance) => distance.meters() <= *radius_meters,
                    Err(_) => false,
                }
            }
        }
    }
}
