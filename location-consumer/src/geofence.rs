use std::str::FromStr;

use gatewatch_core::{Coordinate, Zone, ZoneCategory, ZoneId, ZoneShape};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{error, instrument};

use crate::error::{Result, error::FailedRequestSnafu};

/// Client for the zones endpoint. Zones are fetched once at startup and are
/// immutable for the rest of the session.
pub struct ZoneClient {
    zones_address: Url,
    client: Client,
}

/// Envelope shapes for the zones endpoint: `data`-wrapped or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZonesResponse {
    Wrapped { data: Vec<RawZone> },
    Bare(Vec<RawZone>),
}

/// One zone as served over the wire. Coordinate pairs are `[lng, lat]`.
#[derive(Debug, Deserialize)]
struct RawZone {
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    polygon: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    center: Option<[f64; 2]>,
    #[serde(default)]
    radius: Option<f64>,
}

impl RawZone {
    fn into_zone(self) -> Option<Zone> {
        let RawZone {
            id,
            name,
            category,
            polygon,
            center,
            radius,
        } = self;

        let shape = match (polygon, center, radius) {
            (Some(ring), _, _) if ring.len() >= 3 => ZoneShape::Polygon(
                ring.into_iter()
                    .map(|[lng, lat]| Coordinate::new(lat, lng))
                    .collect(),
            ),
            (_, Some([lng, lat]), Some(radius)) if radius > 0.0 => ZoneShape::Circle {
                center: Coordinate::new(lat, lng),
                radius_meters: radius,
            },
            _ => return None,
        };

        Some(Zone {
            id: ZoneId::new(id),
            name,
            category: ZoneCategory::from_str(&category).unwrap_or(ZoneCategory::Other),
            shape,
        })
    }
}

impl ZoneClient {
    pub fn new(zones_address: Url) -> ZoneClient {
        ZoneClient {
            zones_address,
            client: Client::new(),
        }
    }

    /// One-shot fetch of the static geofence set. Any failure degrades to an
    /// empty set; there is no retry.
    #[instrument(skip(self))]
    pub async fn load_or_empty(&self) -> Vec<Zone> {
        match self.zones().await {
            Ok(zones) => zones,
            Err(e) => {
                error!("failed to load geofence zones: {e:?}");
                Vec::new()
            }
        }
    }

    async fn zones(&self) -> Result<Vec<Zone>> {
        let response = self.client.get(self.zones_address.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return FailedRequestSnafu {
                url: self.zones_address.to_string(),
                status,
                body: response.text().await?,
            }
            .fail();
        }

        let response: ZonesResponse = response.json().await?;
        let raw = match response {
            ZonesResponse::Wrapped { data } => data,
            ZonesResponse::Bare(zones) => zones,
        };

        Ok(raw.into_iter().filter_map(RawZone::into_zone).collect())
    }
}
