// geojson.rs
//
// Copyright (c) 2019-2026  Minnesota Department of Transportation
//
//! GeoJSON output for decoded tiles.
//!
use serde_json::{json, Map, Value as Json};

use crate::Error;
use crate::mercator::merc_to_lonlat;
use crate::tile::{DecodedPoint, VectorTileEncoder};

impl DecodedPoint {
    /// Get a GeoJSON `Feature` for the point.
    ///
    /// * `lonlat` Output longitude / latitude instead of mercator meters.
    pub fn to_geojson(&self, lonlat: bool) -> Json {
        let (x, y) = if lonlat {
            merc_to_lonlat(self.x, self.y)
        } else {
            (self.x, self.y)
        };
        let properties: Map<String, Json> = self
            .properties
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        json!({
            "type": "Feature",
            "id": self.id,
            "properties": properties,
            "geometry": {
                "type": "Point",
                "coordinates": [x, y],
            },
        })
    }
}

impl VectorTileEncoder {
    /// Decode the tile to a GeoJSON `FeatureCollection`.
    ///
    /// * `lonlat` Output longitude / latitude instead of mercator meters.
    ///
    /// # Example
    /// ```
    /// # use point_tile::Error;
    /// # fn main() -> Result<(), Error> {
    ///       use point_tile::{TileRequest, VectorTileEncoder};
    ///       let req = TileRequest::new(0, 0, 0)?;
    ///       let mut vt = VectorTileEncoder::new(&req)?;
    ///       vt.add_point(0.0, 0.0, vec![("name", "origin")])?;
    ///       let fc = vt.to_geojson(true)?;
    ///       assert_eq!(fc["features"][0]["properties"]["name"], "origin");
    /// #     Ok(())
    /// # }
    /// ```
    pub fn to_geojson(&self, lonlat: bool) -> Result<Json, Error> {
        let features: Vec<Json> = self
            .points()?
            .iter()
            .map(|pt| pt.to_geojson(lonlat))
            .collect();
        Ok(json!({
            "type": "FeatureCollection",
            "features": features,
        }))
    }
}
