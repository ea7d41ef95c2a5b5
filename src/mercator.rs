// mercator.rs
//
// Copyright (c) 2019-2026  Minnesota Department of Transportation
//
//! Spherical mercator (EPSG:3857) projection math.
//!
use std::f64::consts::PI;

use crate::Error;

/// Half circumference of the mercator world (meters).
pub const MAX_EXTENT: f64 = 20_037_508.342_789_244;

/// Maximum supported zoom level.
pub const MAX_ZOOM: u32 = 22;

/// Default tile size (pixels).
pub const TILE_SIZE: u32 = 256;

/// Highest zoom level a projection table can hold.
pub const MAX_LEVELS: u32 = 30;

const DEG_TO_RAD: f64 = PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / PI;

/// Convert a WGS-84 (EPSG:4326) position to web mercator (EPSG:3857).
///
/// * `lon` Longitude (degrees).
/// * `lat` Latitude (degrees).
///
/// Returns `(x, y)` in meters.
///
/// # Example
/// ```
/// use point_tile::lonlat_to_merc;
/// let (x, y) = lonlat_to_merc(0.0, 0.0);
/// assert!(x.abs() < 1e-9 && y.abs() < 1e-9);
/// ```
pub fn lonlat_to_merc(lon: f64, lat: f64) -> (f64, f64) {
    let x = lon * MAX_EXTENT / 180.0;
    let y = ((90.0 + lat) * PI / 360.0).tan().ln() / DEG_TO_RAD;
    let y = y * MAX_EXTENT / 180.0;
    (x, y)
}

/// Convert a web mercator (EPSG:3857) position to WGS-84 (EPSG:4326).
///
/// Returns `(lon, lat)` in degrees.
pub fn merc_to_lonlat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / MAX_EXTENT) * 180.0;
    let y = (y / MAX_EXTENT) * 180.0;
    let lat = RAD_TO_DEG * (2.0 * (y * DEG_TO_RAD).exp().atan() - PI / 2.0);
    (lon, lat)
}

/// Spherical mercator pixel math for a range of zoom levels.
///
/// Scale factors for every zoom level are computed up front, so the
/// projection is cheap to reuse for many conversions.
#[derive(Clone, Debug)]
pub struct SphericalMercator {
    levels: u32,
    tile_size: u32,
    /// Pixels per degree of longitude
    bc: Vec<f64>,
    /// Pixels per radian
    cc: Vec<f64>,
    /// Pixel origin (both axes)
    zc: Vec<f64>,
}

impl Default for SphericalMercator {
    fn default() -> Self {
        SphericalMercator::new(MAX_ZOOM, TILE_SIZE)
    }
}

impl SphericalMercator {
    /// Create a new spherical mercator projection.
    ///
    /// * `levels` Maximum zoom level, capped at
    ///   [MAX_LEVELS](constant.MAX_LEVELS.html).
    /// * `tile_size` Tile size at zoom 0 (pixels).
    pub fn new(levels: u32, tile_size: u32) -> Self {
        if levels > MAX_LEVELS {
            warn!("levels {} capped at {}", levels, MAX_LEVELS);
        }
        let levels = levels.min(MAX_LEVELS);
        let n = levels as usize + 1;
        let mut bc = Vec::with_capacity(n);
        let mut cc = Vec::with_capacity(n);
        let mut zc = Vec::with_capacity(n);
        let mut size = f64::from(tile_size);
        for _ in 0..n {
            bc.push(size / 360.0);
            cc.push(size / (2.0 * PI));
            zc.push(size / 2.0);
            size *= 2.0;
        }
        SphericalMercator {
            levels,
            tile_size,
            bc,
            cc,
            zc,
        }
    }

    /// Get the maximum zoom level.
    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Get the tile size (pixels).
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Get the table index for a zoom level.
    fn level(&self, zoom: u32) -> Result<usize, Error> {
        if zoom <= self.levels {
            Ok(zoom as usize)
        } else {
            Err(Error::InvalidZoom(zoom))
        }
    }

    /// Convert a lon/lat position to a pixel position, rounded to the
    /// nearest whole pixel.
    pub fn lonlat_to_pixel(
        &self,
        lon: f64,
        lat: f64,
        zoom: u32,
    ) -> Result<(f64, f64), Error> {
        let z = self.level(zoom)?;
        let e = self.zc[z];
        let x = (e + lon * self.bc[z]).round();
        let f = (DEG_TO_RAD * lat).sin().clamp(-0.9999, 0.9999);
        let y = (e + 0.5 * ((1.0 + f) / (1.0 - f)).ln() * -self.cc[z]).round();
        Ok((x, y))
    }

    /// Convert a pixel position to a lon/lat position.
    pub fn pixel_to_lonlat(
        &self,
        px: f64,
        py: f64,
        zoom: u32,
    ) -> Result<(f64, f64), Error> {
        let z = self.level(zoom)?;
        let e = self.zc[z];
        let lon = (px - e) / self.bc[z];
        let g = (py - e) / -self.cc[z];
        let lat = RAD_TO_DEG * (2.0 * g.exp().atan() - 0.5 * PI);
        Ok((lon, lat))
    }

    /// Get the mercator bounds of a tile as `[minx, miny, maxx, maxy]`.
    pub fn tile_bounds(&self, x: u32, y: u32, zoom: u32) -> Result<[f64; 4], Error> {
        let ts = f64::from(self.tile_size);
        let (x, y) = (f64::from(x), f64::from(y));
        let (west, south) = self.pixel_to_lonlat(x * ts, (y + 1.0) * ts, zoom)?;
        let (east, north) = self.pixel_to_lonlat((x + 1.0) * ts, y * ts, zoom)?;
        let (minx, miny) = lonlat_to_merc(west, south);
        let (maxx, maxy) = lonlat_to_merc(east, north);
        Ok([minx, miny, maxx, maxy])
    }

    /// Get the range of tiles covering mercator bounds.
    ///
    /// * `bbox` Bounds as `[minx, miny, maxx, maxy]`.
    ///
    /// Returns `[min_x, min_y, max_x, max_y]` tile indices.  The east and
    /// south edges are pulled back by one pixel, so the bounds of a single
    /// tile map back to that tile only.
    pub fn merc_to_xyz(&self, bbox: [f64; 4], zoom: u32) -> Result<[i64; 4], Error> {
        let [minx, miny, maxx, maxy] = bbox;
        let ts = f64::from(self.tile_size);
        let (west, south) = merc_to_lonlat(minx, miny);
        let (east, north) = merc_to_lonlat(maxx, maxy);
        let (px_ll, py_ll) = self.lonlat_to_pixel(west, south, zoom)?;
        let (px_ur, py_ur) = self.lonlat_to_pixel(east, north, zoom)?;
        Ok([
            (px_ll / ts).floor() as i64,
            (py_ur / ts).floor() as i64,
            ((px_ur - 1.0) / ts).floor() as i64,
            ((py_ll - 1.0) / ts).floor() as i64,
        ])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn near(v0: f64, v1: f64, eps: f64) -> bool {
        (v0 - v1).abs() <= eps
    }

    #[test]
    fn merc() {
        let (x, y) = lonlat_to_merc(-180.0, -85.0);
        assert!(near(x, -20037508.342789244, 1e-6));
        assert!(near(y, -19971868.880408589, 1e-6));
        let (x, y) = lonlat_to_merc(-93.0, 45.0);
        assert!(near(x, -10352712.643774442, 1e-6));
        assert!(near(y, 5621521.486192066, 1e-6));
    }

    #[test]
    fn merc_inverse() {
        for (lon, lat) in &[(-93.0, 45.0), (173.0, -45.0), (-180.0, -85.0), (0.0, 0.0)] {
            let (x, y) = lonlat_to_merc(*lon, *lat);
            let (lon2, lat2) = merc_to_lonlat(x, y);
            assert!(near(lon2, *lon, 1e-9));
            assert!(near(lat2, *lat, 1e-9));
        }
    }

    #[test]
    fn pixels() {
        let sm = SphericalMercator::default();
        assert_eq!(sm.lonlat_to_pixel(0.0, 0.0, 0).unwrap(), (128.0, 128.0));
        assert_eq!(sm.lonlat_to_pixel(-180.0, 0.0, 1).unwrap(), (0.0, 256.0));
        assert_eq!(sm.lonlat_to_pixel(180.0, 0.0, 2).unwrap(), (1024.0, 512.0));
        let (px, py) = sm.lonlat_to_pixel(-74.01226, 40.70512, 10).unwrap();
        assert_eq!(px.fract(), 0.0);
        assert_eq!(py.fract(), 0.0);
        let (lon, lat) = sm.pixel_to_lonlat(px, py, 10).unwrap();
        // within one pixel at zoom 10
        assert!(near(lon, -74.01226, 360.0 / 262144.0));
        assert!(near(lat, 40.70512, 360.0 / 262144.0));
    }

    #[test]
    fn pixel_inverse() {
        let sm = SphericalMercator::default();
        let (lon, lat) = sm.pixel_to_lonlat(0.0, 256.0, 0).unwrap();
        assert!(near(lon, -180.0, 1e-9));
        assert!(near(lat, -85.0511287798066, 1e-9));
        let (lon, lat) = sm.pixel_to_lonlat(128.0, 128.0, 0).unwrap();
        assert!(near(lon, 0.0, 1e-9));
        assert!(near(lat, 0.0, 1e-9));
    }

    #[test]
    fn tile_bounds() {
        let sm = SphericalMercator::default();
        let [minx, miny, maxx, maxy] = sm.tile_bounds(0, 0, 0).unwrap();
        assert!(near(minx, -MAX_EXTENT, 1e-6));
        assert!(near(miny, -MAX_EXTENT, 1e-6));
        assert!(near(maxx, MAX_EXTENT, 1e-6));
        assert!(near(maxy, MAX_EXTENT, 1e-6));
        let [minx, miny, maxx, maxy] = sm.tile_bounds(1, 1, 1).unwrap();
        assert!(near(minx, 0.0, 1e-6));
        assert!(near(miny, -MAX_EXTENT, 1e-6));
        assert!(near(maxx, MAX_EXTENT, 1e-6));
        assert!(near(maxy, 0.0, 1e-6));
        let [minx, miny, maxx, maxy] = sm.tile_bounds(246, 368, 10).unwrap();
        assert!(near(minx, -10410111.756214727, 1e-6));
        assert!(near(miny, 5596413.462927466, 1e-6));
        assert!(near(maxx, -10370975.997732716, 1e-6));
        assert!(near(maxy, 5635549.221409475, 1e-6));
    }

    #[test]
    fn xyz_inverse() {
        let sm = SphericalMercator::default();
        let tiles = [
            (0, 0, 0),
            (1, 0, 1),
            (0, 1, 1),
            (3, 5, 3),
            (246, 368, 10),
            (1205, 1539, 12),
            (299_626, 391_764, 20),
            (1_198_505, 1_567_057, 22),
        ];
        for (x, y, z) in &tiles {
            let bbox = sm.tile_bounds(*x, *y, *z).unwrap();
            let (x, y) = (i64::from(*x), i64::from(*y));
            assert_eq!(sm.merc_to_xyz(bbox, *z).unwrap(), [x, y, x, y]);
        }
    }

    #[test]
    fn xyz_point() {
        let sm = SphericalMercator::default();
        let (x, y) = lonlat_to_merc(-93.0, 45.0);
        let [x0, y0, _, _] = sm.merc_to_xyz([x, y, x, y], 10).unwrap();
        assert_eq!((x0, y0), (247, 368));
    }

    #[test]
    fn invalid_zoom() {
        let sm = SphericalMercator::default();
        assert!(matches!(
            sm.lonlat_to_pixel(0.0, 0.0, 23),
            Err(Error::InvalidZoom(23))
        ));
        assert!(sm.tile_bounds(0, 0, 22).is_ok());
        let sm = SphericalMercator::new(4, 512);
        assert_eq!(sm.levels(), 4);
        assert_eq!(sm.tile_size(), 512);
        assert!(sm.pixel_to_lonlat(0.0, 0.0, 5).is_err());
    }

    #[test]
    fn levels_capped() {
        let sm = SphericalMercator::new(u32::MAX, 256);
        assert_eq!(sm.levels(), MAX_LEVELS);
        assert!(sm.tile_bounds(0, 0, MAX_LEVELS).is_ok());
        assert!(matches!(
            sm.lonlat_to_pixel(0.0, 0.0, MAX_LEVELS + 1),
            Err(Error::InvalidZoom(_))
        ));
    }
}
