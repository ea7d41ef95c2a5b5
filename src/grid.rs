// grid.rs
//
// Copyright (c) 2019-2026  Minnesota Department of Transportation
//
//! Box2d and TileRequest structs.
//!
use crate::Error;
use crate::mercator::{SphericalMercator, MAX_ZOOM, TILE_SIZE};

/// An axis-aligned bounding box in mercator coördinates (meters).
///
/// Can also be read as `left, bottom, right, top` or
/// `west, south, east, north`.
///
/// # Example
/// ```
/// use point_tile::Box2d;
/// let b = Box2d::new(-180.0, -85.0, 180.0, 85.0);
/// assert!(b.intersects(0.0, 0.0));
/// assert!(!b.intersects(-180.0, -90.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Box2d {
    minx: f64,
    miny: f64,
    maxx: f64,
    maxy: f64,
}

/// A request for a single tile in XYZ addressing, with X increasing from
/// west to east and Y increasing from north to south.
///
/// The mercator extent of the tile is computed when the request is
/// created.  X and Y are not checked against the zoom level, so a request
/// outside of the world still gets an (unusual) extent.
///
/// # Example
/// ```
/// # use point_tile::Error;
/// # fn main() -> Result<(), Error> {
///       use point_tile::TileRequest;
///       let req = TileRequest::new(0, 0, 0)?;
///       assert!((req.width() - 40075016.68557849).abs() < 1e-6);
/// #     Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct TileRequest {
    x: u32,
    y: u32,
    zoom: u32,
    tile_size: u32,
    extent: Box2d,
}

impl Box2d {
    /// Create a new bounding box.
    ///
    /// The corners are normalized, so `minx <= maxx` and `miny <= maxy`.
    pub fn new(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Self {
        Box2d {
            minx: minx.min(maxx),
            miny: miny.min(maxy),
            maxx: minx.max(maxx),
            maxy: miny.max(maxy),
        }
    }

    /// Get the minimum X value.
    pub fn minx(&self) -> f64 {
        self.minx
    }

    /// Get the minimum Y value.
    pub fn miny(&self) -> f64 {
        self.miny
    }

    /// Get the maximum X value.
    pub fn maxx(&self) -> f64 {
        self.maxx
    }

    /// Get the maximum Y value.
    pub fn maxy(&self) -> f64 {
        self.maxy
    }

    /// Get the X span.
    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }

    /// Get the Y span.
    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }

    /// Get the bounds as `[minx, miny, maxx, maxy]`.
    pub fn bounds(&self) -> [f64; 4] {
        [self.minx, self.miny, self.maxx, self.maxy]
    }

    /// Check whether a point is within the box (edges included).
    pub fn intersects(&self, x: f64, y: f64) -> bool {
        !(x > self.maxx || x < self.minx || y > self.maxy || y < self.miny)
    }
}

impl From<[f64; 4]> for Box2d {
    fn from(b: [f64; 4]) -> Self {
        Box2d::new(b[0], b[1], b[2], b[3])
    }
}

impl TileRequest {
    /// Create a new request for a 256 pixel tile.
    ///
    /// If zoom is above 22, returns [Error::InvalidZoom](enum.Error.html).
    pub fn new(x: u32, y: u32, zoom: u32) -> Result<Self, Error> {
        TileRequest::with_tile_size(x, y, zoom, TILE_SIZE)
    }

    /// Create a new request with a specific tile size (pixels).
    pub fn with_tile_size(
        x: u32,
        y: u32,
        zoom: u32,
        tile_size: u32,
    ) -> Result<Self, Error> {
        if zoom > MAX_ZOOM {
            return Err(Error::InvalidZoom(zoom));
        }
        if tile_size == 0 {
            return Err(Error::InvalidTileSize(tile_size));
        }
        let mercator = SphericalMercator::new(MAX_ZOOM, tile_size);
        let extent = Box2d::from(mercator.tile_bounds(x, y, zoom)?);
        debug!("request {}/{}/{}: {:?}", zoom, x, y, extent);
        Ok(TileRequest {
            x,
            y,
            zoom,
            tile_size,
            extent,
        })
    }

    /// Create a request for the 256 pixel tile containing a mercator point.
    ///
    /// Returns [Error::OutOfBounds](enum.Error.html) if the point is off the
    /// west or north edge of the world.
    pub fn containing(x: f64, y: f64, zoom: u32) -> Result<Self, Error> {
        if zoom > MAX_ZOOM {
            return Err(Error::InvalidZoom(zoom));
        }
        let mercator = SphericalMercator::default();
        let [tx, ty, _, _] = mercator.merc_to_xyz([x, y, x, y], zoom)?;
        match (u32::try_from(tx), u32::try_from(ty)) {
            (Ok(tx), Ok(ty)) => TileRequest::new(tx, ty, zoom),
            _ => Err(Error::OutOfBounds(x, y)),
        }
    }

    /// Get the tile X index.
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Get the tile Y index.
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Get the zoom level.
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Get the tile size (pixels).
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Get the mercator extent.
    pub fn extent(&self) -> &Box2d {
        &self.extent
    }

    /// Get the extent width (meters).
    pub fn width(&self) -> f64 {
        self.extent.width()
    }

    /// Get the extent height (meters).
    pub fn height(&self) -> f64 {
        self.extent.height()
    }

    /// Get the extent bounds as `[minx, miny, maxx, maxy]`.
    pub fn bounds(&self) -> [f64; 4] {
        self.extent.bounds()
    }
}
