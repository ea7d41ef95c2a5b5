// geom.rs
//
// Copyright (c) 2017-2026  Douglas P Lau
//
//! Transform between mercator and tile screen coördinates.
//!
use crate::grid::{Box2d, TileRequest};

/// A transform maps mercator coördinates (meters) to the screen pixels of
/// one tile, and back.
///
/// Screen Y increases downward, so the north edge of the tile maps to
/// `y = 0`.
///
/// # Example
/// ```
/// # use point_tile::Error;
/// # fn main() -> Result<(), Error> {
///       use point_tile::{CoordTransform, TileRequest};
///       let req = TileRequest::new(0, 0, 0)?;
///       let t = CoordTransform::new(&req);
///       let (px, py) = t.forward(0.0, 0.0);
///       assert!((px - 128.0).abs() < 1e-9 && (py - 128.0).abs() < 1e-9);
/// #     Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordTransform {
    extent: Box2d,
    sx: f64,
    sy: f64,
}

impl CoordTransform {
    /// Create a new transform for a tile request.
    pub fn new(req: &TileRequest) -> Self {
        let extent = *req.extent();
        let size = f64::from(req.tile_size());
        CoordTransform {
            extent,
            sx: size / req.width(),
            sy: size / req.height(),
        }
    }

    /// Get the mercator extent.
    pub fn extent(&self) -> &Box2d {
        &self.extent
    }

    /// Get the X and Y scale factors (pixels per meter).
    pub fn scale(&self) -> (f64, f64) {
        (self.sx, self.sy)
    }

    /// Transform mercator coördinates to screen coördinates.
    pub fn forward(&self, x: f64, y: f64) -> (f64, f64) {
        let px = (x - self.extent.minx()) * self.sx;
        let py = (self.extent.maxy() - y) * self.sy;
        (px, py)
    }

    /// Transform screen coördinates to mercator coördinates.
    pub fn backward(&self, px: f64, py: f64) -> (f64, f64) {
        let x = self.extent.minx() + px / self.sx;
        let y = self.extent.maxy() - py / self.sy;
        (x, y)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mercator::lonlat_to_merc;

    fn near(v0: f64, v1: f64, eps: f64) -> bool {
        (v0 - v1).abs() <= eps
    }

    #[test]
    fn corners() {
        for (x, y, z) in &[(0, 0, 0), (1, 0, 1), (246, 368, 10), (299_626, 391_764, 20)] {
            let req = TileRequest::new(*x, *y, *z).unwrap();
            let t = CoordTransform::new(&req);
            let e = req.extent();
            assert_eq!(t.forward(e.minx(), e.maxy()), (0.0, 0.0));
            let (px, py) = t.forward(e.maxx(), e.miny());
            assert!(near(px, 256.0, 1e-9));
            assert!(near(py, 256.0, 1e-9));
        }
    }

    #[test]
    fn forward() {
        let req = TileRequest::new(0, 0, 0).unwrap();
        let t = CoordTransform::new(&req);
        let (x, y) = lonlat_to_merc(-180.0, -85.0);
        let (px, py) = t.forward(x, y);
        assert!(near(px, 0.0, 1e-7));
        assert!(near(py, 255.5806938147701, 1e-7));
        let (px, py) = t.forward(-20037508.34, -20037508.34);
        assert!(near(px, 0.0, 1e-7));
        assert!(near(py, 256.0, 1e-7));
        let (px, py) = t.forward(-20037508.34 / 2.0, -20037508.34 / 2.0);
        assert!(near(px, 64.0, 1e-7));
        assert!(near(py, 192.0, 1e-7));
    }

    #[test]
    fn backward() {
        let req = TileRequest::new(246, 368, 10).unwrap();
        let t = CoordTransform::new(&req);
        let (x, y) = lonlat_to_merc(-93.2, 45.0);
        let (px, py) = t.forward(x, y);
        let (x2, y2) = t.backward(px, py);
        assert!(near(x, x2, 1e-6));
        assert!(near(y, y2, 1e-6));
        let (sx, sy) = t.scale();
        assert!(near(sx * req.width(), 256.0, 1e-9));
        assert!(near(sy * req.height(), 256.0, 1e-9));
    }
}
