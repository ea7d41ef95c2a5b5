// encoder.rs
//
// Copyright (c) 2019-2026  Minnesota Department of Transportation
//
//! Encoder for Mapbox Vector Tile (MVT) point geometry.
//!
use crate::Error;
use crate::geom::CoordTransform;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Command {
    MoveTo = 1,
}

struct CommandInt {
    id: Command,
    count: u32,
}

struct ParamInt {
    value: i32,
}

/// Rounding applied when quantizing screen coördinates to tile units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundMode {
    /// Round toward negative infinity
    #[default]
    Floor,
    /// Round to nearest, halfway cases away from zero
    Nearest,
}

/// Encoded geometry of one point feature: a MoveTo command with a single
/// zigzag encoded coördinate pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointGeom {
    data: [u32; 3],
}

/// Encoder for point geometry within one tile.
///
/// Screen coördinates are scaled by the path multiplier, so the tile
/// extent is `tile_size * path_multiplier` units.
#[derive(Clone, Debug)]
pub struct PointEncoder {
    transform: CoordTransform,
    path_multiplier: u32,
}

impl CommandInt {
    fn new(id: Command, count: u32) -> Self {
        CommandInt { id, count }
    }
    fn encode(&self) -> u32 {
        ((self.id as u32) & 0x7) | (self.count << 3)
    }
    fn decode(v: u32) -> Option<Self> {
        match v & 0x7 {
            1 => Some(CommandInt::new(Command::MoveTo, v >> 3)),
            _ => None,
        }
    }
}

impl ParamInt {
    fn new(value: i32) -> Self {
        ParamInt { value }
    }
    fn encode(&self) -> u32 {
        ((self.value << 1) ^ (self.value >> 31)) as u32
    }
    fn decode(v: u32) -> Self {
        ParamInt::new(((v >> 1) as i32) ^ -((v & 1) as i32))
    }
}

impl RoundMode {
    /// Round a value to a whole tile unit.
    fn apply(self, v: f64) -> i32 {
        match self {
            RoundMode::Floor => v.floor() as i32,
            RoundMode::Nearest => v.round() as i32,
        }
    }
}

impl PointGeom {
    /// Create point geometry from quantized tile coördinates.
    ///
    /// The cursor starts at the origin, so the deltas are the coördinates.
    fn new(dx: i32, dy: i32) -> Self {
        let data = [
            CommandInt::new(Command::MoveTo, 1).encode(),
            ParamInt::new(dx).encode(),
            ParamInt::new(dy).encode(),
        ];
        trace!("geometry: {:?}", data);
        PointGeom { data }
    }

    /// Parse point geometry from a feature.
    pub(crate) fn from_slice(geometry: &[u32]) -> Result<Self, Error> {
        match geometry {
            [cmd, dxi, dyi] => match CommandInt::decode(*cmd) {
                Some(CommandInt {
                    id: Command::MoveTo,
                    count: 1,
                }) => Ok(PointGeom {
                    data: [*cmd, *dxi, *dyi],
                }),
                _ => Err(Error::InvalidGeometry()),
            },
            _ => Err(Error::InvalidGeometry()),
        }
    }

    /// Get the zigzag encoded coördinates, which identify the pixel.
    pub fn key(&self) -> (u32, u32) {
        (self.data[1], self.data[2])
    }

    /// Get the decoded tile coördinates.
    pub fn coords(&self) -> (i32, i32) {
        let x = ParamInt::decode(self.data[1]).value;
        let y = ParamInt::decode(self.data[2]).value;
        (x, y)
    }

    /// Get the encoded data.
    pub fn to_vec(&self) -> Vec<u32> {
        self.data.to_vec()
    }
}

impl PointEncoder {
    /// Create a new point encoder.
    ///
    /// * `transform` Transform from mercator to screen coördinates.
    /// * `path_multiplier` Tile units per screen pixel.
    pub fn new(transform: CoordTransform, path_multiplier: u32) -> Self {
        PointEncoder {
            transform,
            path_multiplier,
        }
    }

    /// Get the coördinate transform.
    pub fn transform(&self) -> &CoordTransform {
        &self.transform
    }

    /// Quantize a mercator point to tile units.
    ///
    /// Results outside of the tile extent are not clamped.
    pub fn quantize(&self, x: f64, y: f64, round_mode: RoundMode) -> (i32, i32) {
        let (px, py) = self.transform.forward(x, y);
        let pm = f64::from(self.path_multiplier);
        (round_mode.apply(px * pm), round_mode.apply(py * pm))
    }

    /// Encode a mercator point.
    pub fn encode(&self, x: f64, y: f64, round_mode: RoundMode) -> PointGeom {
        let (dx, dy) = self.quantize(x, y, round_mode);
        debug!("point: {},{} => {},{}", x, y, dx, dy);
        PointGeom::new(dx, dy)
    }

    /// Decode point geometry back to mercator coördinates.
    pub fn decode(&self, geom: &PointGeom) -> (f64, f64) {
        let (dx, dy) = geom.coords();
        let pm = f64::from(self.path_multiplier);
        self.transform.backward(f64::from(dx) / pm, f64::from(dy) / pm)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::TileRequest;

    fn encoder(path_multiplier: u32) -> PointEncoder {
        let req = TileRequest::new(0, 0, 0).unwrap();
        PointEncoder::new(CoordTransform::new(&req), path_multiplier)
    }

    #[test]
    fn zigzag() {
        assert_eq!(ParamInt::new(0).encode(), 0);
        assert_eq!(ParamInt::new(-1).encode(), 1);
        assert_eq!(ParamInt::new(1).encode(), 2);
        assert_eq!(ParamInt::new(-2).encode(), 3);
        assert_eq!(ParamInt::new(i32::MAX).encode(), 0xFFFF_FFFE);
        assert_eq!(ParamInt::new(i32::MIN).encode(), 0xFFFF_FFFF);
        for v in &[0, 1, -1, 17, -4096, 65535, i32::MAX, i32::MIN] {
            assert_eq!(ParamInt::decode(ParamInt::new(*v).encode()).value, *v);
        }
    }

    #[test]
    fn command() {
        assert_eq!(CommandInt::new(Command::MoveTo, 1).encode(), 9);
        assert_eq!(CommandInt::new(Command::MoveTo, 2).encode(), 17);
        assert!(CommandInt::decode(18).is_none());
    }

    // MVT point example (25, 17)
    #[test]
    fn point() {
        let pe = encoder(1);
        let (x, y) = pe.transform().backward(25.5, 17.5);
        let geom = pe.encode(x, y, RoundMode::Floor);
        assert_eq!(geom.to_vec(), vec![9, 50, 34]);
        assert_eq!(geom.key(), (50, 34));
        assert_eq!(geom.coords(), (25, 17));
    }

    #[test]
    fn round_mode() {
        let pe = encoder(16);
        let (x, y) = pe.transform().backward(10.0 + 0.75 / 16.0, 20.0 + 0.25 / 16.0);
        assert_eq!(pe.quantize(x, y, RoundMode::Floor), (160, 320));
        assert_eq!(pe.quantize(x, y, RoundMode::Nearest), (161, 320));
        assert_eq!(RoundMode::default(), RoundMode::Floor);
    }

    #[test]
    fn outside_extent() {
        let pe = encoder(16);
        let (x, y) = pe.transform().backward(-1.47, 300.03);
        let geom = pe.encode(x, y, RoundMode::Floor);
        assert_eq!(geom.coords(), (-24, 4800));
        assert_eq!(geom.key(), (47, 9600));
    }

    #[test]
    fn decode() {
        for pm in &[1, 16, 512] {
            let pe = encoder(*pm);
            let (x, y) = (-8526703.378081053, 4740318.745473632);
            let geom = pe.encode(x, y, RoundMode::Floor);
            let (x2, y2) = pe.decode(&geom);
            // one tile unit in meters
            let unit = 40075016.68557849 / 256.0 / f64::from(*pm);
            assert!((x - x2).abs() <= unit);
            assert!((y - y2).abs() <= unit);
        }
    }

    #[test]
    fn parse() {
        let geom = PointGeom::from_slice(&[9, 50, 34]).unwrap();
        assert_eq!(geom.coords(), (25, 17));
        assert!(PointGeom::from_slice(&[9, 50]).is_err());
        assert!(PointGeom::from_slice(&[17, 10, 14, 3, 9]).is_err());
        assert!(PointGeom::from_slice(&[10, 50, 34]).is_err());
    }
}
