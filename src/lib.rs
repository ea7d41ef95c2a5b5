// lib.rs      point-tile crate.
//
// Copyright (c) 2019-2026  Minnesota Department of Transportation
//
//! A library for encoding point features into a single layer of a
//! [mapbox vector tile](https://github.com/mapbox/vector-tile-spec) (MVT).
//!
//! Points are given in spherical mercator meters, quantized to tile units
//! with a configurable sub-pixel precision, and written with interned
//! properties.  Coincident points are dropped by default.
//!
//! # Example
//! ```
//! # use point_tile::Error;
//! # fn main() -> Result<(), Error> {
//!       use point_tile::{lonlat_to_merc, Compression, TileRequest, VectorTileEncoder};
//!       let req = TileRequest::new(0, 0, 0)?;
//!       let mut vt = VectorTileEncoder::new(&req)?;
//!       let (x, y) = lonlat_to_merc(-74.01226, 40.70512);
//!       vt.add_point(x, y, vec![("hello", "world")])?;
//!       let data = vt.to_compressed_message(Compression::Zlib)?;
//!       assert!(point_tile::is_zlib_compressed(&data));
//! #     Ok(())
//! # }
//! ```
#[macro_use]
extern crate log;

include!(concat!(env!("OUT_DIR"), "/protos/mod.rs"));

mod compress;
mod encoder;
mod error;
mod geojson;
mod geom;
mod grid;
mod intern;
mod mercator;
mod tile;
mod value;

pub use crate::compress::{
    compress, decompress, is_gzip_compressed, is_zlib_compressed, Compression,
};
pub use crate::encoder::{PointEncoder, PointGeom, RoundMode};
pub use crate::error::Error;
pub use crate::geom::CoordTransform;
pub use crate::grid::{Box2d, TileRequest};
pub use crate::mercator::{
    lonlat_to_merc, merc_to_lonlat, SphericalMercator, MAX_EXTENT, MAX_LEVELS,
    MAX_ZOOM, TILE_SIZE,
};
pub use crate::tile::{
    DecodedPoint, EncoderConfig, PointOptions, PointStatus, VectorTileEncoder,
    DEFAULT_LAYER_NAME, DEFAULT_PATH_MULTIPLIER,
};
pub use crate::value::Value;
