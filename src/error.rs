// error.rs
//
// Copyright (c) 2019-2026  Minnesota Department of Transportation
//
use std::convert::Infallible;
use std::fmt;

/// Point tile error types
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// The zoom level is outside of the supported range.
    InvalidZoom(u32),
    /// The tile size in pixels must be non-zero.
    InvalidTileSize(u32),
    /// The path multiplier must be non-zero.
    InvalidPathMultiplier(u32),
    /// A mercator coordinate does not intersect the tile extent.
    OutOfBounds(f64, f64),
    /// A property value can not be represented as a tile value.
    UnsupportedValueType(String),
    /// The layer extent does not match the tile request.
    WrongExtent(),
    /// The tile does not contain exactly one well-formed layer.
    InvalidLayer(),
    /// The geometry is not a single encoded point.
    InvalidGeometry(),
    /// Feature tags do not reference valid keys and values.
    InvalidTags(),
    /// Error while encoding or decoding protobuf data.
    Protobuf(protobuf::Error),
    /// I/O error while compressing or decompressing a tile.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidZoom(z) => write!(f, "Invalid zoom level: {}", z),
            Error::InvalidTileSize(s) => write!(f, "Invalid tile size: {}", s),
            Error::InvalidPathMultiplier(m) => {
                write!(f, "Invalid path multiplier: {}", m)
            }
            Error::OutOfBounds(x, y) => {
                write!(f, "Point ({}, {}) does not intersect tile bounds", x, y)
            }
            Error::UnsupportedValueType(t) => {
                write!(f, "Unsupported value type: {}", t)
            }
            Error::WrongExtent() => write!(f, "Wrong layer extent"),
            Error::InvalidLayer() => write!(f, "Invalid layer"),
            Error::InvalidGeometry() => write!(f, "Invalid geometry data"),
            Error::InvalidTags() => write!(f, "Invalid feature tags"),
            Error::Protobuf(e) => write!(f, "Protobuf {:?}", e),
            Error::Io(e) => write!(f, "I/O {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Protobuf(p) => Some(p),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<protobuf::Error> for Error {
    fn from(e: protobuf::Error) -> Self {
        Error::Protobuf(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<Infallible> for Error {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}
