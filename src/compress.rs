// compress.rs
//
// Copyright (c) 2019-2026  Minnesota Department of Transportation
//
//! Compression for encoded tiles.
//!
use flate2::read::{MultiGzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use std::io::{Read, Write};

use crate::Error;

/// Compression framing for an encoded tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    /// zlib (deflate with zlib header)
    Zlib,
    /// gzip
    Gzip,
}

/// Check whether data starts with a zlib header (default compression).
pub fn is_zlib_compressed(data: &[u8]) -> bool {
    data.len() > 2 && data[0] == 0x78 && data[1] == 0x9C
}

/// Check whether data starts with a gzip header.
pub fn is_gzip_compressed(data: &[u8]) -> bool {
    data.len() > 2 && data[0] == 0x1F && data[1] == 0x8B
}

/// Compress data.
pub fn compress(data: &[u8], compression: Compression) -> Result<Vec<u8>, Error> {
    let level = flate2::Compression::default();
    let out = match compression {
        Compression::Zlib => {
            let mut enc = ZlibEncoder::new(Vec::new(), level);
            enc.write_all(data)?;
            enc.finish()?
        }
        Compression::Gzip => {
            let mut enc = GzEncoder::new(Vec::new(), level);
            enc.write_all(data)?;
            enc.finish()?
        }
    };
    debug!("compressed {:?}: {} => {} bytes", compression, data.len(), out.len());
    Ok(out)
}

/// Decompress zlib or gzip data.
///
/// Data without a recognized header is returned unchanged.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    if is_zlib_compressed(data) {
        ZlibDecoder::new(data).read_to_end(&mut out)?;
    } else if is_gzip_compressed(data) {
        MultiGzDecoder::new(data).read_to_end(&mut out)?;
    } else {
        out.extend_from_slice(data);
    }
    Ok(out)
}
