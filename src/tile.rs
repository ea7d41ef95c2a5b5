// tile.rs
//
// Copyright (c) 2019-2026  Minnesota Department of Transportation
//
//! Point tile encoder.
//!
use protobuf::{EnumOrUnknown, Message};
use std::collections::HashSet;
use std::fmt;

use crate::Error;
use crate::compress::{self, Compression};
use crate::encoder::{PointEncoder, PointGeom, RoundMode};
use crate::geom::CoordTransform;
use crate::grid::TileRequest;
use crate::intern::Interner;
use crate::value::Value;
use crate::vector_tile::Tile;
use crate::vector_tile::tile::{Feature, GeomType, Layer};

/// Default tile units per screen pixel.
pub const DEFAULT_PATH_MULTIPLIER: u32 = 16;

/// Default layer name.
pub const DEFAULT_LAYER_NAME: &str = "points";

/// Layer extent assumed when a tile does not specify one.
const DEFAULT_EXTENT: u32 = 4096;

/// Vector tile version written to the layer.
const LAYER_VERSION: u32 = 2;

/// Configuration for a [VectorTileEncoder](struct.VectorTileEncoder.html).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Tile units per screen pixel (sub-pixel precision).
    pub path_multiplier: u32,
    /// Name of the layer.
    pub layer_name: String,
}

/// Options for adding one point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointOptions {
    /// Skip a point which quantizes to the same position as an earlier one.
    pub skip_coincident: bool,
    /// Rounding used for quantization.
    pub round_mode: RoundMode,
}

/// Outcome of adding a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointStatus {
    /// A feature was added with the given ID.
    Added(u64),
    /// The point was coincident with an earlier feature and skipped.
    Coincident,
}

/// A feature decoded from the layer.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedPoint {
    /// Feature ID
    pub id: u64,
    /// Mercator X (meters)
    pub x: f64,
    /// Mercator Y (meters)
    pub y: f64,
    /// Feature properties, in tag order
    pub properties: Vec<(String, Value)>,
}

/// Encoder for a tile with a single layer of point features.
///
/// Keys and values are interned: each distinct key or value is stored once
/// in the layer, and features refer to them by index.  Indices depend on
/// the order points are added, so an encoder shared between threads must
/// serialize calls to `add_point` behind one lock.
///
/// # Example
/// ```
/// # use point_tile::Error;
/// # fn main() -> Result<(), Error> {
///       use point_tile::{lonlat_to_merc, TileRequest, VectorTileEncoder};
///       let req = TileRequest::new(0, 0, 0)?;
///       let mut vt = VectorTileEncoder::new(&req)?;
///       let (x, y) = lonlat_to_merc(-74.01226, 40.70512);
///       vt.add_point(x, y, vec![("hello", "world")])?;
///       let data = vt.to_message()?;
///       assert!(!data.is_empty());
/// #     Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct VectorTileEncoder {
    request: TileRequest,
    encoder: PointEncoder,
    path_multiplier: u32,
    layer: Layer,
    keys: Interner<String>,
    values: Interner<Value>,
    pixels: HashSet<(u32, u32)>,
    feature_count: u64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            path_multiplier: DEFAULT_PATH_MULTIPLIER,
            layer_name: DEFAULT_LAYER_NAME.to_string(),
        }
    }
}

impl EncoderConfig {
    /// Create a config with a path multiplier.
    pub fn with_path_multiplier(path_multiplier: u32) -> Self {
        EncoderConfig {
            path_multiplier,
            ..Default::default()
        }
    }
}

impl Default for PointOptions {
    fn default() -> Self {
        PointOptions {
            skip_coincident: true,
            round_mode: RoundMode::Floor,
        }
    }
}

impl VectorTileEncoder {
    /// Create a new encoder with default configuration.
    pub fn new(req: &TileRequest) -> Result<Self, Error> {
        VectorTileEncoder::with_config(req, EncoderConfig::default())
    }

    /// Create a new encoder.
    ///
    /// * `req` Tile request.
    /// * `config` Encoder configuration.
    pub fn with_config(
        req: &TileRequest,
        config: EncoderConfig,
    ) -> Result<Self, Error> {
        let pm = config.path_multiplier;
        // quantized coördinates must fit in i32
        let extent = match req.tile_size().checked_mul(pm) {
            Some(extent) if pm > 0 && extent <= i32::MAX as u32 => extent,
            _ => return Err(Error::InvalidPathMultiplier(pm)),
        };
        let mut layer = Layer::new();
        layer.version = Some(LAYER_VERSION);
        layer.name = Some(config.layer_name);
        layer.extent = Some(extent);
        let encoder = PointEncoder::new(CoordTransform::new(req), pm);
        Ok(VectorTileEncoder {
            request: req.clone(),
            encoder,
            path_multiplier: pm,
            layer,
            keys: Interner::default(),
            values: Interner::default(),
            pixels: HashSet::new(),
            feature_count: 0,
        })
    }

    /// Rebuild an encoder from an encoded tile.
    ///
    /// The data may be zlib or gzip compressed.  The tile must contain one
    /// version 2 layer of point features, with an extent matching the
    /// request and configured path multiplier.  The layer name is taken
    /// from the tile, not from `config`.
    pub fn from_message(
        req: &TileRequest,
        config: EncoderConfig,
        data: &[u8],
    ) -> Result<Self, Error> {
        let mut enc = VectorTileEncoder::with_config(req, config)?;
        let data = compress::decompress(data)?;
        let mut tile = Tile::parse_from_bytes(&data)?;
        if tile.layers.len() != 1 {
            warn!("expected 1 layer, found {}", tile.layers.len());
            return Err(Error::InvalidLayer());
        }
        let layer = tile.layers.remove(0);
        if layer.version != Some(LAYER_VERSION) {
            warn!("unsupported layer version {:?}", layer.version);
            return Err(Error::InvalidLayer());
        }
        if layer.name.as_deref() != Some(enc.layer_name()) {
            warn!(
                "layer name {:?} replaces configured {:?}",
                layer.name,
                enc.layer_name()
            );
        }
        if layer.extent.unwrap_or(DEFAULT_EXTENT) != enc.layer_extent() {
            warn!("layer extent {:?} does not match request", layer.extent);
            return Err(Error::WrongExtent());
        }
        let keys = Interner::from_list(layer.keys.clone())
            .ok_or(Error::InvalidLayer())?;
        let values = layer
            .values
            .iter()
            .map(|v| Value::try_from(v))
            .collect::<Result<Vec<_>, _>>()?;
        let values = Interner::from_list(values).ok_or(Error::InvalidLayer())?;
        for feature in &layer.features {
            if feature.type_.as_ref().map(|t| t.value())
                != Some(GeomType::POINT as i32)
            {
                warn!("feature {:?} is not a point", feature.id);
                return Err(Error::InvalidGeometry());
            }
            let geom = PointGeom::from_slice(&feature.geometry)?;
            check_tags(&feature.tags, &keys, &values)?;
            enc.pixels.insert(geom.key());
            enc.feature_count = enc.feature_count.max(feature.id.unwrap_or(0));
        }
        debug!(
            "loaded {} features, {} keys, {} values",
            layer.features.len(),
            keys.len(),
            values.len()
        );
        enc.layer = layer;
        enc.keys = keys;
        enc.values = values;
        Ok(enc)
    }

    /// Get the tile request.
    pub fn request(&self) -> &TileRequest {
        &self.request
    }

    /// Get the coördinate transform.
    pub fn transform(&self) -> &CoordTransform {
        self.encoder.transform()
    }

    /// Get the path multiplier.
    pub fn path_multiplier(&self) -> u32 {
        self.path_multiplier
    }

    /// Get the layer extent (tile units).
    pub fn layer_extent(&self) -> u32 {
        self.layer.extent.unwrap_or(DEFAULT_EXTENT)
    }

    /// Get the layer name.
    pub fn layer_name(&self) -> &str {
        self.layer.name.as_deref().unwrap_or("")
    }

    /// Get the number of features.
    pub fn num_features(&self) -> usize {
        self.layer.features.len()
    }

    /// Get the interned keys, in index order.
    pub fn keys(&self) -> &[String] {
        self.keys.as_slice()
    }

    /// Get the interned values, in index order.
    pub fn values(&self) -> &[Value] {
        self.values.as_slice()
    }

    /// Add a point with default options.
    ///
    /// * `x` Mercator X (meters).
    /// * `y` Mercator Y (meters).
    /// * `properties` Key / value pairs for the feature.
    pub fn add_point<I, K, V>(
        &mut self,
        x: f64,
        y: f64,
        properties: I,
    ) -> Result<PointStatus, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: TryInto<Value>,
        Error: From<V::Error>,
    {
        self.add_point_with(x, y, properties, PointOptions::default())
    }

    /// Add a point.
    ///
    /// Returns [Error::OutOfBounds](enum.Error.html) if the point is outside
    /// of the tile extent, or
    /// [Error::UnsupportedValueType](enum.Error.html) if a property can not
    /// be converted.  In either case, the layer is not changed.  A skipped
    /// coincident point is not checked for property conversion.
    pub fn add_point_with<I, K, V>(
        &mut self,
        x: f64,
        y: f64,
        properties: I,
        options: PointOptions,
    ) -> Result<PointStatus, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: TryInto<Value>,
        Error: From<V::Error>,
    {
        if !self.request.extent().intersects(x, y) {
            return Err(Error::OutOfBounds(x, y));
        }
        let geom = self.encoder.encode(x, y, options.round_mode);
        let key = geom.key();
        if options.skip_coincident && self.pixels.contains(&key) {
            debug!("coincident point skipped: {:?}", key);
            return Ok(PointStatus::Coincident);
        }
        let properties = properties
            .into_iter()
            .map(|(k, v)| -> Result<(K, Value), Error> { Ok((k, v.try_into()?)) })
            .collect::<Result<Vec<_>, _>>()?;
        self.feature_count += 1;
        let id = self.feature_count;
        let mut feature = Feature::new();
        feature.id = Some(id);
        feature.type_ = Some(EnumOrUnknown::new(GeomType::POINT));
        for (k, v) in &properties {
            let kidx = self.key_pos(k.as_ref());
            let vidx = self.val_pos(v);
            feature.tags.push(kidx);
            feature.tags.push(vidx);
        }
        feature.geometry = geom.to_vec();
        self.pixels.insert(key);
        self.layer.features.push(feature);
        Ok(PointStatus::Added(id))
    }

    /// Get position of a key in the layer keys.  If the key is not found, it
    /// is added as the last key.
    fn key_pos(&mut self, key: &str) -> u32 {
        let (idx, added) = self.keys.intern(key);
        if added {
            debug!("key {}: {}", idx, key);
            self.layer.keys.push(key.to_string());
        }
        idx
    }

    /// Get position of a value in the layer values.  If the value is not
    /// found, it is added as the last value.
    fn val_pos(&mut self, value: &Value) -> u32 {
        let (idx, added) = self.values.intern(value);
        if added {
            debug!("value {}: {:?}", idx, value);
            self.layer.values.push(value.to_pbf());
        }
        idx
    }

    /// Decode all features back to mercator points.
    ///
    /// Coördinates are quantized, so they may differ from the original
    /// points by up to one tile unit.
    pub fn points(&self) -> Result<Vec<DecodedPoint>, Error> {
        self.layer
            .features
            .iter()
            .map(|f| self.decode_feature(f))
            .collect()
    }

    /// Decode one feature.
    fn decode_feature(&self, feature: &Feature) -> Result<DecodedPoint, Error> {
        let geom = PointGeom::from_slice(&feature.geometry)?;
        let (x, y) = self.encoder.decode(&geom);
        let mut properties = Vec::with_capacity(feature.tags.len() / 2);
        for pair in feature.tags.chunks(2) {
            match pair {
                [k, v] => {
                    let key = self.keys.get(*k).ok_or(Error::InvalidTags())?;
                    let val = self.values.get(*v).ok_or(Error::InvalidTags())?;
                    properties.push((key.clone(), val.clone()));
                }
                _ => return Err(Error::InvalidTags()),
            }
        }
        Ok(DecodedPoint {
            id: feature.id.unwrap_or(0),
            x,
            y,
            properties,
        })
    }

    /// Build the tile message.
    fn tile(&self) -> Tile {
        let mut tile = Tile::new();
        tile.layers.push(self.layer.clone());
        tile
    }

    /// Encode the tile and return the bytes.
    pub fn to_message(&self) -> Result<Vec<u8>, Error> {
        Ok(self.tile().write_to_bytes()?)
    }

    /// Encode the tile and return compressed bytes.
    pub fn to_compressed_message(
        &self,
        compression: Compression,
    ) -> Result<Vec<u8>, Error> {
        compress::compress(&self.to_message()?, compression)
    }
}

impl fmt::Display for VectorTileEncoder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = protobuf::text_format::print_to_string_pretty(&self.tile());
        write!(f, "{}", text)
    }
}

/// Check that feature tags are pairs of valid key / value indices.
fn check_tags(
    tags: &[u32],
    keys: &Interner<String>,
    values: &Interner<Value>,
) -> Result<(), Error> {
    if tags.len() % 2 != 0 {
        return Err(Error::InvalidTags());
    }
    for pair in tags.chunks(2) {
        if keys.get(pair[0]).is_none() || values.get(pair[1]).is_none() {
            return Err(Error::InvalidTags());
        }
    }
    Ok(())
}
