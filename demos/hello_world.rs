// hello_world.rs
//
// Encode one point into a zoom 0 tile and print it.
use point_tile::{
    lonlat_to_merc, Compression, Error, TileRequest, VectorTileEncoder,
};

fn main() -> Result<(), Error> {
    env_logger::init();
    let req = TileRequest::new(0, 0, 0)?;
    let mut vt = VectorTileEncoder::new(&req)?;
    let (x, y) = lonlat_to_merc(-74.01226, 40.70512);
    vt.add_point(x, y, vec![("hello", "world")])?;
    let geojson = vt.to_geojson(true)?;
    match serde_json::to_string_pretty(&geojson) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("geojson: {}", e),
    }
    println!("{}", vt);
    let data = vt.to_compressed_message(Compression::Zlib)?;
    println!("zlib: {} bytes", data.len());
    Ok(())
}
