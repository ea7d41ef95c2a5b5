// build.rs
//
// Copyright (c) 2019-2026  Minnesota Department of Transportation
//
// Generate the vector tile protobuf module into OUT_DIR
fn main() {
    protobuf_codegen::Codegen::new()
        .pure()
        .includes(["protos"])
        .input("protos/vector_tile.proto")
        .cargo_out_dir("protos")
        .run_from_script();
}
