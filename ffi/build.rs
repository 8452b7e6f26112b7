//! Generates `include/movies.h` for the mobile host.

use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let Ok(crate_dir) = std::env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let header = PathBuf::from(&crate_dir).join("include").join("movies.h");

    let config = cbindgen::Config {
        language: cbindgen::Language::C,
        include_guard: Some("MOVIES_FFI_H".to_string()),
        cpp_compat: true,
        ..Default::default()
    };

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(header);
        }
        Err(e) => println!("cargo:warning=skipping header generation: {e}"),
    }
}
