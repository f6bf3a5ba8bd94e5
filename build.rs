// build.rs
//
// Stamps the serialtft banner: build date and target triple end up in
// OUT_DIR/build_info.rs, which main.rs pulls in with include!.

use chrono::Utc;
use std::{env, error::Error, fs, path::Path};

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = env::var("OUT_DIR")?;
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".into());
    let build_date = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let info = format!(
        "pub const BUILD_DATE: &str = {:?};\npub const BUILD_TARGET: &str = {:?};\n",
        build_date, target
    );
    fs::write(Path::new(&out_dir).join("build_info.rs"), info)?;

    // cross builds for the Pi pick up a new target without touching build.rs
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=TARGET");
    Ok(())
}
