use anyhow::Result;
use fs_extra::copy_items;
use fs_extra::dir::CopyOptions;
use std::env;
use std::path::PathBuf;

// Ship the texture next to the build output so packaged builds carry it.
fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=assets/");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let assets = manifest_dir.join("assets");
    if !assets.exists() {
        println!("cargo:warning=no assets/ directory, the texture will fail to load");
        return Ok(());
    }

    let out_dir = env::var("OUT_DIR")?;
    let mut copy_options = CopyOptions::new();
    copy_options.overwrite = true;
    copy_items(&[assets], out_dir, &copy_options)?;

    Ok(())
}
