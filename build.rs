//! Build script for splinkcli.
//!
//! Copies `.env.example` from the crate root into the local data directory,
//! next to where the CLI looks for `.env`:
//! - Linux: `~/.local/share/splinkcli/.env.example`
//! - macOS: `~/Library/Application Support/splinkcli/.env.example`
//! - Windows: `%LOCALAPPDATA%/splinkcli/.env.example`
//!
//! A missing template only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("splinkcli");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        fs::copy(&env_example_path, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
