// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

use std::io::Write;
use std::path::Path;
use std::{env, fs, io};

const APPLICATION_NAME: &str = "SimpleColorPicker";

fn main() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").map_err(io::Error::other)?;
    let constants_path = Path::new(&out_dir).join("constants.rs");

    let mut constants_file = fs::File::create(&constants_path)?;
    writeln!(constants_file, "pub const APPLICATION_NAME: &str = \"{APPLICATION_NAME}\";")?;

    println!("cargo:rustc-env=CONSTANTS_PATH={}", constants_path.display());
    println!("cargo:rerun-if-changed=build.rs");

    #[cfg(target_os = "windows")]
    {
        winres::WindowsResource::new()
            .set("ProductName", APPLICATION_NAME)
            .set("FileDescription", APPLICATION_NAME)
            .set("InternalName", APPLICATION_NAME)
            .set("LegalCopyright", "Copyright © 2023 Michael Ripley")
            .set_language(0x0009) // english
            .compile()?;
    }

    Ok(())
}
