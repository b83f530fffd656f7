//! Puts `memory.x` on the linker search path for embedded targets.
//! Host builds carry it along harmlessly.

use std::{env, fs, path::PathBuf};

fn main() {
    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR not set by cargo"));
    fs::copy("memory.x", out.join("memory.x")).expect("failed to stage memory.x");
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=memory.x");
}
