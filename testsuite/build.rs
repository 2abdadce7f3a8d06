use std::{env, fs, path::PathBuf};

fn main() {
    // put memory.x on the linker search path
    let out: PathBuf = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    fs::copy("../memory.x", out.join("memory.x")).unwrap();
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=../memory.x");
}
