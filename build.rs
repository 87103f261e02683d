use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // host builds (tests) link normally
    if env::var("CARGO_CFG_TARGET_ARCH").as_deref() != Ok("arm") {
        return;
    }

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x"); // memory.x comes from stm32-metapac/memory-x
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x"); // required for defmt
    }
}
