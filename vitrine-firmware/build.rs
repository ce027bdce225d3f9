//! Build script for vitrine-firmware
//!
//! Adds the esp-hal and defmt linker scripts for the xtensa target.

fn main() {
    println!("cargo:rustc-link-arg=-Tdefmt.x");
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}
