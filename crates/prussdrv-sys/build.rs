fn main() {
    // libprussdrv only exists on the BeagleBone target. Linking is skipped on
    // host architectures so the declaration-only crate (and its layout tests)
    // still build there.
    let target_arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    if target_arch == "arm" || target_arch == "armv7" {
        println!("cargo:rustc-link-lib=dylib=prussdrv");
    }
}
