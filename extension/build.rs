fn main() {
    // Triple this crate is compiled for; the CLI runs the builder on it.
    let target = std::env::var("TARGET").unwrap_or_default();
    println!("cargo:rustc-env=TCGS_HOST_TARGET={}", target);
    println!("cargo:rerun-if-changed=build.rs");
}
