use std::env;

fn main() {
    // Allow packagers to stamp a custom version (e.g. a git describe string)
    let version = env::var("BUTTERFLY_VERSION")
        .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=BUTTERFLY_VERSION={}", version);

    println!("cargo:rerun-if-env-changed=BUTTERFLY_VERSION");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
