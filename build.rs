fn main() {
    // Keep `check-cfg` happy even when we skip `tauri_build::build()` (core-only unit tests).
    println!("cargo:rustc-check-cfg=cfg(desktop)");
    println!("cargo:rustc-check-cfg=cfg(mobile)");

    // The core (state/view/storage/commands) builds without the Tauri runtime,
    // e.g. `cargo test --no-default-features`, so the build helpers only run
    // when the `app` feature is enabled.
    if std::env::var_os("CARGO_FEATURE_APP").is_some() {
        tauri_build::build()
    }
}
