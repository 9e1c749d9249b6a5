// rust-ble-remote - Build Script

fn main() {
    // ESP-IDF environment setup (MUST be first!)
    embuild::espidf::sysenv::output();

    let version = env!("CARGO_PKG_VERSION");
    println!("cargo:rustc-env=VERSION_STRING=rust-ble-remote v{}", version);
}
