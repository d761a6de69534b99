// File: crates/stream-core/build.rs
// Summary: Links the Windows system libraries Skia textlayout (ICU) needs.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // Needed for RegOpenKeyExW, RegQueryInfoKeyW, etc.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
