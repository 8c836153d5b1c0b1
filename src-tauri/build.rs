//! Build script for Screen Lens.
//!
//! Only the Tauri codegen step is needed: capture goes through `xcap` and
//! the analysis call is plain HTTPS, so there is no native bridge to compile.

fn main() {
    tauri_build::build();
}
