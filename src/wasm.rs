//! Expose the crate's merge functionality to WebAssembly.
use wasm_bindgen::prelude::*;

use crate::{ConflictMarkers, line_diff};

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc<'_> = wee_alloc::WeeAlloc::INIT;

/// WASM wrapper around [`crate::merge3`] using the built-in line diff and the
/// default conflict markers.
///
/// # Errors
///
/// Surfaces a [`crate::MergeError`] as a JS error.
#[wasm_bindgen(js_name = merge3)]
pub fn merge3(original: &str, local: &str, remote: &str) -> Result<String, JsError> {
    set_panic_hook();

    crate::merge3(&line_diff, original, local, remote).map_err(JsError::from)
}

/// WASM wrapper around [`crate::merge3_with_markers`] using the built-in line
/// diff. Omitted markers suppress the corresponding sentinel.
///
/// # Errors
///
/// Surfaces a [`crate::MergeError`] as a JS error.
#[wasm_bindgen(js_name = merge3WithMarkers)]
pub fn merge3_with_markers(
    original: &str,
    local: &str,
    remote: &str,
    start: Option<String>,
    mid: Option<String>,
    end: Option<String>,
) -> Result<String, JsError> {
    set_panic_hook();

    let markers = ConflictMarkers { start, mid, end };
    crate::merge3_with_markers(&line_diff, &markers, original, local, remote)
        .map_err(JsError::from)
}

fn set_panic_hook() {
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
