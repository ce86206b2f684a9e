//! Browser-only helpers. Off wasm they log and fall back to a sensible default
//! so the same components run under tests and the desktop renderer.

/// Ask the user to confirm; `true` when accepted.
#[cfg(target_arch = "wasm32")]
pub fn confirm(message: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    match window.confirm_with_message(message) {
        Ok(accepted) => accepted,
        Err(e) => {
            tracing::warn!("confirm dialog failed: {:?}", e);
            false
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn confirm(message: &str) -> bool {
    tracing::debug!("confirm without a browser, accepting: {}", message);
    true
}

/// Page origin, e.g. `https://obra.replit.dev`.
#[cfg(target_arch = "wasm32")]
pub fn page_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn page_origin() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
pub fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.open_with_url_and_target(url, "_blank") {
            tracing::error!("Failed to open {}: {:?}", url, e);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_in_new_tab(url: &str) {
    tracing::info!("open {}", url);
}

#[cfg(target_arch = "wasm32")]
pub fn print_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.print() {
            tracing::error!("Failed to print: {:?}", e);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn print_page() {}

/// How long a report's object URL stays alive after the tab is opened.
pub const OBJECT_URL_LIFETIME_MS: u32 = 60_000;

/// Show PDF bytes in a new tab through an object URL, revoked once the tab
/// has had time to load it.
#[cfg(target_arch = "wasm32")]
pub fn open_pdf(bytes: &[u8]) -> Result<(), String> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| format!("{e:?}"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("{e:?}"))?;
    open_in_new_tab(&url);
    gloo_timers::callback::Timeout::new(OBJECT_URL_LIFETIME_MS, move || {
        if let Err(e) = web_sys::Url::revoke_object_url(&url) {
            tracing::warn!("Failed to revoke {}: {:?}", url, e);
        }
    })
    .forget();
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_pdf(bytes: &[u8]) -> Result<(), String> {
    tracing::info!("report of {} bytes ready", bytes.len());
    Ok(())
}
