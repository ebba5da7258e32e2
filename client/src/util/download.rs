//! Client-side file downloads built from in-memory text.

/// Offer `contents` to the user as a file named `file_name`.
///
/// No-op outside the browser.
pub fn download_text(file_name: &str, contents: &str, mime: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Err(e) = trigger_download(file_name, contents, mime) {
            log::error!("download of {file_name} failed: {e:?}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (file_name, contents, mime);
    }
}

#[cfg(feature = "hydrate")]
fn trigger_download(file_name: &str, contents: &str, mime: &str) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("no document"))?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    if let Some(body) = document.body() {
        body.append_child(&anchor)?;
        anchor.click();
        body.remove_child(&anchor)?;
    }
    web_sys::Url::revoke_object_url(&url)
}
