//! Wall-clock helpers. Browser time under `hydrate`, zero elsewhere.

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0.0
    }
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn now_ms_u64() -> u64 {
    now_ms().max(0.0) as u64
}

/// Today's date in the browser's locale, e.g. `"3/14/2026"`.
#[must_use]
pub fn today_label() -> String {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::new_0()
            .to_locale_date_string("default", &wasm_bindgen::JsValue::UNDEFINED)
            .into()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}
