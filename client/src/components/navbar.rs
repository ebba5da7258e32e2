//! Top navigation bar shared by every authenticated page.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

/// Navigation links in display order: `(label, href)`.
const LINKS: [(&str, &str); 2] = [("Dashboard", "/"), ("Account", "/account")];

/// Whether the link for `href` is active at `path`.
///
/// `/` is only active on the dashboard itself; other links also match
/// their sub-paths.
pub(crate) fn is_active(href: &str, path: &str) -> bool {
    if href == "/" {
        path == "/"
    } else {
        path == href || path.starts_with(&format!("{href}/"))
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let location = use_location();

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href="/">
                "MedGem"
            </a>
            <span class="navbar__spacer"></span>
            {LINKS
                .into_iter()
                .map(|(label, href)| {
                    let path = location.pathname;
                    view! {
                        <a
                            class="navbar__link"
                            class:navbar__link--active=move || is_active(href, &path.get())
                            href=href
                        >
                            {label}
                        </a>
                    }
                })
                .collect::<Vec<_>>()}
        </nav>
    }
}
