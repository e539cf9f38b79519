//! Server-rendered pages
//!
//! A page never surfaces an error: when the content cannot be resolved the
//! visitor gets the static unavailable text with a 200 status.

use std::sync::Arc;

use advocacy_site_core::messages::CONTENT_UNAVAILABLE;
use advocacy_site_core::utils::StringUtils;
use advocacy_site_core::LocaleTag;
use axum::{
    extract::{Path, State},
    response::Html,
};
use tracing::debug;

use crate::state::AppState;

/// Render the page for `slug` in `locale`
pub async fn content_page(
    State(state): State<Arc<AppState>>,
    Path((locale, slug)): Path<(String, String)>,
) -> Html<String> {
    let locale = match LocaleTag::new(&locale) {
        Ok(locale) => locale,
        Err(e) => {
            debug!("Rejected page locale: {}", e);
            let lang = state.default_locale.as_str();
            return Html(layout(lang, CONTENT_UNAVAILABLE, "", &unavailable()));
        }
    };

    let nav = language_switcher(&state.supported_locales, &locale, &slug);
    match state.resolver.resolve(&locale, &slug).await {
        Ok(document) => {
            let title = document.title.plain_text();
            Html(layout(locale.as_str(), &title, &nav, &state.renderer.render_document(&document)))
        }
        Err(e) => {
            debug!("Page {}/{} unavailable: {}", locale, slug, e);
            Html(layout(locale.as_str(), CONTENT_UNAVAILABLE, &nav, &unavailable()))
        }
    }
}

fn unavailable() -> String {
    format!("<p class=\"unavailable\">{}</p>", CONTENT_UNAVAILABLE)
}

/// Links to the same page in every supported locale
fn language_switcher(locales: &[LocaleTag], current: &LocaleTag, slug: &str) -> String {
    let links: String = locales
        .iter()
        .map(|locale| {
            let href = StringUtils::escape_html(&format!("/{}/{}", locale, slug));
            let label = StringUtils::escape_html(locale.as_str());
            if locale == current {
                format!("<a href=\"{}\" aria-current=\"page\">{}</a>", href, label)
            } else {
                format!("<a href=\"{}\">{}</a>", href, label)
            }
        })
        .collect();
    format!("<nav class=\"languages\">{}</nav>", links)
}

fn layout(lang: &str, title: &str, nav: &str, main: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"{}\"><head><meta charset=\"utf-8\"><title>{}</title></head><body>{}<main>{}</main></body></html>",
        StringUtils::escape_html(lang),
        StringUtils::escape_html(title),
        nav,
        main
    )
}
