// src/extract/html.rs
// =============================================================================
// This module finds JavaScript references in an HTML page.
//
// We use the `scraper` crate to walk the DOM (like the link checker did
// for <a href>), plus one regex for URLs written inside inline scripts.
//
// What counts as a reference:
// - <script src="...">           resolved with resolve::resolve()
// - text inside <script>...</script> that looks like "//host/x.js" or "/x.js"
// - <div data-script-src="...">  resolved like a script src
//
// The result is a plain Vec in document order. `scraper::Html` can't be held
// across an `.await`, so the crawler first collects everything here and only
// then starts fetching bundles.
// =============================================================================

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use super::resolve::{looks_like_bundle, origin, resolve};
use super::{RefKind, ScriptRef};

// Runs of word chars, '.', '/', ':' and parentheses ending in "js".
// [:word:] is ASCII-only, unlike \w.
static INLINE_JS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[()./:[:word:]]*js").unwrap());

// Extracts every JavaScript reference from a page.
//
// Parameters:
//   html: the page body
//   page_url: where the page was fetched from (base for resolution)
//
// Returns: references in the order they appear; <script> elements first,
// then <div data-script-src>. Duplicates are left in; the crawler decides
// what it has already seen.
pub fn extract_page_scripts(html: &str, page_url: &Url) -> Vec<ScriptRef> {
    let document = Html::parse_document(html);

    // Both selectors are constants and known to be valid
    let scripts = Selector::parse("script").unwrap();
    let divs = Selector::parse("div[data-script-src]").unwrap();

    let mut refs = Vec::new();

    for script in document.select(&scripts) {
        if let Some(src) = non_empty_attr(script.value().attr("src")) {
            let url = resolve(page_url, src);
            let follow_bundle = looks_like_bundle(&url);
            refs.push(ScriptRef {
                url,
                kind: RefKind::ScriptSrc,
                follow_bundle,
            });
        }

        let body: String = script.text().collect();
        refs.extend(inline_script_urls(&body, page_url).into_iter().map(|url| ScriptRef {
            url,
            kind: RefKind::InlineScript,
            follow_bundle: false,
        }));
    }

    for div in document.select(&divs) {
        if let Some(src) = non_empty_attr(div.value().attr("data-script-src")) {
            refs.push(ScriptRef {
                url: resolve(page_url, src),
                kind: RefKind::DataScriptSrc,
                follow_bundle: false,
            });
        }
    }

    refs
}

// Pulls "//host/x.js" and "/x.js" style tokens out of inline script text.
//
// Anything without one of those two prefixes ("x.js", "https://...",
// "window.js") is dropped.
pub fn inline_script_urls(body: &str, page_url: &Url) -> Vec<String> {
    INLINE_JS
        .find_iter(body)
        .filter_map(|m| {
            let token = m.as_str();
            if token.starts_with("//") {
                Some(format!("{}:{}", page_url.scheme(), token))
            } else if token.starts_with('/') {
                Some(format!("{}{}", origin(page_url), token))
            } else {
                None
            }
        })
        .collect()
}

fn non_empty_attr(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
