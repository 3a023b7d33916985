// src/extract/resolve.rs
// =============================================================================
// This module turns the path strings we find in pages and bundles into
// absolute URLs.
//
// Unlike a browser, we never resolve relative to the page's directory.
// Bundlers serve every static asset from the host root, so a path like
// "static/chunks/app.js" found on https://ex.com/blog/post means
// https://ex.com/static/chunks/app.js, not https://ex.com/blog/static/...
//
// Path forms, checked in this order:
//   1. "http://..." / "https://..."  -> returned as-is
//   2. "//cdn.ex.com/a.js"           -> base scheme + ":" + path
//   3. "/_next/..." / "_next/..."    -> base origin + path (leading "/" added)
//   4. anything else                 -> base origin + "/" + path
// =============================================================================

use url::Url;

/// Directory that Next.js-style bundlers serve their chunks from.
const NEXT_ROOT: &str = "/_next/";

// Resolves a script path against the page (or bundle) it was found in.
//
// Never fails: a garbage path still produces a best-effort absolute string.
//
// Examples (base = "https://ex.com/a/b"):
//   "https://cdn.io/x.js"  -> "https://cdn.io/x.js"
//   "//cdn.io/x.js"        -> "https://cdn.io/x.js"
//   "_next/static/x.js"    -> "https://ex.com/_next/static/x.js"
//   "x.js"                 -> "https://ex.com/x.js"
pub fn resolve(base: &Url, path: &str) -> String {
    if has_explicit_scheme(path) {
        return path.to_string();
    }

    if path.starts_with("//") {
        return format!("{}:{}", base.scheme(), path);
    }

    // "_next/..." and plain relative paths land in the same place: the
    // host root. The page's own path is dropped.
    format!("{}{}", origin(base), with_leading_slash(path))
}

// Rewrites a bundle chunk path so it lives under "/_next/".
//
//   "static/chunks/a.js"   -> "/_next/static/chunks/a.js"
//   "/static/chunks/a.js"  -> "/_next/static/chunks/a.js"
//   "_next/static/a.js"    -> unchanged
pub fn ensure_next_prefix(path: &str) -> String {
    if is_next_rooted(path) {
        return path.to_string();
    }

    match path.strip_prefix('/') {
        Some(rest) => format!("{}{}", NEXT_ROOT, rest),
        None => format!("{}{}", NEXT_ROOT, path),
    }
}

// True when the URL looks like something a bundler produced and is worth
// downloading to look for more chunks. Purely a substring test.
pub fn looks_like_bundle(url: &str) -> bool {
    ["webpack", "bundle", "chunks", "_next/static"]
        .iter()
        .any(|marker| url.contains(marker))
}

// "scheme://host[:port]" of a URL, with no trailing slash.
pub fn origin(base: &Url) -> String {
    match (base.host_str(), base.port()) {
        (Some(host), Some(port)) => format!("{}://{}:{}", base.scheme(), host, port),
        (Some(host), None) => format!("{}://{}", base.scheme(), host),
        (None, _) => format!("{}://", base.scheme()),
    }
}

fn has_explicit_scheme(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

fn is_next_rooted(path: &str) -> bool {
    path.starts_with(NEXT_ROOT) || path.starts_with("_next/")
}

fn with_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://ex.com/deep/page.html?q=1").unwrap()
    }

    #[test]
    fn test_absolute_url_is_fixed_point() {
        for url in ["https://cdn.io/a.js", "http://other.org/x/y.js?v=2"] {
            assert_eq!(resolve(&base(), url), url);
        }
    }

    #[test]
    fn test_protocol_relative_takes_base_scheme() {
        assert_eq!(resolve(&base(), "//cdn.io/a.js"), "https://cdn.io/a.js");

        let http = Url::parse("http://ex.com/").unwrap();
        assert_eq!(resolve(&http, "//cdn.io/a.js"), "http://cdn.io/a.js");
    }

    #[test]
    fn test_next_paths_rooted_at_host() {
        assert_eq!(
            resolve(&base(), "_next/static/chunks/main.js"),
            "https://ex.com/_next/static/chunks/main.js"
        );
        assert_eq!(
            resolve(&base(), "/_next/static/chunks/main.js"),
            "https://ex.com/_next/static/chunks/main.js"
        );
    }

    #[test]
    fn test_relative_path_ignores_page_directory() {
        assert_eq!(resolve(&base(), "app.js"), "https://ex.com/app.js");
        assert_eq!(resolve(&base(), "/js/app.js"), "https://ex.com/js/app.js");
    }

    #[test]
    fn test_port_is_kept() {
        let local = Url::parse("http://127.0.0.1:8080/index.html").unwrap();
        assert_eq!(resolve(&local, "main.js"), "http://127.0.0.1:8080/main.js");
        assert_eq!(
            resolve(&local, "_next/a.js"),
            "http://127.0.0.1:8080/_next/a.js"
        );
    }

    #[test]
    fn test_ensure_next_prefix() {
        assert_eq!(
            ensure_next_prefix("static/chunks/a.js"),
            "/_next/static/chunks/a.js"
        );
        assert_eq!(
            ensure_next_prefix("/static/chunks/a.js"),
            "/_next/static/chunks/a.js"
        );
        assert_eq!(ensure_next_prefix("_next/static/a.js"), "_next/static/a.js");
        assert_eq!(ensure_next_prefix("/_next/static/a.js"), "/_next/static/a.js");
    }

    #[test]
    fn test_looks_like_bundle() {
        assert!(looks_like_bundle("https://ex.com/_next/static/chunks/main.js"));
        assert!(looks_like_bundle("https://ex.com/js/webpack-runtime.js"));
        assert!(looks_like_bundle("https://ex.com/app.bundle.js"));
        assert!(!looks_like_bundle("https://ex.com/js/jquery.min.js"));
    }
}
