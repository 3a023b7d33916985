// src/extract/mod.rs
// =============================================================================
// This module contains everything that turns fetched text into URLs.
//
// Submodules:
// - resolve: turns relative / protocol-relative / "_next" paths into absolute URLs
// - html: finds script references in an HTML page
// - bundle: finds chunk references inside a webpack / Next.js bundle
//
// Nothing in here touches the network; the crawler does the fetching and
// hands us strings.
// =============================================================================

mod bundle;
mod html;
mod resolve;

use serde::Serialize;

// Re-export what the crawler needs, so it can write `extract::BundleHeuristics`
pub use bundle::{BundleDocument, BundleHeuristics};
pub use html::extract_page_scripts;

/// Where a discovered URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    /// `<script src="...">`
    ScriptSrc,
    /// A "/x.js" or "//host/x.js" token inside inline script text
    InlineScript,
    /// `<div data-script-src="...">`
    DataScriptSrc,
    /// A chunk found inside a downloaded bundle
    BundleChunk,
}

/// A JavaScript reference found on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRef {
    /// Absolute URL of the script
    pub url: String,
    pub kind: RefKind,
    /// True when the URL looks like a bundle that should be downloaded
    /// and searched for chunks
    pub follow_bundle: bool,
}
