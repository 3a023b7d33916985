// src/extract/bundle.rs
// =============================================================================
// This module digs chunk file names out of bundler output (webpack / Next.js).
//
// A bundle's runtime knows how to build the URL of every lazily loaded chunk.
// That knowledge is written out as plain JavaScript, so we can pattern-match
// it without running anything. There is no single format; each shape we know
// about is a separate `ChunkExtractor`:
//
//   TernaryChunkMap     2986===e?"static/chunks/2986-2488e3e4.js"
//   SplitChunkMaps      "static/chunks/"+(({..})[e]||e)+"."+({..})[e]+".js"
//   PublicPathConcat    a.p+"static/chunks/pages/about-12345.js"
//   ScopedTernaryChain  a.u=e=>2986===e?"..":7699===e?"..": ...
//
// All extractors run over every bundle and their results are merged.
// Supporting a new bundler layout means adding another extractor; the
// existing ones never need to change.
// =============================================================================

use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;
use url::Url;

use super::resolve::{ensure_next_prefix, resolve};

// The regexes are constants, so a failure to compile is a programmer error.
static TERNARY_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\d+)===e\?"([^"]+)""#).unwrap());

static SPLIT_MAPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#""(static/chunks/)"\+\(\(\{([^}]+)\}\)\[e\]\|\|e\)\+"\."\+\(\{([^}]+)\}\)\[e\]\+"\.js""#,
    )
    .unwrap()
});

static PUBLIC_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"a\.p\+"([^"]+\.js)""#).unwrap());

static CHUNK_URL_FN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"a\.u=e=>([^}]+)").unwrap());

static MAP_ENTRY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(\d+):"([^"]+)""#).unwrap());

/// Chunk id -> name or hash fragment, parsed from an object literal body.
pub type ChunkIdMap = BTreeMap<String, String>;

/// A downloaded bundle together with the URL it came from.
///
/// The URL is the base every chunk path inside the bundle is resolved against.
#[derive(Debug, Clone)]
pub struct BundleDocument {
    pub url: Url,
    pub text: String,
}

impl BundleDocument {
    pub fn new(url: &str, text: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(url)?,
            text: text.into(),
        })
    }
}

/// One way of spotting chunk paths in bundle text.
///
/// Implementations return paths exactly as written in the bundle (usually
/// relative, like "static/chunks/123.js"); normalizing and resolving them is
/// done by [`BundleHeuristics`].
pub trait ChunkExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    fn candidates(&self, text: &str) -> Vec<String>;
}

/// `<id>===e?"<path>"` anywhere in the bundle.
pub struct TernaryChunkMap;

impl ChunkExtractor for TernaryChunkMap {
    fn name(&self) -> &'static str {
        "ternary-chunk-map"
    }

    fn candidates(&self, text: &str) -> Vec<String> {
        ternary_paths(text)
    }
}

/// Webpack's split form: one object literal maps ids to names, a second one
/// maps ids to content hashes. Only the first occurrence is used.
pub struct SplitChunkMaps;

impl ChunkExtractor for SplitChunkMaps {
    fn name(&self) -> &'static str {
        "split-chunk-maps"
    }

    fn candidates(&self, text: &str) -> Vec<String> {
        let Some(caps) = SPLIT_MAPS.captures(text) else {
            return Vec::new();
        };

        let prefix = &caps[1];
        let names = parse_chunk_map(&caps[2]);
        let hashes = parse_chunk_map(&caps[3]);

        // Ids missing from the name map use the id itself as the name.
        hashes
            .iter()
            .map(|(id, hash)| {
                let name = names.get(id).unwrap_or(id);
                format!("{}{}.{}.js", prefix, name, hash)
            })
            .collect()
    }
}

/// `a.p+"<path>.js"`: the public path concatenated with a literal file.
pub struct PublicPathConcat;

impl ChunkExtractor for PublicPathConcat {
    fn name(&self) -> &'static str {
        "public-path-concat"
    }

    fn candidates(&self, text: &str) -> Vec<String> {
        PUBLIC_PATH
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

/// The ternary form, but only inside the body of the `a.u=e=>...` chunk URL
/// function.
///
/// The body is cut at the first `}`, so a chain containing nested braces is
/// truncated there.
pub struct ScopedTernaryChain;

impl ChunkExtractor for ScopedTernaryChain {
    fn name(&self) -> &'static str {
        "scoped-ternary-chain"
    }

    fn candidates(&self, text: &str) -> Vec<String> {
        match CHUNK_URL_FN.captures(text) {
            Some(caps) => ternary_paths(&caps[1]),
            None => Vec::new(),
        }
    }
}

fn ternary_paths(text: &str) -> Vec<String> {
    TERNARY_ENTRY
        .captures_iter(text)
        .map(|caps| caps[2].to_string())
        .collect()
}

// Parses the inside of an object literal like `1027:"4b26d002",142:"b1a9"`.
//
// Only `digits:"string"` pairs are recognised; anything else is skipped.
// A repeated id keeps its last value.
pub fn parse_chunk_map(body: &str) -> ChunkIdMap {
    MAP_ENTRY
        .captures_iter(body)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// The set of extractors run over every bundle.
pub struct BundleHeuristics {
    extractors: Vec<Box<dyn ChunkExtractor>>,
}

impl Default for BundleHeuristics {
    fn default() -> Self {
        Self::empty()
            .with_extractor(TernaryChunkMap)
            .with_extractor(SplitChunkMaps)
            .with_extractor(PublicPathConcat)
            .with_extractor(ScopedTernaryChain)
    }
}

impl BundleHeuristics {
    /// No extractors at all; `chunk_urls` always returns nothing.
    pub fn empty() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    pub fn with_extractor(mut self, extractor: impl ChunkExtractor + 'static) -> Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    // Runs every extractor over the bundle and returns absolute chunk URLs.
    //
    // Every candidate is moved under "/_next/" and resolved against the
    // bundle URL. Each URL appears once, in the order it was first found.
    pub fn chunk_urls(&self, bundle: &BundleDocument) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for extractor in &self.extractors {
            let candidates = extractor.candidates(&bundle.text);
            log::trace!(
                "{} found {} candidate(s) in {}",
                extractor.name(),
                candidates.len(),
                bundle.url
            );

            for path in candidates {
                let url = resolve(&bundle.url, &ensure_next_prefix(&path));
                if seen.insert(url.clone()) {
                    urls.push(url);
                }
            }
        }

        urls
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is LazyLock?
//    - A value computed the first time it is used, then shared forever
//    - Compiling a regex is slow; matching is fast, so we compile once
//
// 2. Why Box<dyn ChunkExtractor>?
//    - Each extractor is a different type
//    - A Vec needs one element type, so we store them behind a trait object
//    - The Send + Sync bounds let all workers share one BundleHeuristics
//
// 3. What does let ... else do?
//    - let Some(caps) = x else { return ... };
//    - Binds caps if the pattern matches, otherwise runs the else block
// -----------------------------------------------------------------------------
