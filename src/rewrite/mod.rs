// src/rewrite/mod.rs
// =============================================================================
// Content rewriting for mirrored documents.
//
// Submodules:
// - classify: asset and reference classification
// - html: DOM rewrite of href/src/srcset attributes
// - css: text rewrite of url(...) references
//
// Both rewriters funnel every reference through one Rewriter, which owns
// the per-document results: structural URLs to enqueue, warnings for
// references that could not be resolved, and a count of references left
// pointing at the live site.
// =============================================================================

mod classify;
mod css;
mod html;

pub use classify::{is_font, AssetKind, RefSource};
pub use css::rewrite_css;
pub use html::rewrite_html;

use crate::mirror::SiteLayout;
use classify::{classify, Reference};
use tracing::{debug, warn};
use url::Url;

/// What rewriting one document produced
#[derive(Debug, Default)]
pub struct Rewritten {
    pub content: String,
    pub discovered: Vec<Url>,
    pub warnings: Vec<String>,
    pub hotlinked: usize,
}

pub struct Rewriter<'a> {
    page: &'a Url,
    base_host: &'a str,
    layout: &'a SiteLayout,
    discovered: Vec<Url>,
    warnings: Vec<String>,
    hotlinked: usize,
}

impl<'a> Rewriter<'a> {
    pub fn new(page: &'a Url, base_host: &'a str, layout: &'a SiteLayout) -> Self {
        Self {
            page,
            base_host,
            layout,
            discovered: Vec::new(),
            warnings: Vec::new(),
            hotlinked: 0,
        }
    }

    /// Replacement text for one reference, or None to keep it verbatim
    pub fn rewrite_reference(&mut self, raw: &str, source: RefSource) -> Option<String> {
        match classify(raw, self.page, self.base_host, source) {
            Reference::Navigational(absolute) | Reference::Media(absolute) => {
                self.hotlinked += 1;
                Some(absolute.to_string())
            }
            Reference::Structural(absolute) => {
                let link = self.layout.relative_link(self.page, &absolute);
                debug!(from = %self.page, to = %absolute, %link, "structural reference");
                self.discovered.push(absolute);
                Some(link)
            }
            Reference::CrossOrigin | Reference::InlineData | Reference::Inert => None,
            Reference::Unresolvable(reason) => {
                warn!(page = %self.page, reference = raw, %reason, "skipping invalid URL");
                self.warnings
                    .push(format!("{}: skipping invalid URL '{}': {}", self.page, raw, reason));
                None
            }
        }
    }

    pub fn finish(self, content: String) -> Rewritten {
        Rewritten {
            content,
            discovered: self.discovered,
            warnings: self.warnings,
            hotlinked: self.hotlinked,
        }
    }
}
