// src/rewrite/css.rs
// =============================================================================
// Rewrites url(...) references inside a stylesheet.
//
// This is a plain text substitution, not a CSS parse. Each url() argument
// (bare, 'single' or "double" quoted) goes through the Rewriter; the
// replacement keeps the original quote character. Anything the Rewriter
// declines (data: URIs, other hosts, unresolvable values) is left exactly
// as it appeared, including its original spacing.
// =============================================================================

use super::{RefSource, Rewriter};
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn url_function() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"(?i)(?P<func>url)\(\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^)"'\s]*))\s*\)"#,
        )
        .expect("url() pattern is valid")
    })
}

pub fn rewrite_css(css: &str, rewriter: &mut Rewriter<'_>) -> String {
    url_function()
        .replace_all(css, |caps: &Captures<'_>| {
            let (quote, value) = if let Some(m) = caps.name("dq") {
                ("\"", m.as_str())
            } else if let Some(m) = caps.name("sq") {
                ("'", m.as_str())
            } else {
                ("", caps.name("bare").map_or("", |m| m.as_str()))
            };

            match rewriter.rewrite_reference(value, RefSource::Asset) {
                // Keep the function name as written, e.g. URL(...)
                Some(replacement) => format!("{}({quote}{replacement}{quote})", &caps["func"]),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
