// src/rewrite/html.rs
// =============================================================================
// Rewrites references inside an HTML document.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM tree (html5ever underneath)
// - Lets us find elements with CSS selectors
// - Exposes the tree, so nodes can be detached and attributes replaced
//
// How it works:
// 1. Parse the document
// 2. Find the framework hydration payload (<script id="__NEXT_DATA__">);
//    if it stays, the client router takes over navigation and tries to
//    render pages that don't exist locally
// 3. Walk every a[href], link[rel=stylesheet], script[src], img[src] and
//    source[srcset], and ask the Rewriter what each value should become
// 4. Apply the collected (node, attribute, value) edits, detach the
//    hydration script, and serialize the tree back to a string
//
// Collecting edits first keeps the read pass and the write pass apart:
// selecting borrows the document, editing needs it mutably.
// =============================================================================

use super::{RefSource, Rewriter};
use scraper::{Html, Node, Selector};

const HYDRATION_SCRIPT: &str = r#"script[id="__NEXT_DATA__"]"#;

const REFERENCING_ELEMENTS: &str =
    r#"a[href], link[rel~="stylesheet"][href], script[src], img[src], source[srcset]"#;

pub fn rewrite_html(html: &str, rewriter: &mut Rewriter<'_>) -> String {
    let mut document = Html::parse_document(html);

    // Both selectors are constants, so parsing can only fail on a typo here
    let hydration = Selector::parse(HYDRATION_SCRIPT).unwrap();
    let referencing = Selector::parse(REFERENCING_ELEMENTS).unwrap();

    let hydration_nodes: Vec<_> = document.select(&hydration).map(|el| el.id()).collect();

    let mut edits = Vec::new();
    for element in document.select(&referencing) {
        let (attr, source) = match element.value().name() {
            "a" => ("href", RefSource::Anchor),
            "link" => ("href", RefSource::Asset),
            "script" => ("src", RefSource::Asset),
            "img" => ("src", RefSource::MediaTag),
            "source" => ("srcset", RefSource::MediaTag),
            _ => continue,
        };

        let Some(original) = element.value().attr(attr) else {
            continue;
        };

        let rewritten = if attr == "srcset" {
            rewrite_srcset(original, rewriter)
        } else {
            rewriter.rewrite_reference(original, source)
        };

        if let Some(value) = rewritten {
            if value != original {
                edits.push((element.id(), attr, value));
            }
        }
    }

    for id in hydration_nodes {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    for (id, attr, value) in edits {
        let Some(mut node) = document.tree.get_mut(id) else {
            continue;
        };
        if let Node::Element(element) = node.value() {
            for (name, current) in element.attrs.iter_mut() {
                if &*name.local == attr {
                    *current = value.as_str().into();
                }
            }
        }
    }

    document.html()
}

// Rewrites each candidate URL of a srcset in place
//
// Descriptors ("2x", "480w"), separators and spacing are kept exactly as
// written; only the URL tokens change. Returns None if nothing changed.
fn rewrite_srcset(srcset: &str, rewriter: &mut Rewriter<'_>) -> Option<String> {
    let mut output = String::with_capacity(srcset.len());
    let mut last = 0;
    let mut changed = false;

    for (start, end) in srcset_url_spans(srcset) {
        output.push_str(&srcset[last..start]);
        let token = &srcset[start..end];
        match rewriter.rewrite_reference(token, RefSource::MediaTag) {
            Some(replacement) => {
                changed |= replacement != token;
                output.push_str(&replacement);
            }
            None => output.push_str(token),
        }
        last = end;
    }
    output.push_str(&srcset[last..]);

    changed.then_some(output)
}

// Byte ranges of the URL tokens in a srcset value
//
// A candidate is a run of non-whitespace (the URL) followed by optional
// descriptors up to the next top-level comma. Commas inside the URL stay
// part of it, which keeps data: URLs intact. Only ASCII bytes are used as
// boundaries, so every range is a valid str slice.
fn srcset_url_spans(srcset: &str) -> Vec<(usize, usize)> {
    let bytes = srcset.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b',') {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        let start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        // Trailing commas end the candidate and are not part of the URL
        let mut end = i;
        while end > start && bytes[end - 1] == b',' {
            end -= 1;
        }
        if end > start {
            spans.push((start, end));
        }
        if end < i {
            continue;
        }

        // Skip descriptors up to the next comma outside parentheses
        let mut depth = 0usize;
        while i < bytes.len() {
            match bytes[i] {
                b'(' => depth += 1,
                b')' => depth = depth.saturating_sub(1),
                b',' if depth == 0 => {
                    i += 1;
                    break;
                }
                _ => {}
            }
            i += 1;
        }
    }

    spans
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is document.tree?
//    - scraper keeps the parsed DOM in an ego_tree::Tree
//    - get_mut(id) gives a NodeMut we can detach or edit in place
//    - Node IDs stay valid after other nodes are detached
//
// 2. Why `let ... else`?
//    - It binds on success and must leave the block (continue/return)
//      otherwise, which keeps the happy path unindented
//
// 3. What does then_some do?
//    - bool::then_some(x) is Some(x) when true, None when false
// -----------------------------------------------------------------------------
