// src/rewrite/classify.rs
// =============================================================================
// Decides what happens to each fetched asset and each reference inside it.
//
// Assets are classified by their declared Content-Type:
//   text/html -> Html        (DOM rewrite)
//   text/css  -> Stylesheet  (url() rewrite)
//   anything  -> Other       (bytes written unchanged)
//
// References (href/src/srcset/url() values) are classified by where they
// appear and where they point, never by what the target turns out to be:
//   data:                        -> InlineData    (kept verbatim)
//   other host                   -> CrossOrigin   (kept verbatim)
//   <a href>                     -> Navigational  (absolutized, live site)
//   <img>/<source> or image ext  -> Media         (absolutized, live site)
//   everything else same-origin  -> Structural    (downloaded, relative link)
// =============================================================================

use serde::Serialize;
use std::path::Path;
use url::Url;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg", "ico", "webp"];
const FONT_EXTENSIONS: &[&str] = &["woff", "woff2", "ttf"];

// Anchor targets that never name a page. Fragment-only anchors are not here:
// they resolve against the page like any other relative link.
const INERT_LINK_PREFIXES: &[&str] = &["mailto:", "tel:", "javascript:"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Html,
    Stylesheet,
    Other,
}

impl AssetKind {
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let content_type = content_type.unwrap_or("").to_ascii_lowercase();
        if content_type.contains("text/html") {
            AssetKind::Html
        } else if content_type.contains("text/css") {
            AssetKind::Stylesheet
        } else {
            AssetKind::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Html => "html",
            AssetKind::Stylesheet => "stylesheet",
            AssetKind::Other => "other",
        }
    }
}

/// Where a reference was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefSource {
    /// `<a href>`
    Anchor,
    /// `<img src>` or `<source srcset>`
    MediaTag,
    /// `<link href>`, `<script src>`, or a CSS `url()`
    Asset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Navigational(Url),
    Media(Url),
    Structural(Url),
    CrossOrigin,
    InlineData,
    /// Empty values and non-page anchor targets
    Inert,
    /// The value could not be turned into a usable http(s) URL
    Unresolvable(String),
}

pub fn classify(raw: &str, page: &Url, base_host: &str, source: RefSource) -> Reference {
    let value = raw.trim();

    if value.is_empty() {
        return Reference::Inert;
    }

    if starts_with_ignore_case(value, "data:") {
        return Reference::InlineData;
    }

    if source == RefSource::Anchor
        && INERT_LINK_PREFIXES
            .iter()
            .any(|prefix| starts_with_ignore_case(value, prefix))
    {
        return Reference::Inert;
    }

    let absolute = match page.join(value) {
        Ok(url) => url,
        Err(e) => return Reference::Unresolvable(e.to_string()),
    };

    if !matches!(absolute.scheme(), "http" | "https") {
        return Reference::Unresolvable(format!("unsupported scheme '{}'", absolute.scheme()));
    }

    if absolute.host_str() != Some(base_host) {
        return Reference::CrossOrigin;
    }

    match source {
        RefSource::Anchor => Reference::Navigational(absolute),
        RefSource::MediaTag => Reference::Media(absolute),
        RefSource::Asset if is_image(&absolute) => Reference::Media(absolute),
        RefSource::Asset => Reference::Structural(absolute),
    }
}

pub fn is_image(url: &Url) -> bool {
    has_extension_in(url, IMAGE_EXTENSIONS)
}

/// Fonts are the only assets fetched as raw bytes
pub fn is_font(url: &Url) -> bool {
    has_extension_in(url, FONT_EXTENSIONS)
}

fn has_extension_in(url: &Url, set: &[&str]) -> bool {
    Path::new(url.path())
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| set.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://example.com/docs/index.html").unwrap()
    }

    fn abs(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_content_type_dispatch() {
        assert_eq!(
            AssetKind::from_content_type(Some("text/html; charset=utf-8")),
            AssetKind::Html
        );
        assert_eq!(AssetKind::from_content_type(Some("TEXT/CSS")), AssetKind::Stylesheet);
        assert_eq!(
            AssetKind::from_content_type(Some("application/javascript")),
            AssetKind::Other
        );
        assert_eq!(AssetKind::from_content_type(None), AssetKind::Other);
    }

    #[test]
    fn test_same_origin_stylesheet_is_structural() {
        assert_eq!(
            classify("../css/site.css", &page(), "example.com", RefSource::Asset),
            Reference::Structural(abs("https://example.com/css/site.css"))
        );
    }

    #[test]
    fn test_anchor_is_navigational() {
        assert_eq!(
            classify("/about", &page(), "example.com", RefSource::Anchor),
            Reference::Navigational(abs("https://example.com/about"))
        );
    }

    #[test]
    fn test_image_extension_is_media_even_from_asset_context() {
        assert_eq!(
            classify("bg.PNG", &page(), "example.com", RefSource::Asset),
            Reference::Media(abs("https://example.com/docs/bg.PNG"))
        );
    }

    #[test]
    fn test_img_tag_is_media_regardless_of_extension() {
        assert_eq!(
            classify("/render?id=4", &page(), "example.com", RefSource::MediaTag),
            Reference::Media(abs("https://example.com/render?id=4"))
        );
    }

    #[test]
    fn test_other_host_is_cross_origin() {
        assert_eq!(
            classify("https://cdn.other.com/logo.png", &page(), "example.com", RefSource::MediaTag),
            Reference::CrossOrigin
        );
        assert_eq!(
            classify("//cdn.other.com/app.js", &page(), "example.com", RefSource::Asset),
            Reference::CrossOrigin
        );
    }

    #[test]
    fn test_data_uri_is_inline() {
        assert_eq!(
            classify("DATA:image/png;base64,AAAA", &page(), "example.com", RefSource::Asset),
            Reference::InlineData
        );
    }

    #[test]
    fn test_inert_anchor_targets() {
        for href in ["mailto:a@b.c", "tel:123", "javascript:void(0)", "  "] {
            assert_eq!(
                classify(href, &page(), "example.com", RefSource::Anchor),
                Reference::Inert,
                "{}",
                href
            );
        }
    }

    #[test]
    fn test_fragment_anchor_is_absolutized() {
        assert_eq!(
            classify("#top", &page(), "example.com", RefSource::Anchor),
            Reference::Navigational(page().join("#top").unwrap())
        );
    }

    #[test]
    fn test_javascript_in_css_is_unresolvable() {
        assert!(matches!(
            classify("javascript:void(0)", &page(), "example.com", RefSource::Asset),
            Reference::Unresolvable(_)
        ));
    }

    #[test]
    fn test_broken_url_is_unresolvable() {
        assert!(matches!(
            classify("http://[::1", &page(), "example.com", RefSource::Asset),
            Reference::Unresolvable(_)
        ));
    }

    #[test]
    fn test_font_detection() {
        assert!(is_font(&abs("https://h/f/a.woff2")));
        assert!(is_font(&abs("https://h/f/a.TTF?v=1")));
        assert!(!is_font(&abs("https://h/f/a.css")));
    }
}
