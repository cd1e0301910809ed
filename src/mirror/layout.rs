// src/mirror/layout.rs
// =============================================================================
// Maps asset URLs to files under the output directory.
//
// Rules:
// - Take the URL path (query and fragment never reach the disk)
// - If it ends with '/' or its last segment has no extension, treat it as
//   a directory and add a synthetic "index.html"
// - Percent-decode it and place it under the output root
//
// Two URLs that differ only by query string land on the same file. The
// last one written wins.
//
// Relative links between two mapped URLs are computed on the mapped
// segments directly, so they always use '/' regardless of platform. Each
// segment is percent-encoded again so a decoded '#', '?' or space can't
// change what the link means inside HTML or CSS.
// =============================================================================

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::{Path, PathBuf};
use url::Url;

const DIRECTORY_INDEX: &str = "index.html";

// Bytes that must be escaped in a link segment. Parentheses and quotes are
// included so links are safe inside an unquoted CSS url().
const LINK_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'^');

#[derive(Debug, Clone)]
pub struct SiteLayout {
    root: PathBuf,
}

impl SiteLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where `url` is written on disk
    pub fn local_path(&self, url: &Url) -> PathBuf {
        let mut path = self.root.clone();
        for segment in mapped_segments(url) {
            path.push(segment);
        }
        path
    }

    /// Path to put in a document at `from` so that it points at the local
    /// copy of `to`
    ///
    /// Examples (output root omitted):
    ///   /            -> /style.css        = "./style.css"
    ///   /css/a.css   -> /css/fonts/x.woff = "./fonts/x.woff"
    ///   /blog/post   -> /css/site.css     = "../../css/site.css"
    pub fn relative_link(&self, from: &Url, to: &Url) -> String {
        let from_segments = mapped_segments(from);
        let to_segments = mapped_segments(to);

        // Both vectors always end with a file name
        let from_dir = &from_segments[..from_segments.len() - 1];
        let to_dir = &to_segments[..to_segments.len() - 1];

        let common = from_dir
            .iter()
            .zip(to_dir.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let ups = from_dir.len() - common;
        let mut parts: Vec<String> = vec!["..".to_string(); ups];
        parts.extend(to_segments[common..].iter().map(|s| encode_segment(s)));

        let relative = parts.join("/");
        if relative.is_empty() {
            return to_segments.last().map(|s| encode_segment(s)).unwrap_or_default();
        }

        if ups == 0 {
            format!("./{}", relative)
        } else {
            relative
        }
    }
}

// Decoded path segments for a URL, ending with a file name
//
// Empty, "." and ".." segments are dropped so an encoded "%2e%2e" can't
// climb out of the output root.
fn mapped_segments(url: &Url) -> Vec<String> {
    let raw = url.path();
    let decoded = percent_decode_str(raw).decode_utf8_lossy();

    let mut segments: Vec<String> = decoded
        .split('/')
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .map(str::to_string)
        .collect();

    if raw.ends_with('/') || !has_extension(raw) || segments.is_empty() {
        segments.push(DIRECTORY_INDEX.to_string());
    }

    segments
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, LINK_SEGMENT).to_string()
}

fn has_extension(path: &str) -> bool {
    let last = path.rsplit('/').next().unwrap_or("");
    Path::new(last).extension().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn layout() -> SiteLayout {
        SiteLayout::new("/out")
    }

    // Resolves a relative link the way a browser would against the
    // document's file, without touching the filesystem
    fn resolve_against(doc: &Path, link: &str) -> PathBuf {
        let mut parts: Vec<String> = doc
            .parent()
            .unwrap()
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        for piece in link.split('/') {
            match piece {
                "." | "" => {}
                ".." => {
                    parts.pop();
                }
                other => parts.push(percent_decode_str(other).decode_utf8_lossy().into_owned()),
            }
        }
        parts.iter().collect()
    }

    #[test]
    fn test_trailing_slash_maps_to_index() {
        assert_eq!(
            layout().local_path(&url("https://h/a/b/")),
            PathBuf::from("/out/a/b/index.html")
        );
    }

    #[test]
    fn test_extensionless_path_maps_to_index() {
        assert_eq!(
            layout().local_path(&url("https://h/a/b")),
            PathBuf::from("/out/a/b/index.html")
        );
    }

    #[test]
    fn test_file_path_kept() {
        assert_eq!(
            layout().local_path(&url("https://h/a/b.css")),
            PathBuf::from("/out/a/b.css")
        );
    }

    #[test]
    fn test_root_maps_to_index() {
        assert_eq!(
            layout().local_path(&url("https://h")),
            PathBuf::from("/out/index.html")
        );
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        assert_eq!(
            layout().local_path(&url("https://h/app.js?v=3#top")),
            PathBuf::from("/out/app.js")
        );
    }

    #[test]
    fn test_percent_decoded() {
        assert_eq!(
            layout().local_path(&url("https://h/my%20fonts/a%20b.woff2")),
            PathBuf::from("/out/my fonts/a b.woff2")
        );
    }

    #[test]
    fn test_encoded_dot_segments_cannot_escape_root() {
        let path = layout().local_path(&url("https://h/%2e%2e/%2e%2e/etc/passwd.txt"));
        assert_eq!(path, PathBuf::from("/out/etc/passwd.txt"));
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let u = url("https://h/css/site.css");
        assert_eq!(layout().local_path(&u), layout().local_path(&u));
    }

    #[test]
    fn test_relative_same_directory() {
        let link = layout().relative_link(&url("https://h/"), &url("https://h/style.css"));
        assert_eq!(link, "./style.css");
    }

    #[test]
    fn test_relative_into_subdirectory() {
        let link = layout().relative_link(
            &url("https://h/css/style.css"),
            &url("https://h/css/fonts/a.woff2"),
        );
        assert_eq!(link, "./fonts/a.woff2");
    }

    #[test]
    fn test_relative_climbs_out_of_page_directory() {
        let link = layout().relative_link(&url("https://h/blog/post"), &url("https://h/css/site.css"));
        assert_eq!(link, "../../css/site.css");
    }

    #[test]
    fn test_relative_link_escapes_decoded_segments() {
        let link = layout().relative_link(
            &url("https://h/pages/about"),
            &url("https://h/my%20dir/a%23b(1).css"),
        );
        assert_eq!(link, "../../my%20dir/a%23b%281%29.css");
        assert_eq!(
            layout().local_path(&url("https://h/my%20dir/a%23b.css")),
            PathBuf::from("/out/my dir/a#b.css")
        );
    }

    #[test]
    fn test_relative_links_round_trip() {
        let layout = layout();
        let cases = [
            ("https://h/", "https://h/style.css"),
            ("https://h/css/style.css", "https://h/css/fonts/a.woff2"),
            ("https://h/css/style.css", "https://h/fonts/a.woff2"),
            ("https://h/blog/post", "https://h/css/site.css"),
            ("https://h/docs/guide/", "https://h/docs/app.js"),
            ("https://h/a/b/c.html", "https://h/a/x/y/z.js"),
            ("https://h/", "https://h/my%20fonts/a%3Fb.woff"),
        ];

        for (doc, asset) in cases {
            let doc = url(doc);
            let asset = url(asset);
            let link = layout.relative_link(&doc, &asset);
            assert_eq!(
                resolve_against(&layout.local_path(&doc), &link),
                layout.local_path(&asset),
                "link {} from {}",
                link,
                doc
            );
        }
    }
}
