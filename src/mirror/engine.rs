// src/mirror/engine.rs
// =============================================================================
// The mirror engine: traverses a site's asset graph and writes a hybrid
// local copy.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Take the next URL; skip it if already visited or on another host
// 3. Mark it visited, then fetch it (fonts as bytes, everything else as text)
// 4. HTML and CSS are rewritten: structural references are queued and
//    pointed at their local copies, links and media point at the live site
// 5. Write the result under the output directory
// 6. Repeat until the frontier is empty
//
// Up to `concurrency` assets are in flight at once. A single coordinator
// (the loop in run()) owns the frontier, so the check-and-mark in step 2
// never races and no asset is fetched twice. With concurrency = 1 the run
// is strictly sequential.
//
// Failures for one asset are logged and recorded; the run carries on.
// Only a bad seed URL, an unusable output directory, or an unreachable
// seed page end the run with an error.
// =============================================================================

use super::cancel::CancelFlag;
use super::frontier::Frontier;
use super::layout::SiteLayout;
use super::report::{FailedAsset, MirrorReport, WrittenAsset};
use crate::config::MirrorConfig;
use crate::error::MirrorError;
use crate::fetch::{Body, Fetch, ResponseKind};
use crate::rewrite::{is_font, rewrite_css, rewrite_html, AssetKind, Rewriter, Rewritten};
use crate::store::Store;
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

pub struct Mirror<F, S> {
    fetcher: F,
    store: S,
    config: MirrorConfig,
    cancel: CancelFlag,
}

// Result of processing one asset
enum AssetOutcome {
    Written {
        asset: WrittenAsset,
        rewritten: Rewritten,
    },
    Failed {
        url: Url,
        error: MirrorError,
    },
}

impl<F: Fetch, S: Store> Mirror<F, S> {
    pub fn new(fetcher: F, store: S, config: MirrorConfig) -> Self {
        Self {
            fetcher,
            store,
            config,
            cancel: CancelFlag::new(),
        }
    }

    /// Uses `cancel` to stop the run from outside
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Mirrors the site at `seed` into `output_dir`
    ///
    /// A relative `output_dir` is resolved against the current directory.
    pub async fn run(&self, seed: &str, output_dir: &Path) -> Result<MirrorReport, MirrorError> {
        let seed = parse_seed(seed)?;
        let base_host = seed
            .host_str()
            .ok_or_else(|| MirrorError::InvalidInput(format!("URL has no host: {}", seed)))?
            .to_string();

        let root = resolve_output_dir(output_dir)?;
        self.store.make_dirs(&root)?;
        let layout = SiteLayout::new(root.clone());

        info!(seed = %seed, output = %root.display(), "starting mirror");

        let deadline = run_deadline(self.config.run_timeout);
        let workers = self.config.workers();
        let mut frontier = Frontier::with_seed(seed.clone());
        let mut report = MirrorReport::new(&seed, &root);
        let mut in_flight = FuturesUnordered::new();

        loop {
            if deadline.is_some_and(|at| Instant::now() >= at) && !self.cancel.is_cancelled() {
                warn!("run timeout reached, no new fetches will start");
                self.cancel.cancel();
            }

            while in_flight.len() < workers && !self.cancel.is_cancelled() {
                let Some(url) = frontier.pop() else {
                    break;
                };

                // Cross-origin assets are referenced, never fetched
                if frontier.is_visited(&url) || url.host_str() != Some(base_host.as_str()) {
                    debug!(%url, "skipping");
                    continue;
                }

                frontier.mark_visited(&url);
                in_flight.push(self.process(url, &layout, &base_host));
            }

            let Some(outcome) = in_flight.next().await else {
                break;
            };

            match outcome {
                AssetOutcome::Written { asset, rewritten } => {
                    for url in rewritten.discovered {
                        frontier.push(url);
                    }
                    report.warnings.extend(rewritten.warnings);
                    report.hotlinked += rewritten.hotlinked;
                    report.written.push(asset);
                }
                AssetOutcome::Failed { url, error } => {
                    if url == seed {
                        return Err(match error {
                            MirrorError::Io { .. } => error,
                            other => MirrorError::SeedUnavailable(Box::new(other)),
                        });
                    }
                    report.failed.push(FailedAsset {
                        url: url.to_string(),
                        reason: error.to_string(),
                    });
                }
            }
        }

        if self.cancel.is_cancelled() {
            report.cancelled = true;
            warn!(
                pending = frontier.pending_count(),
                "mirror cancelled, output is a partial copy"
            );
        }

        info!(
            visited = frontier.visited_count(),
            written = report.written.len(),
            failed = report.failed.len(),
            warnings = report.warnings.len(),
            "mirror finished"
        );

        Ok(report)
    }

    // Fetch, rewrite and write one asset
    async fn process(&self, url: Url, layout: &SiteLayout, base_host: &str) -> AssetOutcome {
        info!(%url, "processing");

        let local_path = layout.local_path(&url);
        if let Some(parent) = local_path.parent() {
            if let Err(error) = self.store.make_dirs(parent) {
                warn!(%url, %error, "could not create directory");
                return AssetOutcome::Failed { url, error };
            }
        }

        let kind = if is_font(&url) {
            ResponseKind::Binary
        } else {
            ResponseKind::Text
        };

        let fetched = match self.fetcher.get(&url, kind).await {
            Ok(fetched) => fetched,
            Err(error) => {
                warn!(%url, %error, "could not fetch");
                return AssetOutcome::Failed { url, error };
            }
        };

        debug!(%url, status = fetched.status, content_type = ?fetched.content_type, "fetched");

        // Polite crawling: small delay between requests
        if !self.config.request_delay.is_zero() {
            tokio::time::sleep(self.config.request_delay).await;
        }

        let asset_kind = AssetKind::from_content_type(fetched.content_type.as_deref());
        let (bytes, rewritten) = transform(&url, base_host, layout, asset_kind, fetched.body);

        if let Err(error) = self.store.write_file(&local_path, &bytes) {
            warn!(%url, %error, "could not write");
            return AssetOutcome::Failed { url, error };
        }

        AssetOutcome::Written {
            asset: WrittenAsset {
                url: url.to_string(),
                kind: asset_kind,
                path: local_path,
            },
            rewritten,
        }
    }
}

// Applies the rewrite policy for the asset's kind
//
// Returns the bytes to write plus whatever the rewrite found. Other assets
// pass through untouched and find nothing.
fn transform(
    url: &Url,
    base_host: &str,
    layout: &SiteLayout,
    kind: AssetKind,
    body: Body,
) -> (Vec<u8>, Rewritten) {
    let mut rewritten = match kind {
        AssetKind::Html => {
            let mut rewriter = Rewriter::new(url, base_host, layout);
            let html = rewrite_html(&body.as_text(), &mut rewriter);
            rewriter.finish(html)
        }
        AssetKind::Stylesheet => {
            let mut rewriter = Rewriter::new(url, base_host, layout);
            let css = rewrite_css(&body.as_text(), &mut rewriter);
            rewriter.finish(css)
        }
        AssetKind::Other => return (body.into_bytes(), Rewritten::default()),
    };

    let bytes = std::mem::take(&mut rewritten.content).into_bytes();
    (bytes, rewritten)
}

fn parse_seed(seed: &str) -> Result<Url, MirrorError> {
    let mut url = Url::parse(seed.trim()).map_err(|e| {
        MirrorError::InvalidInput(format!("'{}' is not an absolute URL: {}", seed, e))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(MirrorError::InvalidInput(format!(
            "'{}' must use http or https",
            seed
        )));
    }

    url.set_fragment(None);
    Ok(url)
}

// A timeout too large to represent means no deadline at all
fn run_deadline(run_timeout: Option<Duration>) -> Option<Instant> {
    run_timeout.and_then(|timeout| Instant::now().checked_add(timeout))
}

fn resolve_output_dir(output_dir: &Path) -> Result<PathBuf, MirrorError> {
    if output_dir.is_absolute() {
        return Ok(output_dir.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| MirrorError::io(output_dir, e))?;
    Ok(cwd.join(output_dir))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is FuturesUnordered?
//    - A set of futures polled together
//    - .next().await yields whichever finishes first
//    - We keep at most `workers` futures in it, which bounds concurrency
//      the same way buffer_unordered(N) does for a fixed list
//
// 2. Why not spawn tasks?
//    - Spawned tasks need 'static data, so the frontier would need an
//      Arc<Mutex<..>>
//    - Here all futures run on the current task and borrow the layout and
//      host; only the coordinator loop touches the frontier
//
// 3. Why is Mirror generic over F and S?
//    - Production uses HttpFetcher and LocalDisk
//    - Tests plug in an in-memory site, so no network is needed
//
// 4. What does std::mem::take do?
//    - Moves a value out of a &mut, leaving Default::default() behind
//    - We take the rewritten text out of Rewritten and keep the rest
// -----------------------------------------------------------------------------
