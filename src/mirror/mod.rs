// src/mirror/mod.rs
// =============================================================================
// The mirror engine and the pieces it is built from.
//
// Submodules:
// - engine: the traversal loop (fetch, rewrite, write)
// - frontier: queue of discovered URLs plus the visited set
// - layout: URL -> local file path mapping and relative links
// - report: what a run did
// - cancel: stops a run between fetches
// =============================================================================

mod cancel;
mod engine;
mod frontier;
mod layout;
mod report;

pub use cancel::CancelFlag;
pub use engine::Mirror;
pub use layout::SiteLayout;
pub use report::MirrorReport;
