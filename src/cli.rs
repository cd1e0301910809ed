// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Subcommands:
// - mirror: clone one site and print what happened
// - tool: run the tool-call payload a chat agent would send
// =============================================================================

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "site-mirror",
    version = "0.1.0",
    about = "Build a hybrid local mirror of a website",
    long_about = "site-mirror downloads a site's HTML, stylesheets, scripts and fonts, \
                  and leaves images and page links pointing at the live site. \
                  The result opens locally while staying small."
)]
pub struct Cli {
    /// Log debug detail (RUST_LOG overrides this)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mirror a website into a local directory
    ///
    /// Example: site-mirror mirror https://example.com --output-dir example
    Mirror {
        /// Seed URL (e.g., https://example.com)
        url: String,

        /// Where to write the mirror (default: derived from the hostname)
        #[arg(long, short)]
        output_dir: Option<String>,

        /// Maximum number of assets fetched at the same time
        #[arg(long, default_value_t = 8)]
        concurrency: usize,

        /// Pause after each fetch, in milliseconds
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,

        /// Per-request timeout, in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,

        /// Stop starting new fetches after this many seconds
        #[arg(long)]
        run_timeout_secs: Option<u64>,

        /// User-Agent header sent with every request
        #[arg(long, env = "SITE_MIRROR_USER_AGENT")]
        user_agent: Option<String>,

        /// Print the full report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run a tool-call payload and print the plain-text result
    ///
    /// Example: site-mirror tool '{"url": "https://example.com", "outputDir": "my-clone"}'
    Tool {
        /// JSON object with "url" and optional "outputDir"
        input: String,
    },
}
