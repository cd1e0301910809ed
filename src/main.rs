// src/main.rs
// =============================================================================
// Entry point of the site-mirror CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Dispatch to the subcommand handler
// 4. Exit with proper code (0 = complete mirror, 1 = some assets skipped,
//    2 = the run failed)
// =============================================================================

mod cli;
mod config;
mod error;
mod fetch;
mod logging;
mod mirror;
mod rewrite;
mod store;
mod tool;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::MirrorConfig;
use fetch::HttpFetcher;
use mirror::{CancelFlag, Mirror, MirrorReport};
use std::path::Path;
use std::time::Duration;
use store::LocalDisk;
use tracing::warn;
use url::Url;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Mirror {
            url,
            output_dir,
            concurrency,
            delay_ms,
            timeout_secs,
            run_timeout_secs,
            user_agent,
            json,
        } => {
            let mut config = MirrorConfig {
                concurrency,
                request_delay: Duration::from_millis(delay_ms),
                request_timeout: Duration::from_secs(timeout_secs),
                run_timeout: run_timeout_secs.map(Duration::from_secs),
                ..MirrorConfig::default()
            };
            if let Some(user_agent) = user_agent {
                config.user_agent = user_agent;
            }

            let output_dir = match output_dir {
                Some(dir) => dir,
                None => output_dir_for(&url)?,
            };

            handle_mirror(&url, &output_dir, config, json).await
        }
        Commands::Tool { input } => {
            let result = tool::run_tool_call(&input, MirrorConfig::default()).await;
            println!("{}", result);
            Ok(0)
        }
    }
}

async fn handle_mirror(url: &str, output_dir: &str, config: MirrorConfig, json: bool) -> Result<i32> {
    let fetcher = HttpFetcher::new(&config).context("failed to build HTTP client")?;

    // Ctrl-C stops new fetches; files already being written still finish
    let cancel = CancelFlag::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, finishing in-flight assets");
            on_interrupt.cancel();
        }
    });

    let mirror = Mirror::new(fetcher, LocalDisk, config).with_cancel(cancel);
    let report = mirror
        .run(url, Path::new(output_dir))
        .await
        .with_context(|| format!("failed to clone {}", url))?;

    print_results(&report, json)?;

    if report.is_complete() {
        Ok(0)
    } else {
        Ok(1)
    }
}

// Default output directory: the seed's hostname with anything outside
// [a-zA-Z0-9.] replaced by '_'
fn output_dir_for(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|_| {
        anyhow!("Invalid URL provided. Please provide a full URL like 'https://example.com'")
    })?;
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow!("URL has no host: {}", url))?;

    Ok(host
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
        .collect())
}

fn print_results(report: &MirrorReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_table(report);
    }
    Ok(())
}

fn print_table(report: &MirrorReport) {
    println!("{:<12} {:<60} {:<40}", "KIND", "URL", "LOCAL PATH");
    println!("{}", "=".repeat(112));

    for asset in &report.written {
        let path = asset
            .path
            .strip_prefix(&report.output_dir)
            .unwrap_or(&asset.path);
        println!(
            "{:<12} {:<60} {:<40}",
            asset.kind.as_str(),
            truncate(&asset.url, 57),
            path.display()
        );
    }

    for failed in &report.failed {
        println!("{:<12} {:<60} {:<40}", "SKIPPED", truncate(&failed.url, 57), failed.reason);
    }

    println!();
    println!("{}", report.summary());
    println!("📊 Summary:");
    println!("   ✅ Written: {}", report.written.len());
    println!("   ❌ Skipped: {}", report.failed.len());
    println!("   🌐 Hotlinked references: {}", report.hotlinked);
    println!("   ⚠️  Warnings: {}", report.warnings.len());
    if report.cancelled {
        println!("   ⏹️  Run was cancelled before the frontier emptied");
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
