//! ipv4range: CLI tool for matching IPv4 addresses against range sets.

use clap::{Args, Parser, Subcommand};
use ipv4range::{Matcher, MatcherConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ipv4range")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Match IPv4 addresses against CIDR, single-address and explicit ranges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether addresses fall inside the configured ranges
    Check {
        #[command(flatten)]
        sources: Sources,

        /// Print nothing, only set the exit status
        #[arg(short, long)]
        quiet: bool,

        /// Addresses to check
        #[arg(required = true)]
        addrs: Vec<String>,
    },

    /// Print the merged ranges, one per line
    Merge {
        #[command(flatten)]
        sources: Sources,
    },

    /// Validate the configured ranges
    Validate {
        #[command(flatten)]
        sources: Sources,
    },
}

/// Where range expressions come from.
#[derive(Args)]
struct Sources {
    /// Range expression (CIDR, single address or "A - B")
    #[arg(short = 'r', long = "range")]
    ranges: Vec<String>,

    /// Range list file, one expression per line
    #[arg(short = 'f', long = "file")]
    files: Vec<PathBuf>,

    /// YAML or JSON matcher config
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Check {
            sources,
            quiet,
            addrs,
        } => match build_matcher(sources) {
            Ok(matcher) => check(&matcher, &addrs, quiet),
            Err(e) => fail(e),
        },
        Commands::Merge { sources } => match build_matcher(sources) {
            Ok(matcher) => {
                for range in matcher.ranges() {
                    println!("{}", range);
                }
                ExitCode::SUCCESS
            }
            Err(e) => fail(e),
        },
        Commands::Validate { sources } => match build_matcher(sources) {
            Ok(matcher) => {
                println!(
                    "OK: {} merged ranges covering {} addresses",
                    matcher.len(),
                    matcher.address_count()
                );
                ExitCode::SUCCESS
            }
            Err(e) => fail(e),
        },
    }
}

fn build_matcher(sources: Sources) -> Result<Matcher, ipv4range::Error> {
    let mut config = match &sources.config {
        Some(path) => MatcherConfig::load(path)?,
        None => MatcherConfig::default(),
    };
    config.ranges.extend(sources.ranges);
    config.range_files.extend(sources.files);

    config.build()
}

fn check(matcher: &Matcher, addrs: &[String], quiet: bool) -> ExitCode {
    let mut all_matched = true;

    for addr in addrs {
        let matched = matcher.contains(addr);
        all_matched &= matched;
        if !quiet {
            println!("{}\t{}", addr, matched);
        }
    }

    if all_matched {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn fail(e: ipv4range::Error) -> ExitCode {
    eprintln!("Error: {}", e);
    ExitCode::from(2)
}
