//! CLI for the wwdc-dl session downloader.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use wwdc_core::config;
use wwdc_core::policy::Quality;

use commands::{run_completions, run_download, run_list, run_show, run_years};

/// Top-level CLI for wwdc-dl.
#[derive(Debug, Parser)]
#[command(name = "wwdc-dl")]
#[command(about = "Download WWDC session videos and slides", long_about = None)]
pub struct Cli {
    /// Debug-level logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download videos and PDFs for sessions of one year.
    Download(DownloadArgs),

    /// List the session ids in a year's catalog.
    List {
        /// Conference year (default from config).
        #[arg(long, short)]
        year: Option<String>,
    },

    /// Resolve one session and print what would be downloaded.
    Show {
        /// Conference year (default from config).
        #[arg(long, short)]
        year: Option<String>,
        /// Direct video quality to look for: hd or sd (default from config).
        #[arg(long, short)]
        quality: Option<Quality>,
        /// Session id, e.g. 104.
        session: String,
    },

    /// Show the year buckets known to the URL pattern table.
    Years,

    /// Print shell completions to stdout.
    Completions {
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Conference year (default from config).
    #[arg(long, short)]
    pub year: Option<String>,

    /// Comma-separated session ids.
    #[arg(
        long,
        short,
        value_delimiter = ',',
        value_name = "IDS",
        required_unless_present = "all",
        conflicts_with = "all"
    )]
    pub sessions: Vec<String>,

    /// Every session in the year's catalog.
    #[arg(long)]
    pub all: bool,

    /// Preferred direct video quality: hd or sd (default from config).
    #[arg(long, short)]
    pub quality: Option<Quality>,

    /// Skip slides.
    #[arg(long, conflicts_with = "pdf_only")]
    pub no_pdf: bool,

    /// Slides only; no video search.
    #[arg(long)]
    pub pdf_only: bool,

    /// Root directory; files go to <DIR>/WWDC-<year>/ (default from config).
    #[arg(long, short, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Hand direct video files to the external downloader too.
    #[arg(long)]
    pub external: bool,

    /// Fail when a session has neither video nor PDF.
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        if let CliCommand::Completions { shell } = self.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Download(args) => run_download(&cfg, &args)?,
            CliCommand::List { year } => run_list(&cfg, year.as_deref())?,
            CliCommand::Show {
                year,
                quality,
                session,
            } => run_show(&cfg, year.as_deref(), quality, &session)?,
            CliCommand::Years => run_years(),
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
