//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use edition_model::{CropRegion, DateKey};

#[derive(Parser)]
#[command(
    name = "tom-city-edition",
    version,
    about = "Browse Tom City Edition newspapers and share branded clippings",
    long_about = "Browse published Tom City Edition newspapers page by page.\n\n\
                  Clip a region of any page into a branded image, share it through a \
                  configured program or save it, and render link-preview covers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machines).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List published editions, newest first.
    Editions,

    /// Show the viewer state for an edition page.
    Show(PageArgs),

    /// Clip a region of a page into a branded image.
    Clip(ClipArgs),

    /// Render the link-preview cover of an edition.
    Cover(CoverArgs),

    /// Rebuild the edition catalog from the papers directory.
    Catalog(CatalogArgs),
}

#[derive(Parser)]
pub struct PageArgs {
    /// Edition date as DD-MM-YYYY (default: newest edition).
    #[arg(value_name = "DATE")]
    pub date: Option<DateKey>,

    /// 1-based page number.
    #[arg(long = "page", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

#[derive(Parser)]
pub struct ClipArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Region of the page image in pixels.
    #[arg(long = "region", value_name = "X,Y,WIDTH,HEIGHT", value_parser = parse_region)]
    pub region: CropRegion,

    /// Save the clip without offering it to the share command.
    #[arg(long = "no-share")]
    pub no_share: bool,
}

#[derive(Parser)]
pub struct CoverArgs {
    /// Edition date as DD-MM-YYYY (default: newest edition).
    #[arg(value_name = "DATE")]
    pub date: Option<DateKey>,

    /// Also copy the cover here (for a site-wide "latest" preview).
    #[arg(long = "latest", value_name = "PATH")]
    pub latest: Option<PathBuf>,
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// Write the catalog JSON here instead of printing it.
    #[arg(long = "write", value_name = "PATH")]
    pub write: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_region(text: &str) -> Result<CropRegion, String> {
    let parts: Vec<u32> = text
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|error| format!("invalid number: {error}"))?;
    let &[x, y, width, height] = parts.as_slice() else {
        return Err(format!("expected X,Y,WIDTH,HEIGHT, got {} values", parts.len()));
    };
    let region = CropRegion::new(x, y, width, height);
    if region.is_empty() {
        return Err("region must have a non-zero width and height".to_string());
    }
    Ok(region)
}
