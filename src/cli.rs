use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::bookmark::{Layout, PreambleMode};

#[derive(Parser, Debug)]
#[command(
    name = "bookmark-merge",
    version,
    about = "Parse, merge and reorganise browser bookmark exports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Inventory(InventoryArgs),
    Parse(ParseArgs),
    Merge(MergeArgs),
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = "bookmark")]
    pub source_dir: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    #[arg(long, default_value = "bookmark")]
    pub source_dir: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = PreambleArg::Fixed)]
    pub preamble: PreambleArg,
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    #[arg(long, default_value = "bookmark")]
    pub source_dir: PathBuf,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LayoutArg::Nested)]
    pub layout: LayoutArg,

    #[arg(long, default_value_t = false)]
    pub keep_duplicates: bool,

    #[arg(long, value_enum, default_value_t = PreambleArg::Fixed)]
    pub preamble: PreambleArg,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long, default_value = "bookmark")]
    pub source_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = PreambleArg::Fixed)]
    pub preamble: PreambleArg,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PreambleArg {
    Fixed,
    Detect,
}

impl PreambleArg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Detect => "detect",
        }
    }
}

impl From<PreambleArg> for PreambleMode {
    fn from(value: PreambleArg) -> Self {
        match value {
            PreambleArg::Fixed => Self::Fixed,
            PreambleArg::Detect => Self::Detect,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum LayoutArg {
    Nested,
    Flat,
    Protocol,
}

impl LayoutArg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nested => "nested",
            Self::Flat => "flat",
            Self::Protocol => "protocol",
        }
    }
}

impl From<LayoutArg> for Layout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Nested => Self::Nested,
            LayoutArg::Flat => Self::Flat,
            LayoutArg::Protocol => Self::Protocol,
        }
    }
}
