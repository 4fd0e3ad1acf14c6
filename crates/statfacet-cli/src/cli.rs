use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Statfacet - faceted filter options for statistics publications
#[derive(Parser, Debug)]
#[command(name = "statfacet")]
#[command(about = "Faceted filter options for statistics publications", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the per-level location option tree from a rows file
    Hierarchy(HierarchyArgs),

    /// Expand a start/end time period query into discrete periods
    Range(RangeArgs),
}

#[derive(Parser, Debug)]
pub struct HierarchyArgs {
    /// Path to a JSON file containing the location rows
    pub rows: PathBuf,

    /// Hierarchy configuration TOML (defaults to the built-in nesting,
    /// or the file named by STATFACET_HIERARCHY_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// GeoJSON boundary index JSON, keyed by level then effective value
    #[arg(long)]
    pub geojson: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct RangeArgs {
    /// Start year
    pub start_year: i32,

    /// Start period code (e.g. AY, CYQ1, M9, W51, T1, P2)
    pub start_code: String,

    /// End year
    pub end_year: i32,

    /// End period code
    pub end_code: String,
}
