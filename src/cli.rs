use clap::{Args, Parser, Subcommand};

use crate::payload::InputType;
use crate::tables::Table;

pub const DEFAULT_BASE_URL: &str = "http://localhost:55506/";

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Load(LoadArgs),
    Extract(ExtractArgs),
    Keys {
        #[command(subcommand)]
        command: KeysCommand,
    },
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Target table.
    #[arg(long, value_enum)]
    pub table: Table,

    /// Input file, or directory of files to load one by one.
    #[arg(long)]
    pub input: String,

    /// How input files are interpreted.
    #[arg(long, value_enum, default_value = "html")]
    pub intype: InputType,

    /// Backend base URL.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// File holding the hex-encoded token signing secret.
    #[arg(long)]
    pub keyfile: String,

    /// Log failed files and keep going instead of aborting the batch.
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Source table.
    #[arg(long, value_enum, default_value = "applog")]
    pub table: Table,

    /// Output CSV path.
    #[arg(long, default_value = "output.csv")]
    pub out: String,

    /// Backend base URL.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// File holding the hex-encoded token signing secret.
    #[arg(long)]
    pub keyfile: String,

    /// Records requested per page. A zero page size could never advance the
    /// cursor, so at least one record per page is required.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: u64,
}

#[derive(Debug, Subcommand)]
pub enum KeysCommand {
    Mint(KeysMintArgs),
    Export(KeysExportArgs),
}

#[derive(Debug, Args)]
pub struct KeysMintArgs {
    /// Number of licence keys to create.
    #[arg(long, default_value_t = 200)]
    pub count: usize,

    /// Length of each generated key id.
    #[arg(long, default_value_t = 6)]
    pub length: usize,

    /// Handbook type stamped on every minted key.
    #[arg(long, default_value = "CHONY")]
    pub handbook_type: String,

    /// Backend base URL.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// File holding the hex-encoded token signing secret.
    #[arg(long)]
    pub keyfile: String,
}

#[derive(Debug, Args)]
pub struct KeysExportArgs {
    /// Licence-key JSON dump to convert.
    #[arg(long)]
    pub input: String,

    /// Output text path (default: the input path with ".txt" appended).
    #[arg(long)]
    pub out: Option<String>,
}
