use clap::{Parser, Subcommand};

pub fn parse_contract_kind(value: &str) -> Result<String, String> {
    match value {
        "extraction" | "analysis" => Ok(value.to_string()),
        _ => Err("kind must be one of: extraction, analysis".to_string()),
    }
}

/// Extended help shown after `perfil contracts check --help`.
pub const CONTRACTS_CHECK_AFTER_HELP: &str = "\
Accepted input:
  JSON object  one pipeline result
  JSON array   a batch of pipeline results
  CSV          one header row using the contract field names

  [path] is a local file path. Use `-` or omit it to read stdin.
  Example: cat results.json | perfil contracts check analysis -

What to do next:
  1. Run `perfil contracts fields <kind>` to see field names and types.
  2. Fix every reported row, then re-run the check.
";

#[derive(Debug, Parser)]
#[command(
    name = "perfil",
    version,
    about = "receipt pipeline contracts, chat time labels and the profile edge function",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Chat message timestamp labels
    #[command(arg_required_else_help = true)]
    Time {
        #[command(subcommand)]
        command: TimeCommand,
    },
    /// Check extraction and analysis results against their contracts
    #[command(arg_required_else_help = true)]
    Contracts {
        #[command(subcommand)]
        command: ContractsCommand,
    },
    /// Render profile page fragments as HTML
    #[command(arg_required_else_help = true)]
    Render {
        #[command(subcommand)]
        command: RenderCommand,
    },
    /// Run or exercise the CORS-enabled edge function
    #[command(arg_required_else_help = true)]
    Edge {
        #[command(subcommand)]
        command: EdgeCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum TimeCommand {
    /// Label a message timestamp the way the chat list shows it
    Format {
        /// ISO 8601 date-time; offsets are optional
        timestamp: String,
        /// Reference instant instead of the current local time
        #[arg(long)]
        now: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ContractsCommand {
    /// Validate pipeline output against a contract
    #[command(after_long_help = CONTRACTS_CHECK_AFTER_HELP)]
    Check {
        /// Contract kind: extraction or analysis
        #[arg(value_parser = parse_contract_kind)]
        kind: String,
        /// Input file (`-` or omitted reads stdin)
        path: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the fields a contract expects
    Fields {
        /// Contract kind: extraction or analysis
        #[arg(value_parser = parse_contract_kind)]
        kind: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum RenderCommand {
    /// Render the profile footer
    Footer {
        /// Brand shown in the copyright line
        #[arg(long)]
        brand: Option<String>,
        /// Line shown under the brand
        #[arg(long)]
        tagline: Option<String>,
        /// Copyright year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Render the subscription plans page
    Plans {
        /// JSON array of plan summaries (`-` reads stdin)
        #[arg(long)]
        plans: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum EdgeCommand {
    /// Serve the edge function over HTTP
    Serve {
        /// Listen address (overrides PERFIL_EDGE_ADDR)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Run one raw HTTP request through the edge function
    Handle {
        /// File holding the raw request (`-` or omitted reads stdin)
        path: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
