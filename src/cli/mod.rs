use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, ColorChoice, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use descry::app_dirs;

/// Produce the full version banner including config and data directories.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };
    let data_dir = match app_dirs::get_data_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("descry {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "data directory: {data_dir}");

    Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "descry",
    version,
    long_version = long_version(),
    about = "Terminal explorer for molecular-descriptor results",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `descry` binary.
pub(crate) struct CliArgs {
    #[arg(
        value_name = "CSV",
        help = "CSV file of SMILES strings to submit for calculation"
    )]
    pub(crate) csv: Option<PathBuf>,
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "DESCRY_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'd',
        long = "descriptor-type",
        value_name = "TYPE",
        help = "Descriptor class to request: 1D/2D, 3D, FF-based or QM-based (default: 1D/2D)"
    )]
    pub(crate) descriptor_type: Option<String>,
    #[arg(
        short = 'm',
        long,
        value_name = "METHOD",
        help = "Calculation method: RDKit, PaDEL or Mordred (default: RDKit)"
    )]
    pub(crate) method: Option<String>,
    #[arg(
        short = 'f',
        long = "filter-option",
        value_name = "FILTER",
        help = "Molecule filter: None, Molecular fragment, SMOL drug or PROTAC (default: None)"
    )]
    pub(crate) filter_option: Option<String>,
    #[arg(
        long,
        value_name = "URL",
        env = "DESCRY_ENDPOINT",
        help = "Override the descriptor service endpoint (default: built-in service URL)"
    )]
    pub(crate) endpoint: Option<String>,
    #[arg(
        long,
        value_name = "SECONDS",
        help = "Request timeout in seconds (default: 120)"
    )]
    pub(crate) timeout: Option<u64>,
    #[arg(
        long,
        value_name = "THEME",
        help = "Select a theme by name (default: slate)"
    )]
    pub(crate) theme: Option<String>,
    #[arg(long = "list-themes", help = "List available themes and exit")]
    pub(crate) list_themes: bool,
    #[arg(
        long = "print-config",
        help = "Print the resolved configuration and exit"
    )]
    pub(crate) print_config: bool,
}
