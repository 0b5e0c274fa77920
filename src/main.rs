use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use wrenchprep::config_loader::load_template_or_default;
use wrenchprep::error::PrepError;
use wrenchprep::platform::{build_platform, write_platform, XmlStyle};
use wrenchprep::utils::validate_node_count;

/// Generate a SimGrid platform XML file for WRENCH simulations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The name of the output XML file
    #[arg(short, long)]
    filename: PathBuf,

    /// Number of compute/storage host pairs in the platform
    #[arg(short, long, allow_negative_numbers = true)]
    nodes: i64,

    /// Optional YAML platform template overriding host, disk and link values
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Spaces per indentation level
    #[arg(long, default_value_t = wrenchprep::platform::xml::DEFAULT_INDENT)]
    indent: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    info!("Output file: {:?}", args.filename);

    // Everything is validated before the output file is touched
    let node_count = validate_node_count(args.nodes).map_err(PrepError::InvalidArgument)?;
    let template = load_template_or_default(args.template.as_deref())?;

    let platform = build_platform(node_count, &template)?;
    info!(
        "Built platform with {} hosts and {} routes",
        platform.zone.hosts.len(),
        platform.zone.routes.len()
    );

    let style = XmlStyle { indent: args.indent };
    write_platform(&platform, &style, &args.filename)?;

    info!("Platform generation completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["platform-gen", "--filename", "platform.xml", "--nodes", "8"]);

        assert_eq!(args.filename, PathBuf::from("platform.xml"));
        assert_eq!(args.nodes, 8);
        assert_eq!(args.indent, 4);
        assert!(args.template.is_none());
    }

    #[test]
    fn test_negative_nodes_parse() {
        let args = Args::parse_from(["platform-gen", "-f", "p.xml", "-n", "-2"]);
        assert_eq!(args.nodes, -2);
        assert!(validate_node_count(args.nodes).is_err());
    }

    #[test]
    fn test_required_args() {
        assert!(Args::try_parse_from(["platform-gen", "--nodes", "2"]).is_err());
        assert!(Args::try_parse_from(["platform-gen", "--filename", "p.xml"]).is_err());
    }
}
