use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use radixcalc::config_loader::{self, CalculatorConfig, CliOverrides};
use radixcalc::enumerator;
use radixcalc::report::{self, OutputFormat};

/// Radix and per-leaf node capacity calculator for leaf-spine fabrics
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML catalog file (defaults to the built-in Arista catalog)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Override the base uplink port count per leaf
    #[arg(long)]
    base_uplinks: Option<u32>,

    /// Override the compute node NIC bandwidth in Gbps
    #[arg(long)]
    node_bandwidth: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Print the effective catalog as YAML and exit
    #[arg(long)]
    dump_catalog: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    let mut config = match &args.catalog {
        Some(path) => config_loader::load_config(path)?,
        None => {
            info!("Using built-in reference catalog");
            CalculatorConfig::default()
        }
    };

    let overrides = CliOverrides {
        base_uplink_ports: args.base_uplinks,
        node_bandwidth_gbps: args.node_bandwidth,
    };
    config_loader::apply_overrides(&mut config, &overrides)?;

    if args.dump_catalog {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    info!(
        "Base uplink ports: {}, node bandwidth: {} Gbps",
        config.fabric.base_uplink_ports, config.fabric.node_bandwidth_gbps
    );

    let rows = enumerator::enumerate(&config.catalog, &config.fabric)
        .wrap_err("Failed to evaluate fabric configurations")?;

    let output = report::render(&rows, &config.fabric, args.format)?;
    println!("{}", output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(&["radixcalc"]);

        assert_eq!(args.catalog, None);
        assert_eq!(args.base_uplinks, None);
        assert_eq!(args.node_bandwidth, None);
        assert_eq!(args.format, OutputFormat::Table);
        assert!(!args.dump_catalog);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from(&[
            "radixcalc",
            "--catalog", "fabric.yaml",
            "--base-uplinks", "16",
            "--node-bandwidth", "400",
            "--format", "json",
        ]);

        assert_eq!(args.catalog, Some(PathBuf::from("fabric.yaml")));
        assert_eq!(args.base_uplinks, Some(16));
        assert_eq!(args.node_bandwidth, Some(400));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Args::try_parse_from(&["radixcalc", "--format", "csv"]).is_err());
    }
}
