// SPDX-License-Identifier: MIT OR Apache-2.0
//! `nodepath` - address, link and unlink sockets in graph documents
//!
//! Graph documents are RON or JSON files holding a serialized graph.
//! Commands that edit a document write it back in place unless
//! `--output` names another file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nodepath_graph::ToolsConfig;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod document;
mod script;

use commands::Runner;

/// nodepath CLI application
#[derive(Parser)]
#[command(name = "nodepath")]
#[command(about = "Address, link and unlink node graph sockets", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path (RON)
    #[arg(short, long, env = "NODEPATH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Show the node and sockets an address selects
    Resolve {
        /// Graph document
        graph: PathBuf,
        /// Socket address
        #[arg(allow_hyphen_values = true)]
        address: String,
    },

    /// List links touching an address
    Links {
        /// Graph document
        graph: PathBuf,
        /// Socket address
        #[arg(allow_hyphen_values = true)]
        address: String,
    },

    /// Link outputs of one address to matching inputs of another
    Link {
        /// Graph document
        graph: PathBuf,
        /// Source address
        #[arg(allow_hyphen_values = true)]
        from: String,
        /// Destination address
        #[arg(allow_hyphen_values = true)]
        to: String,
        /// Leave already linked sockets alone; overrides the configured
        /// default (`--preserve-existing=false` turns it off)
        #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        preserve_existing: Option<bool>,
        /// Write the result here instead of the input document
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove links touching an address
    Unlink {
        /// Graph document
        graph: PathBuf,
        /// Socket address
        #[arg(allow_hyphen_values = true)]
        address: String,
        /// Only remove links into this node
        #[arg(long, allow_hyphen_values = true)]
        to: Option<String>,
        /// Write the result here instead of the input document
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a RON script of link and unlink operations
    Apply {
        /// Graph document
        graph: PathBuf,
        /// Script file
        script: PathBuf,
        /// Write the result here instead of the input document
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so reports stay on stdout
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let config = match cli.config.as_deref() {
        Some(path) => ToolsConfig::load(path)
            .with_context(|| format!("Failed to load config `{}`", path.display()))?,
        None => ToolsConfig::default(),
    };
    let runner = Runner::new(config);

    let report = match &cli.command {
        Commands::Resolve { graph, address } => runner.resolve(graph, address)?,
        Commands::Links { graph, address } => runner.links(graph, address)?,
        Commands::Link {
            graph,
            from,
            to,
            preserve_existing,
            output,
        } => runner.link(graph, from, to, *preserve_existing, output.as_deref())?,
        Commands::Unlink {
            graph,
            address,
            to,
            output,
        } => runner.unlink(graph, address, to.as_deref(), output.as_deref())?,
        Commands::Apply { graph, script, output } => runner.apply(graph, script, output.as_deref())?,
    };

    print!("{report}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_addresses_may_start_with_marker() {
        let cli = Cli::try_parse_from(["nodepath", "link", "graph.ron", "-RGB", "+Mix:A", "--preserve-existing"])
            .unwrap();
        match cli.command {
            Commands::Link {
                from,
                to,
                preserve_existing,
                ..
            } => {
                assert_eq!(from, "-RGB");
                assert_eq!(to, "+Mix:A");
                assert_eq!(preserve_existing, Some(true));
            }
            _ => panic!("expected link"),
        }
    }

    #[test]
    fn test_preserve_existing_override() {
        let parse = |args: &[&str]| match Cli::try_parse_from(args).unwrap().command {
            Commands::Link { preserve_existing, .. } => preserve_existing,
            _ => panic!("expected link"),
        };

        assert_eq!(parse(&["nodepath", "link", "g.ron", "A", "B"]), None);
        assert_eq!(parse(&["nodepath", "link", "g.ron", "A", "B", "--preserve-existing=false"]), Some(false));
        assert_eq!(parse(&["nodepath", "link", "g.ron", "A", "B", "--preserve-existing=true"]), Some(true));
    }

    #[test]
    fn test_unlink_to_and_global_flags() {
        let cli = Cli::try_parse_from([
            "nodepath",
            "unlink",
            "graph.json",
            "Mix",
            "--to",
            "Principled BSDF",
            "-o",
            "out.json",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Unlink { address, to, output, .. } => {
                assert_eq!(address, "Mix");
                assert_eq!(to.as_deref(), Some("Principled BSDF"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("expected unlink"),
        }
    }
}
