use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use replate_ir::{Design, Driver, RuleSet};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// replate - prefix-rename pass over hardware design representations
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename every module, cell, and declaration in a design
    Rename {
        /// Design file (JSON, netlist or syntax-tree representation)
        #[arg(short, long)]
        design: PathBuf,

        /// Prefix prepended to every name not ignored
        prefix: String,

        /// Names to leave untouched
        ignore: Vec<String>,

        /// One-off substitution OLD=NEW, bypassing the prefix (repeatable)
        #[arg(short, long, value_parser = parse_substitution)]
        substitute: Vec<(String, String)>,

        /// Fail on the first rename collision instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_substitution(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((old, new)) if !old.is_empty() && !new.is_empty() => {
            Ok((old.to_string(), new.to_string()))
        }
        _ => Err(format!("expected OLD=NEW, got '{arg}'")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt().with_env_filter(log_level).init();

    match cli.command {
        Commands::Rename {
            design,
            prefix,
            ignore,
            substitute,
            strict,
            output,
        } => {
            let text = fs::read_to_string(&design)
                .with_context(|| format!("failed to read design file {}", design.display()))?;
            let mut design: Design =
                serde_json::from_str(&text).context("failed to parse design file")?;

            let mut rules = RuleSet::with_prefix(prefix);
            for name in ignore {
                rules.add_ignore(name);
            }
            for (old, new) in substitute {
                rules.add_substitution(old, new);
            }

            let report = Driver::with_strict(strict).run(&mut design, &rules)?;
            if !report.collisions.is_empty() {
                warn!(
                    "{} renames skipped due to collisions",
                    report.collisions.len()
                );
            }

            let rendered = serde_json::to_string_pretty(&design)
                .context("failed to serialize renamed design")?;
            match output {
                Some(path) => fs::write(&path, rendered)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{rendered}"),
            }
        }
    }

    Ok(())
}
