//! Keyshape CLI - resolve syntaxes and compare identifiers from the command line.

use clap::{Parser, Subcommand};
use keyshape_core::{RegistryConfig, SyntaxRegistry};
use tracing::debug;

mod commands;
mod input;
mod output;

use commands::{compare, parse, resolve, set};

#[derive(Parser)]
#[command(name = "keyshape")]
#[command(about = "Identifier syntax resolution and comparison CLI")]
struct Cli {
    /// Registry configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<String>,
    /// Separator to use; takes precedence over the configuration file
    #[arg(long, global = true)]
    separator: Option<String>,
    /// Register an extra syntax before running the command (repeatable)
    #[arg(long = "register-syntax", global = true)]
    register_syntax: Vec<String>,
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a syntax against the registry, or list every syntax
    Resolve {
        /// Syntax to resolve (omit to list all)
        query: Option<String>,
        /// Register the syntax if it is unknown
        #[arg(long)]
        register: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a single identifier from a string or JSON object
    Parse {
        /// Value to parse (`-` reads stdin)
        value: String,
        /// Explicit syntax
        #[arg(long)]
        syntax: Option<String>,
        /// Register the syntax if it is unknown
        #[arg(long)]
        register: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build an identifier set covering every applicable syntax
    Set {
        /// Value to interpret (`-` reads stdin)
        value: String,
        /// Register the key set if no syntax applies
        #[arg(long)]
        register: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether two values identify the same entity
    Compare {
        /// Reference value, expanded into an identifier set
        left: String,
        /// Candidate value
        right: String,
        /// Syntax used to read a string candidate
        #[arg(long)]
        syntax: Option<String>,
        /// Exit with error code if the values differ
        #[arg(long)]
        strict: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = prepare_registry(&cli).and_then(|registry| match cli.command {
        Commands::Resolve {
            query,
            register,
            json,
        } => resolve::run(registry, query, register, json),
        Commands::Parse {
            value,
            syntax,
            register,
            json,
        } => parse::run(registry, value, syntax, register, json),
        Commands::Set {
            value,
            register,
            json,
        } => set::run(registry, value, register, json),
        Commands::Compare {
            left,
            right,
            syntax,
            strict,
        } => compare::run(registry, left, right, syntax, strict),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to install logger: {}", e);
    }
}

/// Seeds the process registry: `--separator` first so it wins, then the
/// configuration file, then `--register-syntax` entries.
fn prepare_registry(cli: &Cli) -> Result<&'static SyntaxRegistry, Box<dyn std::error::Error>> {
    let registry = SyntaxRegistry::global();

    if let Some(separator) = &cli.separator {
        registry.set_separator(separator.clone());
    }
    if let Some(path) = &cli.config {
        let config = RegistryConfig::load(path)
            .map_err(|e| format!("Failed to load config {}: {}", path, e))?;
        config.apply(registry)?;
    }
    let added = registry.register(cli.register_syntax.iter().map(String::as_str));
    debug!(added, separator = %registry.separator(), "registry ready");

    Ok(registry)
}
