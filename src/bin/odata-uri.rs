//! odata-uri: compile query documents into OData URIs.
//!
//! # Usage
//!
//! ```bash
//! # Compile a JSON query document
//! odata-uri compile query.json --metadata northwind.json
//!
//! # Show each option decoded
//! odata-uri explain query.json --dialect v401
//!
//! # Decode an existing URI
//! odata-uri decode "Customers?\$filter=Country%20eq%20'UK'&\$top=5"
//! ```

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use odata_uri::config::Config;
use odata_uri::prelude::*;
use odata_uri::transpiler::compile_with;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "odata-uri")]
#[command(version)]
#[command(about = "Compile structured queries into OData v4 URIs", long_about = None)]
#[command(after_help = "EXAMPLES:
    odata-uri compile query.json --metadata northwind.json
    odata-uri explain query.json --dialect v401
    odata-uri decode \"Customers?$top=5\"")]
struct Cli {
    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./odata-uri.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query document into a URI
    Compile(CompileArgs),
    /// Compile a query document and show each option decoded
    Explain(CompileArgs),
    /// Split a URI into its decoded query options
    Decode {
        /// The URI to decode
        uri: String,
    },
}

#[derive(Args)]
struct CompileArgs {
    /// JSON query document, or '-' for stdin
    query: String,

    /// Metadata document (JSON or TOML)
    #[arg(short, long, env = "ODATA_URI_METADATA")]
    metadata: Option<PathBuf>,

    /// Protocol dialect: v4 or v401
    #[arg(short, long)]
    dialect: Option<Dialect>,

    /// Service root prepended to the compiled URI
    #[arg(short, long)]
    base_url: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "odata_uri=debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Compile(args) => {
            let uri = compile_document(cli, args)?;
            println!("{}", uri);
        }
        Commands::Explain(args) => {
            let uri = compile_document(cli, args)?;
            explain_uri(&uri)?;
        }
        Commands::Decode { uri } => explain_uri(uri)?,
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load()?,
    };
    Ok(config)
}

fn read_query(source: &str) -> Result<EntityQuery> {
    let content = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(source).with_context(|| format!("failed to read {}", source))?
    };
    serde_json::from_str(&content).with_context(|| format!("invalid query document {}", source))
}

fn load_schema(path: &Path) -> Result<Schema> {
    Schema::from_path(path).with_context(|| format!("failed to load metadata {}", path.display()))
}

fn compile_document(cli: &Cli, args: &CompileArgs) -> Result<String> {
    let mut config = load_config(cli)?;
    if args.metadata.is_some() {
        config.metadata = args.metadata.clone();
    }
    if args.dialect.is_some() {
        config.dialect = args.dialect;
    }
    if args.base_url.is_some() {
        config.base_url = args.base_url.clone();
    }

    let query = read_query(&args.query)?;
    let options = config.compile_options();
    let uri = match &config.metadata {
        Some(path) => compile_with(&query, &load_schema(path)?, &options)?,
        None => compile_with(&query, &NoMetadata::default(), &options)?,
    };
    Ok(config.join_base(&uri))
}

fn explain_uri(uri: &str) -> Result<()> {
    let parsed = parse_uri(uri)?;

    println!("{}", "OData URI".cyan().bold());
    println!();
    println!("{} {}", "URI:".dimmed(), uri.yellow());
    println!("{} {}", "Resource:".dimmed(), parsed.resource.white());

    if !parsed.options.is_empty() {
        println!();
        println!("{}", "Query options:".green().bold());
        for (name, value) in &parsed.options {
            println!("  {} = {}", name.cyan(), value.white());
        }
    }
    Ok(())
}
