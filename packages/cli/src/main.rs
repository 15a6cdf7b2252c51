//! `afford`, the affordance inference command-line interface.
//!
//! Provides three subcommands over a JSON catalog of types, operations and
//! links:
//!
//! - **`validate`**: check the catalog for structural problems.
//! - **`inspect`**: print the inferred affordances (and links) as JSON.
//! - **`render`**: print a human-readable summary.
//!
//! All subcommands read JSON from a file path or from stdin (`-`). Logging
//! goes to stderr and is controlled with `RUST_LOG` (default `warn`).
//!
//! Configuration starts from `AFFORDANCE_META_PROPERTY` and
//! `AFFORDANCE_CONFLICT_POLICY`; an unusable value there is logged and
//! ignored. `--meta-property` and `--conflict-policy` override both.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use affordance::render::{render_affordance, render_link};
use affordance::{
    validate_catalog_with, Affordance, AffordanceBuilder, Catalog, ConflictPolicy, InferenceConfig,
    Link,
};
use clap::{Parser, Subcommand};
use serde::Serialize;

/// afford, the affordance inference CLI
///
/// Derive verbs, required flags and request-body properties for the
/// operations declared in a catalog.
#[derive(Parser)]
#[command(name = "afford", version, about, long_about = None)]
struct Cli {
    /// Property name never reported as client input.
    #[arg(long, global = true, value_name = "NAME")]
    meta_property: Option<String>,

    /// How to resolve a property declared with two different types:
    /// reject | keep-first | keep-last
    #[arg(long, global = true, value_name = "POLICY")]
    conflict_policy: Option<ConflictPolicy>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a catalog.
    ///
    /// Checks type and property names, duplicate declarations, body
    /// parameters, references to undeclared types, inheritance cycles and
    /// property conflicts under the active policy. Exits 0 if the catalog
    /// is valid, 1 otherwise.
    ///
    /// Pass `-` as FILE to read from stdin.
    Validate {
        /// Path to a JSON catalog, or `-` for stdin.
        file: PathBuf,
    },

    /// Print the affordance of every operation as JSON.
    ///
    /// When the catalog declares links, they are printed too with their
    /// affordances attached.
    ///
    /// Examples:
    ///   afford inspect api.json
    ///   afford inspect api.json --operation createEmployee
    ///   afford --conflict-policy keep-last inspect - < api.json
    Inspect {
        /// Path to a JSON catalog, or `-` for stdin.
        file: PathBuf,

        /// Only print the affordance of this operation.
        #[arg(short = 'o', long, value_name = "NAME")]
        operation: Option<String>,
    },

    /// Render affordances as human-readable text.
    ///
    /// Links are rendered with their affordances nested beneath them; a
    /// catalog without links renders each operation's affordance.
    ///
    /// Pass `-` as FILE to read from stdin.
    Render {
        /// Path to a JSON catalog, or `-` for stdin.
        file: PathBuf,
    },
}

/// JSON body printed by `inspect`.
#[derive(Serialize)]
struct Report {
    affordances: Vec<Affordance>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    links: Vec<Link>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = config_from(&cli);
    tracing::debug!(
        meta_property = %config.meta_property,
        conflict_policy = %config.conflict_policy,
        "configuration"
    );

    match cli.command {
        Command::Validate { file } => {
            let catalog = parse_catalog(&read_input(&file));
            let errors = validate_catalog_with(&catalog, &config);
            if errors.is_empty() {
                println!(
                    "valid ({} types, {} operations)",
                    catalog.types.len(),
                    catalog.operations.len()
                );
            } else {
                for e in &errors {
                    eprintln!("error: {}", e);
                }
                process::exit(1);
            }
        }

        Command::Inspect { file, operation } => {
            let catalog = parse_catalog(&read_input(&file));
            let registry = catalog.registry();
            let builder = AffordanceBuilder::new(&registry).with_config(config);

            let report = match operation {
                Some(name) => {
                    let op = catalog
                        .operations
                        .iter()
                        .find(|op| op.name == name)
                        .unwrap_or_else(|| fatal(&format!("no operation named {:?}", name)));
                    let affordance = builder
                        .build(op)
                        .unwrap_or_else(|e| fatal(&format!("{}: {}", name, e)));
                    Report {
                        affordances: vec![affordance],
                        links: Vec::new(),
                    }
                }
                None => Report {
                    affordances: catalog
                        .build_all(&builder)
                        .unwrap_or_else(|e| fatal(&e.to_string())),
                    links: catalog
                        .links(&builder)
                        .unwrap_or_else(|e| fatal(&e.to_string())),
                },
            };

            let json = serde_json::to_string_pretty(&report)
                .unwrap_or_else(|e| fatal(&format!("failed to serialise report: {}", e)));
            println!("{}", json);
        }

        Command::Render { file } => {
            let catalog = parse_catalog(&read_input(&file));
            let registry = catalog.registry();
            let builder = AffordanceBuilder::new(&registry).with_config(config);

            if catalog.links.is_empty() {
                let affordances = catalog
                    .build_all(&builder)
                    .unwrap_or_else(|e| fatal(&e.to_string()));
                for a in &affordances {
                    print!("{}", render_affordance(a));
                }
            } else {
                let links = catalog
                    .links(&builder)
                    .unwrap_or_else(|e| fatal(&e.to_string()));
                for link in &links {
                    print!("{}", render_link(link));
                }
            }
        }
    }
}

/// The environment's configuration, overridden by explicit flags.
fn config_from(cli: &Cli) -> InferenceConfig {
    let mut config = InferenceConfig::from_env();
    if let Some(name) = cli.meta_property.as_ref().filter(|n| !n.is_empty()) {
        config = config.with_meta_property(name.clone());
    }
    if let Some(policy) = cli.conflict_policy {
        config = config.with_conflict_policy(policy);
    }
    config
}

/// Read the full contents of a file, or stdin when the path is `"-"`.
fn read_input(path: &PathBuf) -> String {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {}", e)));
        buf
    } else {
        fs::read_to_string(path).unwrap_or_else(|e| {
            fatal(&format!("failed to read {}: {}", path.display(), e))
        })
    }
}

fn parse_catalog(json: &str) -> Catalog {
    Catalog::from_json(json).unwrap_or_else(|e| fatal(&e.to_string()))
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("afford: {}", msg);
    process::exit(2);
}
