use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ordmap_core::parser::parse_complete_with_limits;
use ordmap_core::{fingerprint, serialize, try_serialize, Error, Limits, OrderedMap, Value};

const EXIT_OK: i32 = 0;
const EXIT_INVALID: i32 = 1;
const EXIT_ERROR: i32 = 2;

/// Nesting cap applied by `--limits unbounded`; parsing recurses once per level
const UNBOUNDED_MAX_DEPTH: usize = 1024;

/// ordmap — inspect and convert ordered-map text documents
///
/// Documents use a restricted JSON-like form: objects of quoted keys whose
/// values are quoted strings or nested objects. A file argument of `-`
/// reads stdin.
#[derive(Parser)]
#[command(name = "ordmap", version, about, long_about = None)]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Log parsing details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Parse limits profile; `unbounded` still caps nesting at 1024 levels
    #[arg(long, global = true, value_enum, default_value_t = LimitsProfile::Strict)]
    limits: LimitsProfile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a document parses completely
    Check {
        /// Path to document
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical text form of a document
    Fmt {
        /// Path to document
        file: PathBuf,
    },

    /// Print the value at a dotted key path
    Get {
        /// Path to document
        file: PathBuf,
        /// Dotted key path, e.g. `user.name`
        path: String,
    },

    /// Convert a document to pretty-printed JSON
    ToJson {
        /// Path to document
        file: PathBuf,
    },

    /// Convert JSON holding only strings and objects to the document form
    FromJson {
        /// Path to JSON file
        file: PathBuf,
    },

    /// Compute the SHA-256 fingerprint of a document
    Hash {
        /// Path to document
        file: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LimitsProfile {
    Strict,
    Lenient,
    Unbounded,
}

impl LimitsProfile {
    fn limits(self) -> Limits {
        match self {
            LimitsProfile::Strict => Limits::strict(),
            LimitsProfile::Lenient => Limits::lenient(),
            LimitsProfile::Unbounded => Limits {
                max_depth: UNBOUNDED_MAX_DEPTH,
                ..Limits::unbounded()
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let limits = cli.limits.limits();
    debug!(?limits, "limits in force");

    let exit_code = match cli.command {
        Commands::Check { file, json } => cmd_check(&file, json, cli.quiet, &limits),
        Commands::Fmt { file } => cmd_fmt(&file, &limits),
        Commands::Get { file, path } => cmd_get(&file, &path, &limits),
        Commands::ToJson { file } => cmd_to_json(&file, &limits),
        Commands::FromJson { file } => cmd_from_json(&file, &limits),
        Commands::Hash { file } => cmd_hash(&file, &limits),
        Commands::Version => {
            println!(
                "ordmap {} (ordmap-core {})",
                env!("CARGO_PKG_VERSION"),
                ordmap_core::VERSION
            );
            EXIT_OK
        }
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// ── Helpers ───────────────────────────────────────────────

/// Read a file, or stdin when the path is `-`
fn read_input(file: &Path) -> Result<String, i32> {
    let result = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        std::fs::read_to_string(file)
    };

    match result {
        Ok(text) => {
            info!(path = %file.display(), bytes = text.len(), "read input");
            Ok(text)
        }
        Err(e) => {
            eprintln!(
                "{} cannot read {}: {}",
                "error:".red().bold(),
                file.display(),
                e
            );
            Err(EXIT_ERROR)
        }
    }
}

/// Read and fully parse a document, reporting failures on stderr
fn load(file: &Path, limits: &Limits) -> Result<OrderedMap, i32> {
    let text = read_input(file)?;
    let text = text.trim_end_matches(['\n', '\r']);
    match parse_complete_with_limits(text, limits) {
        Ok(map) => {
            debug!(entries = map.len(), consumed = text.len(), "parsed document");
            Ok(map)
        }
        Err(e) => {
            report_parse_error(file, &e);
            Err(EXIT_INVALID)
        }
    }
}

fn report_parse_error(file: &Path, err: &Error) {
    debug!(error = ?err, "parse failed");
    eprintln!("{} {}: {}", "error:".red().bold(), file.display(), err);
}

// ── Commands ──────────────────────────────────────────────

fn cmd_check(file: &Path, json: bool, quiet: bool, limits: &Limits) -> i32 {
    let text = match read_input(file) {
        Ok(t) => t,
        Err(code) => return code,
    };
    let text = text.trim_end_matches(['\n', '\r']);

    match parse_complete_with_limits(text, limits) {
        Ok(map) => {
            if json {
                let out = serde_json::json!({
                    "valid": true,
                    "entries": map.len(),
                    "fingerprint": fingerprint(&map),
                });
                println!("{}", out);
            } else if !quiet {
                println!(
                    "{} {} ({} entries)",
                    "✓".green().bold(),
                    "valid".green(),
                    map.len()
                );
            }
            EXIT_OK
        }
        Err(e) => {
            if json {
                let out = serde_json::json!({
                    "valid": false,
                    "error": e.to_string(),
                    "offset": e.offset(),
                });
                println!("{}", out);
            } else {
                report_parse_error(file, &e);
            }
            EXIT_INVALID
        }
    }
}

fn cmd_fmt(file: &Path, limits: &Limits) -> i32 {
    match load(file, limits) {
        Ok(map) => {
            println!("{}", serialize(&map));
            EXIT_OK
        }
        Err(code) => code,
    }
}

fn cmd_get(file: &Path, path: &str, limits: &Limits) -> i32 {
    let map = match load(file, limits) {
        Ok(m) => m,
        Err(code) => return code,
    };

    let keys: Vec<&str> = path.split('.').collect();
    match map.get_path(&keys) {
        Some(Value::Leaf(text)) => {
            println!("{}", text);
            EXIT_OK
        }
        Some(Value::Nested(nested)) => {
            println!("{}", serialize(nested));
            EXIT_OK
        }
        None => {
            eprintln!("{} no value at '{}'", "error:".red().bold(), path);
            EXIT_INVALID
        }
    }
}

fn cmd_to_json(file: &Path, limits: &Limits) -> i32 {
    let map = match load(file, limits) {
        Ok(m) => m,
        Err(code) => return code,
    };
    match serde_json::to_string_pretty(&map) {
        Ok(json) => {
            println!("{}", json);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("{} serialization failed: {}", "error:".red().bold(), e);
            EXIT_ERROR
        }
    }
}

fn cmd_from_json(file: &Path, limits: &Limits) -> i32 {
    let json = match read_input(file) {
        Ok(t) => t,
        Err(code) => return code,
    };
    let map = match serde_json::from_str::<OrderedMap>(&json) {
        Ok(m) => m,
        Err(e) => {
            eprintln!(
                "{} {}: only strings and objects are supported: {}",
                "error:".red().bold(),
                file.display(),
                e
            );
            return EXIT_INVALID;
        }
    };

    // Only emit text that the document commands would accept back.
    let checked = try_serialize(&map)
        .and_then(|text| parse_complete_with_limits(&text, limits).map(|_| text));
    match checked {
        Ok(text) => {
            println!("{}", text);
            EXIT_OK
        }
        Err(e) => {
            report_parse_error(file, &e);
            EXIT_INVALID
        }
    }
}

fn cmd_hash(file: &Path, limits: &Limits) -> i32 {
    match load(file, limits) {
        Ok(map) => {
            println!("{}", fingerprint(&map));
            EXIT_OK
        }
        Err(code) => code,
    }
}
