//! Price list CLI
//!
//! Command-line tool for loading a directory of price lists, searching them
//! interactively, and exporting the combined catalog to HTML.

use clap::{Args, Parser, Subcommand};
use price_core::{
    export_html, load_directory, print_search, search, Catalog, IngestReport, DEFAULT_OUTPUT,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Input that ends the interactive loop
const EXIT_COMMAND: &str = "exit";

#[derive(Parser)]
#[command(name = "price-cli")]
#[command(about = "Search and export product price lists", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory containing price list files
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Log skipped rows and other debug detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for search queries, then export the catalog (default)
    Interactive(ExportArgs),

    /// Run a single search and print the results
    Search {
        /// Text to look for in product names
        query: String,

        /// Print matches as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export the whole catalog to an HTML file
    Export {
        /// Output file path
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },

    /// Show which files were loaded or skipped
    Scan,
}

#[derive(Args)]
struct ExportArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Don't write the HTML export after the session ends
    #[arg(long)]
    no_export: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> price_core::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or_else(|| {
        Commands::Interactive(ExportArgs {
            output: PathBuf::from(DEFAULT_OUTPUT),
            no_export: false,
        })
    });

    match command {
        Commands::Interactive(args) => cmd_interactive(&cli.dir, &args),
        Commands::Search { query, json } => cmd_search(&cli.dir, &query, json),
        Commands::Export { output } => cmd_export(&cli.dir, &output),
        Commands::Scan => cmd_scan(&cli.dir),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn load(dir: &Path) -> price_core::Result<(Catalog, IngestReport)> {
    let mut catalog = Catalog::new();
    let report = load_directory(&mut catalog, dir)?;
    Ok((catalog, report))
}

fn cmd_interactive(dir: &Path, args: &ExportArgs) -> price_core::Result<()> {
    let (catalog, report) = load(dir)?;
    println!(
        "Loaded {} records from {} files",
        catalog.len(),
        report.loaded.len()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        print!("Enter search text (or '{}' to quit): ", EXIT_COMMAND);
        stdout.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // End of input behaves like "exit"
            println!();
            break;
        }

        let query = line.trim_end_matches(['\r', '\n']);
        if is_exit(query) {
            break;
        }
        print_search(&catalog, query, &mut stdout)?;
    }
    println!("Done.");

    if !args.no_export {
        export_html(&catalog, &args.output)?;
        println!("Exported {} records to {}", catalog.len(), args.output.display());
    }

    Ok(())
}

fn cmd_search(dir: &Path, query: &str, json: bool) -> price_core::Result<()> {
    let (catalog, _) = load(dir)?;

    if json {
        let matches = search(&catalog, query);
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        print_search(&catalog, query, &mut io::stdout())?;
    }

    Ok(())
}

fn cmd_export(dir: &Path, output: &Path) -> price_core::Result<()> {
    let (catalog, _) = load(dir)?;

    export_html(&catalog, output)?;
    println!("Exported {} records to {}", catalog.len(), output.display());

    Ok(())
}

fn cmd_scan(dir: &Path) -> price_core::Result<()> {
    let (catalog, report) = load(dir)?;

    println!("Scanned {}:", dir.display());
    println!(
        "Found {} price lists, loaded {} records ({} rows skipped)",
        report.files_found(),
        catalog.len(),
        report.rows_skipped()
    );
    println!();

    for file in &report.loaded {
        println!(
            "  {} ({} records, {} rows skipped)",
            file.path.display(),
            file.accepted,
            file.skipped_rows
        );
    }

    if !report.skipped.is_empty() {
        println!("\nSkipped files ({}):", report.skipped.len());
        for skipped in &report.skipped {
            println!("  {}: {}", skipped.path.display(), skipped.error);
        }
    }

    Ok(())
}

/// Check for the sentinel that ends the interactive loop
fn is_exit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_exit() {
        assert!(is_exit("exit"));
        assert!(is_exit("EXIT"));
        assert!(is_exit("  Exit \n"));
        assert!(!is_exit("exits"));
        assert!(!is_exit("молоко"));
    }

    #[test]
    fn test_cli_defaults_to_interactive() {
        let cli = Cli::try_parse_from(["price-cli"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.dir, PathBuf::from("."));
    }

    #[test]
    fn test_cli_parses_search() {
        let cli = Cli::try_parse_from(["price-cli", "--dir", "lists", "search", "мол", "--json"])
            .unwrap();
        assert_eq!(cli.dir, PathBuf::from("lists"));
        match cli.command {
            Some(Commands::Search { query, json }) => {
                assert_eq!(query, "мол");
                assert!(json);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_cli_export_default_output() {
        let cli = Cli::try_parse_from(["price-cli", "export"]).unwrap();
        match cli.command {
            Some(Commands::Export { output }) => assert_eq!(output, PathBuf::from(DEFAULT_OUTPUT)),
            _ => panic!("expected export command"),
        }
    }
}
