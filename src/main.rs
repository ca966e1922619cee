use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use unitcat::catalog;
use unitcat::config::Config;
use unitcat::query;
use unitcat::render::CatalogRenderer;
use unitcat::UnitDictionary;

#[derive(Parser)]
#[command(name = "unitcat")]
#[command(about = "POSC units-of-measure catalog renderer and query tool", long_about = None)]
struct Cli {
    /// TOML config file with [render] and [catalog] sections
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dictionary as an HTML page
    Render {
        /// POSC XML files, merged in order
        #[arg(default_value = "data/sample_units.xml")]
        paths: Vec<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the dictionary as JSON
    Export {
        /// POSC XML files, merged in order
        #[arg(default_value = "data/sample_units.xml")]
        paths: Vec<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List all units in the dictionary
    List {
        /// POSC XML files, merged in order
        #[arg(default_value = "data/sample_units.xml")]
        paths: Vec<PathBuf>,
    },

    /// Query a specific path in the dictionary
    Query {
        /// Query path (e.g., "cm/coefficients/B" or "dictionary/count")
        query: String,

        /// POSC XML files, merged in order
        #[arg(default_value = "data/sample_units.xml")]
        paths: Vec<PathBuf>,
    },

    /// Validate the dictionary; exits with 1 when errors are found
    Check {
        /// POSC XML files, merged in order
        #[arg(default_value = "data/sample_units.xml")]
        paths: Vec<PathBuf>,
    },

    /// Show the quantity types and units grouped under each base unit
    Categories {
        /// POSC XML files, merged in order
        #[arg(default_value = "data/sample_units.xml")]
        paths: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = load_config(cli.config.as_ref()).and_then(|config| match &cli.command {
        Commands::Render { paths, output } => render_catalog(&config, paths, output.as_ref()),
        Commands::Export { paths, output } => export_dictionary(&config, paths, output.as_ref()),
        Commands::List { paths } => list_units(&config, paths),
        Commands::Query { query, paths } => query_dictionary(&config, paths, query),
        Commands::Check { paths } => check_dictionary(&config, paths),
        Commands::Categories { paths } => list_categories(&config, paths),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Config::load_from_file(path)?),
        None => Ok(Config::empty()),
    }
}

fn load(config: &Config, paths: &[PathBuf]) -> Result<UnitDictionary, Box<dyn std::error::Error>> {
    let dictionary = catalog::load_dictionaries(paths, &config.catalog)?;

    // Print validation issues if any
    let validation = catalog::validate_dictionary(&dictionary);
    if validation.has_issues() {
        eprintln!("{}", validation);
    }

    Ok(dictionary)
}

fn write_output(content: &str, output: Option<&PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(output_path) = output {
        std::fs::write(output_path, content)?;
        eprintln!("Written to {}", output_path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn render_catalog(
    config: &Config,
    paths: &[PathBuf],
    output: Option<&PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dictionary = load(config, paths)?;
    let html = CatalogRenderer::new(config.render.clone()).render(&dictionary);
    write_output(&html, output)
}

fn export_dictionary(
    config: &Config,
    paths: &[PathBuf],
    output: Option<&PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dictionary = load(config, paths)?;
    let json = serde_json::to_string_pretty(&dictionary)?;
    write_output(&json, output)
}

fn list_units(config: &Config, paths: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let dictionary = load(config, paths)?;
    let index = catalog::SymbolIndex::new(&dictionary);

    println!("Dictionary: {} ({})", dictionary.document_name, dictionary.document_date);

    let base_units: Vec<_> = dictionary.base_units().collect();
    println!("\nBase units ({}):", base_units.len());
    for unit in base_units {
        println!("  - {} ({})", unit.catalog_symbol, unit.name);
    }

    let customary: Vec<_> = dictionary.customary_units().collect();
    println!("\nCustomary units ({}):", customary.len());
    for unit in customary {
        let base = unit
            .conversion_to_base()
            .map(|c| index.resolve_base_unit(&c.base_unit))
            .unwrap_or_default();
        let marker = if unit.deprecated { " [deprecated]" } else { "" };
        println!(
            "  - {} ({}) -> {}{}",
            unit.catalog_symbol, unit.name, base, marker
        );
    }

    Ok(())
}

fn query_dictionary(
    config: &Config,
    paths: &[PathBuf],
    query_str: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dictionary = load(config, paths)?;

    let query_path = query::parser::parse_query_path(query_str)
        .map_err(|e| format!("Failed to parse query: {}", e))?;

    let executor = query::executor::QueryExecutor::new(&dictionary);
    let result = executor
        .execute(&query_path)
        .map_err(|e| format!("Query error: {}", e))?;

    println!("{}", query::formatter::format_query_result(&result));
    Ok(())
}

fn check_dictionary(config: &Config, paths: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let dictionary = catalog::load_dictionaries(paths, &config.catalog)?;
    let validation = catalog::validate_dictionary(&dictionary);

    if validation.has_issues() {
        print!("{}", validation);
    } else {
        println!("{} units, no issues", dictionary.units.len());
    }

    if !validation.is_valid() {
        return Err(format!("{} validation error(s)", validation.errors.len()).into());
    }
    Ok(())
}

fn list_categories(config: &Config, paths: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let dictionary = load(config, paths)?;

    for category in catalog::group_by_base_unit(&dictionary) {
        println!("{}", category.base_unit);
        println!("  quantity types: {}", category.quantity_types.join(", "));
        println!("  units: {}", category.units.join(", "));
    }

    Ok(())
}
