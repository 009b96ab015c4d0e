use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use rowbind_catalog::{DataSourceRegistry, PostgresCatalog, TableCatalog};
use rowbind_core::{Config, DataSourceConfig, MappingSpec, TypeDescriptor};
use rowbind_engine::MappingPipeline;
use rowbind_registry::{DescriptorStore, ObjectCatalog};

/// Rowbind - table/object mapping precondition checks
#[derive(Parser)]
#[command(name = "rowbind")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: rowbind.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a table and an object type can be mapped 1:1
    Check {
        /// Named data source the table lives in
        #[arg(short, long)]
        data_source: String,

        /// Table name
        #[arg(short, long)]
        table: String,

        /// Object type name
        #[arg(short = 'y', long = "type")]
        type_name: String,

        /// Explicit key columns (comma-separated); omit to infer from the table
        #[arg(short, long, value_delimiter = ',')]
        key_columns: Vec<String>,

        /// JSON file of pre-resolved type descriptors to seed the store with
        #[arg(long)]
        descriptors: Option<PathBuf>,

        /// Member identity to tag the report with (overrides config)
        #[arg(short, long)]
        member: Option<String>,

        /// Output file for the check report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,
    },

    /// Print a table's column metadata and declared key columns
    Describe {
        /// Named data source the table lives in
        #[arg(short, long)]
        data_source: String,

        /// Table name
        #[arg(short, long)]
        table: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Load config if specified
    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if std::path::Path::new("rowbind.toml").exists() {
        Config::from_file(std::path::Path::new("rowbind.toml"))?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    match cli.command {
        Commands::Check {
            data_source,
            table,
            type_name,
            key_columns,
            descriptors,
            member,
            output,
        } => {
            check_command(
                &config,
                &data_source,
                &table,
                &type_name,
                key_columns,
                descriptors.as_deref(),
                member,
                &output,
                cli.verbose,
            )
            .await
        }
        Commands::Describe { data_source, table } => {
            describe_command(&config, &data_source, &table, cli.verbose).await
        }
    }
}

/// Check command - run the mapping precondition check
#[allow(clippy::too_many_arguments)]
async fn check_command(
    config: &Config,
    data_source: &str,
    table: &str,
    type_name: &str,
    key_columns: Vec<String>,
    descriptors: Option<&std::path::Path>,
    member: Option<String>,
    output: &PathBuf,
    verbose: bool,
) -> Result<()> {
    if verbose {
        eprintln!(
            "{} {} against {}...",
            "Checking".cyan(),
            table,
            type_name
        );
    }

    let sources = build_sources(config, verbose)?;
    let store = Arc::new(DescriptorStore::new());

    // Seed the store with pre-resolved descriptors, if any
    if let Some(path) = descriptors {
        let contents = std::fs::read_to_string(path)?;
        let seeded: Vec<TypeDescriptor> = serde_json::from_str(&contents)?;
        let count = seeded.len();
        for descriptor in seeded {
            store.register(descriptor);
        }
        if verbose {
            eprintln!(
                "{} {} descriptors from {}",
                "Loaded".cyan(),
                count,
                path.display()
            );
        }
    }

    let types = Arc::new(ObjectCatalog::new());
    let pipeline = MappingPipeline::new(sources, types, store);

    let spec = MappingSpec::new(data_source, table, type_name).with_key_columns(key_columns);
    let member = member.unwrap_or_else(|| config.member_name().to_string());

    let report = pipeline.check(&spec, member).await;

    report.save_to_file(output)?;
    if verbose {
        eprintln!("{} {}", "Report saved to:".green(), output.display());
    }

    print_check_summary(&report);

    // Exit with error code if the check failed
    if !report.is_ok() {
        std::process::exit(1);
    }

    Ok(())
}

/// Describe command - print table metadata
async fn describe_command(
    config: &Config,
    data_source: &str,
    table: &str,
    verbose: bool,
) -> Result<()> {
    let sources = build_sources(config, verbose)?;
    let catalog = sources.resolve(data_source).ok_or_else(|| {
        anyhow::anyhow!(
            "data source named \"{}\" not found. Register it under [data_sources.{}] in rowbind.toml.",
            data_source,
            data_source
        )
    })?;

    if verbose {
        eprintln!("{} {}...", "Connecting via".cyan(), catalog.name());
        catalog
            .test_connection()
            .await
            .map_err(|e| anyhow::anyhow!("Connection test failed: {}", e))?;
        eprintln!("{}", "✓ Connection successful".green());
    }

    let metadata = catalog
        .table_metadata(table)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to describe {}: {}", table, e))?;

    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", format!("Table: {}", metadata.table).bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    for column in &metadata.columns {
        let nullable = if column.nullable { "NULL" } else { "NOT NULL" };
        println!(
            "  {} {} {}",
            column.name.green(),
            column.data_type.to_string().yellow(),
            nullable
        );
    }

    println!();
    if metadata.key_columns.is_empty() {
        println!("{}", "No declared key columns".yellow());
    } else {
        println!(
            "{} {}",
            "Key columns:".bold(),
            metadata.key_columns.join(", ").green()
        );
    }
    println!();

    Ok(())
}

/// Build the data source registry from config
fn build_sources(config: &Config, verbose: bool) -> Result<Arc<DataSourceRegistry>> {
    let sources = Arc::new(DataSourceRegistry::new());

    for (name, ds_config) in &config.data_sources {
        let catalog = build_catalog(name, ds_config)?;
        if verbose {
            eprintln!("{} {} ({})", "Registered".cyan(), name, catalog.name());
        }
        sources.register(name.clone(), catalog);
    }

    Ok(sources)
}

/// Build one catalog from its config section
fn build_catalog(name: &str, config: &DataSourceConfig) -> Result<Arc<dyn TableCatalog>> {
    match config.source_type.to_lowercase().as_str() {
        "postgres" => {
            let conn_str = match config.setting("connection_string") {
                Some(conn_str) => conn_str.to_string(),
                None => {
                    let host = config.setting("host").ok_or_else(|| {
                        anyhow::anyhow!("data source '{}' requires 'host' or 'connection_string'", name)
                    })?;
                    let dbname = config.setting("dbname").ok_or_else(|| {
                        anyhow::anyhow!("data source '{}' requires 'dbname'", name)
                    })?;
                    let user = config.setting("user").ok_or_else(|| {
                        anyhow::anyhow!("data source '{}' requires 'user'", name)
                    })?;
                    let port = config.setting("port").unwrap_or("5432");

                    let mut conn_str =
                        format!("host={} port={} dbname={} user={}", host, port, dbname, user);
                    if let Some(password) = config.setting("password") {
                        conn_str.push_str(&format!(" password={}", password));
                    }
                    conn_str
                }
            };

            let mut catalog = PostgresCatalog::new(conn_str);
            if let Some(schema) = config.setting("schema") {
                catalog = catalog.with_schema(schema);
            }
            Ok(Arc::new(catalog))
        }
        other => Err(anyhow::anyhow!(
            "Unsupported data source type '{}' for '{}'. Supported: postgres",
            other,
            name
        )),
    }
}

/// Print the check outcome to the terminal
fn print_check_summary(report: &rowbind_core::CheckReport) {
    use rowbind_core::CheckOutcome;

    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "Mapping Check".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();
    println!("{} {}", "Member:".bold(), report.member);

    match &report.outcome {
        CheckOutcome::Ok {
            inferred_key_columns,
            field_mappings,
        } => {
            println!("{} {}", "Status:".bold(), "✓ OK".green());
            if let Some(keys) = inferred_key_columns {
                println!("{} {}", "Inferred key columns:".bold(), keys.green());
            }
            println!();
            println!("{}", "Field mappings:".bold());
            for mapping in field_mappings {
                let nullable = if mapping.column_nullable {
                    "NULL"
                } else {
                    "NOT NULL"
                };
                println!(
                    "  {} {} -> {} {} {}",
                    mapping.column_name.green(),
                    mapping.column_type.to_string().yellow(),
                    mapping.field_name.green(),
                    mapping.field_type.to_string().yellow(),
                    nullable
                );
            }
        }
        CheckOutcome::Failed {
            error_kind,
            message,
        } => {
            println!("{} {}", "Status:".bold(), "✗ FAILED".red());
            println!("{} {}", "Error kind:".bold(), error_kind.to_string().red());
            println!("{} {}", "Message:".bold(), message);
        }
    }

    println!();
    println!("{}", "=".repeat(60).bright_blue());
}
