//! tf-exporter CLI
//!
//! Command-line interface for exporting existing DynamoDB tables and Lambda
//! resources as Terraform configuration.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use tf_exporter_common::{ExportConfig, ReferenceStyle, ResourceKind};
use tf_exporter_generator::{render_table, ExportReport, Exporter};
use tf_exporter_parser::dynamodb::DescribeTableOutput;
use tf_exporter_parser::SnapshotClient;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tf-exporter")]
#[command(version, about = "Export DynamoDB and Lambda resources as Terraform", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export resources from captured provider responses
    #[command(after_help = "EXAMPLES:\n  \
        # Export everything with the default configuration\n  \
        tf-exporter export --snapshot ./snapshots\n\n  \
        # Reference functions through data lookups\n  \
        tf-exporter export \\\n    \
        --snapshot ./snapshots \\\n    \
        --region eu-central-1 \\\n    \
        --reference-style lookup \\\n    \
        --output ./terraform\n\n  \
        # Export only tables and their stream mappings\n  \
        tf-exporter export --snapshot ./snapshots --kind table,event-source-mapping")]
    Export {
        /// Directory of captured provider responses
        #[arg(short, long)]
        snapshot: PathBuf,

        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (overrides the configuration)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reference style for functions in event source mappings
        #[arg(long)]
        reference_style: Option<StyleArg>,

        /// Region subdirectory of the snapshot to read
        #[arg(long)]
        region: Option<String>,

        /// Resource kinds to export (all if not specified)
        #[arg(short, long, value_delimiter = ',')]
        kind: Vec<KindArg>,

        /// Folder holding `<layer>.zip` artifacts
        #[arg(long)]
        layers_artifact_dir: Option<PathBuf>,

        /// Folder holding `<function>.zip` artifacts
        #[arg(long)]
        functions_artifact_dir: Option<PathBuf>,
    },

    /// Print the Terraform block for one captured DescribeTable response
    #[command(after_help = "EXAMPLES:\n  \
        aws dynamodb describe-table --table-name Orders > orders.json\n  \
        tf-exporter render-table --file orders.json")]
    RenderTable {
        /// Path to the DescribeTable JSON
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    /// Reference the generated function resource
    Native,
    /// Reference a `data` lookup declaration
    Lookup,
}

impl From<StyleArg> for ReferenceStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Native => ReferenceStyle::Native,
            StyleArg::Lookup => ReferenceStyle::Lookup,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Table,
    EventSourceMapping,
    Layer,
    Function,
    ConcurrencyConfig,
    Alias,
}

impl From<KindArg> for ResourceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Table => ResourceKind::Table,
            KindArg::EventSourceMapping => ResourceKind::EventSourceMapping,
            KindArg::Layer => ResourceKind::Layer,
            KindArg::Function => ResourceKind::Function,
            KindArg::ConcurrencyConfig => ResourceKind::ConcurrencyConfig,
            KindArg::Alias => ResourceKind::Alias,
        }
    }
}

/// Flag values that override the configuration file
struct ExportArgs {
    snapshot: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    reference_style: Option<StyleArg>,
    region: Option<String>,
    kinds: Vec<KindArg>,
    layers_artifact_dir: Option<PathBuf>,
    functions_artifact_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Export {
            snapshot,
            config,
            output,
            reference_style,
            region,
            kind,
            layers_artifact_dir,
            functions_artifact_dir,
        } => export_command(
            ExportArgs {
                snapshot,
                config,
                output,
                reference_style,
                region,
                kinds: kind,
                layers_artifact_dir,
                functions_artifact_dir,
            },
            cli.verbose,
        ),
        Commands::RenderTable { file } => render_table_command(&file),
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(args: &ExportArgs) -> Result<ExportConfig> {
    let mut config = match &args.config {
        Some(path) => ExportConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ExportConfig::default(),
    };

    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(style) = args.reference_style {
        config.reference_style = style.into();
    }
    if let Some(region) = &args.region {
        config.region = Some(region.clone());
    }
    if let Some(dir) = &args.layers_artifact_dir {
        config.layers_artifact_dir = dir.clone();
    }
    if let Some(dir) = &args.functions_artifact_dir {
        config.functions_artifact_dir = dir.clone();
    }

    Ok(config)
}

fn export_command(args: ExportArgs, verbose: bool) -> Result<()> {
    let config = load_config(&args)?;
    let kinds: Vec<ResourceKind> = if args.kinds.is_empty() {
        ResourceKind::ALL.to_vec()
    } else {
        args.kinds.iter().copied().map(Into::into).collect()
    };

    println!(
        "{} Exporting from snapshot: {}",
        "→".cyan(),
        args.snapshot.display()
    );

    if verbose {
        println!("  Output: {}", config.output_dir.display());
        println!("  Reference style: {:?}", config.reference_style);
        if let Some(region) = &config.region {
            println!("  Region: {}", region);
        }
        let names: Vec<String> = kinds.iter().map(ToString::to_string).collect();
        println!("  Kinds: {}", names.join(", "));
    }
    debug!(?config, "resolved configuration");

    let client = SnapshotClient::new(&args.snapshot).with_region(config.region.clone());
    let exporter = Exporter::new(client, config);
    let report = exporter.export(&kinds).context("Failed to write output")?;

    print_report(&report, verbose);

    if !report.is_success() {
        bail!("{} export pass(es) failed", report.failed.len());
    }

    Ok(())
}

fn print_report(report: &ExportReport, verbose: bool) {
    for written in &report.written {
        println!(
            "{} {} ({} blocks)",
            "✓".green(),
            written.path.display(),
            written.blocks
        );
    }

    for path in &report.removed {
        println!("{} Removed stale {}", "→".cyan(), path.display());
    }

    for skipped in &report.skipped {
        println!(
            "{} Skipped {} {}: {}",
            "⚠".yellow(),
            skipped.kind,
            skipped.record.yellow(),
            skipped.error
        );
    }

    for failed in &report.failed {
        println!("{} {} export failed: {}", "✗".red(), failed.kind, failed.error);
    }

    if report.is_success() {
        println!("\n{}", "✓ Export complete!".green().bold());
    }

    if verbose {
        let blocks: usize = report.written.iter().map(|w| w.blocks).sum();
        println!("\n{}", "Summary:".bold());
        println!("  Documents: {}", report.written.len());
        println!("  Blocks: {}", blocks);
        println!("  Skipped: {}", report.skipped.len());
        println!("  Failed passes: {}", report.failed.len());
    }
}

fn render_table_command(file: &Path) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let output: DescribeTableOutput = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse DescribeTable response {}", file.display()))?;

    let hcl = render_table(&output.table).context("Failed to build table block")?;
    print!("{}", hcl);

    Ok(())
}
