//! @ai:module:intent CLI for GraphWalker benchmark reports
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gwbench_report::{
    benchmark::load_benchmark,
    config::{FilterConfig, ReportConfig},
    metrics::{filter_grouped_generators, StatisticsBuilder, StatisticsSummary},
    report::{CleanupConfirmation, ConfirmWith, ReportGenerator, ReportKind},
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "report.toml";

#[derive(Parser)]
#[command(name = "gwbench-report")]
#[command(about = "Statistics, charts and reports for GraphWalker generator benchmarks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a report for a benchmark directory
    Report {
        /// Benchmark directory holding one sub-directory per run
        #[arg(short, long)]
        benchmark: PathBuf,

        /// Output directory (defaults to the configured one)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report kind: raw_data, html or pdf
        #[arg(short, long)]
        kind: Option<String>,

        /// Only keep these generators (comma-separated)
        #[arg(long, value_delimiter = ',')]
        whitelist: Option<Vec<String>>,

        /// Drop these generators (comma-separated)
        #[arg(long, value_delimiter = ',')]
        blacklist: Option<Vec<String>>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Delete the PDF temporary directory without asking
        #[arg(short, long, conflicts_with = "keep_temp")]
        yes: bool,

        /// Keep the PDF temporary directory without asking
        #[arg(long)]
        keep_temp: bool,
    },

    /// Print the statistics of a benchmark directory
    Stats {
        /// Benchmark directory holding one sub-directory per run
        #[arg(short, long)]
        benchmark: PathBuf,

        /// Only keep these generators (comma-separated)
        #[arg(long, value_delimiter = ',')]
        whitelist: Option<Vec<String>>,

        /// Drop these generators (comma-separated)
        #[arg(long, value_delimiter = ',')]
        blacklist: Option<Vec<String>>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gwbench_report=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            benchmark,
            output,
            kind,
            whitelist,
            blacklist,
            config,
            yes,
            keep_temp,
        } => generate_report(ReportArgs {
            benchmark,
            output,
            kind,
            whitelist,
            blacklist,
            config,
            yes,
            keep_temp,
        }),
        Commands::Stats {
            benchmark,
            whitelist,
            blacklist,
            json,
        } => print_statistics(benchmark, build_filter(whitelist, blacklist), json),
        Commands::Init { output } => init_config(output),
    }
}

struct ReportArgs {
    benchmark: PathBuf,
    output: Option<PathBuf>,
    kind: Option<String>,
    whitelist: Option<Vec<String>>,
    blacklist: Option<Vec<String>>,
    config: Option<PathBuf>,
    yes: bool,
    keep_temp: bool,
}

/// @ai:intent Generate a report of the requested kind
/// @ai:effects fs:read, fs:write, io
fn generate_report(args: ReportArgs) -> Result<()> {
    let mut config = load_or_default_config(args.config)?;

    let kind: ReportKind = args
        .kind
        .as_deref()
        .unwrap_or(&config.report.kind)
        .parse()?;

    if args.whitelist.is_some() || args.blacklist.is_some() {
        config.filter = build_filter(args.whitelist, args.blacklist);
    }

    let output_dir = args.output.unwrap_or_else(|| config.report.output_dir.clone());

    let confirmation: Box<dyn CleanupConfirmation> = if args.yes {
        Box::new(ConfirmWith(true))
    } else if args.keep_temp {
        Box::new(ConfirmWith(false))
    } else {
        match config.pdf.delete_temp {
            Some(answer) => Box::new(ConfirmWith(answer)),
            None => Box::new(TerminalPrompt),
        }
    };

    let benchmark = load_benchmark(&args.benchmark)?;
    tracing::info!(
        "Loaded benchmark {} with {} generators",
        benchmark.name(),
        benchmark.report.generators.len()
    );

    let generator = ReportGenerator::from_config(&config);
    let written = generator.generate(&benchmark, kind, &output_dir, confirmation.as_ref())?;

    println!("Report generated in {} ({} files)", output_dir.display(), written.len());
    Ok(())
}

/// @ai:intent Print filtered statistics as a table or JSON
/// @ai:effects fs:read, io
fn print_statistics(benchmark_dir: PathBuf, filter: FilterConfig, json: bool) -> Result<()> {
    let benchmark = load_benchmark(&benchmark_dir)?;
    let grouped = benchmark.generators_grouped();
    let filtered = filter_grouped_generators(&grouped, &filter);
    let summary = StatisticsBuilder::build(
        benchmark.name(),
        benchmark.report.model,
        &filtered,
        &benchmark.run_groups,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

/// @ai:intent Print summary to console
/// @ai:effects io
fn print_summary(summary: &StatisticsSummary) {
    println!();
    println!("GraphWalker Benchmark: {}", summary.benchmark);
    println!("Model: {} vertices, {} edges", summary.model.vertices, summary.model.edges);
    println!();

    println!(
        "{:<20} {:>9} {:>5} {:>14} {:>12} {:>10} {:>10}",
        "Generator", "Coverage", "Runs", "Avg Time (μs)", "Avg Size", "Vertex %", "Edge %"
    );
    println!("{}", "-".repeat(86));

    for (generator, groups) in &summary.generators {
        for group in groups {
            println!(
                "{:<20} {:>9} {:>5} {:>14.2} {:>12.2} {:>10} {:>10}",
                generator,
                group.stop_coverage,
                group.run_count,
                group.average_generation_time,
                group.average_test_suite_size,
                format_percentage(group.vertex_visit_percentage),
                format_percentage(group.edge_visit_percentage),
            );
        }
    }

    if !summary.test_execution.is_empty() {
        println!();
        println!(
            "{:<20} {:>9} {:>16} {:>12} {:>12} {:>11}",
            "Generator", "Coverage", "Avg Test (μs)", "Min (μs)", "Max (μs)", "Successful"
        );
        println!("{}", "-".repeat(86));

        for group in &summary.test_execution {
            println!(
                "{:<20} {:>9} {:>16.2} {:>12} {:>12} {:>11}",
                group.algorithm,
                group.stop_coverage,
                group.average_test_duration,
                group.minimum_test_duration,
                group.maximum_test_duration,
                if group.successful_runs { "yes" } else { "no" },
            );
        }
    }
}

fn format_percentage(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "n/a".to_string())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = ReportConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<ReportConfig> {
    match path {
        Some(p) => ReportConfig::load(&p)
            .with_context(|| format!("Failed to load config: {}", p.display())),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);

            if default_path.exists() {
                ReportConfig::load(&default_path)
            } else {
                Ok(ReportConfig::default())
            }
        }
    }
}

/// @ai:intent Build filter from CLI arguments
/// @ai:effects pure
fn build_filter(whitelist: Option<Vec<String>>, blacklist: Option<Vec<String>>) -> FilterConfig {
    let trim = |names: Vec<String>| -> Vec<String> {
        names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect()
    };
    FilterConfig::new(whitelist.map(trim), blacklist.map(trim))
}

/// @ai:intent Ask on the terminal whether the PDF temporary directory should go
struct TerminalPrompt;

impl CleanupConfirmation for TerminalPrompt {
    /// @ai:effects io
    fn confirm(&self, temp_dir: &Path, files: &[PathBuf]) -> bool {
        println!("Temporary files in {}:", temp_dir.display());
        for file in files {
            println!("  {}", file.display());
        }

        let stdin = std::io::stdin();
        let mut line = String::new();

        loop {
            print!("Delete {}? [y/n] ", temp_dir.display());
            if std::io::stdout().flush().is_err() {
                return false;
            }

            line.clear();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => return false,
                Ok(_) => match line.trim().to_ascii_lowercase().as_str() {
                    "y" | "yes" => return true,
                    "n" | "no" => return false,
                    _ => println!("Please answer y or n"),
                },
            }
        }
    }
}
