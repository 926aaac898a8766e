//! Run command implementation
//!
//! Resolves the simulation configuration, runs the engine in the configured
//! precision, and reports aggregate metrics plus the batch-mean histogram.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use sim_core::Precision;
use sim_engine::aggregate::{
    AggregateMetrics, Aggregator, Histogram, DEFAULT_BAR_WIDTH, DEFAULT_BINS,
};
use sim_engine::config::SimulationConfig;
use sim_engine::engine::{BatchMetrics, SimulationEngine};
use tracing::info;

use crate::config::{build_config, SimulationSettings};
use crate::{CliError, Result};

/// Arguments of `simctl run`
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Total number of simulations
    #[arg(short = 'n', long)]
    pub simulations: Option<usize>,

    /// Simulations per batch
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Number of simulated variables
    #[arg(short = 'k', long)]
    pub variables: Option<usize>,

    /// Random seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Sample storage precision (f32, f64)
    #[arg(short, long)]
    pub precision: Option<Precision>,

    /// Draws prefetched per variable on each cache refill
    #[arg(long)]
    pub cache_size: Option<usize>,

    /// Worker thread cap
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Log progress every N batches
    #[arg(long)]
    pub log_interval: Option<usize>,

    /// Confidence level in (0, 1)
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Advisory memory budget in bytes
    #[arg(long)]
    pub memory_limit: Option<usize>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Write histogram bins to this CSV file
    #[arg(long)]
    pub histogram_csv: Option<PathBuf>,

    /// Skip the text histogram
    #[arg(long)]
    pub no_plot: bool,

    /// Number of histogram bins
    #[arg(long, default_value_t = DEFAULT_BINS)]
    pub bins: usize,
}

impl RunArgs {
    /// Simulation overrides given on the command line
    pub fn settings(&self) -> SimulationSettings {
        SimulationSettings {
            n_simulations: self.simulations,
            batch_size: self.batch_size,
            n_variables: self.variables,
            confidence_level: self.confidence,
            memory_limit_bytes: self.memory_limit,
            precision: self.precision,
            seed: self.seed,
            cache_size: self.cache_size,
            max_workers: self.workers,
            log_interval: self.log_interval,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    fn parse(format: &str) -> Result<Self> {
        match format {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json",
                other
            ))),
        }
    }
}

fn histogram_aggregator(bins: usize) -> Result<Aggregator> {
    if bins == 0 {
        return Err(CliError::InvalidArgument(
            "--bins must be at least 1".to_string(),
        ));
    }
    Ok(Aggregator::new(bins, DEFAULT_BAR_WIDTH))
}

/// Machine-readable run report
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub n_simulations: usize,
    pub batch_size: usize,
    pub n_variables: usize,
    pub precision: &'static str,
    pub seed: u64,
    pub n_batches: usize,
    pub summary: AggregateMetrics,
    pub batches: &'a [BatchMetrics],
}

impl<'a> RunReport<'a> {
    fn new(
        config: &SimulationConfig,
        summary: AggregateMetrics,
        batches: &'a [BatchMetrics],
    ) -> Self {
        Self {
            n_simulations: config.n_simulations(),
            batch_size: config.batch_size(),
            n_variables: config.n_variables(),
            precision: config.precision().as_str(),
            seed: config.seed(),
            n_batches: batches.len(),
            summary,
            batches,
        }
    }
}

/// Run the simulation command
pub fn run(args: &RunArgs, file: &SimulationSettings) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;
    let aggregator = histogram_aggregator(args.bins)?;
    let env = SimulationSettings::from_env()?;
    let config = build_config(file, &env, &args.settings())?;

    info!("Starting simulation run...");
    info!("  Simulations: {}", config.n_simulations());
    info!("  Batch size: {}", config.batch_size());
    info!("  Variables: {}", config.n_variables());
    info!("  Precision: {}", config.precision());
    info!("  Seed: {}", config.seed());

    let results = run_engine(&config)?;

    let summary = aggregator.compute_aggregate_metrics(&results)?;
    log_summary(&summary, results.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => write_table(&mut out, &config, &summary, results.len())?,
        OutputFormat::Json => {
            let report = RunReport::new(&config, summary, &results);
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
    }

    if !args.no_plot {
        // stdout carries the JSON document, so the plot goes to stderr there.
        match format {
            OutputFormat::Table => {
                writeln!(out)?;
                aggregator.plot_results(&results, &mut out)?;
            }
            OutputFormat::Json => aggregator.plot_results(&results, &mut io::stderr().lock())?,
        }
    }

    if let Some(path) = &args.histogram_csv {
        match aggregator.histogram(&results) {
            Some(histogram) => {
                write_histogram_csv(path, &histogram)?;
                info!("Histogram bins written to {}", path.display());
            }
            None => info!("No finite batch means; histogram CSV not written"),
        }
    }

    info!("Run complete");
    Ok(())
}

fn run_engine(config: &SimulationConfig) -> Result<Vec<BatchMetrics>> {
    let results = match config.precision() {
        Precision::Single => SimulationEngine::<f32>::new(config.clone())?.run()?,
        Precision::Double => SimulationEngine::<f64>::new(config.clone())?.run()?,
    };
    Ok(results)
}

fn log_summary(summary: &AggregateMetrics, n_batches: usize) {
    info!("Simulation summary:");
    info!("  Batches: {}", n_batches);
    info!("  Overall mean: {:.6}", summary.overall_mean);
    info!("  Overall std: {:.6}", summary.overall_std);
    info!("  Min batch mean: {:.6}", summary.min_value);
    info!("  Max batch mean: {:.6}", summary.max_value);
}

/// Render the summary as a text table
pub fn write_table<W: Write>(
    out: &mut W,
    config: &SimulationConfig,
    summary: &AggregateMetrics,
    n_batches: usize,
) -> io::Result<()> {
    let rows = [
        ("Simulations", config.n_simulations().to_string()),
        ("Batches", n_batches.to_string()),
        ("Variables", config.n_variables().to_string()),
        ("Precision", config.precision().to_string()),
        ("Seed", config.seed().to_string()),
        ("Overall mean", format!("{:.6}", summary.overall_mean)),
        ("Overall std", format!("{:.6}", summary.overall_std)),
        ("Min mean", format!("{:.6}", summary.min_value)),
        ("Max mean", format!("{:.6}", summary.max_value)),
    ];

    writeln!(out, "┌──────────────┬──────────────┐")?;
    writeln!(out, "│ {:<12} │ {:>12} │", "Metric", "Value")?;
    writeln!(out, "├──────────────┼──────────────┤")?;
    for (label, value) in rows {
        writeln!(out, "│ {:<12} │ {:>12} │", label, value)?;
    }
    writeln!(out, "└──────────────┴──────────────┘")
}

/// Write histogram bins as CSV rows (`start,end,count,density`)
pub fn write_histogram_csv(path: &Path, histogram: &Histogram) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_histogram(file, histogram)
}

fn write_histogram<W: Write>(sink: W, histogram: &Histogram) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    for bin in histogram.bins() {
        writer.serialize(bin)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_config() -> SimulationConfig {
        SimulationConfig::builder()
            .n_simulations(8_000)
            .batch_size(1_000)
            .n_variables(2)
            .seed(42)
            .build()
            .unwrap()
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::parse("table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
        assert!(matches!(
            OutputFormat::parse("xml"),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_zero_bins_rejected() {
        assert!(matches!(
            histogram_aggregator(0),
            Err(CliError::InvalidArgument(_))
        ));
        assert_eq!(histogram_aggregator(12).unwrap().bins(), 12);

        let args = RunArgs {
            format: "table".to_string(),
            bins: 0,
            ..Default::default()
        };
        assert!(matches!(
            run(&args, &SimulationSettings::default()),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_args_to_settings() {
        let args = RunArgs {
            simulations: Some(20_000),
            workers: Some(2),
            precision: Some(Precision::Double),
            ..Default::default()
        };
        let settings = args.settings();

        assert_eq!(settings.n_simulations, Some(20_000));
        assert_eq!(settings.max_workers, Some(2));
        assert_eq!(settings.precision, Some(Precision::Double));
        assert_eq!(settings.batch_size, None);
    }

    #[test]
    fn test_run_engine_both_precisions() {
        let single = run_engine(&small_config()).unwrap();
        assert_eq!(single.len(), 8);

        let double_config = SimulationConfig::builder()
            .n_simulations(8_000)
            .batch_size(1_000)
            .n_variables(2)
            .precision(Precision::Double)
            .build()
            .unwrap();
        let double = run_engine(&double_config).unwrap();
        assert_eq!(double.len(), 8);
    }

    #[test]
    fn test_write_table() {
        let config = small_config();
        let results = run_engine(&config).unwrap();
        let summary = Aggregator::default()
            .compute_aggregate_metrics(&results)
            .unwrap();

        let mut out = Vec::new();
        write_table(&mut out, &config, &summary, results.len()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Overall mean"));
        assert!(text.contains("│ Batches      │            8 │"));
        assert!(text.contains("f32"));
    }

    #[test]
    fn test_json_report() {
        let config = small_config();
        let results = run_engine(&config).unwrap();
        let summary = Aggregator::default()
            .compute_aggregate_metrics(&results)
            .unwrap();

        let json = serde_json::to_value(RunReport::new(&config, summary, &results)).unwrap();

        assert_eq!(json["n_batches"], 8);
        assert_eq!(json["precision"], "f32");
        assert_eq!(json["batches"].as_array().unwrap().len(), 8);
        assert_relative_eq!(
            json["summary"]["overall_mean"].as_f64().unwrap(),
            summary.overall_mean
        );
    }

    #[test]
    fn test_histogram_csv() {
        let values = [0.0, 0.25, 0.5, 0.75, 1.0];
        let histogram = Histogram::density(&values, 2).unwrap();

        let mut buffer = Vec::new();
        write_histogram(&mut buffer, &histogram).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "start,end,count,density");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0.0,0.5,2,"));
        assert!(lines[2].starts_with("0.5,1.0,3,"));
    }
}
