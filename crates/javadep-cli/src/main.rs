mod display;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use javadep_core::{DocumentationConfig, Report};
use javadep_fetch::HttpFetcher;
use javadep_parser::{Extractor, JavadocExtractor, LegacyRegexExtractor};
use javadep_pipeline::{DEFAULT_WORKERS, Pipeline, PipelineOptions};
use javadep_store::{DEFAULT_CACHE_FILE, DEFAULT_MAX_AGE_HOURS};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "javadep", version)]
#[command(about = "Report deprecated Javadoc symbols grouped by the version that deprecated them")]
struct Cli {
    /// Replay the cached snapshot when it is fresh enough
    #[arg(short, long)]
    cache: bool,

    /// Directory for the report and the cache file
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Report file name inside the output directory
    #[arg(short, long, default_value = "deprecations-report.json")]
    file: String,

    /// Documentation root, without the version segment
    #[arg(long, env = "JAVADEP_BASE_URL", default_value = "https://jd.papermc.io/paper")]
    base_url: String,

    /// Documentation version segment
    #[arg(long, env = "JAVADEP_DOC_VERSION", default_value = "1.21.3")]
    doc_version: String,

    /// Concurrent detail-page workers
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Cache age in hours after which it is refetched
    #[arg(long, default_value_t = DEFAULT_MAX_AGE_HOURS)]
    max_age_hours: i64,

    /// Per-request timeout in seconds (none by default)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// How detail pages are parsed
    #[arg(long, value_enum, default_value_t = ExtractorKind::Tree)]
    extractor: ExtractorKind,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ExtractorKind {
    /// Walk the parsed document and match the member's own section
    Tree,
    /// Regex over raw markup, first `since` on the page
    Legacy,
}

impl ExtractorKind {
    fn build(self) -> Arc<dyn Extractor> {
        match self {
            ExtractorKind::Tree => Arc::new(JavadocExtractor::new()),
            ExtractorKind::Legacy => Arc::new(LegacyRegexExtractor::new()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    info!("javadep v{}", env!("CARGO_PKG_VERSION"));

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("creating output directory {}", cli.output_dir.display()))?;

    let config = Arc::new(DocumentationConfig::new(
        &cli.base_url,
        &cli.doc_version,
        cli.cache,
    ));
    let fetcher = match cli.timeout_secs {
        Some(secs) => HttpFetcher::with_timeout(Arc::clone(&config), Duration::from_secs(secs))
            .context("building HTTP client")?,
        None => HttpFetcher::new(Arc::clone(&config)),
    };

    let options = PipelineOptions {
        cache_path: cli.output_dir.join(DEFAULT_CACHE_FILE),
        max_age: chrono::Duration::hours(cli.max_age_hours),
        workers: cli.workers,
        ..PipelineOptions::default()
    };
    let pipeline = Pipeline::new(
        Arc::clone(&config),
        Arc::new(fetcher),
        cli.extractor.build(),
        options,
    );

    let output = pipeline.run().await.context("extracting deprecations")?;
    display::print_report(&output.report, &config, output.from_cache);

    let report_path = cli.output_dir.join(&cli.file);
    write_report(&output.report, &report_path)?;
    info!(path = %report_path.display(), items = output.report.item_count(), "wrote report");

    if let Some(e) = output.cache_error {
        error!(error = %e, "cache was not saved");
        return Err(e).context("saving cache");
    }
    Ok(())
}

fn write_report(report: &Report, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("encoding report")?;
    std::fs::write(path, json).with_context(|| format!("writing report {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use javadep_core::DeprecationRecord;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["javadep"]).unwrap();
        assert!(!cli.cache);
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert_eq!(cli.file, "deprecations-report.json");
        assert_eq!(cli.workers, DEFAULT_WORKERS);
        assert_eq!(cli.max_age_hours, DEFAULT_MAX_AGE_HOURS);
        assert_eq!(cli.timeout_secs, None);
        assert_eq!(cli.extractor, ExtractorKind::Tree);
    }

    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from(["javadep", "-c", "-o", "out", "-f", "r.json"]).unwrap();
        assert!(cli.cache);
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.file, "r.json");
    }

    #[test]
    fn long_flags() {
        let cli = Cli::try_parse_from([
            "javadep",
            "--base-url",
            "https://example.org/docs/",
            "--doc-version",
            "1.20.4",
            "--workers",
            "2",
            "--timeout-secs",
            "30",
            "--extractor",
            "legacy",
        ])
        .unwrap();
        assert_eq!(cli.base_url, "https://example.org/docs/");
        assert_eq!(cli.doc_version, "1.20.4");
        assert_eq!(cli.workers, 2);
        assert_eq!(cli.timeout_secs, Some(30));
        assert_eq!(cli.extractor, ExtractorKind::Legacy);
    }

    #[test]
    fn unknown_extractor_rejected() {
        assert!(Cli::try_parse_from(["javadep", "--extractor", "dom"]).is_err());
    }

    #[test]
    fn report_written_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let records = vec![DeprecationRecord::found("a.B.m()", Some("1.0".into()))];
        write_report(&Report::from_records(&records, Utc::now()), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(value.get("groups").is_some());
    }
}
