//! Suite entry point.
//!
//! Built as a `harness = false` test binary so it runs under
//! `cargo test --package papertrade-suite --test e2e -- <args>`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use papertrade_harness::runner::{filter_by_name, filter_by_tag, Runner};
use papertrade_harness::{preflight, HarnessResult, Settings, SuiteReport};
use papertrade_suite::{all_cases, Category};

#[derive(Parser, Debug)]
#[command(name = "papertrade-e2e")]
#[command(about = "End-to-end UI test suite for the paper trading application")]
struct Args {
    /// Which slice of the suite to run
    #[arg(value_enum, default_value = "all")]
    category: Category,

    /// Run only cases whose name contains this substring
    #[arg(short, long)]
    filter: Option<String>,

    /// List the selected cases instead of running them
    #[arg(long)]
    list: bool,

    /// Concurrent browser sessions (the parallel category defaults to 4)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// UI origin of the application under test
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,

    /// API origin for the preflight health probe
    #[arg(long, env = "API_URL")]
    api_url: Option<String>,

    /// Run browsers with a visible window
    #[arg(long)]
    headed: bool,

    /// Where to write the JSON report
    #[arg(short, long)]
    report_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to start tokio runtime: {e}");
            return ExitCode::from(2);
        }
    };

    match runtime.block_on(run(args)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

async fn run(args: Args) -> HarnessResult<bool> {
    let mut settings = Settings::from_env();
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if args.headed {
        settings.headless = false;
    }
    let report_dir = args
        .report_dir
        .unwrap_or_else(|| PathBuf::from(&settings.report_dir));

    let mut cases = filter_by_tag(all_cases(), args.category.tag());
    if let Some(needle) = &args.filter {
        cases = filter_by_name(cases, needle);
    }

    if args.list {
        for case in &cases {
            let tags: Vec<&str> = case.tags.iter().map(|t| t.as_str()).collect();
            println!("{}  [{}]", case.name, tags.join(", "));
        }
        return Ok(true);
    }

    let jobs = args
        .jobs
        .unwrap_or(if args.category.is_parallel() { 4 } else { 1 });
    info!(
        category = ?args.category,
        selected = cases.len(),
        jobs,
        "suite selection ready"
    );

    let settings = settings.into_shared();
    preflight::check_app_reachable(&settings).await?;

    let report: SuiteReport = Runner::new(settings, jobs).run(cases).await?;
    report.write(&report_dir)?;

    Ok(report.all_passed())
}
