//! `tradeview`: harvests the consignee, shipper and shipment tables of one
//! entity and prints or stores the run report.

mod config;
mod logging;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use engine_logging::engine_info;
use log::LevelFilter;
use tradeview_core::{RunReport, RunResult};
use tradeview_engine::{login, Harvester, PageDriver, ReportWriter, StaticSiteDriver};

use crate::config::{credentials_from_env, HarvestConfig, SiteManifest};
use crate::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "tradeview",
    about = "Harvest trade records of one entity across its consignee, shipper and shipment views",
    version
)]
struct Cli {
    /// Permanent id of the entity to harvest.
    #[arg(long)]
    entity: String,

    /// RON file with settings, selectors and report target.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay saved pages listed in a RON manifest instead of browsing live.
    #[arg(long, conflicts_with = "browser", required_unless_present = "browser")]
    replay: Option<PathBuf>,

    /// Drive a headless Chromium (requires the `chromium` feature).
    #[arg(long)]
    browser: bool,

    /// Sign in first, with credentials from TRADEVIEW_EMAIL / TRADEVIEW_PASSWORD.
    #[arg(long)]
    login: bool,

    /// Directory to write `<entity>.json` into. Prints to stdout when absent.
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    log: LogDestination,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(cli.log, level);

    let config = match &cli.config {
        Some(path) => HarvestConfig::load(path)?,
        None => HarvestConfig::default(),
    };

    let run = match &cli.replay {
        Some(manifest) => replay(manifest, &config, &cli).await?,
        None => browse(&config, &cli).await?,
    };

    let report = RunReport::new(&run, &config.report, chrono::Utc::now().to_rfc3339());
    match &cli.output {
        Some(dir) => {
            let path = ReportWriter::new(dir.clone())
                .write(&report)
                .context("failed to write run report")?;
            engine_info!("report written to {:?}", path);
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

async fn replay(manifest: &Path, config: &HarvestConfig, cli: &Cli) -> anyhow::Result<RunResult> {
    let (manifest_file, root) = SiteManifest::load(manifest)?;
    let site = manifest_file.into_site(&root)?;
    engine_info!("replaying {} saved pages from {:?}", site.len(), manifest);

    let harvester = Harvester::new(
        StaticSiteDriver::new(site),
        config.view_urls()?,
        config.selectors.clone(),
        config.settings.clone(),
    );
    harvest(&harvester, config, cli).await
}

#[cfg(feature = "chromium")]
async fn browse(config: &HarvestConfig, cli: &Cli) -> anyhow::Result<RunResult> {
    use engine_logging::engine_warn;
    use tradeview_engine::chromium::ChromiumDriver;

    let urls = config.view_urls()?;
    let driver = ChromiumDriver::launch(true)
        .await
        .context("failed to start Chromium")?;
    let harvester = Harvester::new(
        driver,
        urls,
        config.selectors.clone(),
        config.settings.clone(),
    );
    let run = harvest(&harvester, config, cli).await;
    if let Err(err) = harvester.into_driver().close().await {
        engine_warn!("browser did not close cleanly: {}", err);
    }
    run
}

#[cfg(not(feature = "chromium"))]
async fn browse(_config: &HarvestConfig, _cli: &Cli) -> anyhow::Result<RunResult> {
    anyhow::bail!("--browser needs a build with the `chromium` feature")
}

async fn harvest<D: PageDriver>(
    harvester: &Harvester<D>,
    config: &HarvestConfig,
    cli: &Cli,
) -> anyhow::Result<RunResult> {
    if cli.login {
        let credentials = credentials_from_env()?;
        login(
            harvester.driver(),
            &credentials,
            config.login_url(),
            &config.selectors,
            &config.settings,
        )
        .await
        .context("login failed")?;
    }
    Ok(harvester.run(&cli.entity).await)
}
