use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pegmon_dashboard::config::{self, DashboardConfig, Mode};
use pegmon_dashboard::dashboard::Dashboard;
use pegmon_dashboard::ingest::fetch::{Fetcher, ReqwestTransport};
use pegmon_dashboard::logging::{self, DataSource, LogLevel};
use pegmon_dashboard::render::RenderTarget;

#[derive(Parser)]
#[command(author, version, about = "Plot PEGELONLINE water levels for a destination area", long_about = None)]
struct Cli {
    /// TOML config file; defaults apply when omitted
    #[arg(short, long, env = "PEGMON_CONFIG")]
    config: Option<PathBuf>,

    /// Chart to build (overrides the config file)
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Destination area matched against station long names
    #[arg(short, long, env = "PEGMON_AREA")]
    area: Option<String>,

    /// Trailing time window in days
    #[arg(short, long)]
    days: Option<u32>,

    /// PEGELONLINE REST API base URL
    #[arg(long, env = "PEGMON_BASE_URL")]
    base_url: Option<String>,

    /// Write the chart to this HTML file instead of serving it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Address of the local display server
    #[arg(long, env = "PEGMON_BIND", default_value = "127.0.0.1:8050")]
    bind: SocketAddr,

    /// Build the chart and exit without serving it
    #[arg(long)]
    no_serve: bool,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => config::load_config(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => DashboardConfig::default(),
        };

        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(area) = &self.area {
            config.destination_area = area.clone();
        }
        if let Some(days) = self.days {
            config.time_range_days = days;
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }

        config.validate()?;
        Ok(config)
    }

    fn render_target(&self) -> RenderTarget {
        match (&self.output, self.no_serve) {
            (Some(path), _) => RenderTarget::File(path.clone()),
            (None, true) => RenderTarget::Memory,
            (None, false) => RenderTarget::Serve(self.bind),
        }
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    logging::init_logger(if cli.verbose { LogLevel::Debug } else { LogLevel::Info });

    let config = cli.load_config()?;

    if config.mode == Mode::Geographic {
        println!(
            "You selected the station map, an overview of every gauge in the catalog.\n\
             Switch the mode back to 'combined' or 'grid' to see the water levels.\n"
        );
    }

    logging::info(
        DataSource::Config,
        None,
        &format!(
            "mode={:?} area='{}' window={}d",
            config.mode, config.destination_area, config.time_range_days
        ),
    );

    let transport = ReqwestTransport::new(config.request_timeout())
        .context("building HTTP client")?;
    let fetcher = Fetcher::with_cache(transport, config.cache.build_store());
    let mut dashboard = Dashboard::new(config, fetcher);

    let figure = dashboard.run(&cli.render_target())?;
    logging::info(
        DataSource::Render,
        None,
        &format!("figure has {} traces", figure.data.len()),
    );

    Ok(())
}
