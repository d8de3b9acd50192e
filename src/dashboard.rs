/// The fetch → select → build → render pipeline.
///
/// `Dashboard` owns the config and the fetcher. `build_figure_at` runs the
/// pipeline for the configured mode and returns the figure; `run` also
/// delivers it to a render target.

use chrono::{DateTime, Duration, Utc};

use crate::alert;
use crate::analysis::series::build_series;
use crate::config::{DashboardConfig, Mode};
use crate::ingest::cache::CacheStore;
use crate::ingest::fetch::{Fetcher, Transport};
use crate::logging::{self, DataSource};
use crate::model::DashboardError;
use crate::render::combined::combined_figure;
use crate::render::geo::geographic_figure;
use crate::render::grid::grid_figure;
use crate::render::{ChartOptions, Figure, RenderTarget, deliver};
use crate::stations::{fetch_catalog, select_by_area};

pub struct Dashboard<T: Transport, S: CacheStore> {
    config: DashboardConfig,
    fetcher: Fetcher<T, S>,
}

impl<T: Transport, S: CacheStore> Dashboard<T, S> {
    pub fn new(config: DashboardConfig, fetcher: Fetcher<T, S>) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &Fetcher<T, S> {
        &self.fetcher
    }

    pub fn build_figure(&mut self) -> Figure {
        self.build_figure_at(Utc::now())
    }

    /// Run the pipeline with `now` as the end of the time window.
    pub fn build_figure_at(&mut self, now: DateTime<Utc>) -> Figure {
        let config = &self.config;
        let catalog = fetch_catalog(&mut self.fetcher, &config.base_url);

        if config.mode == Mode::Geographic {
            return geographic_figure(&catalog, &config.destination_area, config.map_center);
        }

        let selected = select_by_area(&catalog, &config.destination_area);
        logging::info(
            DataSource::Pegelonline,
            None,
            &format!(
                "{} of {} stations match '{}'",
                selected.len(),
                catalog.len(),
                config.destination_area
            ),
        );

        let series = build_series(
            &mut self.fetcher,
            &config.base_url,
            &selected,
            config.time_range_days,
        );

        let statuses = alert::assess_at(&series, &config.thresholds, config.stale_after_minutes, now);
        alert::log_status(&statuses);

        let window_start = now - Duration::days(config.time_range_days as i64);
        let options = ChartOptions {
            area: config.destination_area.clone(),
            y_range: config.y_range,
            fallback_span: (window_start.fixed_offset(), now.fixed_offset()),
        };

        match config.mode {
            Mode::Grid => grid_figure(&series, &config.thresholds, &options),
            _ => combined_figure(&series, &config.thresholds, &options),
        }
    }

    /// Build the figure and hand it to `target`. Blocks for `Serve`.
    pub fn run(&mut self, target: &RenderTarget) -> Result<Figure, DashboardError> {
        let figure = self.build_figure();
        deliver(figure, target)
    }
}
