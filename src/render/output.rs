//! Render targets: where a finished figure goes.
//!
//! - `Memory` hands the figure back untouched (library use, tests).
//! - `File` writes a standalone HTML page.
//! - `Serve` runs a local web server until Ctrl-C.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, Json};
use axum::routing::get;
use axum::Router;

use crate::logging::{self, DataSource};
use crate::model::DashboardError;
use crate::render::Figure;

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone, PartialEq)]
pub enum RenderTarget {
    Memory,
    File(PathBuf),
    Serve(SocketAddr),
}

/// Send `figure` to `target` and return it.
///
/// `Serve` blocks until the server shuts down.
pub fn deliver(figure: Figure, target: &RenderTarget) -> Result<Figure, DashboardError> {
    match target {
        RenderTarget::Memory => {}
        RenderTarget::File(path) => write_html(&figure, path)?,
        RenderTarget::Serve(addr) => serve(&figure, *addr)?,
    }
    Ok(figure)
}

// ---------------------------------------------------------------------------
// HTML page
// ---------------------------------------------------------------------------

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Standalone page that draws `figure` with plotly.js from the CDN.
pub fn render_html(figure: &Figure) -> Result<String, DashboardError> {
    // "</" would end the <script> element early and "<!--" switches the
    // parser into its escaped state; neither may appear verbatim.
    let figure_json = serde_json::to_string(figure)?
        .replace("</", "<\\/")
        .replace("<!--", "\\u003c!--");
    let title = escape_html(figure.title().unwrap_or("Water levels"));

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:100vh;"></div>
<script>
const figure = {figure_json};
Plotly.newPlot("chart", figure.data, figure.layout, {{responsive: true}});
</script>
</body>
</html>
"#,
        title = title,
        cdn = PLOTLY_CDN,
        figure_json = figure_json,
    ))
}

pub fn write_html(figure: &Figure, path: &Path) -> Result<(), DashboardError> {
    let page = render_html(figure)?;
    std::fs::write(path, page).map_err(|source| DashboardError::RenderIo {
        path: path.display().to_string(),
        source,
    })?;
    logging::info(
        DataSource::Render,
        None,
        &format!("wrote {}", path.display()),
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Display server
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct PageState {
    page: Arc<String>,
    figure: Arc<Figure>,
}

async fn index(State(state): State<PageState>) -> Html<String> {
    Html(state.page.as_ref().clone())
}

async fn figure_json(State(state): State<PageState>) -> Json<Figure> {
    Json(state.figure.as_ref().clone())
}

fn router(figure: &Figure) -> Result<Router, DashboardError> {
    let state = PageState {
        page: Arc::new(render_html(figure)?),
        figure: Arc::new(figure.clone()),
    };
    Ok(Router::new()
        .route("/", get(index))
        .route("/figure.json", get(figure_json))
        .with_state(state))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    logging::info(DataSource::Render, None, "shutting down display server");
}

/// Serve the page on `addr` until Ctrl-C. Blocks the calling thread.
pub fn serve(figure: &Figure, addr: SocketAddr) -> Result<(), DashboardError> {
    let app = router(figure)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        logging::info(
            DataSource::Render,
            None,
            &format!("serving dashboard on http://{}", listener.local_addr()?),
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok::<(), std::io::Error>(())
    })?;

    Ok(())
}
