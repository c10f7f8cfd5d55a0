// Command-line surface over the dashboard views
use crate::application::asset_collection::AssetCollection;
use crate::application::asset_detail::AssetDetailView;
use crate::application::dashboard_service::DashboardService;
use crate::application::layout_detail::LayoutDetailView;
use crate::domain::asset::{Asset, AssetKind};
use crate::domain::chart::ChartType;
use crate::domain::layout::LayoutTemplate;
use crate::infrastructure::config::DashboardConfig;
use crate::presentation::render::{render_asset_detail, render_collection, render_layout_detail};
use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "asset-dashboard", about = "Browse dashboard assets, charts and layouts")]
pub struct Cli {
    /// Configuration file, without extension
    #[arg(long, env = "ASSET_DASHBOARD_CONFIG")]
    pub config: Option<String>,

    /// Serve assets from a JSON fixture instead of the HTTP API
    #[arg(long, env = "ASSET_DASHBOARD_FIXTURE")]
    pub fixture: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the asset grid for one asset type
    List {
        #[arg(value_parser = parse_kind)]
        kind: AssetKind,
    },
    /// Open an asset's detail view
    Show {
        #[arg(value_parser = parse_kind)]
        kind: AssetKind,
        id: String,
        /// Chart type to switch to; must be one the asset offers
        #[arg(long, value_parser = parse_chart_type)]
        chart: Option<ChartType>,
        #[arg(long)]
        favorite: bool,
    },
    /// Open a layout, or `new` for a blank one
    Layout {
        id: String,
        /// Preview grid as <columns>x<rows>
        #[arg(long)]
        template: Option<String>,
    },
}

fn parse_kind(s: &str) -> Result<AssetKind, String> {
    s.parse()
}

fn parse_chart_type(s: &str) -> Result<ChartType, String> {
    s.parse().map_err(|e: crate::domain::error::DashboardError| e.to_string())
}

fn collection_for(config: &DashboardConfig, kind: AssetKind) -> AssetCollection {
    match config.collections.iter().find(|c| c.kind == kind) {
        Some(c) => AssetCollection::new(c.title.clone(), c.subtitle.clone(), kind),
        None => AssetCollection::new(kind.as_str().to_uppercase(), None, kind),
    }
}

/// Run one command and return the rendered view.
pub async fn run(command: Command, service: &DashboardService, config: &DashboardConfig) -> anyhow::Result<String> {
    match command {
        Command::List { kind } => {
            let mut collection = collection_for(config, kind);
            service.load_collection(&mut collection).await;
            Ok(render_collection(&collection))
        }
        Command::Show {
            kind,
            id,
            chart,
            favorite,
        } => {
            let mut collection = collection_for(config, kind);
            service.load_collection(&mut collection).await;
            // Assets missing from the grid can still be opened by id
            let asset = match collection.select(&id) {
                Ok(asset) => asset.clone(),
                Err(e) => {
                    tracing::debug!("{}; opening by id", e);
                    Asset::new(id.as_str(), "", "", kind)
                }
            };

            let mut view = AssetDetailView::new();
            let rx = service.open_asset(&mut view, asset);
            let summary = DashboardService::settle(&mut view, rx).await;
            tracing::debug!("Detail view settled: {:?}", summary);

            if let Some(chart) = chart {
                view.select_chart_type(chart)?;
            }
            if favorite {
                view.toggle_favorite()?;
            }
            Ok(render_asset_detail(&view, config.detail.max_business_questions))
        }
        Command::Layout { id, template } => {
            let template: LayoutTemplate = template
                .as_deref()
                .unwrap_or(&config.detail.layout_template)
                .parse()
                .context("Invalid layout template")?;

            let mut view = LayoutDetailView::new();
            let layout_id = (id != "new").then_some(id.as_str());
            let rx = service.open_layout(&mut view, layout_id).await;
            DashboardService::settle(&mut view, rx).await;
            Ok(render_layout_detail(&view, template))
        }
    }
}
