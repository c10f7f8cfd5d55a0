// Text rendering of the dashboard views
use crate::application::asset_collection::AssetCollection;
use crate::application::asset_detail::AssetDetailView;
use crate::application::layout_detail::LayoutDetailView;
use crate::application::loadable::Loadable;
use crate::domain::asset::IconKind;
use crate::domain::chart::{ChartSpec, ChartType};
use crate::domain::layout::{LayoutPreview, LayoutTemplate};
use std::fmt::Write;

const SKELETON_CELLS: usize = 4;
const BAR_WIDTH: f64 = 30.0;
const DEFAULT_TITLE: &str = "INTES";
const DEFAULT_DESCRIPTION: &str = "Descriptive name of the Layout";

fn icon_glyph(icon: IconKind) -> &'static str {
    match icon {
        IconKind::Chart => "[chart]",
        IconKind::Layout => "[layout]",
        IconKind::Document => "[doc]",
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}

pub fn render_collection(collection: &AssetCollection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", collection.title);
    if let Some(subtitle) = &collection.subtitle {
        let _ = writeln!(out, "{}", subtitle);
    }

    match collection.assets() {
        Loadable::Loading => {
            let _ = writeln!(out, "{}", vec!["[........]"; SKELETON_CELLS].join(" "));
        }
        Loadable::Empty => {
            let _ = writeln!(out, "No assets available.");
        }
        Loadable::Ready(assets) => {
            for asset in assets {
                let marker = match collection.selected() {
                    Some(selected) if selected.id == asset.id => ">",
                    _ => " ",
                };
                let _ = writeln!(
                    out,
                    "{} {} {} ({}) - {}",
                    marker,
                    icon_glyph(asset.kind.icon()),
                    asset.title,
                    asset.id,
                    asset.description
                );
            }
        }
    }
    out
}

fn render_chart(out: &mut String, chart: &ChartSpec) {
    let max = chart
        .points
        .iter()
        .map(|p| p.value.abs())
        .fold(0.0_f64, f64::max);
    let _ = writeln!(out, "  ({} chart)", chart.chart_type);

    match chart.chart_type {
        ChartType::Pie => {
            let total: f64 = chart.points.iter().map(|p| p.value.abs()).sum();
            for point in &chart.points {
                let share = if total > 0.0 { point.value.abs() / total * 100.0 } else { 0.0 };
                let _ = writeln!(out, "  {:<12} {:>5.1}%", point.name, share);
            }
        }
        ChartType::Bar | ChartType::Line | ChartType::Area => {
            let glyph = match chart.chart_type {
                ChartType::Line => "-",
                ChartType::Area => "░",
                _ => "█",
            };
            for point in &chart.points {
                let width = if max > 0.0 {
                    (point.value.abs() / max * BAR_WIDTH).round() as usize
                } else {
                    0
                };
                let _ = writeln!(out, "  {:<12} {} {}", point.name, glyph.repeat(width), point.value);
            }
        }
    }
}

pub fn render_asset_detail(view: &AssetDetailView, max_questions: usize) -> String {
    let Some(open) = view.current() else {
        return String::new();
    };
    let asset = open.asset();
    let mut out = String::new();

    let _ = writeln!(out, "{}", icon_glyph(asset.kind.icon()));
    let _ = writeln!(out, "{}", or_default(&asset.title, DEFAULT_TITLE));
    let _ = writeln!(out, "{}", or_default(&asset.description, DEFAULT_DESCRIPTION));

    let used = asset.used_count.map_or_else(|| "-".to_string(), |n| n.to_string());
    let updated = asset
        .last_updated
        .map_or_else(|| "-".to_string(), |d| d.format("%m/%d/%Y").to_string());
    let _ = writeln!(out, "Used Ct. {} | Type {} | Last Updated {}", used, asset.kind, updated);

    if open.detail().is_loading() {
        let _ = writeln!(out, "Loading chart...");
    } else if let Some(chart) = open.chart() {
        let buttons: Vec<String> = open
            .chart_type_options()
            .iter()
            .map(|o| if o.selected { format!("[{}]", o.label) } else { o.label.to_string() })
            .collect();
        let _ = writeln!(out, "Chart: {}", buttons.join(" "));
        render_chart(&mut out, &chart);
    }

    let _ = writeln!(out, "Business Questions");
    if open.business_questions().is_loading() {
        let _ = writeln!(out, "  Loading...");
    }
    for card in open.question_cards(max_questions) {
        let _ = writeln!(out, "  {}: {}", card.label, card.text);
    }

    let heart = if open.is_favorite() { "♥" } else { "♡" };
    let _ = writeln!(out, "{} Favorite Item", heart);
    out
}

fn render_preview(out: &mut String, preview: &LayoutPreview) {
    for (index, page) in preview.pages.iter().enumerate() {
        let _ = writeln!(out, "  Page {}", index + 1);
        for row in page {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(cell) => format!("[{} ({})]", cell.title, cell.chart_type),
                    None => "[ ]".to_string(),
                })
                .collect();
            let _ = writeln!(out, "    {}", cells.join(" "));
        }
    }
}

pub fn render_layout_detail(view: &LayoutDetailView, template: LayoutTemplate) -> String {
    let Some(open) = view.current() else {
        return String::new();
    };
    let layout = open.layout();
    let mut out = String::new();

    let _ = writeln!(out, "{}", icon_glyph(IconKind::Layout));
    let _ = writeln!(out, "{}", layout.title);
    let _ = writeln!(out, "{}", or_default(&layout.description, DEFAULT_DESCRIPTION));
    let _ = writeln!(out, "Pages No. {}", layout.pages);

    let rows = open.used_kpis();
    if !rows.is_empty() {
        let _ = writeln!(out, "Used KPIs");
        for row in &rows {
            let _ = writeln!(out, "  {} - {}", row.title, row.caption());
        }
    }

    if let Some(preview) = open.preview(template) {
        let _ = writeln!(out, "Layout Preview");
        render_preview(&mut out, &preview);
    }
    out
}
