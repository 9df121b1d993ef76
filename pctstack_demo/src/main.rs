// Copyright 2025 the pctstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A stand-in host for `pctstack_charts`.
//!
//! Usage: `pctstack_demo [payload.json] [out.svg]`
//!
//! The payload holds one update cycle plus optional clicks:
//!
//! ```json
//! {
//!   "dataset": { "categories": ["Jan"], "series": [{ "name": "Sales", "values": [100] }] },
//!   "viewport": { "width": 900, "height": 400 },
//!   "formatting": { "formatting": { "showSeriesNames": true } },
//!   "clicks": [{ "x": 120, "y": 200, "additive": false }]
//! }
//! ```
//!
//! Without a payload, a built-in sample is used and the first bar of the second column is
//! clicked. Set `PCTSTACK_LOG` (e.g. `debug`) to change log verbosity.

mod svg;

use std::path::PathBuf;

use kurbo::{Point, Size};
use pctstack_charts::{
    BAR_ID_BASE, Click, MemorySelectionService, SEGMENT_LABEL_ID_BASE, SelectionService,
    StackedColumnVisual, UpdateOptions,
};
use pctstack_transforms::{CategoryKey, Dataset, DatasetError, SeriesColumn};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[derive(Debug, Deserialize)]
struct Viewport {
    width: f64,
    height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 400.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ClickSpec {
    x: f64,
    y: f64,
    #[serde(default)]
    additive: bool,
}

#[derive(Debug, Default, Deserialize)]
struct Payload {
    #[serde(default)]
    dataset: Option<Dataset>,
    #[serde(default)]
    viewport: Viewport,
    #[serde(default)]
    formatting: serde_json::Value,
    #[serde(default)]
    clicks: Option<Vec<ClickSpec>>,
}

fn setup_logger() -> Result<(), DemoError> {
    let level = std::env::var("PCTSTACK_LOG")
        .ok()
        .and_then(|v| v.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn sample_dataset() -> Result<Dataset, DatasetError> {
    Dataset::new(
        ["São Paulo", "Rio de Janeiro", "Minas Gerais", "Rio Grande do Sul", "Bahia", "Amapá"]
            .into_iter()
            .map(CategoryKey::from)
            .collect(),
        vec![
            SeriesColumn::new(
                "Vendas",
                [4_200_000.0, 2_900_000.0, 1_800_000.0, 950_000.0, 610_000.0, 0.0],
            ),
            SeriesColumn::new(
                "Custos",
                [2_100_000.0, 1_700_000.0, 1_100_000.0, 820_000.0, 240_000.0, 0.0],
            ),
            SeriesColumn::new(
                "Impostos",
                [640_000.0, 410_000.0, 300_000.0, 95_000.0, 30_000.0, 0.0],
            ),
        ],
    )
}

fn load_payload(path: Option<&PathBuf>) -> Result<Payload, DemoError> {
    let Some(path) = path else {
        return Ok(Payload {
            dataset: Some(sample_dataset()?),
            ..Payload::default()
        });
    };
    let text = std::fs::read_to_string(path).map_err(|source| DemoError::Io {
        path: path.clone(),
        source,
    })?;
    let payload: Payload = serde_json::from_str(&text)?;
    if let Some(dataset) = &payload.dataset {
        dataset.validate()?;
    }
    Ok(payload)
}

fn run() -> Result<(), DemoError> {
    setup_logger()?;

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let payload_path = args.next();
    let out_path = args.next().unwrap_or_else(|| PathBuf::from("pctstack_demo.svg"));

    let payload = load_payload(payload_path.as_ref())?;
    let options = UpdateOptions {
        dataset: payload.dataset,
        viewport: Size::new(payload.viewport.width, payload.viewport.height),
        persisted: payload.formatting,
    };

    let mut host = MemorySelectionService::new();
    let mut visual = <StackedColumnVisual>::default();
    visual.update(&options, &host);
    log::info!(
        "rendered {} marks on a {}x{} surface",
        visual.scene().len(),
        visual.scene().size().width,
        visual.scene().size().height
    );

    let clicks = match payload.clicks {
        Some(clicks) => clicks
            .into_iter()
            .map(|c| Click {
                pos: Point::new(c.x, c.y),
                additive: c.additive,
            })
            .collect(),
        None => default_clicks(&visual),
    };
    for click in clicks {
        let request = visual.on_click(click);
        match pollster::block_on(request.send(&mut host)) {
            Ok(()) => {
                let state = visual.apply_selection(&host.selection());
                log::info!(
                    "click at ({}, {}): {:?}, {} selected",
                    click.pos.x,
                    click.pos.y,
                    state,
                    host.selection().len()
                );
            }
            Err(err) => log::warn!("click at ({}, {}) failed: {err}", click.pos.x, click.pos.y),
        }
    }

    std::fs::write(&out_path, svg::scene_to_svg(visual.scene())).map_err(|source| {
        DemoError::Io {
            path: out_path.clone(),
            source,
        }
    })?;
    log::info!("wrote {}", out_path.display());

    let model = serde_json::to_string_pretty(&visual.get_formatting_model())?;
    log::debug!("formatting model:\n{model}");
    Ok(())
}

/// Clicks the bottom bar of the second column, or the first bar if there is one column.
fn default_clicks(visual: &StackedColumnVisual) -> Vec<Click> {
    let mut bars = visual
        .scene()
        .sorted()
        .into_iter()
        .filter(|m| (BAR_ID_BASE..SEGMENT_LABEL_ID_BASE).contains(&m.id.0))
        .filter_map(|m| m.as_rect().map(|r| r.rect));
    let Some(first) = bars.next() else {
        return Vec::new();
    };
    let target = bars.find(|r| r.x0 != first.x0).unwrap_or(first);
    vec![Click::at(target.center())]
}

fn main() {
    if let Err(err) = run() {
        eprintln!("pctstack_demo: {err}");
        std::process::exit(1);
    }
}
