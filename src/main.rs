// SPDX-License-Identifier: MIT
//
// knob — build a control panel from a JSON description and drive it from
// the command line.
//
//   description.json ─┐
//   --load saved.json ┴→ PanelDescription → Panel → --set edits → output
//
// Saved state is applied to the description before the panel is built,
// so loaded values become the initial values and `--set` edits show up
// as modified rows.

mod cli;
mod render;

use std::fs;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Map, Value};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use knob_panel::{Panel, PanelDescription};

use crate::cli::{Assignment, Cli, OutputFormat};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("knob: {e:#}");
            process::exit(1);
        }
    }
}

/// Log to stderr at warn, debug or trace. `RUST_LOG` overrides.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<String> {
    let text = read(&cli.description)?;
    let description = PanelDescription::from_json(&text)
        .with_context(|| format!("parsing panel description {}", cli.description.display()))?;

    let saved = match &cli.load {
        Some(path) => {
            let text = read(path)?;
            let saved: Map<String, Value> = serde_json::from_str(&text)
                .with_context(|| format!("parsing saved state {}", path.display()))?;
            Some(saved)
        }
        None => None,
    };

    output(description, saved.as_ref(), &cli.set, cli.format)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Build, edit and render. Everything after file I/O.
fn output(
    mut description: PanelDescription,
    saved: Option<&Map<String, Value>>,
    edits: &[Assignment],
    format: OutputFormat,
) -> Result<String> {
    if let Some(saved) = saved {
        description.apply_saved(saved);
    }
    let mut panel = Panel::from_description(&description).context("building panel")?;
    info!(
        controllers = panel.controllers().count(),
        folders = panel.folders().count(),
        "panel built"
    );

    for edit in edits {
        debug!(path = %edit.path, value = %edit.value, "applying edit");
        panel
            .set(&edit.path, edit.value.clone())
            .with_context(|| format!("setting {}", edit.path))?;
    }

    Ok(match format {
        OutputFormat::Tree => render::tree(&panel),
        OutputFormat::Json => pretty(&Value::Object(panel.save()))?,
        OutputFormat::Description => pretty(&panel.describe())?,
    })
}

fn pretty<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value).context("serializing output")?;
    text.push('\n');
    Ok(text)
}
