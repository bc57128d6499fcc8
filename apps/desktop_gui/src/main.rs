use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use client_core::config::{load_settings, DEFAULT_SETTINGS_FILE};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{theme, DecoderGuiApp};

#[derive(Parser, Debug)]
#[command(about = "Desktop client for the Linear B decoding service")]
struct Args {
    /// Base URL of the decoding service.
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file; defaults to ./decoder.toml, then the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Font file covering the Linear B Unicode block.
    #[arg(long)]
    glyph_font: Option<PathBuf>,
}

fn resolve_settings_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }
    let local = PathBuf::from(DEFAULT_SETTINGS_FILE);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("linear_b_decoder").join(DEFAULT_SETTINGS_FILE))
        .filter(|path| path.exists())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut settings = load_settings(resolve_settings_path(args.config).as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(glyph_font) = args.glyph_font {
        settings.glyph_font_path = Some(glyph_font);
    }
    tracing::info!(server = %settings.server_url, "starting decoder gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Linear B Decoder")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Linear B Decoder",
        options,
        Box::new(move |cc| {
            theme::apply_visuals(&cc.egui_ctx);
            match settings.glyph_font_path.as_deref() {
                Some(path) => {
                    if let Err(err) = theme::install_glyph_font(&cc.egui_ctx, path) {
                        tracing::warn!("{err:#}");
                    }
                }
                None => tracing::info!(
                    "no glyph font configured; Linear B signs may render as boxes"
                ),
            }
            Ok(Box::new(DecoderGuiApp::bootstrap(cmd_tx, ui_rx, &settings)))
        }),
    )
    .map_err(|err| anyhow!("decoder gui exited with error: {err}"))
}
