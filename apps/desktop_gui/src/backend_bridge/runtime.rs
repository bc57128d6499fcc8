//! Backend worker: owns the tokio runtime and the HTTP client, runs every
//! queued command as its own task and reports results as `UiEvent`s.

use std::{sync::Arc, thread};

use client_core::{
    reference::{load_examples, load_syllabary},
    transcribe_and_analyze, HttpDecoderClient, Settings,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                forward(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: failed to build runtime: {err}"),
                    )),
                );
                return;
            }
        };

        let api = match HttpDecoderClient::from_settings(&settings) {
            Ok(api) => Arc::new(api),
            Err(err) => {
                tracing::error!("failed to build decoder client: {err}");
                forward(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        err.to_string(),
                    )),
                );
                return;
            }
        };
        tracing::info!(server = %api.base_url(), "backend worker ready");
        forward(
            &ui_tx,
            UiEvent::Info(format!("Connected to {}", api.base_url())),
        );

        while let Ok(cmd) = cmd_rx.recv() {
            let api = Arc::clone(&api);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                run_command(api.as_ref(), cmd, &ui_tx).await;
            });
        }
        tracing::debug!("ui command queue closed; backend worker exiting");
    });
}

async fn run_command(api: &HttpDecoderClient, cmd: BackendCommand, ui_tx: &Sender<UiEvent>) {
    match cmd {
        BackendCommand::Transcribe { token, text } => {
            transcribe_and_analyze(api, &text, |step| {
                forward(ui_tx, UiEvent::Decode { token, step });
            })
            .await;
        }
        BackendCommand::LoadExamples => {
            let loaded = load_examples(api).await.map_err(|err| err.to_string());
            forward(ui_tx, UiEvent::ExamplesLoaded(loaded));
        }
        BackendCommand::LoadSyllabary => {
            let loaded = load_syllabary(api).await.map_err(|err| err.to_string());
            forward(ui_tx, UiEvent::SyllabaryLoaded(loaded));
        }
    }
}

fn forward(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => tracing::warn!("ui event queue is full; dropping event"),
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui event queue disconnected; dropping event")
        }
    }
}
