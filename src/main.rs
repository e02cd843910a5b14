/*
 *  main.rs
 *
 *  TrackMarq - now playing, writ small
 *  (c) 2023-26 TrackMarq contributors
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::time::Duration;

use anyhow::Result;
use env_logger::Env;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use trackmarq::config;
use trackmarq::config::SinkKind;
use trackmarq::mode::ModeCommand;
use trackmarq::panel::{NullPanel, PanelSink, TermPanel};
use trackmarq::rasterizer::MonoRasterizer;
use trackmarq::render::RenderLoop;
use trackmarq::status::StatusPoller;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Waits for SIGINT, SIGTERM, or SIGHUP so the select! in main can race the
/// render loop against shutdown.
async fn signal_handler() -> Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

/// Reads mode commands from stdin, one per line: "run", "start", "stop",
/// anything else becomes banner text. The surrounding service owns the
/// protocol; we just forward the latest command.
async fn command_reader(command_tx: watch::Sender<Option<ModeCommand>>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if let Some(cmd) = ModeCommand::parse(&line) {
            if command_tx.send(Some(cmd)).is_err() {
                break;
            }
        }
    }
    info!("command stream closed");
}

async fn run<S: PanelSink + 'static>(
    cfg: &config::Config,
    sink: S,
    command_rx: watch::Receiver<Option<ModeCommand>>,
) -> Result<()> {
    let poller = StatusPoller::spawn(
        cfg.status_command(),
        Duration::from_millis(cfg.poll_interval_ms()),
    );

    let render = RenderLoop::new(
        Box::new(MonoRasterizer),
        sink,
        poller.subscribe(),
        command_rx,
        cfg.fps(),
    );

    tokio::select! {
        _ = signal_handler() => {}
        result = render.run() => {
            if let Err(e) = result {
                warn!("render loop stopped: {}", e);
            }
        }
    }

    poller.shutdown().await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = config::load()?;

    let level = cfg.log_level.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    info!(
        "{} v{} (built {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE
    );
    info!("status command ....: {}", cfg.status_command());
    info!("poll interval .....: {}ms", cfg.poll_interval_ms());
    info!("frame rate ........: {} fps", cfg.fps());

    let (command_tx, command_rx) = watch::channel(None);
    tokio::spawn(command_reader(command_tx));

    match cfg.sink() {
        SinkKind::Term => run(&cfg, TermPanel::new(), command_rx).await,
        SinkKind::Null => run(&cfg, NullPanel, command_rx).await,
    }
}
