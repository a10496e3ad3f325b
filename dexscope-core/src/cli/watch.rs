use super::{Output, OutputArgs, runtime};
use crate::config::DexscopeConfig;
use crate::present::stdout_sink;
use crate::run::{run_stream, shutdown_signal};
use crate::transport::{ShutdownHandle, TransportSession};
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct WatchArgs {
    /// WebSocket endpoint, overriding the config file
    #[arg(long)]
    pub endpoint: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: WatchArgs) -> Result<()> {
    let mut cfg = args.output.load_config()?;

    if let Some(endpoint) = args.endpoint {
        cfg.transport.endpoint = endpoint;
        cfg.validate()?;
    }

    let output = args.output.resolve(&cfg.display);

    runtime()?.block_on(watch(cfg, output))
}

async fn watch(cfg: DexscopeConfig, output: Output) -> Result<()> {
    let session = TransportSession::connect(&cfg.transport.endpoint).await?;

    let shutdown = ShutdownHandle::new();
    let (mut rx, reader) =
        session.into_channel(cfg.transport.channel_capacity, shutdown.subscribe());

    let mut sink = stdout_sink(output.mode, output.color);
    let summary = run_stream(
        &mut rx,
        &mut sink,
        &cfg.latency,
        &cfg.display,
        shutdown_signal(),
    )
    .await?;

    shutdown.trigger();
    drop(rx);

    reader
        .await
        .context("transport reader task failed")??;

    tracing::info!(presented = summary.presented, "watch finished");
    Ok(())
}
