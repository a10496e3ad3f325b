use super::{Output, OutputArgs, runtime};
use crate::config::DexscopeConfig;
use crate::present::stdout_sink;
use crate::replay::{ReplaySource, feed_lines};
use crate::run::{StreamEnd, run_stream, shutdown_signal};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Args, Debug, Clone, Default)]
pub struct ReplayArgs {
    /// Newline-delimited messages; stdin when omitted or `-`
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let cfg = args.output.load_config()?;
    let output = args.output.resolve(&cfg.display);
    let source = ReplaySource::from_arg(args.file.as_deref());

    runtime()?.block_on(replay(source, cfg, output))
}

async fn replay(source: ReplaySource, cfg: DexscopeConfig, output: Output) -> Result<()> {
    let reader = source
        .open()
        .await
        .with_context(|| format!("failed to open replay source {source:?}"))?;

    let (tx, mut rx) = mpsc::channel(cfg.transport.channel_capacity);
    let feeder = tokio::spawn(feed_lines(reader, tx));

    let mut sink = stdout_sink(output.mode, output.color);
    let summary = run_stream(
        &mut rx,
        &mut sink,
        &cfg.latency,
        &cfg.display,
        shutdown_signal(),
    )
    .await?;

    if summary.end != StreamEnd::Closed {
        feeder.abort();
        return Ok(());
    }

    let lines = feeder.await.context("replay reader task failed")??;
    tracing::info!(lines, presented = summary.presented, "replay finished");
    Ok(())
}
