// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::thread;
use tracing::Instrument;
use tracing_subscriber::EnvFilter;

use the_conduit::backends::local::LocalProcessorFactory;
use the_conduit::config::{load_config, RuntimeBuilder};
use the_conduit::engine::relay::recv_or_cancel;
use the_conduit::engine::{Output, RunningPipeline};
use the_conduit::item::TextItem;
use the_conduit::observability::messages::{config::PipelineBuilt, StructuredLog};
use the_conduit::render::ProcessorGraph;
use the_conduit::traits::Processor;

const USAGE: &str = "\
Usage: the-conduit <pipeline.yaml> [--dump] [--graph FILE] [--stats] [text ...]

  --dump          print the pipeline as JSON and exit
  --graph FILE    write a mermaid graph of the pipeline (HTML when FILE ends in .html)
  --stats         collect per-processor statistics and print them as JSON after the run

With no text arguments, each line of stdin is one input item.
Set RUST_LOG to control diagnostics, e.g. RUST_LOG=the_conduit=debug.";

struct Args {
    config: PathBuf,
    dump: bool,
    graph: Option<PathBuf>,
    stats: bool,
    inputs: Vec<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut config = None;
    let mut dump = false;
    let mut graph = None;
    let mut stats = false;
    let mut inputs = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dump" => dump = true,
            "--stats" => stats = true,
            "--graph" => {
                let file = args.next().context("--graph needs a file name")?;
                graph = Some(PathBuf::from(file));
            }
            "-h" | "--help" => bail!(
                "{}\n\nLocal processors: {}",
                USAGE,
                LocalProcessorFactory::list_available_implementations().join(", ")
            ),
            _ if config.is_none() => config = Some(PathBuf::from(arg)),
            _ => inputs.push(arg),
        }
    }

    let config = config.with_context(|| format!("missing pipeline config\n\n{}", USAGE))?;
    Ok(Args {
        config,
        dump,
        graph,
        stats,
        inputs,
    })
}

/// Feeds the pipeline from a plain thread, so a parked stdin read never holds
/// up runtime shutdown.
fn spawn_feeder(input: Output<TextItem>, texts: Vec<String>) -> thread::JoinHandle<io::Result<()>> {
    thread::spawn(move || {
        if !texts.is_empty() {
            for text in texts {
                if input.send_blocking(TextItem::new(text)).is_err() {
                    break;
                }
            }
            return Ok(());
        }

        for line in io::stdin().lock().lines() {
            if input.send_blocking(TextItem::new(line?)).is_err() {
                break;
            }
        }
        Ok(())
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = parse_args(env::args().skip(1))?;

    let mut config = load_config(&args.config)
        .with_context(|| format!("could not load {}", args.config.display()))?;
    config.options.stats |= args.stats;
    let runtime = RuntimeBuilder::from_config(&config).context("could not build the pipeline")?;

    if args.dump {
        println!("{}", runtime.root.to_json()?);
        return Ok(());
    }

    if let Some(path) = &args.graph {
        let graph = ProcessorGraph::new(&runtime.root);
        let mut file = BufWriter::new(
            File::create(path).with_context(|| format!("could not create {}", path.display()))?,
        );
        let is_html = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
        if is_html {
            graph.write_html(&mut file)?;
        } else {
            graph.write(&mut file)?;
        }
        file.flush()?;
    }

    let token = runtime.context.cancellation_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    let root_name = runtime.root.name();
    let span = PipelineBuilt {
        root: &root_name,
        leaf_count: runtime.root.leaf_count(),
    }
    .span("pipeline_run");

    let ctx = runtime.context.clone();
    let RunningPipeline {
        input,
        output,
        handle,
    } = runtime.root.spawn(ctx.clone());
    let feeder = spawn_feeder(input, args.inputs);

    let mut stdout = io::stdout();
    let mut emitted = 0usize;
    async {
        while let Some(item) = recv_or_cancel(&ctx, &output).await {
            writeln!(stdout, "{}", item)?;
            emitted += 1;
        }
        io::Result::Ok(())
    }
    .instrument(span)
    .await?;

    if ctx.is_cancelled() {
        handle.abort();
        let _ = handle.await;
        while let Some(item) = output.try_recv() {
            writeln!(stdout, "{}", item)?;
            emitted += 1;
        }
    } else {
        handle.await.context("pipeline task failed")?;
    }

    // A feeder still parked on stdin is left behind; the process is exiting.
    if feeder.is_finished() {
        match feeder.join() {
            Ok(read) => read.context("failed to read input from stdin")?,
            Err(_) => bail!("input thread panicked"),
        }
    }

    if let Some(stats) = &runtime.stats {
        writeln!(stdout, "{}", stats.to_json()?)?;
    }

    if ctx.is_cancelled() {
        bail!("cancelled after {} output items", emitted);
    }

    Ok(())
}
