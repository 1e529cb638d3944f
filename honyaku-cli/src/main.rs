use std::io::Read;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use honyaku_config::{debug_enabled, ConfigLoader, EngineConfig, HonyakuConfig};
use honyaku_engine::{LibreTranslateBackend, TranslationBackend};
use honyaku_execution::{
    BackendFactory, DetachedProcessLauncher, Dispatcher, ExecutionError, TranslationService,
    WorkerDaemon,
};
use honyaku_ipc::QueueDir;

mod cli;
use cli::{Cli, Commands};

fn init_tracing(config: &HonyakuConfig) {
    // HONYAKU_DEBUG turns on lifecycle diagnostics regardless of the
    // configured level; HONYAKU_LOG takes precedence over both.
    let default_level = if debug_enabled() {
        "debug"
    } else {
        config.logging.level.as_filter()
    };
    let filter = EnvFilter::try_from_env("HONYAKU_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn backend_factory(engine: EngineConfig) -> BackendFactory {
    Box::new(move || {
        Arc::new(LibreTranslateBackend::new(
            engine.endpoint.clone(),
            engine.api_key.clone(),
            engine.source_lang.clone(),
            engine.target_lang.clone(),
            engine.timeout,
        )) as Arc<dyn TranslationBackend>
    })
}

/// Gather input text from arguments or stdin
fn gather_text(args: &[String]) -> Result<String> {
    if !args.is_empty() {
        return Ok(args.join(" "));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read text from stdin")?;
    if buffer.trim().is_empty() {
        bail!("no text supplied: pass it as arguments or on stdin");
    }
    Ok(buffer)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new()
        .load(cli.config.as_ref())
        .context("failed to load configuration")?;
    init_tracing(&config);

    let queue = QueueDir::new(config.queue.effective_dir());

    if let Some(Commands::Worker) = cli.command {
        let daemon = WorkerDaemon::new(
            queue,
            config.queue.scan_interval,
            backend_factory(config.engine),
        );
        daemon.run().await.context("worker daemon failed")?;
        return Ok(());
    }

    let launcher = Arc::new(DetachedProcessLauncher::from_current_exe()?);
    let dispatcher = Dispatcher::new(queue, config.worker, launcher);
    let service = TranslationService::new(dispatcher, backend_factory(config.engine));

    if cli.shutdown {
        match service.shutdown().await {
            Ok(()) => {
                eprintln!("worker shut down");
                return Ok(());
            }
            Err(ExecutionError::WorkerNotRunning) => {
                bail!("worker is not running");
            }
            Err(e) => return Err(e).context("failed to shut down worker"),
        }
    }

    let text = gather_text(&cli.text)?;
    let result = service
        .translate(&text, cli.verbose)
        .await
        .context("translation failed")?;

    if cli.verbose {
        eprintln!(
            "provider: {}  japanese: {}  took: {}ms",
            result.provider, result.was_japanese, result.duration_ms
        );
    }
    println!("{}", result.translated_text);
    Ok(())
}
