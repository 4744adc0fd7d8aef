#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::path::Path;

use args::{Args, Command, GenerateArgs, TemplateAction};
use clap::Parser;
use promptsmith_composer::{Composer, DispatcherClient, FileStore, PromptCount, Template};
use promptsmith_config::Config;
use promptsmith_server::Server;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Serve { listen } => {
            let (path, explicit) = args.config_path();
            let mut config = Config::load_or_default(path, explicit)?;

            if let Some(listen) = listen {
                config.server.listen_address = Some(listen);
            }

            serve(&config, &args.log_level, path).await
        }
        Command::Generate(ref generate) => {
            let _telemetry_guard = promptsmith_telemetry::init(None, &args.log_level)?;
            run_generate(generate).await
        }
        Command::Template { ref store, ref action } => {
            let mut store = FileStore::open(store)?;

            match action {
                TemplateAction::Show { name } => {
                    println!("{}", name.system_prompt(&store));
                }
                TemplateAction::SetCustom { text } => {
                    Template::Custom.save_custom(&mut store, text)?;
                    println!("custom system prompt saved to {}", store.path().display());
                }
            }

            Ok(())
        }
    }
}

async fn serve(config: &Config, log_level: &str, config_path: &Path) -> anyhow::Result<()> {
    // Initialize telemetry
    let _telemetry_guard = promptsmith_telemetry::init(config.telemetry.as_ref(), log_level)?;

    tracing::info!(config_path = %config_path.display(), "starting promptsmith");

    // Build server
    let server = Server::new(config)?;

    // Set up graceful shutdown
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    // Run server
    server.serve(shutdown).await?;

    tracing::info!("promptsmith stopped");
    Ok(())
}

async fn run_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let client = DispatcherClient::new(&args.endpoint)?;
    let store = FileStore::open(&args.store)?;

    let mut composer = Composer::new(client, store);
    composer.set_provider(args.provider);
    if let Some(model) = &args.model {
        composer.set_model(model.as_str());
    }
    composer.set_template(args.template);
    composer.set_count(PromptCount::new(args.count)?);
    composer.set_api_key(args.api_key.clone());

    let results = composer.generate(&args.keyword).await?;
    println!("{results}");

    Ok(())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
