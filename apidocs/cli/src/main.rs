use apidocs_cli::Cli;
use apidocs_lib::{WatchTarget, build, run_serve, run_watch};
use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber based on verbosity level.
///
/// Verbosity levels:
/// - 0 (default): WARN, plus INFO from apidocs (build summaries, server address)
/// - 1 (-v): DEBUG from apidocs (catalog loading, copied assets, watch events)
/// - 2 (-vv): TRACE from apidocs, DEBUG elsewhere (HTTP requests)
/// - 3+ (-vvv): as above with file/line numbers
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn,apidocs=info,apidocs_lib=info".to_string(),
            1 => "info,apidocs=debug,apidocs_lib=debug".to_string(),
            _ => "debug,apidocs=trace,apidocs_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose > 0)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Resolves when the user presses Ctrl-C.
async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.site_config();
    config
        .preflight()
        .wrap_err("Cannot build without a shell template")?;

    if cli.serve {
        run_serve(config, ctrl_c())
            .await
            .wrap_err("Preview server stopped")?;
        return Ok(());
    }

    if cli.watch {
        let root = std::env::current_dir().wrap_err("Failed to resolve working directory")?;
        run_watch(config, vec![WatchTarget::recursive(root)], ctrl_c())
            .await
            .wrap_err("Watcher stopped")?;
        return Ok(());
    }

    build(&config).wrap_err("Build failed")?;
    Ok(())
}
