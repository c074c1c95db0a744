use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use spotlight::apps::AppDirectory;
use spotlight::automation::SystemAutomation;
use spotlight::config::Config;
use spotlight::dispatch::Dispatcher;
use spotlight::outputs::console::{render, render_history};
use spotlight::outputs::Notice;
use spotlight::services::llm::LlmClassifier;
use spotlight::Driver;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let config = Config::from_env().context("loading configuration")?;

    // One snapshot per process; no live refresh.
    let apps = Arc::new(AppDirectory::scan(&config.app_dirs));
    tracing::info!("Indexed {} applications", apps.len());

    let automation = Arc::new(SystemAutomation::new(&config.search_url));
    let dispatcher = Dispatcher::new(apps.clone(), automation);
    let classifier = Arc::new(LlmClassifier::new(config.llm.clone(), &config.media_app));

    let (notice_tx, mut notice_rx) = mpsc::channel(100);
    let (driver, input) = Driver::new(classifier, dispatcher, config.llm.timeout, notice_tx);

    let history = Arc::new(Mutex::new(Vec::<String>::new()));

    // Presentation: print notices as they arrive.
    let printer_history = history.clone();
    let printer = tokio::spawn(async move {
        while let Some(notice) = notice_rx.recv().await {
            if let Notice::History(entries) = &notice {
                *printer_history.lock().await = entries.clone();
            }
            if let Some(line) = render(&notice) {
                println!("{}", line);
            }
        }
    });

    // Stdin reader. `?text` lists suggestions, `!N` reruns history entry N,
    // `:history` lists history.
    tokio::spawn(async move {
        let stdin = tokio::io::stdin();
        let mut lines = BufReader::new(stdin).lines();

        println!("What can I do for you?");

        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim_end_matches(['\r', '\n']);

            if let Some(partial) = line.strip_prefix('?') {
                for suggestion in apps.suggest(partial) {
                    println!("  {}", suggestion);
                }
                continue;
            }
            if line.trim() == ":history" {
                println!("{}", render_history(&history.lock().await));
                continue;
            }
            let sent = match line.strip_prefix('!').and_then(|n| n.trim().parse::<usize>().ok()) {
                Some(index) => input.rerun(index).await,
                None => input.submit(line).await,
            };
            if !sent {
                tracing::error!("Pipeline stopped accepting input");
                break;
            }
        }
    });

    let report = driver.run().await;
    let _ = printer.await;

    let cache = &report.telemetry.cache_stats;
    tracing::info!(
        "Session ended: {} command(s) in history, cache hits {} / misses {}",
        report.session.history.len(),
        cache.hits,
        cache.misses
    );
    Ok(())
}
