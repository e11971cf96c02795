// Main entry point
use clap::Parser;
use colored::Colorize;
use translang::infrastructure::config::{self, load_config, Config, Logging};
use translang::interfaces::cli::Cli;
use translang::{Provider, TranslationDispatcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            eprintln!("\nInterrupted, shutting down...");
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();
    let mut config = load_config()?;

    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }

    apply_overrides(&mut config, &cli);

    if cli.status {
        print_status(&config);
        return Ok(());
    }

    let Some(target) = cli.target.as_deref() else {
        eprintln!("{}", "Please provide a target language with --to".red());
        std::process::exit(1);
    };

    let texts = match &cli.batch {
        Some(path) => tokio::fs::read_to_string(path)
            .await?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>(),
        None if cli.text.is_empty() => {
            eprintln!("{}", "Please provide text to translate".red());
            std::process::exit(1);
        }
        None => vec![cli.text.join(" ")],
    };

    let dispatcher = TranslationDispatcher::from_config(&config)?;

    let work = async {
        if cli.batch.is_none() {
            dispatcher.translate(&texts[0], target).await.map(|t| vec![t])
        } else if cli.parallel {
            dispatcher.translate_batch_parallel(&texts, target).await
        } else {
            dispatcher.translate_batch(&texts, target).await
        }
    };

    let translated = tokio::select! {
        result = work => result?,
        _ = shutdown_rx => {
            eprintln!("Translation interrupted");
            return Ok(());
        }
    };

    if cli.json {
        let items: Vec<_> = texts
            .iter()
            .zip(&translated)
            .map(|(source, text)| {
                serde_json::json!({
                    "source": source,
                    "target_lang": target,
                    "provider": dispatcher.provider().as_str(),
                    "text": text,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for text in &translated {
            println!("{}", text);
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(provider) = &cli.provider {
        config.provider = provider.clone();
    }
    if let Some(workers) = cli.workers {
        config.workers = workers.max(1);
    }
    if cli.nocache {
        config.cache = false;
    }
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = logging.path.as_deref().filter(|p| !p.is_empty()) {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .init();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn print_status(config: &Config) {
    println!("{}", "translang Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!("Provider: {}", config.provider);
    println!(
        "Cache: {}",
        if config.cache { "enabled" } else { "disabled" }
    );
    println!("Workers: {}", config.workers);

    for provider in [Provider::Google, Provider::Deepl, Provider::Chat, Provider::OpenAi] {
        let state = if !provider.requires_credential() {
            "No credential needed".normal()
        } else if config.has_credential(provider) {
            "Configured".green()
        } else {
            "Not configured".yellow()
        };
        println!("{} API: {}", provider, state);
    }

    match config.provider.parse::<Provider>() {
        Ok(provider) if !config.has_credential(provider) => {
            eprintln!(
                "{}",
                format!("Selected provider '{}' has no credential configured", provider).red()
            );
        }
        Ok(_) => {}
        Err(e) => eprintln!("{}", e.to_string().red()),
    }
}
