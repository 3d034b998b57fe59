use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subtrans::cli::{Cli, Commands};
use subtrans::config::Config;
use subtrans::language::TargetLanguage;
use subtrans::pipeline::TranslationPipeline;
use subtrans::{output, server};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "subtrans=debug"
    } else {
        "subtrans=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Translate {
            url,
            to,
            from,
            output,
            format,
        } => {
            let mut pipeline = TranslationPipeline::new(&config)?;
            if let Some(source) = from {
                pipeline = pipeline.with_source_language(source);
            }

            let spinner = if cli.quiet {
                None
            } else {
                Some(progress_spinner(&url, to))
            };

            let result = pipeline.translate_from_url(&url, to).await;

            if let Some(spinner) = spinner {
                match &result {
                    Ok(_) => spinner.finish_with_message("Translation completed!"),
                    Err(_) => spinner.finish_and_clear(),
                }
            }
            let record = result?;

            match output {
                Some(path) => {
                    output::save_to_file(&record, &path, &format)?;
                    println!("Translation saved to: {}", path.display());
                }
                None => {
                    output::print_to_console(&record, &format)?;
                }
            }
        }
        Commands::Serve { bind } => {
            let mut config = config;
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            server::run(&config).await?;
        }
        Commands::Config { show } => {
            if show {
                config.display();
            } else {
                config.save()?;
                config.display();
            }
        }
        Commands::Languages => {
            println!("Supported target languages:");
            for language in TargetLanguage::all() {
                println!("  • {} ({})", language.label(), language.code());
            }
        }
    }

    Ok(())
}

fn progress_spinner(url: &str, target: TargetLanguage) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!(
        "Fetching and translating subtitles ({} -> {})...",
        url,
        target.code()
    ));
    spinner
}
