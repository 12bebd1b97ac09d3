use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wra_core::{Mode, ResearchRequest, Result, DEFAULT_RELATED_LIMIT};
use wra_web::AppState;
use wra_wiki::{ClientConfig, HttpWikiSource, ResearchPipeline};

mod export;

use export::OutputTarget;

#[derive(Parser, Debug)]
#[command(name = "wra", author, version, about = "Wikipedia research assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Research a topic: main article, related links, optional excerpts.
    Research {
        /// Topic to look up (spaces or underscores both work).
        topic: String,
        /// How much to collect per related article.
        #[arg(long, value_enum, default_value_t = Mode::Links)]
        mode: Mode,
        /// Maximum number of related articles.
        #[arg(long, default_value_t = DEFAULT_RELATED_LIMIT)]
        limit: usize,
        /// Keywords for filtered mode; an article matching any is kept.
        #[arg(long, num_args = 1..)]
        keywords: Vec<String>,
        /// Output destination: console, text file, or JSON file.
        #[arg(long, value_enum, default_value_t = OutputTarget::Console)]
        output: OutputTarget,
        /// HTTP timeout per request, in seconds.
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
    /// Serve the research API over HTTP.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
        /// HTTP timeout per upstream request, in seconds.
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
}

fn build_pipeline(timeout_secs: u64) -> Result<ResearchPipeline> {
    let source = HttpWikiSource::with_config(ClientConfig {
        timeout_secs,
        ..ClientConfig::default()
    })?;
    Ok(ResearchPipeline::new(Arc::new(source)))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Research {
            topic,
            mode,
            limit,
            keywords,
            output,
            timeout,
        } => {
            let pipeline = build_pipeline(timeout)?;
            let request = ResearchRequest {
                topic,
                mode,
                limit,
                keywords,
            };
            match pipeline.run(&request).await {
                Ok(result) => {
                    info!(
                        "✨ research on '{}' finished with {} related articles",
                        result.topic,
                        result.related.len()
                    );
                    export::write(&result, output)?;
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Serve { addr, timeout } => {
            let pipeline = build_pipeline(timeout)?;
            let state = AppState {
                pipeline: Arc::new(pipeline),
            };
            wra_web::serve(state, &addr).await?;
        }
    }

    Ok(())
}
