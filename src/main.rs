use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use travel_captions::client::http::DEFAULT_ENDPOINT;
use travel_captions::client::{CaptionGenerator, HttpCaptionApi, Notice, SystemClipboard};
use travel_captions::models::Config;
use travel_captions::proxy::{self, CaptionProxy, ProxyConfig};

#[derive(Debug, Parser)]
#[command(name = "travel-captions")]
#[command(about = "Generate social-media captions for travel moments")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the caption proxy.
    Serve {
        /// Address to listen on.
        #[arg(long, env = "CAPTION_BIND_ADDR", default_value = "0.0.0.0:8787")]
        addr: SocketAddr,
    },
    /// Describe a travel moment and print generated captions.
    Generate {
        /// Free-text description of the moment.
        description: String,

        /// Caption proxy endpoint.
        #[arg(long, env = "CAPTION_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Copy the N-th caption (1-based) to the clipboard.
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
        copy: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travel_captions=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    match args.command {
        Command::Serve { addr } => {
            let config = Config::from_env();
            if config.api_key.is_none() {
                warn!("LOVABLE_API_KEY is not set; caption requests will fail until it is");
            }
            info!("Using model {} via {}", config.model, config.gateway_url);

            let proxy = Arc::new(CaptionProxy::new(ProxyConfig::from(config)));
            if let Err(e) = proxy::serve(addr, proxy).await {
                error!("Caption proxy stopped: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Generate {
            description,
            endpoint,
            copy,
        } => {
            let mut generator = CaptionGenerator::new(
                Box::new(HttpCaptionApi::new(endpoint)),
                Box::new(SystemClipboard::new()),
            );
            generator.set_description(description);

            println!("Generating...");
            let succeeded = generator.generate().await.is_ok();
            print_notices(generator.take_notices());
            if !succeeded {
                std::process::exit(1);
            }

            println!("Your Travel Captions");
            for (i, caption) in generator.captions().iter().enumerate() {
                println!("{:>2}. {}", i + 1, caption);
            }

            if let Some(n) = copy {
                if !generator.copy_caption_at(usize::from(n) - 1) {
                    bail!(
                        "No caption #{} (got {})",
                        n,
                        generator.captions().len()
                    );
                }
                print_notices(generator.take_notices());
            }
            Ok(())
        }
    }
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        if notice.is_destructive() {
            eprintln!("{}: {}", notice.title, notice.description);
        } else {
            println!("{}: {}", notice.title, notice.description);
        }
    }
}
