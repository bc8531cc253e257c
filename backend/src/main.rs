use std::{error::Error, net::SocketAddr, sync::Arc};

use backend::{
    AppState,
    config::{DEFAULT_API_BASE, DEFAULT_MODEL, GuideConfig},
    create_router,
    gemini::GeminiClient,
};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(author, version, about = "Acropolis tour guide backend")]
struct Args {
    /// Address the HTTP server listens on
    #[arg(long, env = "GUIDE_BIND", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// Gemini API key; guide calls fail until one is set
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,
}

impl Args {
    fn guide_config(&self) -> GuideConfig {
        GuideConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            api_base: self.api_base.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = args.guide_config();
    if config.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; guide requests will fail");
    }
    tracing::info!("using model {} at {}", config.model, config.api_base);

    let state = AppState {
        model: Arc::new(GeminiClient::new(config)),
    };
    let app = create_router(state);

    tracing::info!("starting backend on http://{}", args.bind);
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
