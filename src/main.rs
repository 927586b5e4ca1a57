use clap::Parser;
use pokemon_tcg_proxy::config::Config;
use pokemon_tcg_proxy::error::AppResult;
use pokemon_tcg_proxy::server;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Pokemon TCG API proxy - forwards card and set lookups with a server-side API key
#[derive(Parser, Debug)]
#[command(name = "pokemon-tcg-proxy")]
#[command(version)]
#[command(about = "Reverse proxy for the Pokemon TCG API", long_about = None)]
struct Cli {
    /// Host to bind to (overrides HOST env var)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides PORT env var)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Load configuration first so .env can set RUST_LOG and LOG_FORMAT
    let config = Config::from_env()?;

    init_tracing();

    let host = cli.host.unwrap_or_else(|| config.server.host.clone());
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", host, port);

    server::run_server(config, addr).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
