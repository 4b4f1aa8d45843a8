use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use whois_lookup_config::load as load_config;
use whois_lookup_core::{lookup, LookupRequest, LookupType};
use whois_lookup_gateway::{build_router, AppState};
use whois_lookup_runtime::{telemetry, LookupServices};

#[derive(Parser)]
#[command(name = "whois-lookup")]
#[command(about = "WHOIS lookup gateway (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Run a single lookup against the provider and print the summary as JSON
    Lookup {
        domain: String,
        #[arg(long = "type", value_parser = parse_lookup_type, default_value = "domain")]
        lookup_type: LookupType,
    },
}

fn parse_lookup_type(value: &str) -> Result<LookupType, String> {
    value
        .parse::<LookupType>()
        .map_err(|_| format!("unknown lookup type {value:?}; expected domain or contact"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::Lookup {
            domain,
            lookup_type,
        } => run_lookup(domain, lookup_type).await,
    }
}

async fn run_server() -> anyhow::Result<()> {
    info!("starting whois lookup gateway");

    let config = load_config().context("failed to load configuration")?;
    let services =
        LookupServices::initialise(&config).context("failed to initialise lookup services")?;

    let state = AppState::new(services.provider.clone());
    let app = build_router(state, &config.cors);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!("server is running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(whois_lookup_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("gateway shut down");
    Ok(())
}

async fn run_lookup(domain: String, lookup_type: LookupType) -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    let services =
        LookupServices::initialise(&config).context("failed to initialise lookup services")?;

    let request = LookupRequest::new(domain, lookup_type)?;
    let summary = lookup(&request, services.provider.as_ref()).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
