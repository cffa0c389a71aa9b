use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

mod context;
mod routes;
mod server;

#[derive(Parser, Debug, Clone)]
#[command(name = "wardrobot")]
#[command(author, version, about = "Wardrobot - wardrobe catalog and outfit generation server")]
pub struct Args {
    /// Address to which the HTTP server will bind
    #[arg(long, default_value = "0.0.0.0:8080")]
    server_addr: String,

    /// Postgres connection URL.
    #[arg(long, default_value = "postgres://wardrobot@localhost:5432/wardrobot")]
    db_path: String,

    /// Endpoint of the zero-shot text classifier used to resolve event
    /// descriptions into occasion labels.
    #[arg(long, default_value = "http://127.0.0.1:8000/classify-text")]
    classifier_url: String,

    /// Seconds between laundry sweep ticks.
    #[arg(long, default_value = "60")]
    sweep_interval_secs: u64,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("wardrobot=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    info!(
        "Wardrobot starting. addr={}, sweep_interval={}s",
        args.server_addr, args.sweep_interval_secs
    );

    if let Err(e) = server::run_server(args).await {
        error!("Server error: {:?}", e);
    }

    info!("Main finished. Goodbye!");
    Ok(())
}
