use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use auth_server::config::AppConfig;
use auth_server::startup;

#[derive(Parser, Debug)]
#[command(name = "auth-server")]
#[command(about = "User registration and login API server")]
struct Args {
    /// Configuration file path (default: config.yaml)
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config file)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration from specified file or use defaults
    let using_defaults =
        args.config == "config.yaml" && !std::path::Path::new("config.yaml").exists();
    let mut app_config = if using_defaults {
        AppConfig::default_config()
    } else {
        AppConfig::load_from_file(&args.config)?
    };

    // Override with command line arguments if provided
    if let Some(port) = args.port {
        app_config.server.port = port;
    }
    if let Some(host) = args.host {
        app_config.server.host = host;
    }

    tracing_subscriber::fmt()
        .with_max_level(app_config.logging.max_level()?)
        .init();

    if using_defaults {
        warn!("no config.yaml found, using in-memory SQLite; registered users are lost on exit");
    }
    if let Some(db_config) = &app_config.backend.database {
        info!(
            database = %db_config.db_type,
            password_algorithm = %app_config.password.algorithm,
            "configuration loaded"
        );
    }

    let app = startup::build_app(&app_config).await?;

    let host: std::net::IpAddr = app_config.server.host.parse().unwrap_or_else(|_| {
        warn!(host = %app_config.server.host, "invalid host address, using 127.0.0.1");
        [127, 0, 0, 1].into()
    });
    let addr = SocketAddr::from((host, app_config.server.port));

    let listener = TcpListener::bind(&addr).await?;
    info!("auth server listening on {}", addr);
    info!("  POST /api/register");
    info!("  POST /api/login");

    axum::serve(listener, app).await?;

    Ok(())
}
