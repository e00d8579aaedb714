//! Faqbot: HTTP backend for the resort chatbot's FAQ store.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use faqbot_core::FaqConfig;
use faqbot_server::{build_router, open_store, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str);

    match command {
        None | Some("serve") => {}
        Some("--check" | "check") => {
            let config = load_config();
            let store = open_store(&config)?;
            let started = Instant::now();
            match store.ping().await {
                Ok(()) => {
                    println!(
                        "{} store reachable ({} ms)",
                        store.backend(),
                        started.elapsed().as_millis()
                    );
                    return Ok(());
                }
                Err(e) => {
                    eprintln!("{} store unreachable: {}", store.backend(), e);
                    std::process::exit(1);
                }
            }
        }
        Some("--help" | "-h" | "help") => {
            println!("Faqbot — resort chatbot FAQ service");
            println!();
            println!("Usage: faqbot [command]");
            println!();
            println!("Commands:");
            println!("  (none) | serve    Start the server");
            println!("  check             Probe the configured store once and exit");
            println!("  help              Show this help message");
            println!();
            println!("Environment:");
            println!("  PORT                        HTTP port (default 3000)");
            println!("  FAQ_STORE                   supabase (default) | sqlite");
            println!("  SUPABASE_URL                Project URL (supabase)");
            println!("  SUPABASE_SERVICE_ROLE_KEY   Service role key (supabase)");
            println!("  FAQ_DB_PATH                 Data directory (sqlite, default data)");
            println!("  FAQ_LIST_LIMIT              Rows returned by /api/faq/list (default 10)");
            println!("  FAQ_PARSE_RAW               Accept raw chat commands (default true)");
            println!("  FAQ_CATEGORY_LOOKUP         Use the category table (default true)");
            return Ok(());
        }
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'faqbot help' for usage.", other);
            std::process::exit(1);
        }
    }

    let config = load_config();
    let port = config.port;
    info!(
        "Store backend: {}, raw parsing: {}, category lookup: {}",
        config.backend.name(),
        config.parse_raw,
        config.category_lookup
    );

    let store = open_store(&config)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;

    let state = Arc::new(AppState::new(config, store));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Faqbot server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Load configuration or exit before any store call is attempted.
fn load_config() -> FaqConfig {
    match FaqConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
