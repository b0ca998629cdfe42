use std::process::ExitCode;

use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use service::view::{PharmaciesView, ProductsView};
use tracing::{error, info, warn};
use uuid::Uuid;

fn load_config() -> (AppConfig, Option<anyhow::Error>) {
    match AppConfig::load_and_validate() {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    }
}

fn init_logging(cfg: &AppConfig) {
    match cfg.logging.format {
        LogFormat::Compact => common::utils::logging::init_logging_default(&cfg.logging.filter),
        LogFormat::Json => common::utils::logging::init_logging_json(&cfg.logging.filter),
    }
    info!(service = "catalog", event = "logger_init", "tracing subscriber initialized");
}

/// Print the catalog, or with an email argument, one pharmacy and its products.
async fn run(cfg: AppConfig, email: Option<String>) -> anyhow::Result<()> {
    let store = service::runtime::open_catalog(&cfg.store).await?;

    if let Some(email) = email {
        let pharmacies = PharmaciesView::new(store.clone());
        let Some(pharmacy) = pharmacies.get_pharmacy_by_email(&email).await? else {
            warn!(%email, "no pharmacy with this email");
            println!("null");
            return Ok(());
        };
        let products = store.get_products_by_pharmacy(&pharmacy.id).await?;
        let report = serde_json::json!({ "pharmacy": pharmacy, "products": products });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let products = ProductsView::init(store.clone()).await;
    let pharmacies = PharmaciesView::new(store);
    pharmacies.fetch_pharmacies().await;

    let (products, pharmacies) = (products.state(), pharmacies.state());
    let report = serde_json::json!({
        "products": products.data,
        "pharmacies": pharmacies.data,
        "errors": [products.error, pharmacies.error],
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> ExitCode {
    // Load .env first so CONFIG_PATH, STORE_PATH and RUST_LOG take effect.
    dotenv().ok();
    let (cfg, config_error) = load_config();
    init_logging(&cfg);
    if let Some(e) = config_error {
        warn!(service = "catalog", event = "config_fallback", error = %e, "using default configuration");
    }

    let run_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "catalog",
            event = "panic",
            %run_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    info!(service = "catalog", event = "start", %run_id, pid, version, backend = ?cfg.store.backend, "catalog starting");

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "catalog", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    let email = std::env::args().nth(1);
    match rt.block_on(run(cfg, email)) {
        Ok(()) => {
            info!(service = "catalog", event = "stop", %run_id, "catalog finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "catalog", event = "run_failed", error = %e, "catalog run failed");
            ExitCode::FAILURE
        }
    }
}
