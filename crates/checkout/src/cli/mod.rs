use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use checkout::api::{config::DEFAULT_BASE_URL, ApiConfig, HttpCheckoutApi};
use checkout::lifecycle::CheckoutSystem;
use checkout::views::Route;
use tracing::info;

mod catalog;
mod purchase;

#[derive(Debug, Parser)]
#[command(name = "checkout", about = "Checkout client", long_about = None)]
pub(crate) struct Cli {
    /// Base URL of the checkout API, including the `/api` prefix
    #[arg(long, global = true, env = "CHECKOUT_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "CHECKOUT_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the catalogue
    Products,
    /// Show one product
    Product(catalog::ProductArgs),
    /// Place an order
    Order(purchase::OrderArgs),
    /// Approve the payment of an existing order
    Pay(purchase::PayArgs),
    /// Order a product and pay for it
    Checkout(purchase::CheckoutArgs),
    /// Show the screen behind a path such as `/products/101`
    Open {
        route: Route,
    },
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let config =
            ApiConfig::new(self.api_url).with_timeout(Duration::from_secs(self.timeout_secs));
        info!(base_url = %config.base_url, "Using checkout API");

        let api = HttpCheckoutApi::new(config)
            .map_err(|error| format!("failed to build HTTP client: {error}"))?;
        let system = CheckoutSystem::new(Arc::new(api));

        let result = match self.command {
            Commands::Products => catalog::list(&system).await,
            Commands::Product(args) => catalog::show(&system, args).await,
            Commands::Order(args) => purchase::order(&system, args).await,
            Commands::Pay(args) => purchase::pay(&system, args).await,
            Commands::Checkout(args) => purchase::checkout(&system, args).await,
            Commands::Open { route } => open(&system, route).await,
        };

        system
            .shutdown()
            .await
            .map_err(|error| format!("failed to shut down: {error}"))?;
        result
    }
}

async fn open(system: &CheckoutSystem, route: Route) -> Result<(), String> {
    match &route {
        Route::ProductList => catalog::list(system).await,
        Route::ProductOrder(id) => catalog::show_product(system, *id).await,
        Route::OrderComplete(id) => Err(format!(
            "{route} needs the amount to approve; run `checkout pay {id} <amount>`"
        )),
    }
}
