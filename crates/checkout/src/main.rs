//! # Checkout CLI
//!
//! Drives the checkout containers against a running API server.
//!
//! ```bash
//! checkout products
//! checkout product 101
//! checkout order --product-id 101 --quantity 2
//! checkout pay ORD-20251204-0001 258000
//! checkout checkout --product-id 101 --quantity 2
//! ```
//!
//! The server address, timeout and user id come from flags or from `CHECKOUT_API_URL`,
//! `CHECKOUT_TIMEOUT_SECS` and `CHECKOUT_USER_ID` (a `.env` file is read first).

use std::process;

use clap::Parser;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    checkout::lifecycle::setup_tracing();

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
