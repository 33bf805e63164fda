//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate. Every store
//! logs its lifecycle and each request with a `store` field naming the container, and the
//! client methods open a span per call.
//!
//! ## Configuration
//!
//! The compact format hides the module prefix (`with_target(false)`); levels come from
//! the `RUST_LOG` environment variable.
//!
//! ```bash
//! RUST_LOG=info checkout checkout --product-id 101 --quantity 2
//! RUST_LOG=debug checkout products
//! ```
//!
//! With `RUST_LOG=info` a successful checkout reads:
//!
//! ```text
//! INFO Store started store="ProductState"
//! INFO select_product: Product selected product_id=101
//! INFO select_product: Action ok store="ProductState"
//! INFO submit_order: Order created order_id=ORD-20251204-0001 event=OrderCreated
//! INFO request_approval: Payment approved order_id=ORD-20251204-0001 payment_id=10 order_status=PAID
//! INFO apply_payment: Payment applied order_id=ORD-20251204-0001 event=PaymentApproved status=PAID
//! ```
//!
//! `RUST_LOG=debug` adds the full action payloads and the request URLs.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // the `store` field names the container instead
        .compact()
        .init();
}
