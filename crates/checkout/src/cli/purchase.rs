use clap::Args;
use checkout::lifecycle::CheckoutSystem;
use checkout::model::{
    ApprovalAttempt, ApprovePaymentResponse, OrderId, PaymentKey, ProductId, UserId,
};
use checkout::payment_store::PaymentError;
use checkout::views::{format_amount, OrderCompleteView, ProductOrderView, Route};
use store_framework::ContainerClient;
use tracing::warn;

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    /// Product to order
    #[arg(long)]
    product_id: i64,

    /// Number of items
    #[arg(long, default_value_t = 1)]
    quantity: i32,

    /// Ordering user
    #[arg(long, env = "CHECKOUT_USER_ID", default_value_t = 1)]
    user_id: i64,
}

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    #[command(flatten)]
    order: OrderArgs,

    /// How often to retry a payment the gateway declined
    #[arg(long, default_value_t = 0)]
    retries: u32,
}

#[derive(Debug, Args)]
pub(crate) struct PayArgs {
    /// Order to pay for
    order_id: String,

    /// Amount to approve
    amount: i64,

    /// Payment key; generated when omitted
    #[arg(long)]
    payment_key: Option<String>,
}

async fn place_order(system: &CheckoutSystem, args: &OrderArgs) -> Result<Route, String> {
    let mut view = ProductOrderView::new(
        system.product_client.clone(),
        system.order_client.clone(),
        UserId(args.user_id),
    );
    view.mount(ProductId(args.product_id))
        .await
        .map_err(|error| format!("failed to load product {}: {error}", args.product_id))?;
    view.set_quantity(args.quantity);
    view.submit()
        .await
        .map_err(|error| format!("failed to place order: {error}"))
}

pub(crate) async fn order(system: &CheckoutSystem, args: OrderArgs) -> Result<(), String> {
    let route = place_order(system, &args).await?;
    if let Some(order) = system.order_client.snapshot().state.current_order {
        println!("order_id: {}", order.order_id);
        println!("total: {}", format_amount(order.total_amount));
        println!("status: {}", order.status);
    }
    println!("next: {route}");
    Ok(())
}

pub(crate) async fn pay(system: &CheckoutSystem, args: PayArgs) -> Result<(), String> {
    let payment_key = args
        .payment_key
        .map_or_else(PaymentKey::generate, |key| PaymentKey::from(key.as_str()));
    let attempt = ApprovalAttempt::new(OrderId(args.order_id), payment_key, args.amount);

    let response = system
        .payment_client
        .request_approval(attempt)
        .await
        .map_err(|error| format!("payment failed: {error}"))?;
    print_receipt(&response);
    Ok(())
}

pub(crate) async fn checkout(system: &CheckoutSystem, args: CheckoutArgs) -> Result<(), String> {
    let route = place_order(system, &args.order).await?;
    println!("order placed: {route}");

    let view = OrderCompleteView::new(system.order_client.clone(), system.payment_client.clone());
    let mut result = view.mount().await;
    let mut retries_left = args.retries;
    while let Err(PaymentError::Declined(error)) = &result {
        if retries_left == 0 {
            break;
        }
        retries_left -= 1;
        warn!(reason = %error, retries_left, "Payment declined, retrying");
        result = view.retry().await;
    }

    let response = result.map_err(|error| format!("payment failed: {error}"))?;
    println!("{}", view.render());
    print_receipt(&response);
    Ok(())
}

fn print_receipt(response: &ApprovePaymentResponse) {
    println!("payment_id: {}", response.payment_id);
    println!("payment_key: {}", response.payment_key);
    println!("amount: {}", format_amount(response.amount));
    println!("payment_status: {}", response.payment_status.as_str());
    println!("order_status: {}", response.order_status);
    println!("approved_at: {}", response.approved_at);
}
