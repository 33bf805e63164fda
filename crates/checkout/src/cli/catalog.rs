use clap::Args;
use checkout::lifecycle::CheckoutSystem;
use checkout::model::{ProductId, UserId};
use checkout::views::{ProductListView, ProductOrderView};

#[derive(Debug, Args)]
pub(crate) struct ProductArgs {
    /// Product id
    id: i64,
}

pub(crate) async fn list(system: &CheckoutSystem) -> Result<(), String> {
    let view = ProductListView::new(system.product_client.clone());
    view.mount()
        .await
        .map_err(|error| format!("failed to load products: {error}"))?;
    println!("{}", view.render());
    Ok(())
}

pub(crate) async fn show(system: &CheckoutSystem, args: ProductArgs) -> Result<(), String> {
    show_product(system, ProductId(args.id)).await
}

pub(crate) async fn show_product(system: &CheckoutSystem, id: ProductId) -> Result<(), String> {
    let view = ProductOrderView::new(
        system.product_client.clone(),
        system.order_client.clone(),
        UserId(0),
    );
    let product = view
        .mount(id)
        .await
        .map_err(|error| format!("failed to load product {id}: {error}"))?;

    println!("{}", view.render());
    println!("base price: {}", checkout::views::format_amount(product.base_price));
    println!("on sale: {}", if product.is_orderable() { "yes" } else { "no" });
    println!("listed since: {}", product.created_at);
    Ok(())
}
