use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use checkout::api::mock::{api_error, ApiCall, MockCheckoutApi};
use checkout::api::ClientError;
use checkout::lifecycle::CheckoutSystem;
use checkout::model::{
    ApiError, ApprovalAttempt, ApprovePaymentRequest, ApprovePaymentResponse, CreateOrderRequest,
    ErrorCode, Order, OrderDraft, OrderId, OrderStatus, PaymentKey, PaymentOutcome,
    PaymentStatus, Product, ProductId, UserId,
};
use checkout::order_store::OrderError;
use checkout::payment_store::PaymentError;
use checkout::product_store::ProductError;
use store_framework::ContainerClient;
use tokio::sync::oneshot;

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, 4)
        .and_then(|d| d.and_hms_opt(h, m, s))
        .unwrap()
}

fn vacuum() -> Product {
    Product {
        product_id: ProductId(101),
        name: "Wireless Vacuum Premium".to_string(),
        base_price: 150_000,
        discount_price: 129_000,
        available_stock: 50,
        available: true,
        created_at: at(10, 0, 0),
    }
}

fn purifier() -> Product {
    Product {
        product_id: ProductId(102),
        name: "Air Purifier".to_string(),
        base_price: 200_000,
        discount_price: 180_000,
        available_stock: 30,
        available: true,
        created_at: at(10, 0, 0),
    }
}

fn pending_order() -> Order {
    Order {
        order_id: OrderId::from("ORD-20251204-0001"),
        user_id: UserId(1),
        product_id: ProductId(101),
        quantity: 2,
        total_amount: 258_000,
        status: OrderStatus::PendingPayment,
        created_at: Some(at(12, 30, 0)),
        updated_at: None,
    }
}

fn approved(key: &PaymentKey) -> ApprovePaymentResponse {
    ApprovePaymentResponse {
        order_id: OrderId::from("ORD-20251204-0001"),
        payment_id: 10,
        payment_key: key.clone(),
        amount: 258_000,
        payment_status: PaymentStatus::Approved,
        order_status: OrderStatus::Paid,
        approved_at: at(12, 34, 56),
    }
}

fn setup() -> (Arc<MockCheckoutApi>, CheckoutSystem) {
    let mock = Arc::new(MockCheckoutApi::new());
    let system = CheckoutSystem::new(mock.clone());
    (mock, system)
}

/// Places the fixture order for two vacuums.
async fn place_order(mock: &MockCheckoutApi, system: &CheckoutSystem) -> Order {
    mock.expect_create_order().return_ok(pending_order());
    system
        .order_client
        .submit_order(OrderDraft::new(UserId(1), vacuum(), 2))
        .await
        .expect("order should be created")
}

#[tokio::test]
async fn test_product_load_raises_loading_flag_and_rejects_second_request() {
    let (mock, system) = setup();
    let (release, gate) = oneshot::channel();
    mock.expect_list_products()
        .wait_for(gate)
        .return_ok(vec![vacuum(), purifier()]);

    let client = system.product_client.clone();
    let pending = tokio::spawn(async move { client.load_products().await });

    let mut snapshots = system.product_client.inner().subscribe();
    snapshots.wait_for(|s| s.is_loading).await.unwrap();
    assert_eq!(system.product_client.load_products().await, Err(ProductError::Busy));

    release.send(()).unwrap();
    let products = pending.await.unwrap().unwrap();
    assert_eq!(products.len(), 2);

    let snapshot = system.product_client.snapshot();
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.state.products, vec![vacuum(), purifier()]);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_network_failure_maps_to_unknown_error() {
    let (mock, system) = setup();
    mock.expect_list_products().return_ok(vec![vacuum()]);
    mock.expect_list_products()
        .return_err(ClientError::UnexpectedResponse("Network Error".to_string()));

    system.product_client.load_products().await.unwrap();
    let err = system.product_client.load_products().await.unwrap_err();
    assert_eq!(err, ProductError::Api(ApiError::unknown("Network Error")));

    let state = system.product_client.state().await.unwrap();
    assert!(state.products.is_empty(), "a failed load clears the list");
    assert_eq!(state.error.map(|e| e.code), Some(ErrorCode::UnknownError));

    system.product_client.clear_error().await.unwrap();
    assert_eq!(system.product_client.snapshot().state.error, None);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_product_keeps_server_code() {
    let (mock, system) = setup();
    mock.expect_get_product()
        .return_err(api_error(404, ErrorCode::ProductNotFound, "Product not found."));

    let err = system
        .product_client
        .select_product(ProductId(999))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ProductError::Api(ApiError::new(ErrorCode::ProductNotFound, "Product not found."))
    );
    assert_eq!(system.product_client.snapshot().state.selected, None);
    assert_eq!(mock.calls(), vec![ApiCall::GetProduct(ProductId(999))]);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_quantity_is_rejected_without_a_call() {
    let (mock, system) = setup();

    for (quantity, code) in [
        (0, ErrorCode::QuantityInvalid),
        (51, ErrorCode::OutOfStock),
    ] {
        let err = system
            .order_client
            .submit_order(OrderDraft::new(UserId(1), vacuum(), quantity))
            .await
            .unwrap_err();
        assert_eq!(err.api_error().map(|e| e.code), Some(code));

        let state = system.order_client.snapshot().state;
        assert_eq!(state.error.map(|e| e.code), Some(code));
        assert_eq!(state.current_order, None);
    }

    let mut unavailable = vacuum();
    unavailable.available = false;
    let err = system
        .order_client
        .submit_order(OrderDraft::new(UserId(1), unavailable, 1))
        .await
        .unwrap_err();
    assert_eq!(err.api_error().map(|e| e.code), Some(ErrorCode::ProductNotAvailable));

    assert!(mock.calls().is_empty());
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_order_is_created_with_computed_total() {
    let (mock, system) = setup();
    let order = place_order(&mock, &system).await;

    assert_eq!(order.total_amount, 2 * 129_000);
    assert_eq!(order.status, OrderStatus::PendingPayment);
    assert_eq!(
        mock.calls(),
        vec![ApiCall::CreateOrder(CreateOrderRequest {
            user_id: UserId(1),
            product_id: ProductId(101),
            quantity: 2,
        })]
    );
    assert_eq!(system.order_client.snapshot().state.current_order, Some(order));
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_double_submit_creates_one_order() {
    let (mock, system) = setup();
    mock.expect_create_order().return_ok(pending_order());

    let other_tab = system.order_client.clone();
    let (first, second) = tokio::join!(
        system
            .order_client
            .submit_order(OrderDraft::new(UserId(1), vacuum(), 2)),
        other_tab.submit_order(OrderDraft::new(UserId(1), vacuum(), 2)),
    );
    assert_eq!(first, Ok(pending_order()));
    assert_eq!(second, Err(OrderError::Busy));

    let creates = mock
        .calls()
        .into_iter()
        .filter(|call| matches!(call, ApiCall::CreateOrder(_)))
        .count();
    assert_eq!(creates, 1);
    mock.verify();
    drop(other_tab);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_server_rejection_is_recorded() {
    let (mock, system) = setup();
    mock.expect_create_order()
        .return_err(api_error(409, ErrorCode::OutOfStock, "Out of stock."));

    let err = system
        .order_client
        .submit_order(OrderDraft::new(UserId(1), vacuum(), 2))
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::Rejected(ApiError::new(ErrorCode::OutOfStock, "Out of stock.")));
    assert_eq!(
        system.order_client.snapshot().state.error.map(|e| e.message),
        Some("Out of stock.".to_string())
    );
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_successful_approval_marks_order_paid() {
    let (mock, system) = setup();
    let order = place_order(&mock, &system).await;

    let attempt = ApprovalAttempt::for_order(&order);
    let key = attempt.request.payment_key.clone();
    assert!(key.0.starts_with("pay_"));
    mock.expect_approve_payment().return_ok(approved(&key));

    let response = system.payment_client.request_approval(attempt).await.unwrap();
    assert_eq!(response.payment_status, PaymentStatus::Approved);

    let paid = system
        .order_client
        .apply_payment(PaymentOutcome::Approved)
        .await
        .unwrap();
    assert_eq!(paid.status, OrderStatus::Paid);

    let payment = system.payment_client.snapshot().state;
    assert_eq!(payment.payment_status, Some(PaymentStatus::Approved));
    assert_eq!(payment.result, Some(approved(&key)));
    assert_eq!(
        mock.calls().last(),
        Some(&ApiCall::ApprovePayment(ApprovePaymentRequest {
            order_id: order.order_id.clone(),
            payment_key: key,
            amount: 258_000,
        }))
    );

    // A second approval of the same order never reaches the server.
    let again = system
        .payment_client
        .request_approval(ApprovalAttempt::for_order(&order))
        .await
        .unwrap_err();
    assert_eq!(
        again.api_error().map(|e| e.code),
        Some(ErrorCode::PaymentAlreadyApproved)
    );
    assert_eq!(mock.calls().len(), 2);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_amount_mismatch_leaves_order_unchanged() {
    let (mock, system) = setup();
    let order = place_order(&mock, &system).await;

    let short = ApprovalAttempt::new(order.order_id.clone(), PaymentKey::generate(), 100_000)
        .expecting(order.total_amount);
    let err = system.payment_client.request_approval(short).await.unwrap_err();
    assert_eq!(err.outcome(), PaymentOutcome::Rejected);
    let mapped = err.api_error().cloned().unwrap();
    assert_eq!(mapped.code, ErrorCode::AmountMismatch);
    assert_eq!(mapped.detail.as_deref(), Some("expected 258000, requested 100000"));

    // Nothing was sent, so there is nothing to resend and the failure stays recorded.
    assert_eq!(system.payment_client.retry().await, Err(PaymentError::NothingToRetry));
    let state = system.payment_client.snapshot().state;
    assert_eq!(state.last_request, None);
    assert_eq!(state.error.map(|e| e.code), Some(ErrorCode::AmountMismatch));

    // The server check gives the same outcome when the client has no expected total.
    mock.expect_approve_payment().return_err(api_error(
        400,
        ErrorCode::AmountMismatch,
        "Payment amount does not match.",
    ));
    let unchecked = ApprovalAttempt::new(order.order_id.clone(), PaymentKey::generate(), 100_000);
    let err = system
        .payment_client
        .request_approval(unchecked)
        .await
        .unwrap_err();
    assert_eq!(err.api_error().map(|e| e.code), Some(ErrorCode::AmountMismatch));

    let unchanged = system
        .order_client
        .apply_payment(err.outcome())
        .await
        .unwrap();
    assert_eq!(unchanged.status, OrderStatus::PendingPayment);
    assert_eq!(system.payment_client.snapshot().state.payment_status, None);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_declined_payment_can_be_retried() {
    let (mock, system) = setup();
    let order = place_order(&mock, &system).await;

    mock.expect_approve_payment().return_err(api_error(
        402,
        ErrorCode::PgApprovalFailed,
        "Payment approval failed.",
    ));
    let attempt = ApprovalAttempt::for_order(&order);
    let key = attempt.request.payment_key.clone();

    let err = system
        .payment_client
        .request_approval(attempt)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::Declined(_)));
    let failed = system
        .order_client
        .apply_payment(err.outcome())
        .await
        .unwrap();
    assert_eq!(failed.status, OrderStatus::PaymentFailed);
    let declined = system.payment_client.snapshot().state;
    assert_eq!(declined.payment_status, Some(PaymentStatus::Declined));
    assert_eq!(
        declined.last_request.map(|last| last.request.payment_key),
        Some(key.clone())
    );

    mock.expect_approve_payment().return_ok(approved(&key));
    system.payment_client.clear_error().await.unwrap();
    let response = system.payment_client.retry().await.unwrap();
    assert_eq!(response.payment_key, key);

    let paid = system
        .order_client
        .apply_payment(PaymentOutcome::Approved)
        .await
        .unwrap();
    assert_eq!(paid.status, OrderStatus::Paid);
    assert_eq!(
        system.payment_client.snapshot().state.payment_status,
        Some(PaymentStatus::Approved)
    );
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_declined_response_status_counts_as_gateway_failure() {
    let (mock, system) = setup();
    let order = place_order(&mock, &system).await;
    let attempt = ApprovalAttempt::for_order(&order);
    let mut declined = approved(&attempt.request.payment_key);
    declined.payment_status = PaymentStatus::Declined;
    declined.order_status = OrderStatus::PaymentFailed;
    mock.expect_approve_payment().return_ok(declined);

    let err = system
        .payment_client
        .request_approval(attempt)
        .await
        .unwrap_err();
    assert_eq!(err.api_error().map(|e| e.code), Some(ErrorCode::PgApprovalFailed));
    assert_eq!(system.payment_client.snapshot().state.result, None);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_retry_without_request() {
    let (mock, system) = setup();
    assert_eq!(system.payment_client.retry().await, Err(PaymentError::NothingToRetry));
    assert_eq!(system.payment_client.snapshot().state.error, None);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_payment_outcome_without_order() {
    let (mock, system) = setup();
    assert_eq!(
        system.order_client.apply_payment(PaymentOutcome::Approved).await,
        Err(OrderError::NoCurrentOrder)
    );
    mock.verify();
    system.shutdown().await.unwrap();
}
