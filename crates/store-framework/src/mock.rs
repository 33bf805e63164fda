//! # Mock Store & Testing Guide
//!
//! `MockStore<T>` hands out a real [`StoreClient<T>`] whose requests are answered from a
//! queue of expectations instead of a running actor. It is meant for testing logic that
//! sits *around* a container (view-models, orchestration) without driving the container's
//! own entity code.
//!
//! ## When to use Mocks vs Real Stores
//!
//! | Feature | MockStore | Real StoreActor |
//! |---------|-----------|-----------------|
//! | **State** | Whatever you publish with `set_snapshot` | Real state management |
//! | **Use Case** | Testing code that consumes a client | Testing the container itself |
//! | **Error Injection** | Easy (`return_err`) | Requires a failing API |
//!
//! ```rust
//! use store_framework::mock::MockStore;
//! use store_framework::{FrameworkError, StoreEntity};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, Default, PartialEq)] struct Wallet { balance: i64 }
//! #[derive(Debug)] enum WalletUpdate {}
//! #[derive(Debug)] enum WalletAction { Deposit(i64) }
//! #[derive(Debug, thiserror::Error)] #[error("wallet error")] struct WalletError;
//!
//! #[async_trait]
//! impl StoreEntity for Wallet {
//!     type Update = WalletUpdate;
//!     type Action = WalletAction;
//!     type ActionResult = i64;
//!     type Context = ();
//!     type Error = WalletError;
//!     fn on_update(&mut self, update: WalletUpdate) -> Result<(), Self::Error> { match update {} }
//!     async fn handle_action(&mut self, _: WalletAction, _: &()) -> Result<i64, Self::Error> { Ok(0) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Wallet>::new();
//!     mock.expect_action().return_ok(500);
//!     mock.expect_action().return_err(FrameworkError::StoreClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.perform_action(WalletAction::Deposit(500)).await.unwrap(), 500);
//!     assert!(matches!(
//!         client.perform_action(WalletAction::Deposit(1)).await,
//!         Err(FrameworkError::StoreClosed)
//!     ));
//!
//!     mock.verify();
//! }
//! ```

use crate::client::StoreClient;
use crate::entity::{Snapshot, StoreEntity};
use crate::error::FrameworkError;
use crate::message::StoreRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request to the mock store and the response to give it.
enum Expectation<T: StoreEntity> {
    Get {
        response: Result<T, FrameworkError>,
    },
    Update {
        response: Result<T, FrameworkError>,
    },
    Reset {
        response: Result<(), FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock store with expectation tracking for fluent testing.
///
/// Requests are matched against the queue in order. A request that does not match the
/// next expectation is recorded as a failure and its reply channel is dropped, so the
/// caller sees [`FrameworkError::StoreDropped`] and [`MockStore::verify`] panics.
pub struct MockStore<T: StoreEntity> {
    client: StoreClient<T>,
    publisher: watch::Sender<Snapshot<T>>,
    expectations: Queue<T>,
    failures: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreEntity> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreEntity> MockStore<T> {
    /// Creates a new mock store with no expectations and a default snapshot.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let (publisher, snapshots) = watch::channel(Snapshot::default());
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let failures = Arc::new(Mutex::new(Vec::new()));

        let queue = expectations.clone();
        let recorded = failures.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();

                match (request, expectation) {
                    (StoreRequest::Get { respond_to }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Update { respond_to, .. },
                        Some(Expectation::Update { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Reset { respond_to }, Some(Expectation::Reset { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        recorded
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(format!("unexpected request: {request:?}"));
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender, snapshots),
            publisher,
            expectations,
            failures,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    /// Publishes a snapshot that every client of this mock will observe.
    pub fn set_snapshot(&self, state: T, is_loading: bool) {
        self.publisher.send_replace(Snapshot::new(state, is_loading));
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `reset` operation.
    pub fn expect_reset(&mut self) -> ResetExpectationBuilder<T> {
        ResetExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met and no unexpected request arrived.
    pub fn verify(&self) {
        let failures = self.failures.lock().unwrap_or_else(PoisonError::into_inner);
        if !failures.is_empty() {
            panic!("Mock store received unexpected requests: {:?}", *failures);
        }
        let exps = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

fn push<T: StoreEntity>(queue: &Queue<T>, expectation: Expectation<T>) {
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push_back(expectation);
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: StoreEntity> {
    expectations: Queue<T>,
}

impl<T: StoreEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, state: T) {
        push(&self.expectations, Expectation::Get { response: Ok(state) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Get { response: Err(error) });
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectationBuilder<T: StoreEntity> {
    expectations: Queue<T>,
}

impl<T: StoreEntity> UpdateExpectationBuilder<T> {
    pub fn return_ok(self, state: T) {
        push(&self.expectations, Expectation::Update { response: Ok(state) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Update { response: Err(error) });
    }
}

/// Builder for `reset` expectations.
pub struct ResetExpectationBuilder<T: StoreEntity> {
    expectations: Queue<T>,
}

impl<T: StoreEntity> ResetExpectationBuilder<T> {
    pub fn return_ok(self) {
        push(&self.expectations, Expectation::Reset { response: Ok(()) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Reset { response: Err(error) });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: StoreEntity> {
    expectations: Queue<T>,
}

impl<T: StoreEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        push(&self.expectations, Expectation::Action { response: Ok(result) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Action { response: Err(error) });
    }
}
