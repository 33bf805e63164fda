use async_trait::async_trait;
use std::sync::Arc;
use store_framework::{ContainerClient, FrameworkError, StoreActor, StoreClient, StoreEntity};
use tokio::sync::Notify;

// --- Test Entity ---

#[derive(Clone, Debug, Default, PartialEq)]
struct Reservation {
    seats: u32,
    confirmed: bool,
    error: Option<String>,
}

#[derive(Debug)]
enum ReservationUpdate {
    ClearError,
}

#[derive(Debug)]
enum ReservationAction {
    Reserve(u32),
}

#[derive(Debug, PartialEq, thiserror::Error)]
enum ReservationError {
    #[error("seat count must be at least 1")]
    NoSeats,
    #[error("store busy")]
    Busy,
    #[error("{0}")]
    Communication(String),
}

#[async_trait]
impl StoreEntity for Reservation {
    type Update = ReservationUpdate;
    type Action = ReservationAction;
    type ActionResult = u32;
    type Context = Arc<Notify>;
    type Error = ReservationError;

    fn on_update(&mut self, update: ReservationUpdate) -> Result<(), Self::Error> {
        match update {
            ReservationUpdate::ClearError => self.error = None,
        }
        Ok(())
    }

    fn on_dispatch(&mut self, action: &ReservationAction) -> Result<(), Self::Error> {
        self.error = None;
        self.confirmed = false;
        let ReservationAction::Reserve(seats) = action;
        if *seats == 0 {
            let err = ReservationError::NoSeats;
            self.error = Some(err.to_string());
            return Err(err);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ReservationAction,
        gate: &Arc<Notify>,
    ) -> Result<u32, Self::Error> {
        gate.notified().await;
        let ReservationAction::Reserve(seats) = action;
        self.seats = seats;
        self.confirmed = true;
        Ok(seats)
    }
}

struct ReservationClient {
    inner: StoreClient<Reservation>,
}

impl ContainerClient<Reservation> for ReservationClient {
    type Error = ReservationError;

    fn inner(&self) -> &StoreClient<Reservation> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::Busy => ReservationError::Busy,
            other => other
                .downcast_entity::<ReservationError>()
                .unwrap_or_else(|e| ReservationError::Communication(e.to_string())),
        }
    }
}

impl ReservationClient {
    async fn reserve(&self, seats: u32) -> Result<u32, ReservationError> {
        self.inner
            .perform_action(ReservationAction::Reserve(seats))
            .await
            .map_err(Self::map_error)
    }
}

// --- Test ---

#[tokio::test]
async fn test_store_full_lifecycle() {
    let gate = Arc::new(Notify::new());
    let (actor, inner) = StoreActor::<Reservation>::new(10);
    tokio::spawn(actor.run(gate.clone()));
    let client = Arc::new(ReservationClient { inner });

    // 1. Local rejection never raises the loading flag
    assert_eq!(client.reserve(0).await, Err(ReservationError::NoSeats));
    assert!(!client.is_loading());
    assert_eq!(
        client.snapshot().state.error.as_deref(),
        Some("seat count must be at least 1")
    );

    // 2. Second dispatch while loading is rejected as busy
    let mut snapshots = client.inner().subscribe();
    let pending = {
        let client = client.clone();
        tokio::spawn(async move { client.reserve(2).await })
    };
    snapshots.wait_for(|s| s.is_loading).await.unwrap();
    assert_eq!(client.reserve(3).await, Err(ReservationError::Busy));

    gate.notify_one();
    assert_eq!(pending.await.unwrap(), Ok(2));

    // 3. State after the action has landed
    let state = client.state().await.unwrap();
    assert_eq!(state.seats, 2);
    assert!(state.confirmed);
    assert_eq!(state.error, None);

    // 4. Reset
    client.reset().await.unwrap();
    assert_eq!(client.snapshot().state, Reservation::default());
}

#[tokio::test]
async fn test_dropped_actor_reports_closed_store() {
    let (actor, inner) = StoreActor::<Reservation>::new(10);
    drop(actor);
    let client = ReservationClient { inner };

    let err = client.state().await.unwrap_err();
    assert_eq!(
        err,
        ReservationError::Communication(FrameworkError::StoreClosed.to_string())
    );
}

#[tokio::test]
async fn test_concurrent_dispatch_admits_one_action() {
    let gate = Arc::new(Notify::new());
    let (actor, inner) = StoreActor::<Reservation>::new(10);
    tokio::spawn(actor.run(gate.clone()));
    let first = ReservationClient { inner: inner.clone() };
    let second = ReservationClient { inner };

    // Stored permit, so the admitted action does not wait.
    gate.notify_one();
    let (a, b) = tokio::join!(first.reserve(2), second.reserve(3));
    assert_eq!(a, Ok(2));
    assert_eq!(b, Err(ReservationError::Busy));
    assert_eq!(first.state().await.unwrap().seats, 2);

    // The permit is released once the reply arrives.
    gate.notify_one();
    assert_eq!(second.reserve(4).await, Ok(4));
}
