//! # Framework Errors
//!
//! This module defines the common error types used throughout the store framework.
//! Container-specific failures travel inside [`FrameworkError::EntityError`] and are
//! recovered by the container clients with [`FrameworkError::downcast_entity`].

/// Errors that can occur within the store framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Store busy: a request is already in flight")]
    Busy,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the typed error an entity returned from one of its hooks.
    ///
    /// Any other variant (or an entity error of a different type) is handed back unchanged.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|typed| *typed)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }
}
