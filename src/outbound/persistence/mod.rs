//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel rows and domain types; no business logic lives here.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) never leak into the domain layer.
//! - **Strongly typed errors**: every database failure is mapped onto the
//!   domain [`StoreError`](crate::domain::ports::StoreError) before it leaves
//!   this module.

mod diesel_click_repository;
mod diesel_credential_repository;
mod diesel_login_page_repository;
mod diesel_template_repository;
mod models;
mod pool;
mod schema;

pub use diesel_click_repository::DieselClickRepository;
pub use diesel_credential_repository::DieselCredentialRepository;
pub use diesel_login_page_repository::DieselLoginPageRepository;
pub use diesel_template_repository::DieselTemplateRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

use tracing::debug;

use crate::domain::ports::StoreError;

/// Map pool errors to domain store errors.
pub(crate) fn map_pool_error(error: PoolError) -> StoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreError::connection(message)
        }
    }
}

/// Map Diesel errors to domain store errors.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> StoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreError::conflict(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreError::connection("database connection error")
        }
        DieselError::NotFound => StoreError::query("record not found"),
        _ => StoreError::query("database error"),
    }
}
