//! PostgreSQL-backed `ClickRepository` implementation using Diesel ORM.
//!
//! The insert-if-absent contract of `record_first_click` maps directly onto
//! `INSERT ... ON CONFLICT (email) DO NOTHING` against the unique index on
//! `phishing_clicks.email`, so concurrent hits for the same recipient race
//! safely inside the database.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::attribution::{NewClick, PhishingClick};
use crate::domain::ports::{ClickRepository, StoreError};

use super::models::{NewPhishingClickRow, PhishingClickRow};
use super::pool::DbPool;
use super::schema::phishing_clicks;
use super::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the `ClickRepository` port.
#[derive(Clone)]
pub struct DieselClickRepository {
    pool: DbPool,
}

impl DieselClickRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for DieselClickRepository {
    async fn record_first_click(&self, click: &NewClick) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPhishingClickRow {
            id: Uuid::new_v4(),
            email: click.email.as_str(),
            ip_address: click.ip_address.as_deref(),
            timestamp: click.timestamp,
        };
        let inserted = diesel::insert_into(phishing_clicks::table)
            .values(&row)
            .on_conflict(phishing_clicks::email)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(inserted == 1)
    }

    async fn list(&self) -> Result<Vec<PhishingClick>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = phishing_clicks::table
            .order(phishing_clicks::timestamp.desc())
            .select(PhishingClickRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(PhishingClick::from).collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = phishing_clicks::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count as u64)
    }
}
