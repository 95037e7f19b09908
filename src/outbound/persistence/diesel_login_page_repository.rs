//! PostgreSQL-backed `LoginPageRepository` implementation using Diesel ORM.
//!
//! The unique index on `login_pages.name` enforces name uniqueness; the
//! resulting `UniqueViolation` is mapped to `StoreError::Conflict` by the
//! shared error mapping.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::LoginPage;
use crate::domain::login_page::LoginPageDraft;
use crate::domain::ports::{LoginPageRepository, StoreError};

use super::models::{LoginPageRow, LoginPageUpdate, NewLoginPageRow};
use super::pool::DbPool;
use super::schema::login_pages;
use super::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the `LoginPageRepository` port.
#[derive(Clone)]
pub struct DieselLoginPageRepository {
    pool: DbPool,
}

impl DieselLoginPageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoginPageRepository for DieselLoginPageRepository {
    async fn create(&self, draft: LoginPageDraft) -> Result<LoginPage, StoreError> {
        let page = draft.into_page();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewLoginPageRow {
            id: page.id,
            name: &page.name,
            html: &page.html,
            created_at: page.created_at,
        };
        diesel::insert_into(login_pages::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(page)
    }

    async fn list(&self) -> Result<Vec<LoginPage>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = login_pages::table
            .order(login_pages::created_at.desc())
            .select(LoginPageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(LoginPage::from).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<LoginPage>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = login_pages::table
            .filter(login_pages::id.eq(id))
            .select(LoginPageRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(LoginPage::from))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: LoginPageDraft,
    ) -> Result<Option<LoginPage>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = LoginPageUpdate {
            name: draft.name(),
            html: draft.html(),
        };
        let row = diesel::update(login_pages::table.filter(login_pages::id.eq(id)))
            .set(&changes)
            .returning(LoginPageRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(LoginPage::from))
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(login_pages::table.filter(login_pages::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
