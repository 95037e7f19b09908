//! PostgreSQL-backed `TemplateRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{StoreError, TemplateRepository};
use crate::domain::template::TemplateDraft;
use crate::domain::EmailTemplate;

use super::models::{EmailTemplateRow, NewEmailTemplateRow};
use super::pool::DbPool;
use super::schema::email_templates;
use super::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the `TemplateRepository` port.
#[derive(Clone)]
pub struct DieselTemplateRepository {
    pool: DbPool,
}

impl DieselTemplateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for DieselTemplateRepository {
    async fn create(&self, draft: TemplateDraft) -> Result<EmailTemplate, StoreError> {
        let template = draft.into_template();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewEmailTemplateRow {
            id: template.id,
            name: &template.name,
            subject: &template.subject,
            content: &template.content,
            created_at: template.created_at,
        };
        diesel::insert_into(email_templates::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(template)
    }

    async fn list(&self) -> Result<Vec<EmailTemplate>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = email_templates::table
            .order(email_templates::created_at.desc())
            .select(EmailTemplateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(EmailTemplate::from).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<EmailTemplate>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = email_templates::table
            .filter(email_templates::id.eq(id))
            .select(EmailTemplateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(EmailTemplate::from))
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            email_templates::table.filter(email_templates::id.eq_any(ids.to_vec())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed as u64)
    }
}
