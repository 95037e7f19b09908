//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::attribution::PhishingClick;
use crate::domain::credentials::CapturedCredential;
use crate::domain::{EmailTemplate, LoginPage};

use super::schema::{captured_credentials, email_templates, login_pages, phishing_clicks};

/// Row struct for reading from the email_templates table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = email_templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmailTemplateRow {
    pub id: Uuid,
    pub name: String,
    pub subject: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<EmailTemplateRow> for EmailTemplate {
    fn from(row: EmailTemplateRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            subject: row.subject,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for creating template records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = email_templates)]
pub(crate) struct NewEmailTemplateRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub subject: &'a str,
    pub content: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the login_pages table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = login_pages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LoginPageRow {
    pub id: Uuid,
    pub name: String,
    pub html: String,
    pub created_at: DateTime<Utc>,
}

impl From<LoginPageRow> for LoginPage {
    fn from(row: LoginPageRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            html: row.html,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for creating page records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = login_pages)]
pub(crate) struct NewLoginPageRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub html: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Changeset struct for updating page records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = login_pages)]
pub(crate) struct LoginPageUpdate<'a> {
    pub name: &'a str,
    pub html: &'a str,
}

/// Row struct for reading from the phishing_clicks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = phishing_clicks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PhishingClickRow {
    pub id: Uuid,
    pub email: String,
    pub ip_address: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<PhishingClickRow> for PhishingClick {
    fn from(row: PhishingClickRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            ip_address: row.ip_address,
            timestamp: row.timestamp,
        }
    }
}

/// Insertable struct for creating click records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = phishing_clicks)]
pub(crate) struct NewPhishingClickRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub ip_address: Option<&'a str>,
    pub timestamp: DateTime<Utc>,
}

/// Row struct for reading from the captured_credentials table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = captured_credentials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CapturedCredentialRow {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub timestamp: DateTime<Utc>,
}

impl From<CapturedCredentialRow> for CapturedCredential {
    fn from(row: CapturedCredentialRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password: row.password,
            timestamp: row.timestamp,
        }
    }
}

/// Insertable struct for creating credential records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = captured_credentials)]
pub(crate) struct NewCapturedCredentialRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password: &'a str,
    pub timestamp: DateTime<Utc>,
}
