//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. Regenerate with `diesel print-schema` after changing
//! migrations.

diesel::table! {
    /// Operator-authored email templates.
    email_templates (id) {
        id -> Uuid,
        name -> Varchar,
        subject -> Varchar,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Decoy login pages served to recipients. `name` carries a unique index.
    login_pages (id) {
        id -> Uuid,
        name -> Varchar,
        html -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// First-click attribution records. `email` carries a unique index so the
    /// insert-if-absent upsert can rely on `ON CONFLICT DO NOTHING`.
    phishing_clicks (id) {
        id -> Uuid,
        email -> Varchar,
        ip_address -> Nullable<Varchar>,
        timestamp -> Timestamptz,
    }
}

diesel::table! {
    /// Captured credential submissions, one row per recipient identity.
    /// `email` carries a unique index backing the latest-wins upsert.
    captured_credentials (id) {
        id -> Uuid,
        email -> Varchar,
        password -> Varchar,
        timestamp -> Timestamptz,
    }
}
