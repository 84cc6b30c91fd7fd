//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a migration
//! changes a table, update the matching block here (`diesel print-schema` can
//! regenerate it from a live database).

diesel::table! {
    /// Accounts linked to an external identity provider.
    users (id) {
        id -> Int8,
        /// Identity-provider subject. Unique.
        external_id -> Varchar,
        email -> Varchar,
        name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tree roots. Titles are unique per owner, ignoring case.
    portfolios (id) {
        id -> Int8,
        owner_id -> Int8,
        title -> Varchar,
        description -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered children of a portfolio that group projects.
    categories (id) {
        id -> Int8,
        portfolio_id -> Int8,
        /// Denormalised copy of the portfolio owner.
        owner_id -> Int8,
        title -> Varchar,
        description -> Text,
        position -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered children of a portfolio that hold content blocks.
    sections (id) {
        id -> Int8,
        portfolio_id -> Int8,
        owner_id -> Int8,
        title -> Varchar,
        description -> Text,
        position -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    projects (id) {
        id -> Int8,
        category_id -> Int8,
        owner_id -> Int8,
        title -> Varchar,
        description -> Text,
        media_urls -> Array<Text>,
        skills -> Array<Text>,
        client -> Nullable<Text>,
        project_url -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered content blocks within a section.
    section_contents (id) {
        id -> Int8,
        section_id -> Int8,
        owner_id -> Int8,
        /// One of `text`, `image`, `video`, `link` or `code`.
        kind -> Varchar,
        content -> Text,
        /// `order` is reserved in SQL.
        sort_order -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(categories -> portfolios (portfolio_id));
diesel::joinable!(sections -> portfolios (portfolio_id));
diesel::joinable!(projects -> categories (category_id));
diesel::joinable!(section_contents -> sections (section_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    portfolios,
    categories,
    sections,
    projects,
    section_contents,
);
