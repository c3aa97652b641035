/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// One-based page number as sent in the `page` query parameter.
pub type PageNumber = i64;
