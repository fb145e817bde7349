//! Helpers for classifying database errors.

/// Returns true if `e` is a unique-constraint violation reported by the database.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Returns true if `e` is a duplicate `short_code` on the `links` table.
pub fn is_short_code_conflict(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation() && matches!(db_err.constraint(), Some("links_pkey"))
}
