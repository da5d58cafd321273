use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::types::{Category, NewQuestion, Question};

pub mod sqlite_store;

pub use sqlite_store::SqliteStore;

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage client for questions and categories.
///
/// The API layer only talks to the database through this trait; a concrete
/// store is built at startup and injected into the handler state.
/// Implementations must be thread-safe to support concurrent requests.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// Returns every category ordered by its display type.
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    /// Looks up one category by id.
    async fn find_category(&self, id: i64) -> StoreResult<Option<Category>>;

    /// Returns every question ordered by id.
    async fn list_questions(&self) -> StoreResult<Vec<Question>>;

    /// Returns the questions of one category ordered by id.
    async fn questions_in_category(&self, category_id: i64) -> StoreResult<Vec<Question>>;

    /// Case-insensitive substring search over question text, ordered by id.
    ///
    /// # Arguments
    /// * `term` - Text to look for. Wildcard characters are matched literally.
    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>>;

    /// Looks up one question by id.
    async fn find_question(&self, id: i64) -> StoreResult<Option<Question>>;

    /// Inserts a question and returns the id assigned to it.
    ///
    /// # Returns
    /// * `Ok(id)` - The new question's id
    /// * `Err(StoreError::ConstraintViolation)` - If the category does not exist
    async fn insert_question(&self, question: NewQuestion) -> StoreResult<i64>;

    /// Deletes a question. Returns `false` when no question had that id.
    async fn delete_question(&self, id: i64) -> StoreResult<bool>;
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write broke a schema constraint (unknown category, null column).
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Any other failure reported by the database driver.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation()
                || db_err.is_check_violation()
                || db_err.is_unique_violation()
                || db_err.message().contains("constraint failed")
            {
                return StoreError::ConstraintViolation(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

//--------------------------------------------------------------------------------------------------
// MOCKS
//--------------------------------------------------------------------------------------------------
// | Name              | Description                                   |
// |-------------------|-----------------------------------------------|
// | MockTriviaStore   | mockall double of TriviaStore (tests only)    |
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
use mockall::*;

#[cfg(test)]
mock! {
    pub TriviaStore {}

    #[async_trait]
    impl TriviaStore for TriviaStore {
        async fn list_categories(&self) -> StoreResult<Vec<Category>>;

        async fn find_category(&self, id: i64) -> StoreResult<Option<Category>>;

        async fn list_questions(&self) -> StoreResult<Vec<Question>>;

        async fn questions_in_category(&self, category_id: i64) -> StoreResult<Vec<Question>>;

        async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>>;

        async fn find_question(&self, id: i64) -> StoreResult<Option<Question>>;

        async fn insert_question(&self, question: NewQuestion) -> StoreResult<i64>;

        async fn delete_question(&self, id: i64) -> StoreResult<bool>;
    }
}
