//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name          | Description                                 | Key Methods               |
// |---------------|---------------------------------------------|---------------------------|
// | SqliteStore   | TriviaStore backed by a sqlx SQLite pool    | connect                   |
// |               |                                             | in_memory                 |
// |               |                                             | seed_default_categories   |
//--------------------------------------------------------------------------------------------------

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info};

use crate::domain::models::types::{Category, NewQuestion, Question};

use super::{StoreResult, TriviaStore};

/// Categories inserted by `seed_default_categories`.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

const CREATE_CATEGORIES: &str = "
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL
    )";

const CREATE_QUESTIONS: &str = "
    CREATE TABLE IF NOT EXISTS questions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        question TEXT NOT NULL,
        answer TEXT NOT NULL,
        category INTEGER NOT NULL REFERENCES categories(id),
        difficulty INTEGER NOT NULL
    )";

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// SQLite-backed storage client.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `url` and ensures the schema exists.
    ///
    /// # Arguments
    /// * `url` - sqlx connection URL, e.g. `sqlite://trivia.db?mode=rwc`
    /// * `max_connections` - Upper bound of the connection pool
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!("Connected to database at {}", url);
        Self::from_pool(pool).await
    }

    /// Private in-memory database, used by tests and throwaway runs.
    ///
    /// Each SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wraps an existing pool and runs the schema setup on it.
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(CREATE_CATEGORIES).execute(&self.pool).await?;
        sqlx::query(CREATE_QUESTIONS).execute(&self.pool).await?;
        debug!("Schema ready");
        Ok(())
    }

    /// Inserts a category and returns its id.
    pub async fn insert_category(&self, kind: &str) -> StoreResult<i64> {
        let result = sqlx::query("INSERT INTO categories (type) VALUES (?)")
            .bind(kind)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Inserts the default category set when the table is empty.
    ///
    /// # Returns
    /// * Number of categories inserted (0 when categories already exist)
    pub async fn seed_default_categories(&self) -> StoreResult<usize> {
        let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        if existing > 0 {
            debug!("Skipping category seed, {} categories present", existing);
            return Ok(0);
        }

        for kind in DEFAULT_CATEGORIES {
            self.insert_category(kind).await?;
        }

        info!("Seeded {} default categories", DEFAULT_CATEGORIES.len());
        Ok(DEFAULT_CATEGORIES.len())
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Unicode-aware case-insensitive substring match.
fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

#[async_trait]
impl TriviaStore for SqliteStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, type FROM categories ORDER BY type, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn find_category(&self, id: i64) -> StoreResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        let sql = format!("SELECT {} FROM questions ORDER BY id", QUESTION_COLUMNS);
        let questions = sqlx::query_as::<_, Question>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(questions)
    }

    async fn questions_in_category(&self, category_id: i64) -> StoreResult<Vec<Question>> {
        let sql = format!(
            "SELECT {} FROM questions WHERE category = ? ORDER BY id",
            QUESTION_COLUMNS
        );
        let questions = sqlx::query_as::<_, Question>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(questions)
    }

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        // SQLite LIKE only folds ASCII, so the match runs on lowercased text here.
        let needle = term.to_lowercase();
        let questions = self
            .list_questions()
            .await?
            .into_iter()
            .filter(|question| contains_folded(&question.question, &needle))
            .collect();
        Ok(questions)
    }

    async fn find_question(&self, id: i64) -> StoreResult<Option<Question>> {
        let sql = format!("SELECT {} FROM questions WHERE id = ?", QUESTION_COLUMNS);
        let question = sqlx::query_as::<_, Question>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(question)
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<i64> {
        let result = sqlx::query(
            "INSERT INTO questions (question, answer, category, difficulty) VALUES (?, ?, ?, ?)",
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted question {}", id);
        Ok(id)
    }

    async fn delete_question(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::store::StoreError;

    async fn store_with_categories() -> SqliteStore {
        let store = SqliteStore::in_memory().await.unwrap();
        store.seed_default_categories().await.unwrap();
        store
    }

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "answer".to_string(),
            category,
            difficulty: 1,
        }
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert_eq!(store.seed_default_categories().await.unwrap(), 6);
        assert_eq!(store.seed_default_categories().await.unwrap(), 0);
        assert_eq!(store.list_categories().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_categories_ordered_by_type() {
        let store = store_with_categories().await;
        let kinds: Vec<String> = store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.kind)
            .collect();

        assert_eq!(
            kinds,
            vec!["Art", "Entertainment", "Geography", "History", "Science", "Sports"]
        );
    }

    #[tokio::test]
    async fn test_insert_find_delete_question() {
        let store = store_with_categories().await;
        let id = store
            .insert_question(new_question("What is the capital of Egypt?", 3))
            .await
            .unwrap();

        let found = store.find_question(id).await.unwrap().unwrap();
        assert_eq!(found.answer, "answer");
        assert_eq!(found.category, 3);

        assert!(store.delete_question(id).await.unwrap());
        assert!(store.find_question(id).await.unwrap().is_none());
        assert!(!store.delete_question(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_category_is_constraint_violation() {
        let store = store_with_categories().await;
        let err = store
            .insert_question(new_question("Orphan?", 999))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let store = store_with_categories().await;
        for (text, category) in [
            ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", 4),
            ("What movie earned Tom Hanks his third straight Oscar nomination?", 5),
            ("What was the TITLE of the 1990 fantasy film?", 5),
        ] {
            store.insert_question(new_question(text, category)).await.unwrap();
        }

        let hits = store.search_questions("title").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.windows(2).all(|w| w[0].id < w[1].id));

        assert!(store.search_questions("continent").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let store = store_with_categories().await;
        for text in ["Is 100% of the moon visible?", "Plain question"] {
            store.insert_question(new_question(text, 1)).await.unwrap();
        }

        assert_eq!(store.search_questions("%").await.unwrap().len(), 1);
        assert!(store.search_questions("_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_questions_in_category() {
        let store = store_with_categories().await;
        store.insert_question(new_question("a", 1)).await.unwrap();
        store.insert_question(new_question("b", 2)).await.unwrap();
        store.insert_question(new_question("c", 1)).await.unwrap();

        let science = store.questions_in_category(1).await.unwrap();
        assert_eq!(science.len(), 2);
        assert!(science.iter().all(|q| q.category == 1));
        assert!(store.questions_in_category(6).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_letters() {
        let store = store_with_categories().await;
        store
            .insert_question(new_question("Which city has the ÉCOLE Polytechnique?", 3))
            .await
            .unwrap();
        store
            .insert_question(new_question("Where is the Straße des 17. Juni?", 3))
            .await
            .unwrap();

        let hits = store.search_questions("école").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].question.contains("ÉCOLE"));

        assert_eq!(store.search_questions("STRASSE").await.unwrap().len(), 0);
        assert_eq!(store.search_questions("STRAßE").await.unwrap().len(), 1);
    }

    #[test]
    fn test_contains_folded() {
        assert!(contains_folded("What was the TITLE?", "title"));
        assert!(contains_folded("Ça va?", "ça"));
        assert!(!contains_folded("Plain question", "continent"));
    }
}
