// Expose the modules
pub mod api;
pub mod config;
pub mod domain;

// Re-export key types for easier usage
pub use api::{Api, ApiError, AppState};
pub use config::{Config, ConfigError};
pub use domain::models::types::{Category, NewQuestion, Question, WireInt};
pub use domain::services::pagination::{paginate, QUESTIONS_PER_PAGE};
pub use domain::services::quiz::{pick_next_question, QuizPick};
pub use domain::services::store::{SqliteStore, StoreError, StoreResult, TriviaStore};
