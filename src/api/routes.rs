//--------------------------------------------------------------------------------------------------
// FUNCTIONS
//--------------------------------------------------------------------------------------------------
// | Name                       | Description                                | Return Type         |
// |----------------------------|--------------------------------------------|---------------------|
// | list_categories            | All categories as an id -> type map        | ApiResult<Response> |
// | list_questions             | Paginated questions with categories        | ApiResult<Response> |
// | delete_question            | Delete a question by id                    | ApiResult<Response> |
// | create_or_search_questions | Create a question or search question text  | ApiResult<Response> |
// | questions_by_category      | Paginated questions of one category        | ApiResult<Response> |
// | play_quiz                  | Next unseen quiz question                  | ApiResult<Response> |
// | method_not_allowed         | Fallback for unsupported verbs             | ApiError            |
// | not_found                  | Fallback for unknown paths                 | ApiError            |
//--------------------------------------------------------------------------------------------------

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path, Query,
    },
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use super::{
    ApiError, ApiResult, AppState, CategoriesResponse, CategoryMap, CreatedResponse,
    DeletedResponse, QuestionsPostRequest, QuestionsResponse, QuizRequest, QuizResponse,
};
use crate::domain::models::types::NewQuestion;
use crate::domain::services::pagination::{page_number, paginate, QUESTIONS_PER_PAGE};
use crate::domain::services::quiz::{pick_next_question, QuizPick, ALL_CATEGORIES};

fn requested_page(params: &HashMap<String, String>) -> i64 {
    page_number(params.get("page").map(String::as_str))
}

/// Decodes a JSON body into a request type.
///
/// A missing or unparseable body, or a literal `null`, is a bad request. A
/// parseable body whose fields have the wrong shape is unprocessable.
fn decode_body<T: DeserializeOwned>(body: Result<Json<Value>, JsonRejection>) -> ApiResult<T> {
    let Json(value) = body?;

    if value.is_null() {
        return Err(ApiError::BadRequest("request body is null".to_string()));
    }

    serde_json::from_value(value)
        .map_err(|err| ApiError::Unprocessable(format!("invalid request body: {}", err)))
}

/// List all categories ordered by type
pub async fn list_categories(
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<Response> {
    let categories = state.store.list_categories().await?;

    if categories.is_empty() {
        return Err(ApiError::NotFound("no categories".to_string()));
    }

    let response = CategoriesResponse {
        success: true,
        categories: CategoryMap::from(categories),
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// List questions ordered by id, one page at a time
pub async fn list_questions(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Response> {
    let page = requested_page(&params);
    let questions = state.store.list_questions().await?;
    let total_questions = questions.len();

    let current = paginate(questions, page, QUESTIONS_PER_PAGE);
    if current.is_empty() {
        return Err(ApiError::NotFound(format!("question page {} is empty", page)));
    }

    let categories = state.store.list_categories().await?;

    let response = QuestionsResponse {
        success: true,
        questions: current,
        total_questions,
        categories: Some(CategoryMap::from(categories)),
        current_category: None,
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Delete a question by id
///
/// An unknown id is reported as unprocessable, like any other failed delete.
pub async fn delete_question(
    Extension(state): Extension<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Response> {
    let Path(id) = id?;

    if state.store.find_question(id).await?.is_none() {
        return Err(ApiError::Unprocessable(format!("question {} not found", id)));
    }

    if !state.store.delete_question(id).await? {
        return Err(ApiError::Unprocessable(format!(
            "question {} vanished before delete",
            id
        )));
    }

    info!("Deleted question {}", id);
    let response = DeletedResponse {
        success: true,
        deleted: id,
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Create a question, or search question text when `searchTerm` is set
pub async fn create_or_search_questions(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let request: QuestionsPostRequest = decode_body(body)?;

    if let Some(term) = request.search_term() {
        debug!("Searching questions for {:?}", term);
        let questions = state.store.search_questions(term).await?;
        let total_questions = questions.len();

        let response = QuestionsResponse {
            success: true,
            questions: paginate(questions, requested_page(&params), QUESTIONS_PER_PAGE),
            total_questions,
            categories: None,
            current_category: None,
        };
        return Ok((StatusCode::OK, Json(response)).into_response());
    }

    let (Some(question), Some(answer), Some(category), Some(difficulty)) = (
        request.question,
        request.answer,
        request.category,
        request.difficulty,
    ) else {
        return Err(ApiError::Unprocessable("missing question field".to_string()));
    };

    let category = category
        .value()
        .ok_or_else(|| ApiError::Unprocessable(format!("invalid category {}", category)))?;
    let difficulty = difficulty
        .value()
        .ok_or_else(|| ApiError::Unprocessable(format!("invalid difficulty {}", difficulty)))?;

    let id = state
        .store
        .insert_question(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
        .await?;

    info!("Created question {} in category {}", id, category);
    let response = CreatedResponse {
        success: true,
        created: id,
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// List the questions of one category, one page at a time
///
/// An empty page is still a success here.
pub async fn questions_by_category(
    Extension(state): Extension<Arc<AppState>>,
    category_id: Result<Path<i64>, PathRejection>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Response> {
    let Path(category_id) = category_id?;

    let category = state
        .store
        .find_category(category_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("category {}", category_id)))?;

    let questions = state.store.questions_in_category(category.id).await?;
    let total_questions = questions.len();

    let response = QuestionsResponse {
        success: true,
        questions: paginate(questions, requested_page(&params), QUESTIONS_PER_PAGE),
        total_questions,
        categories: None,
        current_category: Some(category.id),
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Pick the next quiz question that has not been asked yet
pub async fn play_quiz(
    Extension(state): Extension<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let request: QuizRequest = decode_body(body)?;

    let (Some(previous), Some(quiz_category)) = (request.previous_questions, request.quiz_category)
    else {
        return Err(ApiError::Unprocessable(
            "previous_questions and quiz_category are required".to_string(),
        ));
    };

    let category_id = quiz_category
        .id
        .as_ref()
        .and_then(|id| id.value())
        .ok_or_else(|| ApiError::Unprocessable("quiz_category has no valid id".to_string()))?;

    let candidates = if category_id == ALL_CATEGORIES {
        state.store.list_questions().await?
    } else {
        state.store.questions_in_category(category_id).await?
    };

    if candidates.is_empty() {
        return Err(ApiError::NotFound(format!(
            "no quiz questions in category {}",
            category_id
        )));
    }

    let previous: HashSet<i64> = previous.into_iter().collect();
    let pick = pick_next_question(candidates, &previous, &mut rand::thread_rng());

    let question = match pick {
        QuizPick::Next(question) => {
            debug!("Quiz picked question {} from category {}", question.id, category_id);
            Some(question)
        }
        QuizPick::Exhausted => {
            debug!("Quiz category {} exhausted", category_id);
            None
        }
    };

    let response = QuizResponse {
        success: true,
        question,
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Fallback for a known path hit with an unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{} {}", method, uri.path()))
}

/// Fallback for unknown paths
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}
