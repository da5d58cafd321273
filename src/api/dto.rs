//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name                   | Description                                 | Key Methods         |
// |------------------------|---------------------------------------------|---------------------|
// | CategoryMap            | Ordered id -> type JSON object              | from                |
// | CategoriesResponse     | Body of GET /categories                     |                     |
// | QuestionsResponse      | Paginated question listing                  |                     |
// | DeletedResponse        | Body of DELETE /questions/:id               |                     |
// | CreatedResponse        | Body of a question creation                 |                     |
// | QuestionsPostRequest   | Body of POST /questions (create or search)  | search_term         |
// | QuizRequest            | Body of POST /quizzes                       |                     |
// | QuizResponse           | Next quiz question, absent when exhausted   |                     |
//--------------------------------------------------------------------------------------------------

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::models::types::{Category, Question, WireInt};

/// Categories rendered as a JSON object from id to type.
///
/// Entries keep the order they were loaded in, so a listing ordered by type
/// stays ordered on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap(pub Vec<Category>);

impl From<Vec<Category>> for CategoryMap {
    fn from(categories: Vec<Category>) -> Self {
        Self(categories)
    }
}

impl Serialize for CategoryMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for category in &self.0 {
            map.serialize_entry(&category.id.to_string(), &category.kind)?;
        }
        map.end()
    }
}

/// Response for the category listing
#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

/// Response for any paginated question listing
#[derive(Debug, Clone, Serialize)]
pub struct QuestionsResponse {
    pub success: bool,
    /// Questions of the requested page
    pub questions: Vec<Question>,
    /// Number of matching questions before pagination
    pub total_questions: usize,
    /// Full category map, only sent by the plain listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoryMap>,
    /// Category the listing is scoped to; serialized as null when unscoped
    pub current_category: Option<i64>,
}

/// Response for a deleted question
#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i64,
}

/// Response for a created question
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: i64,
}

/// Body of POST /questions.
///
/// A non-empty `searchTerm` selects search mode. Otherwise every question
/// field must be present and non-null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionsPostRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub category: Option<WireInt>,
    #[serde(default)]
    pub difficulty: Option<WireInt>,
    #[serde(default, rename = "searchTerm")]
    pub search_term: Option<String>,
}

impl QuestionsPostRequest {
    /// The search term, if the request is a search.
    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref().filter(|term| !term.is_empty())
    }
}

/// Category selected for a quiz round. An id of 0 means every category.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizCategory {
    #[serde(default)]
    pub id: Option<WireInt>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Body of POST /quizzes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizRequest {
    /// Ids of the questions already asked this round
    #[serde(default)]
    pub previous_questions: Option<Vec<i64>>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

/// Response for the quiz endpoint
#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_map_keeps_load_order() {
        let map = CategoryMap(vec![
            Category {
                id: 2,
                kind: "Art".to_string(),
            },
            Category {
                id: 1,
                kind: "Science".to_string(),
            },
        ]);

        let rendered = serde_json::to_string(&map).unwrap();
        assert_eq!(rendered, r#"{"2":"Art","1":"Science"}"#);
    }

    #[test]
    fn test_questions_response_null_current_category() {
        let response = QuestionsResponse {
            success: true,
            questions: Vec::new(),
            total_questions: 0,
            categories: None,
            current_category: None,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "questions": [],
                "total_questions": 0,
                "current_category": null
            })
        );
    }

    #[test]
    fn test_empty_search_term_means_create() {
        let request: QuestionsPostRequest =
            serde_json::from_value(json!({ "searchTerm": "" })).unwrap();
        assert_eq!(request.search_term(), None);

        let request: QuestionsPostRequest =
            serde_json::from_value(json!({ "searchTerm": "title" })).unwrap();
        assert_eq!(request.search_term(), Some("title"));
    }

    #[test]
    fn test_difficulty_accepts_decimal_string() {
        let request: QuestionsPostRequest = serde_json::from_value(json!({
            "question": "q",
            "answer": "a",
            "category": "3",
            "difficulty": "2"
        }))
        .unwrap();
        assert_eq!(request.difficulty, Some(WireInt::Value(2)));
        assert_eq!(request.category, Some(WireInt::Value(3)));
    }

    #[test]
    fn test_quiz_request_fields_are_optional() {
        let request: QuizRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.previous_questions.is_none());
        assert!(request.quiz_category.is_none());

        let request: QuizRequest = serde_json::from_value(json!({
            "previous_questions": [1, 4],
            "quiz_category": { "type": "Science", "id": "1" }
        }))
        .unwrap();
        assert_eq!(request.previous_questions, Some(vec![1, 4]));
        let category = request.quiz_category.unwrap();
        assert_eq!(category.id, Some(WireInt::Value(1)));
        assert_eq!(category.kind.as_deref(), Some("Science"));
    }

    #[test]
    fn test_quiz_response_omits_question_when_exhausted() {
        let response = QuizResponse {
            success: true,
            question: None,
        };
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value, json!({ "success": true }));
    }
}
