//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module defines the core record types stored by the trivia backend: questions and the
// categories they belong to, plus the payload used to insert a new question.
//
// | Section            | Description                                                      |
// |--------------------|------------------------------------------------------------------|
// | STRUCTS            | Question, NewQuestion and Category records.                      |
// | WIRE INTEGERS      | Integer fields sent as a number or a decimal string.             |
// | TESTS              | Contains unit tests for the defined types.                       |
//--------------------------------------------------------------------------------------------------

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

//--------------------------------------------------------------------------------------------------
//  STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name          | Description                                        |
// |---------------|----------------------------------------------------|
// | Question      | A persisted trivia item.                           |
// | NewQuestion   | A question that has not been assigned an id yet.   |
// | Category      | A labeled grouping for questions.                  |
//--------------------------------------------------------------------------------------------------

/// A single trivia item with its answer, difficulty and category reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    /// Identifier assigned by the store on insert.
    pub id: i64,
    /// Question text shown to the player.
    pub question: String,
    /// Expected answer.
    pub answer: String,
    /// Id of the category this question belongs to.
    pub category: i64,
    /// Small integer difficulty rating.
    pub difficulty: i64,
}

/// A question about to be inserted. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// A labeled grouping for questions, e.g. "Science".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Identifier assigned by the store.
    pub id: i64,
    /// Display string. Stored in the `type` column.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
}

//--------------------------------------------------------------------------------------------------
//  WIRE INTEGERS
//--------------------------------------------------------------------------------------------------

/// Integer field as sent by clients (category ids, difficulty).
///
/// Clients send these either as a JSON number (`3`) or as the decimal string
/// form (`"3"`). Anything that is not an integer in one of those two shapes is
/// kept as `Invalid` so the handler can reject it as unprocessable instead of
/// failing JSON parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireInt {
    Value(i64),
    Invalid(String),
}

impl WireInt {
    /// Returns the integer, if the field held one.
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Value(value) => Some(*value),
            Self::Invalid(_) => None,
        }
    }
}

impl fmt::Display for WireInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{}", value),
            Self::Invalid(raw) => write!(f, "{}", raw),
        }
    }
}

impl<'de> Deserialize<'de> for WireInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let parsed = match &raw {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        Ok(match parsed {
            Some(value) => Self::Value(value),
            None => Self::Invalid(raw.to_string()),
        })
    }
}

//--------------------------------------------------------------------------------------------------
//  TESTS
//--------------------------------------------------------------------------------------------------
