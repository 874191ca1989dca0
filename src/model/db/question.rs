use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::model::{
    common::{
        question::{ConditionalRule, QuestionType},
        visibility::Conditional,
    },
    mongodb::Id,
};

/// Core question data, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCore {
    /// Question text.
    pub text: String,
    /// What kind of input the question takes.
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// Possible answers; empty for text questions.
    #[serde(default)]
    pub options: Vec<String>,
    /// Must the question be answered?
    #[serde(default)]
    pub required: bool,
    /// Display position, starting from 1.
    pub order: u32,
    /// Only show this question if a previous answer matches.
    #[serde(default)]
    pub conditional_on: Option<ConditionalRule>,
}

/// A question without an ID.
pub type NewQuestion = QuestionCore;

/// A question from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub question: QuestionCore,
}

impl Deref for Question {
    type Target = QuestionCore;

    fn deref(&self) -> &Self::Target {
        &self.question
    }
}

impl Conditional for Question {
    fn conditional_on(&self) -> Option<&ConditionalRule> {
        self.question.conditional_on.as_ref()
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl QuestionCore {
        pub fn example_text(order: u32) -> Self {
            Self {
                text: format!("Question number {order}?"),
                kind: QuestionType::Text,
                options: Vec::new(),
                required: false,
                order,
                conditional_on: None,
            }
        }
    }
}
