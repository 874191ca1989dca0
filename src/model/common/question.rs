use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The kinds of input a question accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    /// Free text.
    #[serde(rename = "text")]
    Text,
    /// Exactly one of the question's options.
    #[serde(rename = "multiple-choice")]
    SingleChoice,
    /// Any subset of the question's options.
    #[serde(rename = "multiselect")]
    MultiChoice,
}

impl QuestionType {
    /// Does this type of question offer a fixed set of options?
    pub fn has_options(self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultiChoice)
    }
}

impl Display for QuestionType {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Text => "text",
                Self::SingleChoice => "multiple-choice",
                Self::MultiChoice => "multiselect",
            }
        )
    }
}

/// A rule making a question depend on a previous answer.
///
/// The question is only shown when the answer recorded for `question_id`
/// is exactly `answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRule {
    /// Hex ID of the question this one depends on.
    pub question_id: String,
    /// The answer that question must have been given.
    pub answer: String,
}

impl ConditionalRule {
    /// An empty question ID means there is no dependency at all.
    pub fn is_set(&self) -> bool {
        !self.question_id.is_empty()
    }
}
