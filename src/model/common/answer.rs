use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An answer to a single question: free text or a single choice is a string,
/// a multiple selection is a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Selection(Vec<String>),
}

impl AnswerValue {
    /// Does this answer equal the given string exactly?
    ///
    /// A selection never equals a string, even if it holds just that one value.
    pub fn matches(&self, expected: &str) -> bool {
        match self {
            Self::Text(text) => text == expected,
            Self::Selection(_) => false,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(selection: Vec<&str>) -> Self {
        Self::Selection(selection.into_iter().map(str::to_string).collect())
    }
}

/// Answers keyed by the hex ID of the question they answer.
pub type Answers = BTreeMap<String, AnswerValue>;

#[cfg(test)]
mod tests {
    use rocket::serde::json::serde_json::{self, json};

    use super::*;

    #[test]
    fn untagged_wire_format() {
        let answers: Answers =
            serde_json::from_value(json!({"q1": "Raiders", "q2": ["Pune", "Delhi"]})).unwrap();
        assert_eq!(answers["q1"], AnswerValue::from("Raiders"));
        assert_eq!(answers["q2"], AnswerValue::from(vec!["Pune", "Delhi"]));
        assert_eq!(json!(answers), json!({"q1": "Raiders", "q2": ["Pune", "Delhi"]}));
    }

    #[test]
    fn matching() {
        assert!(AnswerValue::from("Yes").matches("Yes"));
        assert!(!AnswerValue::from("yes").matches("Yes"));
        assert!(!AnswerValue::from("Yes ").matches("Yes"));
        assert!(!AnswerValue::from(vec!["Yes"]).matches("Yes"));
    }
}
