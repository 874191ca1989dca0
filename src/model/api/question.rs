use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{
    api::id::ApiId,
    common::{
        answer::Answers,
        question::{ConditionalRule, QuestionType},
    },
    db::question::{NewQuestion, Question},
    mongodb::Id,
};

/// A question as authored by an admin, before it is given a display position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSpec {
    /// Question text.
    pub text: String,
    /// What kind of input the question takes.
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// Possible answers, for choice questions.
    #[serde(default)]
    pub options: Vec<String>,
    /// Must the question be answered?
    #[serde(default)]
    pub required: bool,
    /// Only show this question if a previous answer matches.
    #[serde(default)]
    pub conditional_on: Option<ConditionalRule>,
}

impl QuestionSpec {
    /// Tidy up the spec and reject it if it can never be answered.
    ///
    /// Blank options are dropped and text questions lose their options entirely.
    /// A rule with no question ID is removed. A rule naming a valid ID is
    /// rewritten to the ID's canonical form, which is what answers are keyed by.
    pub fn normalize(mut self) -> Result<Self> {
        if self.text.trim().is_empty() {
            return Err(Error::bad_request("Question text is required"));
        }

        if self.kind.has_options() {
            self.options.retain(|option| !option.trim().is_empty());
            if self.options.is_empty() {
                return Err(Error::bad_request(format!(
                    "A {} question needs at least one option",
                    self.kind
                )));
            }
        } else {
            self.options.clear();
        }

        self.conditional_on = self.conditional_on.filter(ConditionalRule::is_set);
        if let Some(rule) = &mut self.conditional_on {
            if let Ok(id) = rule.question_id.parse::<Id>() {
                rule.question_id = id.to_string();
            }
        }
        Ok(self)
    }

    /// Check that the question this spec depends on can actually trigger it.
    ///
    /// `dependency` is the question named by the rule, if it exists.
    pub fn check_dependency(&self, dependency: Option<&Question>) -> Result<()> {
        let rule = match &self.conditional_on {
            Some(rule) => rule,
            None => return Ok(()),
        };
        let dependency = dependency.ok_or_else(|| {
            Error::bad_request(format!(
                "Conditional question {} does not exist",
                rule.question_id
            ))
        })?;
        if dependency.kind != QuestionType::SingleChoice {
            return Err(Error::bad_request(format!(
                "Conditional question {} is not a single choice question",
                rule.question_id
            )));
        }
        if !dependency.options.contains(&rule.answer) {
            return Err(Error::bad_request(format!(
                "'{}' is not an option of question {}",
                rule.answer, rule.question_id
            )));
        }
        Ok(())
    }

    /// Convert this spec into a question at the given display position.
    pub fn into_question(self, order: u32) -> NewQuestion {
        NewQuestion {
            text: self.text,
            kind: self.kind,
            options: self.options,
            required: self.required,
            order,
            conditional_on: self.conditional_on,
        }
    }
}

/// A question, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDescription {
    pub id: ApiId,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub options: Vec<String>,
    pub required: bool,
    pub order: u32,
    pub conditional_on: Option<ConditionalRule>,
}

impl From<Question> for QuestionDescription {
    fn from(question: Question) -> Self {
        let core = question.question;
        Self {
            id: question.id.into(),
            text: core.text,
            kind: core.kind,
            options: core.options,
            required: core.required,
            order: core.order,
            conditional_on: core.conditional_on,
        }
    }
}

/// The answers given so far, used to work out which questions to show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityRequest {
    #[serde(default)]
    pub answers: Answers,
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::common::{answer::AnswerValue, visibility::visible_questions};

    fn stored(spec: QuestionSpec, order: u32) -> Question {
        Question {
            id: Id::new(),
            question: spec.into_question(order),
        }
    }

    #[test]
    fn normalize_drops_blank_options() {
        let mut spec = QuestionSpec::example_teams();
        spec.options.push("   ".to_string());
        spec.options.insert(0, String::new());
        let normalized = spec.normalize().unwrap();
        assert_eq!(normalized.options, QuestionSpec::example_teams().options);
    }

    #[test]
    fn normalize_clears_text_options() {
        let mut spec = QuestionSpec::example_raid(&Id::new().into());
        spec.options = vec!["ignored".to_string()];
        assert!(spec.normalize().unwrap().options.is_empty());
    }

    #[test]
    fn normalize_rejects_unanswerable() {
        let mut no_text = QuestionSpec::example_team();
        no_text.text = "  ".to_string();
        assert!(no_text.normalize().is_err());

        let mut no_options = QuestionSpec::example_team();
        no_options.options = vec!["".to_string()];
        assert!(no_options.normalize().is_err());
    }

    #[test]
    fn normalize_removes_empty_rule() {
        let mut spec = QuestionSpec::example_team();
        spec.conditional_on = Some(ConditionalRule {
            question_id: String::new(),
            answer: "Raiders".to_string(),
        });
        assert_eq!(spec.normalize().unwrap().conditional_on, None);
    }

    #[test]
    fn normalize_canonicalizes_rule_id() {
        let team = stored(QuestionSpec::example_team(), 1);
        let mut spec = QuestionSpec::example_raid(&team.id.into());
        spec.conditional_on.as_mut().unwrap().question_id = team.id.to_string().to_uppercase();

        let spec = spec.normalize().unwrap();
        assert_eq!(
            spec.conditional_on.as_ref().unwrap().question_id,
            team.id.to_string()
        );
        assert!(spec.check_dependency(Some(&team)).is_ok());

        // Answers are keyed by the IDs the API hands out.
        let raid = stored(spec, 2);
        let answers = Answers::from([(team.id.to_string(), AnswerValue::from("Raiders"))]);
        let questions = vec![team, raid];
        assert_eq!(visible_questions(&questions, &answers).len(), 2);
    }

    #[test]
    fn dependency_checks() {
        let team = stored(QuestionSpec::example_team(), 1);
        let teams = stored(QuestionSpec::example_teams(), 2);
        let spec = QuestionSpec::example_raid(&team.id.into());

        assert!(spec.check_dependency(Some(&team)).is_ok());
        assert!(spec.check_dependency(None).is_err());
        assert!(spec.check_dependency(Some(&teams)).is_err());

        let mut bad_answer = spec.clone();
        bad_answer.conditional_on.as_mut().unwrap().answer = "Referees".to_string();
        assert!(bad_answer.check_dependency(Some(&team)).is_err());

        // No rule, nothing to check.
        assert!(QuestionSpec::example_team().check_dependency(None).is_ok());
    }

    #[test]
    fn into_question_keeps_fields() {
        let question = QuestionSpec::example_teams().into_question(7);
        assert_eq!(question.order, 7);
        assert_eq!(question.kind, QuestionType::MultiChoice);
        assert_eq!(question.options.len(), 3);
        assert!(!question.required);
    }
}
