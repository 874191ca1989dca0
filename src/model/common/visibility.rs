use super::{answer::Answers, question::ConditionalRule};

/// Anything that may carry a conditional display rule.
pub trait Conditional {
    fn conditional_on(&self) -> Option<&ConditionalRule>;
}

/// Is a question with this rule visible given the answers so far?
///
/// Questions without a rule are always visible; otherwise the referenced
/// question's answer must equal the rule's answer exactly.
pub fn is_visible(rule: Option<&ConditionalRule>, answers: &Answers) -> bool {
    match rule {
        Some(rule) if rule.is_set() => answers
            .get(&rule.question_id)
            .map_or(false, |answer| answer.matches(&rule.answer)),
        _ => true,
    }
}

/// Filter questions down to those currently visible, preserving their order.
pub fn visible_questions<'a, Q>(questions: &'a [Q], answers: &Answers) -> Vec<&'a Q>
where
    Q: Conditional,
{
    questions
        .iter()
        .filter(|question| is_visible(question.conditional_on(), answers))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::common::answer::AnswerValue;

    struct Q(&'static str, Option<ConditionalRule>);

    impl Conditional for Q {
        fn conditional_on(&self) -> Option<&ConditionalRule> {
            self.1.as_ref()
        }
    }

    fn rule(question_id: &str, answer: &str) -> Option<ConditionalRule> {
        Some(ConditionalRule {
            question_id: question_id.to_string(),
            answer: answer.to_string(),
        })
    }

    fn names(visible: Vec<&Q>) -> Vec<&'static str> {
        visible.into_iter().map(|q| q.0).collect()
    }

    fn survey() -> Vec<Q> {
        vec![
            Q("team", None),
            Q("why-raiders", rule("team", "Raiders")),
            Q("why-defenders", rule("team", "Defenders")),
            Q("follow-up", rule("why-raiders", "Speed")),
            Q("unconditional", rule("", "")),
        ]
    }

    #[test]
    fn unanswered_dependency_hides() {
        let questions = survey();
        let visible = visible_questions(&questions, &Answers::new());
        assert_eq!(names(visible), vec!["team", "unconditional"]);
    }

    #[test]
    fn matching_answer_shows() {
        let questions = survey();
        let answers = Answers::from([("team".to_string(), AnswerValue::from("Raiders"))]);
        let visible = visible_questions(&questions, &answers);
        assert_eq!(names(visible), vec!["team", "why-raiders", "unconditional"]);
    }

    #[test]
    fn exact_match_only() {
        let questions = survey();
        for near_miss in ["raiders", "Raiders ", ""] {
            let answers = Answers::from([("team".to_string(), AnswerValue::from(near_miss))]);
            let visible = visible_questions(&questions, &answers);
            assert_eq!(names(visible), vec!["team", "unconditional"]);
        }

        let answers = Answers::from([("team".to_string(), AnswerValue::from(vec!["Raiders"]))]);
        let visible = visible_questions(&questions, &answers);
        assert_eq!(names(visible), vec!["team", "unconditional"]);
    }

    #[test]
    fn chained_rules_use_recorded_answers() {
        let questions = survey();
        let answers = Answers::from([
            ("team".to_string(), AnswerValue::from("Raiders")),
            ("why-raiders".to_string(), AnswerValue::from("Speed")),
        ]);
        let visible = visible_questions(&questions, &answers);
        assert_eq!(
            names(visible),
            vec!["team", "why-raiders", "follow-up", "unconditional"]
        );
    }
}
