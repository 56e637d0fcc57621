//! Rule-table recommendations
//!
//! Every recommendation, strength, improvement area, career path and
//! learning suggestion comes from an ordered table of `(predicate, output)`
//! rules. Rules are independent: each one that applies contributes its
//! output once, in table order.

pub mod career;
pub mod engine;
pub mod profile;

pub use career::{
    suggest_career_paths, suggest_learning, CareerPath, LearningRecommendation, CAREER_PATH_RULES,
    LEARNING_RULES,
};
pub use engine::{
    generate, RecommendationReport, RecommendationTemplate, IMPROVEMENT_AREA_RULES,
    RECOMMENDATION_RULES, STRENGTH_RULES,
};
pub use profile::{PartialCollaborationScores, PerformanceData, RecommendationInput, UserProfile};

/// One entry of a rule table
pub struct Rule<C, T> {
    /// Stable identifier, used in logs and tests
    pub name: &'static str,
    pub applies: fn(&C) -> bool,
    pub output: T,
}

/// Outputs of every applicable rule, in table order
pub fn evaluate<C, T: Clone>(rules: &[Rule<C, T>], input: &C) -> Vec<T> {
    rules
        .iter()
        .filter(|rule| (rule.applies)(input))
        .map(|rule| rule.output.clone())
        .collect()
}

/// Names of the rules that apply, in table order
pub fn matching_rules<C, T>(rules: &[Rule<C, T>], input: &C) -> Vec<&'static str> {
    rules
        .iter()
        .filter(|rule| (rule.applies)(input))
        .map(|rule| rule.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_even(n: &i32) -> bool {
        n % 2 == 0
    }

    fn is_positive(n: &i32) -> bool {
        *n > 0
    }

    fn never(_: &i32) -> bool {
        false
    }

    const RULES: &[Rule<i32, &str>] = &[
        Rule {
            name: "even",
            applies: is_even,
            output: "even",
        },
        Rule {
            name: "never",
            applies: never,
            output: "never",
        },
        Rule {
            name: "positive",
            applies: is_positive,
            output: "positive",
        },
    ];

    #[test]
    fn test_rules_apply_independently_in_order() {
        assert_eq!(evaluate(RULES, &4), vec!["even", "positive"]);
        assert_eq!(evaluate(RULES, &3), vec!["positive"]);
        assert_eq!(evaluate(RULES, &-2), vec!["even"]);
        assert!(evaluate(RULES, &-1).is_empty());
    }

    #[test]
    fn test_matching_rule_names() {
        assert_eq!(matching_rules(RULES, &2), vec!["even", "positive"]);
    }
}
