//! First-matching-rule-wins classification across several dimensions.
//!
//! Rules are evaluated in a fixed priority order. When no rule matches, the
//! fallback decides: either a fixed label or a tier table on a signal. This
//! is how a pricing tier ("Premium") takes precedence over a demand tier.

use super::predicates::{flag_matches, is_below, meets_threshold};
use super::{Signal, SignalInput, TierClassifier};

/// Boolean condition over a record and its derived metrics.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    AtLeast(Signal, f64),
    Below(Signal, f64),
    FlagIs(String, bool),
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

impl Condition {
    pub fn flag_is(field: &str, expected: bool) -> Self {
        Condition::FlagIs(field.to_string(), expected)
    }

    pub fn holds(&self, input: &SignalInput<'_>) -> bool {
        match self {
            Condition::AtLeast(signal, threshold) => {
                meets_threshold(signal.value(input), *threshold)
            }
            Condition::Below(signal, threshold) => is_below(signal.value(input), *threshold),
            Condition::FlagIs(field, expected) => flag_matches(input.record, field, *expected),
            Condition::All(conditions) => conditions.iter().all(|c| c.holds(input)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.holds(input)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub label: String,
    pub condition: Condition,
}

impl Rule {
    pub fn new(label: impl Into<String>, condition: Condition) -> Self {
        Self {
            label: label.into(),
            condition,
        }
    }
}

/// What a rule set answers when no rule matches.
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback {
    Label(String),
    Tiers(TierClassifier),
}

/// Ordered rules plus a fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    fallback: Fallback,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>, fallback: Fallback) -> Self {
        Self { rules, fallback }
    }

    /// Index of the first matching rule, if any.
    pub fn matching_rule(&self, input: &SignalInput<'_>) -> Option<usize> {
        self.rules.iter().position(|rule| rule.condition.holds(input))
    }

    pub fn classify<'s>(&'s self, input: &SignalInput<'_>) -> &'s str {
        match self.matching_rule(input) {
            Some(index) => self.rules[index].label.as_str(),
            None => match &self.fallback {
                Fallback::Label(label) => label.as_str(),
                Fallback::Tiers(classifier) => classifier.classify(input),
            },
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TierTable;
    use crate::metrics::PrecisionPolicy;
    use crate::record::{fields, EntityKind, EntityRecord};
    use crate::testkit::RecordBuilder;

    fn status_rules() -> RuleSet {
        let demand = TierTable::new(
            [(30.0, "Alta Demanda"), (10.0, "Demanda Media"), (1.0, "Baja Demanda")],
            "Sin Actividad",
        )
        .unwrap();
        RuleSet::new(
            vec![
                Rule::new("Inactivo", Condition::flag_is(fields::ACTIVE, false)),
                Rule::new("Premium", Condition::AtLeast(Signal::aux(fields::PRICE), 150.0)),
            ],
            Fallback::Tiers(TierClassifier::new(Signal::RawCount, demand)),
        )
    }

    fn status_of(record: &EntityRecord) -> String {
        let input = SignalInput::new(record, 100, &PrecisionPolicy::default());
        status_rules().classify(&input).to_string()
    }

    #[test]
    fn test_premium_takes_precedence_over_demand() {
        let record = RecordBuilder::new(EntityKind::Service, "Genética")
            .raw(45)
            .number(fields::PRICE, 320.0)
            .build();
        assert_eq!(status_of(&record), "Premium");
    }

    #[test]
    fn test_inactive_takes_precedence_over_premium() {
        let record = RecordBuilder::new(EntityKind::Service, "Genética")
            .raw(45)
            .number(fields::PRICE, 320.0)
            .flag(fields::ACTIVE, false)
            .build();
        assert_eq!(status_of(&record), "Inactivo");
    }

    #[test]
    fn test_falls_back_to_demand_tier() {
        let record = RecordBuilder::new(EntityKind::Service, "Hematología")
            .raw(12)
            .number(fields::PRICE, 25.0)
            .build();
        assert_eq!(status_of(&record), "Demanda Media");
    }

    #[test]
    fn test_label_fallback_and_compound_conditions() {
        let rules = RuleSet::new(
            vec![Rule::new(
                "Crítico",
                Condition::All(vec![
                    Condition::AtLeast(Signal::RawCount, 10.0),
                    Condition::Any(vec![
                        Condition::Below(Signal::SecondaryCount, 2.0),
                        Condition::flag_is(fields::ACTIVE, false),
                    ]),
                ]),
            )],
            Fallback::Label("Normal".into()),
        );

        let hot = RecordBuilder::new(EntityKind::Exam, "PCR").raw(12).secondary(1).build();
        let calm = RecordBuilder::new(EntityKind::Exam, "TSH").raw(12).secondary(6).build();
        let policy = PrecisionPolicy::default();

        assert_eq!(rules.classify(&SignalInput::new(&hot, 24, &policy)), "Crítico");
        assert_eq!(rules.classify(&SignalInput::new(&calm, 24, &policy)), "Normal");
        assert_eq!(rules.matching_rule(&SignalInput::new(&calm, 24, &policy)), None);
    }
}
