//! # Closed Vocabularies
//!
//! The catalog uses two controlled vocabularies: the kind of catalog item
//! ([`ItemType`]) and the methodological type keyword ([`TypeKeyword`]).
//! Each is a closed enum; every `match` must be exhaustive, so adding a term
//! forces every consumer to handle it.
//!
//! ## Matching Contract
//!
//! Parsing is a case-sensitive exact match against the canonical wire
//! spelling. The vocabulary contains mixed-case terms (`"Physics-based"`,
//! `"Data-Driven"`) whose spelling is itself part of the controlled term, so
//! `"stochastic"` and `"STOCHASTIC"` are rejected in favor of `"Stochastic"`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::VocabularyError;

/// A closed set of accepted string values for one field.
pub trait Vocabulary: Copy + Sized + 'static {
    /// Field name the vocabulary is attached to, used in error reports.
    const FIELD: &'static str;

    /// Every term, in declaration order.
    fn all() -> &'static [Self];

    /// Canonical wire spelling of this term.
    fn as_str(&self) -> &'static str;

    /// Human-readable definition. Empty where the catalog has not defined one.
    fn definition(&self) -> &'static str;

    /// Accepted wire values, sorted.
    fn accepted() -> Vec<&'static str> {
        let mut values: Vec<&'static str> = Self::all().iter().map(|v| v.as_str()).collect();
        values.sort_unstable();
        values
    }

    /// Parse a candidate by exact, case-sensitive match.
    ///
    /// # Errors
    ///
    /// Returns [`VocabularyError`] naming the field, the offending value and
    /// the sorted accepted values.
    fn parse_value(candidate: &str) -> Result<Self, VocabularyError> {
        Self::all()
            .iter()
            .copied()
            .find(|term| term.as_str() == candidate)
            .ok_or_else(|| VocabularyError {
                field: Self::FIELD,
                value: candidate.to_string(),
                accepted: Self::accepted(),
            })
    }
}

/// Serialize as the wire spelling; deserialize through
/// [`Vocabulary::parse_value`] so that unknown terms are rejected with the
/// same error the validator reports.
macro_rules! impl_vocabulary_traits {
    ($ty:ident) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::parse_value(&raw).map_err(serde::de::Error::custom)
            }
        }

        impl FromStr for $ty {
            type Err = VocabularyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_value(s)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Kind of catalog item described by a profile.
///
/// | Term | Meaning |
/// |------|---------|
/// | `model` | A representation of a system used to approximate it |
/// | `framework` | A modeling system composed of multiple component models |
/// | `tool` | An interface to a model, or a pre/post-processing program |
/// | `testbed` | Infrastructure for evaluating model and data integration |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemType {
    /// A model; the default when a profile does not say.
    #[default]
    Model,
    /// A coupled modeling system.
    Framework,
    /// Supporting software around a model.
    Tool,
    /// Evaluation infrastructure.
    Testbed,
}

impl Vocabulary for ItemType {
    const FIELD: &'static str = "item_type";

    fn all() -> &'static [Self] {
        &[Self::Model, Self::Framework, Self::Tool, Self::Testbed]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Framework => "framework",
            Self::Tool => "tool",
            Self::Testbed => "testbed",
        }
    }

    fn definition(&self) -> &'static str {
        match self {
            Self::Model => {
                "A representation of a system via physics, mathematics, or empirical data, \
                 that can be used to approximate the system in question and used to conduct \
                 research or apply research to a management application."
            }
            Self::Framework => {
                "A modeling system composed of multiple component models or modules, which \
                 themselves could be described by a model catalog item. Sometimes known as a \
                 coupled model (for example COAWST, HayWired, National Seismic Hazard Mapping \
                 Project)."
            }
            Self::Tool => {
                "Not the model algorithm or code itself, but either an interface built to \
                 facilitate interaction between a user and the model, or a pre-processing or \
                 post-processing program used to prepare inputs or outputs for the model \
                 algorithm."
            }
            Self::Testbed => {
                "Infrastructure that allows you to understand model and data integration and \
                 performance (for example ILAMB, or the USGS HyTest project)."
            }
        }
    }
}

impl_vocabulary_traits!(ItemType);

/// Methodological type keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKeyword {
    /// `Analytical`
    Analytical,
    /// `Conceptual`
    Conceptual,
    /// `Data-Driven`
    DataDriven,
    /// `Deterministic`
    Deterministic,
    /// `Empirical`
    Empirical,
    /// `Geospatial`
    Geospatial,
    /// `Mathematical`
    Mathematical,
    /// `Numerical`
    Numerical,
    /// `Mechanistic`
    Mechanistic,
    /// `Physics-based`
    PhysicsBased,
    /// `Process-based`
    ProcessBased,
    /// `Statistical`
    Statistical,
    /// `Stochastic`
    Stochastic,
}

/// Number of methodological type keywords.
pub const TYPE_KEYWORD_COUNT: usize = 13;

impl Vocabulary for TypeKeyword {
    const FIELD: &'static str = "type_keywords";

    fn all() -> &'static [Self] {
        &[
            Self::Analytical,
            Self::Conceptual,
            Self::DataDriven,
            Self::Deterministic,
            Self::Empirical,
            Self::Geospatial,
            Self::Mathematical,
            Self::Numerical,
            Self::Mechanistic,
            Self::PhysicsBased,
            Self::ProcessBased,
            Self::Statistical,
            Self::Stochastic,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Analytical => "Analytical",
            Self::Conceptual => "Conceptual",
            Self::DataDriven => "Data-Driven",
            Self::Deterministic => "Deterministic",
            Self::Empirical => "Empirical",
            Self::Geospatial => "Geospatial",
            Self::Mathematical => "Mathematical",
            Self::Numerical => "Numerical",
            Self::Mechanistic => "Mechanistic",
            Self::PhysicsBased => "Physics-based",
            Self::ProcessBased => "Process-based",
            Self::Statistical => "Statistical",
            Self::Stochastic => "Stochastic",
        }
    }

    fn definition(&self) -> &'static str {
        match self {
            Self::Analytical => {
                "A mathematical model with a closed form solution: the solution to the \
                 equations describing changes in the system can be expressed as an analytic \
                 function."
            }
            Self::Conceptual => {
                "A representation of a system made of the composition of concepts, used to \
                 help people know, understand, or simulate the subject the model represents."
            }
            Self::DataDriven | Self::Geospatial => "",
            Self::Deterministic => {
                "The output of the model is fully determined by the parameter values and the \
                 initial conditions."
            }
            Self::Empirical => {
                "Based on empirical or experimental observations rather than on mathematically \
                 describable relationships of the system modeled."
            }
            Self::Mathematical => "A description of a system using mathematical concepts and language.",
            Self::Numerical => {
                "A mathematical model that uses a numerical time-stepping procedure to obtain \
                 the model's behavior over time."
            }
            Self::Mechanistic => {
                "Assumes a complex system can be understood by examining the workings of its \
                 individual parts and the manner in which they are coupled."
            }
            Self::PhysicsBased => "Uses equations based on the laws of physics.",
            Self::ProcessBased => "Based on a theoretical understanding of the relevant physical processes.",
            Self::Statistical => {
                "Embodies a set of statistical assumptions concerning the generation of sample \
                 data and similar data from a larger population."
            }
            Self::Stochastic => {
                "Also called a probabilistic model: incorporates random variables and \
                 probability distributions, giving a distribution of outcomes rather than a \
                 single one."
            }
        }
    }
}

impl_vocabulary_traits!(TypeKeyword);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_type_accepted_is_sorted() {
        assert_eq!(
            ItemType::accepted(),
            vec!["framework", "model", "testbed", "tool"]
        );
    }

    #[test]
    fn item_type_default_is_model() {
        assert_eq!(ItemType::default(), ItemType::Model);
    }

    #[test]
    fn type_keyword_count() {
        assert_eq!(TypeKeyword::all().len(), TYPE_KEYWORD_COUNT);
    }

    #[test]
    fn all_terms_unique() {
        let mut seen = std::collections::HashSet::new();
        for term in TypeKeyword::all() {
            assert!(seen.insert(term.as_str()), "Duplicate term: {term}");
        }
    }

    #[test]
    fn as_str_roundtrip() {
        for term in TypeKeyword::all() {
            let parsed: TypeKeyword = term.as_str().parse().unwrap();
            assert_eq!(*term, parsed);
        }
        for term in ItemType::all() {
            let parsed: ItemType = term.as_str().parse().unwrap();
            assert_eq!(*term, parsed);
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        let err = TypeKeyword::parse_value("stochastic").unwrap_err();
        assert_eq!(err.field, "type_keywords");
        assert_eq!(err.value, "stochastic");
        assert!(err.accepted.contains(&"Stochastic"));
        assert!("physics-based".parse::<TypeKeyword>().is_err());
        assert!("Model".parse::<ItemType>().is_err());
        assert!("".parse::<ItemType>().is_err());
    }

    #[test]
    fn rejection_names_field_and_sorted_values() {
        let err = ItemType::parse_value("simulation").unwrap_err();
        assert_eq!(err.field, "item_type");
        assert_eq!(err.accepted, vec!["framework", "model", "testbed", "tool"]);
    }

    #[test]
    fn serde_uses_wire_spelling() {
        let json = serde_json::to_string(&TypeKeyword::PhysicsBased).unwrap();
        assert_eq!(json, "\"Physics-based\"");
        let parsed: TypeKeyword = serde_json::from_str("\"Data-Driven\"").unwrap();
        assert_eq!(parsed, TypeKeyword::DataDriven);
        assert!(serde_json::from_str::<TypeKeyword>("\"data-driven\"").is_err());
    }

    #[test]
    fn undefined_terms_have_empty_definition() {
        assert!(TypeKeyword::DataDriven.definition().is_empty());
        assert!(TypeKeyword::Geospatial.definition().is_empty());
        assert!(!TypeKeyword::Stochastic.definition().is_empty());
        for term in ItemType::all() {
            assert!(!term.definition().is_empty());
        }
    }

    #[test]
    fn exhaustive_match_compiles() {
        fn is_model_like(t: &ItemType) -> bool {
            match t {
                ItemType::Model | ItemType::Framework => true,
                ItemType::Tool | ItemType::Testbed => false,
            }
        }
        assert_eq!(
            ItemType::all().iter().filter(|t| is_model_like(t)).count(),
            2
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any string that is not exactly a wire spelling is rejected.
        #[test]
        fn unknown_strings_are_rejected(candidate in "[A-Za-z -]{0,20}") {
            let known = TypeKeyword::all().iter().any(|t| t.as_str() == candidate);
            prop_assert_eq!(TypeKeyword::parse_value(&candidate).is_ok(), known);
        }

        /// Changing the case of any accepted term breaks the match unless the
        /// result happens to be identical.
        #[test]
        fn case_changes_are_rejected(idx in 0usize..TYPE_KEYWORD_COUNT) {
            let term = TypeKeyword::all()[idx].as_str();
            let lower = term.to_lowercase();
            let upper = term.to_uppercase();
            prop_assert!(TypeKeyword::parse_value(&lower).is_err());
            prop_assert!(TypeKeyword::parse_value(&upper).is_err());
        }
    }
}
