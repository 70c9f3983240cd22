//! Checks run on an [`AnalysisSpec`] before it becomes an
//! [`AnalysisConfig`](crate::types::AnalysisConfig).
//!
//! Every check runs, so one call reports all the problems of a spec. Errors
//! reject the spec; warnings flag settings that parse but probably are not
//! what the author meant.

use std::collections::HashMap;

use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::{InvalidSpecError, SpecError};
use super::spec::{AnalysisSpec, SPEC_VERSION};

/// What [`AnalysisSpec::validate`] found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpecReview {
    pub errors: Vec<SpecError>,
    pub warnings: Vec<SpecError>,
}

impl SpecReview {
    /// No errors; warnings are allowed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Nothing to report at all.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// The warnings of an accepted spec, or the errors that reject it.
    pub fn into_result(self) -> Result<Vec<SpecError>, InvalidSpecError> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(InvalidSpecError {
                errors: self.errors,
            })
        }
    }
}

impl AnalysisSpec {
    /// Check the version, the keyword settings and any unrecognized field.
    pub fn validate(&self) -> SpecReview {
        let mut review = SpecReview::default();

        if self.v != SPEC_VERSION {
            review.errors.push(
                SpecError::new(
                    ErrorCode::UnsupportedVersion,
                    "/v",
                    format!("unsupported spec version {}", self.v),
                )
                .with_hint(format!("Set \"v\": {SPEC_VERSION}")),
            );
        }

        if self.keywords.max == Some(0) {
            review.errors.push(
                SpecError::new(ErrorCode::InvalidValue, "/keywords/max", "max must be greater than 0")
                    .with_hint("Remove max to use the default of 20, or set a positive value"),
            );
        }

        if self.keywords.phrase_weight == Some(0) {
            review.warnings.push(
                SpecError::new(
                    ErrorCode::IneffectiveValue,
                    "/keywords/phrase_weight",
                    "phrase_weight 0 removes every multi-word phrase from the keywords",
                )
                .with_hint("Use 1 to count phrases like single words"),
            );
        }

        let sections = [
            ("", &self.unknown_fields),
            ("/input", &self.input.unknown_fields),
            ("/keywords", &self.keywords.unknown_fields),
        ];
        let unknown = sections
            .into_iter()
            .flat_map(|(section, fields)| unrecognized(section, fields));
        if self.strict {
            review.errors.extend(unknown);
        } else {
            review.warnings.extend(unknown);
        }

        review
    }
}

/// One diagnostic per extra field of a section, sorted by name.
fn unrecognized(section: &str, fields: &HashMap<String, serde_json::Value>) -> Vec<SpecError> {
    let mut names: Vec<&String> = fields.keys().collect();
    names.sort();
    names
        .into_iter()
        .map(|name| {
            SpecError::new(
                ErrorCode::UnknownField,
                format!("{section}/{name}"),
                format!("unrecognized field \"{name}\""),
            )
            .with_hint("Check spelling or remove this field")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(json: &str) -> SpecReview {
        AnalysisSpec::from_json(json).unwrap().validate()
    }

    fn paths(errors: &[SpecError]) -> Vec<&str> {
        errors.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_defaults_are_clean() {
        assert!(review(r#"{ "v": 1 }"#).is_clean());
        assert!(AnalysisSpec::default().validate().is_clean());
        assert!(review(r#"{ "v": 1, "input": { "min_length": 0 } }"#).is_clean());
    }

    #[test]
    fn test_full_spec_is_clean() {
        let review = review(
            r#"{
                "v": 1,
                "strict": true,
                "scoring": "length_biased_frequency",
                "input": { "min_length": 50 },
                "keywords": { "max": 20, "phrase_weight": 2 }
            }"#,
        );
        assert!(review.is_clean());
    }

    #[test]
    fn test_future_version_rejected() {
        let review = review(r#"{ "v": 2 }"#);
        assert_eq!(review.errors.len(), 1);
        assert_eq!(review.errors[0].code, ErrorCode::UnsupportedVersion);
        assert_eq!(review.errors[0].hint.as_deref(), Some("Set \"v\": 1"));
    }

    #[test]
    fn test_zero_max_keywords_rejected() {
        let review = review(r#"{ "v": 1, "keywords": { "max": 0 } }"#);
        assert_eq!(paths(&review.errors), vec!["/keywords/max"]);
        assert_eq!(review.errors[0].code, ErrorCode::InvalidValue);
    }

    #[test]
    fn test_zero_phrase_weight_only_warns() {
        let review = review(r#"{ "v": 1, "keywords": { "phrase_weight": 0 } }"#);
        assert!(review.is_valid());
        assert_eq!(paths(&review.warnings), vec!["/keywords/phrase_weight"]);
        assert_eq!(review.warnings[0].code, ErrorCode::IneffectiveValue);
    }

    #[test]
    fn test_unknown_fields_warn_unless_strict() {
        let lenient = review(r#"{ "v": 1, "bogus": 42 }"#);
        assert!(lenient.is_valid());
        assert_eq!(paths(&lenient.warnings), vec!["/bogus"]);

        let strict = review(r#"{ "v": 1, "strict": true, "bogus": 42 }"#);
        assert_eq!(paths(&strict.errors), vec!["/bogus"]);
        assert_eq!(strict.errors[0].code, ErrorCode::UnknownField);
    }

    #[test]
    fn test_unknown_nested_fields_in_section_order() {
        let review = review(
            r#"{
                "v": 1,
                "strict": true,
                "zeta": 1,
                "alpha": 2,
                "keywords": { "top": 5 },
                "input": { "trim": true }
            }"#,
        );
        assert_eq!(
            paths(&review.errors),
            vec!["/alpha", "/zeta", "/input/trim", "/keywords/top"]
        );
    }

    #[test]
    fn test_all_problems_reported_together() {
        let review = review(r#"{ "v": 3, "strict": true, "bogus": true, "keywords": { "max": 0 } }"#);
        assert_eq!(paths(&review.errors), vec!["/v", "/keywords/max", "/bogus"]);
    }

    #[test]
    fn test_into_result() {
        let warnings = review(r#"{ "v": 1, "bogus": 1 }"#).into_result().unwrap();
        assert_eq!(warnings.len(), 1);

        let err = review(r#"{ "v": 1, "keywords": { "max": 0 } }"#)
            .into_result()
            .unwrap_err();
        assert_eq!(err.errors[0].code, ErrorCode::InvalidValue);
    }

    #[test]
    fn test_review_serializes_to_json() {
        let json = serde_json::to_value(review(r#"{ "v": 1, "keywords": { "max": 0 } }"#)).unwrap();
        assert_eq!(json["errors"][0]["code"], "invalid_value");
        assert_eq!(json["warnings"].as_array().unwrap().len(), 0);
    }
}
