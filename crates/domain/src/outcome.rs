//! Outcomes of site calls and the result returned to the caller.

use serde::Serialize;

use crate::error::BackendError;

/// What a single site call produced.
///
/// Serializes as the backend's JSON untouched, or as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SiteOutcome {
    Data(serde_json::Value),
    Failed { error: String },
}

impl SiteOutcome {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl From<Result<serde_json::Value, BackendError>> for SiteOutcome {
    fn from(result: Result<serde_json::Value, BackendError>) -> Self {
        match result {
            Ok(value) => Self::Data(value),
            Err(err) => Self::Failed {
                error: err.to_string(),
            },
        }
    }
}

/// Response to a chart query.
///
/// A single-site query yields one outcome. A wildcard query yields one
/// outcome per site, in registry order, rendered as a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartResult {
    Single(SiteOutcome),
    All(Vec<SiteOutcome>),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::location::Site;

    #[test]
    fn should_serialize_payload_verbatim() {
        let outcome = SiteOutcome::Data(json!({"power": [1, 2, 3]}));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"power": [1, 2, 3]})
        );
    }

    #[test]
    fn should_serialize_failure_as_error_object() {
        let outcome = SiteOutcome::from(Err(BackendError::UnresolvedAddress {
            site: Site::JscTpp,
        }));
        assert!(outcome.is_failed());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"error": "no address configured for JSC_TPP"})
        );
    }

    #[test]
    fn should_serialize_fan_out_as_array() {
        let result = ChartResult::All(vec![
            SiteOutcome::Data(json!(1)),
            SiteOutcome::Failed {
                error: "down".to_string(),
            },
        ]);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!([1, {"error": "down"}])
        );
    }

    #[test]
    fn should_serialize_single_without_wrapping() {
        let result = ChartResult::Single(SiteOutcome::Data(json!({"v": 7})));
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"v": 7}));
    }
}
