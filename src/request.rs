//! Request boundary.
//!
//! Turns a loosely typed JSON request body into an [`InterventionSelection`]
//! before anything reaches the engine. Missing toggles default to disabled; a
//! toggle that is present but not a boolean is rejected. The optional opaque
//! `charts` payload (pre-rendered chart images destined for report exports)
//! is carried alongside but never passed to the engine.

use serde::Deserialize;
use serde_json::Value;

use crate::error::RequestError;
use crate::intervention::InterventionSelection;

#[derive(Deserialize)]
struct RequestBody {
    #[serde(flatten)]
    selection: InterventionSelection,
    #[serde(default)]
    charts: Option<Value>,
}

/// A validated simulation request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationRequest {
    /// The selection to simulate.
    pub selection: InterventionSelection,
    /// Opaque chart payload, if the caller sent one.
    pub charts: Option<Value>,
}

impl SimulationRequest {
    /// Parses and validates a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::Json` for invalid JSON, `RequestError::NotAnObject`
    /// if the body is not an object, and `RequestError::InvalidToggle` if a
    /// toggle is neither a boolean nor `null`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dalysim::request::SimulationRequest;
    ///
    /// let request = SimulationRequest::from_json(
    ///     r#"{"clean_air": true, "charts": {"pie": "iVBORw0KGgo="}}"#,
    /// ).unwrap();
    /// assert!(request.selection.clean_air);
    /// assert!(!request.selection.lc_treatment);
    /// assert!(request.charts.is_some());
    /// ```
    pub fn from_json(body: &str) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    /// Validates an already parsed JSON body.
    ///
    /// # Errors
    ///
    /// See [`SimulationRequest::from_json`].
    pub fn from_value(value: Value) -> Result<Self, RequestError> {
        if !value.is_object() {
            return Err(RequestError::NotAnObject);
        }

        let body = RequestBody::deserialize(value).map_err(RequestError::InvalidToggle)?;
        Ok(Self {
            selection: body.selection,
            charts: body.charts,
        })
    }

    /// Drops the chart payload and returns the selection.
    #[must_use]
    pub fn into_selection(self) -> InterventionSelection {
        self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intervention::Intervention;

    #[test]
    fn empty_object_is_status_quo() {
        let request = SimulationRequest::from_json("{}").unwrap();
        assert_eq!(request.selection, InterventionSelection::none());
        assert!(request.charts.is_none());
    }

    #[test]
    fn parses_every_toggle() {
        let request = SimulationRequest::from_json(
            r#"{"clean_air": true, "diagnostics": true, "nose_sprays": true,
                "acute_treatment": true, "lc_treatment": true}"#,
        )
        .unwrap();
        assert_eq!(request.into_selection(), InterventionSelection::all());
    }

    #[test]
    fn null_toggle_defaults_to_disabled() {
        let request = SimulationRequest::from_json(r#"{"diagnostics": null}"#).unwrap();
        assert!(!request.selection.diagnostics);
    }

    #[test]
    fn strips_charts() {
        let request =
            SimulationRequest::from_json(r#"{"nose_sprays": true, "charts": [1, 2, 3]}"#).unwrap();
        assert_eq!(request.charts, Some(serde_json::json!([1, 2, 3])));
        assert_eq!(
            request.into_selection(),
            InterventionSelection::none().with(Intervention::NoseSprays)
        );
    }

    #[test]
    fn ignores_unknown_keys() {
        let request = SimulationRequest::from_json(r#"{"vaccines": "yes"}"#).unwrap();
        assert!(request.selection.is_empty());
    }

    #[test]
    fn rejects_non_boolean_toggle() {
        let err = SimulationRequest::from_json(r#"{"acute_treatment": "true"}"#).unwrap_err();
        assert!(matches!(err, RequestError::InvalidToggle(_)));
        assert!(err.to_string().contains("a boolean"));
    }

    #[test]
    fn agrees_with_selection_deserializer() {
        let bodies = [
            r#"{"clean_air": null, "diagnostics": true}"#,
            r#"{"lc_treatment": true, "charts": null}"#,
            r#"{"nose_sprays": false, "extra": [1]}"#,
            "{}",
        ];
        for body in bodies {
            let request = SimulationRequest::from_json(body).unwrap();
            let direct: InterventionSelection = serde_json::from_str(body).unwrap();
            assert_eq!(request.selection, direct, "{body}");
        }

        let request =
            SimulationRequest::from_json(r#"{"clean_air": null, "diagnostics": true}"#).unwrap();
        assert_eq!(
            request.selection,
            InterventionSelection::none().with(Intervention::Diagnostics)
        );

        let bad = "{\"clean_air\": 3}";
        assert!(SimulationRequest::from_json(bad).is_err());
        assert!(serde_json::from_str::<InterventionSelection>(bad).is_err());
    }

    #[test]
    fn rejects_non_object_body() {
        assert!(matches!(
            SimulationRequest::from_json("[true]"),
            Err(RequestError::NotAnObject)
        ));
        assert!(matches!(
            SimulationRequest::from_json("{"),
            Err(RequestError::Json(_))
        ));
    }
}
