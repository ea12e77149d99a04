//! Request DTOs for the city directory API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Request body for the city update operation (PUT /cities/:id)
///
/// All fields are optional; absent fields leave the stored value untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCityRequest {
    /// New display name
    #[serde(default)]
    pub name: Option<String>,
    /// New region
    #[serde(default)]
    pub region: Option<String>,
    /// New population
    #[serde(default)]
    pub population: Option<u64>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateCityRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Some("Name cannot be empty".to_string());
            }
        }
        if let Some(region) = &self.region {
            if region.trim().is_empty() {
                return Some("Region cannot be empty".to_string());
            }
        }
        if self.name.is_none()
            && self.region.is_none()
            && self.population.is_none()
            && self.description.is_none()
        {
            return Some("Update must change at least one field".to_string());
        }
        None
    }
}

/// Request body for ad hoc invalidation (POST /cache/invalidate)
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateRequest {
    /// Case-insensitive regular expression matched against cache keys and
    /// stringified cached data
    pub pattern: String,
}

impl InvalidateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.pattern.trim().is_empty() {
            return Some("Pattern cannot be empty".to_string());
        }
        None
    }
}

/// Query string for the search endpoint (GET /search?q=)
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Search term
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_deserialize() {
        let json = r#"{"population": 100000}"#;
        let req: UpdateCityRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.population, Some(100_000));
        assert!(req.name.is_none());
    }

    #[test]
    fn test_update_request_validate_empty_name() {
        let req = UpdateCityRequest {
            name: Some("   ".to_string()),
            region: None,
            population: None,
            description: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_update_request_validate_no_fields() {
        let req = UpdateCityRequest {
            name: None,
            region: None,
            population: None,
            description: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_update_request_validate_ok() {
        let req = UpdateCityRequest {
            name: Some("New Harbor".to_string()),
            region: None,
            population: Some(1),
            description: None,
        };
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_invalidate_request_validate() {
        let empty = InvalidateRequest {
            pattern: "".to_string(),
        };
        assert!(empty.validate().is_some());

        let ok = InvalidateRequest {
            pattern: "^city".to_string(),
        };
        assert!(ok.validate().is_none());
    }

    #[test]
    fn test_search_params_deserialize() {
        let params: SearchParams = serde_json::from_str(r#"{"q": "harbor"}"#).unwrap();
        assert_eq!(params.q, "harbor");
    }
}
