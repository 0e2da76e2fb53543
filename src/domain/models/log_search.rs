use serde::{Deserialize, Serialize};

/// Scheme prefix of every log resource key.
pub const LOG_RESOURCE_SCHEME: &str = "aws-cwl";

/// Result limit used when the registry configuration does not set one.
pub const DEFAULT_SEARCH_LIMIT: usize = 10000;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogGroupInfo {
    pub group_name: String,
    pub region_name: String,
}

impl LogGroupInfo {
    pub fn new(group_name: impl Into<String>, region_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            region_name: region_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParameters {
    pub limit: usize,
    pub filter_pattern: String,
}

/// Answers collected by the search wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchLogGroupResponse {
    pub log_group: String,
    pub filter_pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    log_group_name: String,
    region: String,
    filter_pattern: String,
    limit: usize,
}

impl SearchRequest {
    pub fn new(
        log_group_name: impl Into<String>,
        region: impl Into<String>,
        filter_pattern: impl Into<String>,
    ) -> Self {
        Self {
            log_group_name: log_group_name.into(),
            region: region.into(),
            filter_pattern: filter_pattern.into(),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn from_response(response: SearchLogGroupResponse, region: impl Into<String>) -> Self {
        Self::new(response.log_group, region, response.filter_pattern)
    }

    /// Sets the page size. A limit of 0 is raised to 1.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn log_group_name(&self) -> &str {
        &self.log_group_name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn filter_pattern(&self) -> &str {
        &self.filter_pattern
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn group_info(&self) -> LogGroupInfo {
        LogGroupInfo::new(&self.log_group_name, &self.region)
    }

    pub fn parameters(&self) -> SearchParameters {
        SearchParameters {
            limit: self.limit,
            filter_pattern: self.filter_pattern.clone(),
        }
    }

    pub fn resource_key(&self) -> LogResourceKey {
        LogResourceKey::from_args(&self.group_info(), &self.parameters())
    }
}

/// Identity of a registered log document.
///
/// Built as `aws-cwl:<group>:<region>?<parameters as JSON>`; the JSON field
/// order is fixed by `SearchParameters`, so equal inputs give equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogResourceKey(String);

impl LogResourceKey {
    pub fn from_args(info: &LogGroupInfo, parameters: &SearchParameters) -> Self {
        let query = serde_json::to_string(parameters).unwrap_or_default();
        Self(format!(
            "{}:{}:{}?{}",
            LOG_RESOURCE_SCHEME, info.group_name, info.region_name, query
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LogResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> SearchLogGroupResponse {
        SearchLogGroupResponse {
            log_group: "/aws/lambda/bar".to_string(),
            filter_pattern: "ERROR".to_string(),
        }
    }

    #[test]
    fn test_request_defaults_limit() {
        let request = SearchRequest::from_response(response(), "us-west-2");
        assert_eq!(request.limit(), 10000);
        assert_eq!(request.log_group_name(), "/aws/lambda/bar");
        assert_eq!(request.region(), "us-west-2");
        assert_eq!(request.filter_pattern(), "ERROR");
    }

    #[test]
    fn test_key_is_deterministic() {
        let a = SearchRequest::from_response(response(), "us-west-2").with_limit(50);
        let b = SearchRequest::from_response(response(), "us-west-2").with_limit(50);
        assert_eq!(a.resource_key(), b.resource_key());
    }

    #[test]
    fn test_key_changes_with_parameters() {
        let a = SearchRequest::from_response(response(), "us-west-2");
        let b = SearchRequest::from_response(response(), "us-west-2").with_limit(5);
        assert_ne!(a.resource_key(), b.resource_key());
    }

    #[test]
    fn test_zero_limit_is_raised_to_one() {
        let request = SearchRequest::from_response(response(), "us-west-2").with_limit(0);
        assert_eq!(request.limit(), 1);
    }

    #[test]
    fn test_key_format() {
        let info = LogGroupInfo::new("/aws/lambda/foo", "us-west-2");
        let parameters = SearchParameters {
            limit: 10,
            filter_pattern: "".to_string(),
        };
        let key = LogResourceKey::from_args(&info, &parameters);
        assert_eq!(
            key.as_str(),
            r#"aws-cwl:/aws/lambda/foo:us-west-2?{"limit":10,"filterPattern":""}"#
        );
    }
}
