use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{InboundEnvelope, MultiValueMap, SingleValueMap, null_as_default};

/// API Gateway REST proxy request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayProxyRequest {
    #[serde(default)]
    pub resource: String,
    pub http_method: String,
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_string_parameters: SingleValueMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub multi_value_query_string_parameters: MultiValueMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: SingleValueMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub multi_value_headers: MultiValueMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path_parameters: SingleValueMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage_variables: SingleValueMap,
    #[serde(default)]
    pub request_context: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl GatewayProxyRequest {
    /// Converts to the ALB shape, lower-casing header names.
    ///
    /// Names that collide once lower-cased resolve by sorted key order: the
    /// entry sorting last wins, so an already lower-case spelling beats
    /// `Content-Type` style spellings.
    #[must_use]
    pub fn into_inbound(self) -> InboundEnvelope {
        let headers: SingleValueMap = self
            .headers
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();

        let multi_value_headers: MultiValueMap = self
            .multi_value_headers
            .into_iter()
            .map(|(k, vs)| (k.to_lowercase(), vs))
            .collect();

        debug!(
            resource = %self.resource,
            headers = headers.len(),
            multi_value_headers = multi_value_headers.len(),
            "Normalized API Gateway request"
        );

        InboundEnvelope {
            http_method: self.http_method,
            path: self.path,
            query_string_parameters: self.query_string_parameters,
            multi_value_query_string_parameters: self.multi_value_query_string_parameters,
            headers,
            multi_value_headers,
            body: self.body,
            is_base64_encoded: self.is_base64_encoded,
            request_context: None,
        }
    }
}

impl From<GatewayProxyRequest> for InboundEnvelope {
    fn from(request: GatewayProxyRequest) -> Self {
        request.into_inbound()
    }
}
