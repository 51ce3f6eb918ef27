use serde::{Deserialize, Serialize};

use super::{MultiValueMap, SingleValueMap, null_as_default};

/// Request event delivered by an ALB target group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEnvelope {
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
    pub body: String,
    #[serde(default)]
    pub is_base64_encoded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_context: Option<AlbRequestContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbRequestContext {
    #[serde(default)]
    pub elb: ElbContext,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElbContext {
    #[serde(default)]
    pub target_group_arn: String,
}

impl InboundEnvelope {
    #[must_use]
    pub fn target_group_arn(&self) -> Option<&str> {
        self.request_context
            .as_ref()
            .map(|ctx| ctx.elb.target_group_arn.as_str())
            .filter(|arn| !arn.is_empty())
    }
}

/// Response returned to the ALB. The body is always base64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEnvelope {
    pub status_code: u16,
    pub status_description: String,
    pub headers: SingleValueMap,
    pub multi_value_headers: MultiValueMap,
    pub body: String,
    pub is_base64_encoded: bool,
}
