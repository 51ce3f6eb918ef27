//! Wire shapes exchanged with the invoker.
//!
//! [`InboundEnvelope`] and [`OutboundEnvelope`] follow the ALB target group
//! event format; [`GatewayProxyRequest`] is the API Gateway REST proxy dialect,
//! which [`GatewayProxyRequest::into_inbound`] folds into the ALB shape.

pub mod alb;
pub mod gateway;

pub use alb::{AlbRequestContext, ElbContext, InboundEnvelope, OutboundEnvelope};
pub use gateway::GatewayProxyRequest;

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Single-valued map (headers or query parameters).
pub type SingleValueMap = BTreeMap<String, String>;

/// Multi-valued map; values keep the order they were received in.
pub type MultiValueMap = BTreeMap<String, Vec<String>>;

/// Invokers send `null` instead of `{}` for empty maps.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
