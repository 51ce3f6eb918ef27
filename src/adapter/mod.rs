//! Conversions between envelopes and the `http` crate's request/response.

pub mod body;
pub mod request;
pub mod response;

pub use body::EnvelopeBody;
pub use request::{into_request, url_for_request};
pub use response::into_outbound;
