//! Request body handed to the wrapped handler.

use std::pin::Pin;
use std::task::{Context, Poll};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use http_body::{Body, Frame, SizeHint};

use crate::errors::AdapterError;

/// Body of a materialized request.
///
/// A base64 envelope body is decoded on the first poll, so a malformed body
/// only fails once the handler reads it.
pub enum EnvelopeBody {
    Raw { data: Option<Bytes> },
    Base64 { encoded: Option<Bytes> },
}

impl EnvelopeBody {
    #[must_use]
    pub fn new(body: String, is_base64_encoded: bool) -> Self {
        let data = Some(Bytes::from(body)).filter(|b| !b.is_empty());
        if is_base64_encoded {
            EnvelopeBody::Base64 { encoded: data }
        } else {
            EnvelopeBody::Raw { data }
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        EnvelopeBody::Raw { data: None }
    }
}

impl Body for EnvelopeBody {
    type Data = Bytes;
    type Error = AdapterError;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let frame = match self.get_mut() {
            EnvelopeBody::Raw { data } => data.take().map(|d| Ok(Frame::data(d))),
            EnvelopeBody::Base64 { encoded } => encoded.take().map(|e| {
                // Line-wrapped bodies are accepted: CR and LF are skipped.
                let stripped: Vec<u8> = e
                    .iter()
                    .copied()
                    .filter(|b| !matches!(b, b'\r' | b'\n'))
                    .collect();
                STANDARD
                    .decode(&stripped)
                    .map(|decoded| Frame::data(Bytes::from(decoded)))
                    .map_err(AdapterError::from)
            }),
        };
        Poll::Ready(frame)
    }

    fn is_end_stream(&self) -> bool {
        match self {
            EnvelopeBody::Raw { data } => data.is_none(),
            EnvelopeBody::Base64 { encoded } => encoded.is_none(),
        }
    }

    fn size_hint(&self) -> SizeHint {
        match self {
            EnvelopeBody::Raw { data } => {
                SizeHint::with_exact(data.as_ref().map_or(0, |d| d.len() as u64))
            }
            EnvelopeBody::Base64 { encoded: None } => SizeHint::with_exact(0),
            EnvelopeBody::Base64 { encoded: Some(e) } => {
                let mut hint = SizeHint::new();
                hint.set_upper(e.len() as u64 / 4 * 3 + 3);
                hint
            }
        }
    }
}

impl Default for EnvelopeBody {
    fn default() -> Self {
        EnvelopeBody::empty()
    }
}

impl std::fmt::Debug for EnvelopeBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvelopeBody::Raw { data } => f
                .debug_struct("EnvelopeBody::Raw")
                .field("data_len", &data.as_ref().map(Bytes::len))
                .finish(),
            EnvelopeBody::Base64 { encoded } => f
                .debug_struct("EnvelopeBody::Base64")
                .field("encoded_len", &encoded.as_ref().map(Bytes::len))
                .finish(),
        }
    }
}
