//! Wire contract shared by the host-control daemons and their clients.
//!
//! Every request is a single JSON object sent in one write. The daemon decodes
//! it with [`decode_object`] and validates it into the typed request of the
//! service it runs ([`Credentials`], [`NetworkCommand`], [`ClockCommand`], or
//! [`DisplayFrame`]) through the [`ServiceRequest`] trait. Validation happens
//! before any handler runs, so a rejected request never has side effects.
//!
//! Every reply is an [`Envelope`]: a JSON object holding a status
//! discriminator (`result` or `status`, see [`StatusKey`]) valued `success` or
//! `error`, followed by a payload or a human-readable message.
//!
//! ```json
//! {"cmd":"set","ts":1700000000}
//! {"status":"success","message":"time is updated"}
//! ```
//!
//! There is no framing: one receive is treated as one request. Messages that
//! span receives or share one are rejected as malformed.

mod envelope;
mod error;
mod request;

pub use envelope::{Envelope, EnvelopeDecodeError, Payload, Status, StatusKey};
pub use error::RequestError;
pub use request::{
    ClockCommand, Credentials, DisplayFrame, NetworkCommand, NetworkConfig, RequestObject,
    ServiceRequest, decode_object,
};
