//! Compact encrypted bearer tokens.
//!
//! A token has the shape `<data>-<signature>`: the data segment is the base64
//! encoding of an AEAD-encrypted JSON document `{"data": ..., "claims": {...}}`
//! and the signature segment is a hex HMAC over the data segment.
//!
//! Parsing runs a fixed pipeline: split, verify the signature, decrypt, then
//! evaluate every claim carried by the token against a caller-supplied
//! [`RequestContext`] using the validators registered in a [`ClaimRegistry`].
//!
//! ```ignore
//! use hashauth::*;
//!
//! let parser = TokenParser::new(StaticKeys::from_hex(SIGNING_KEY, "aes-256-gcm", KEY, IV)?)
//!     .claim("role", Equals)
//!     .build();
//!
//! let context = RequestContext::new().with("role", "admin");
//! let data = parser.parse(token, &context)?;
//! ```

mod error;

// Internal modules
pub(crate) mod algorithm;
pub(crate) mod claims;
pub(crate) mod keys;
pub(crate) mod limits;
pub(crate) mod parser;
pub(crate) mod payload;
pub(crate) mod signature;
pub(crate) mod token;
pub(crate) mod utils;

// Public Interface
pub use algorithm::{CipherAlgorithm, SignatureAlgorithm};
pub use claims::{
    ClaimRegistry, ClaimValidator, Contains, Equals, MissingClaimPolicy, OneOf, RequestContext,
};
pub use error::{Error, Result};
pub use keys::{KeyStorage, StaticKeys};
pub use parser::TokenParser;
pub use payload::DecryptedPayload;
