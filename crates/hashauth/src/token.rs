//! Structural splitting of raw tokens

use crate::error::{Error, Result};
use crate::limits::MAX_TOKEN_LENGTH;

/// Delimiter between the data segment and the signature segment
pub(crate) const DELIMITER: char = '-';

/// A raw token split into its two significant segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenParts<'a> {
    pub data: &'a str,
    pub signature: &'a str,
}

/// Split a raw token into data and signature segments
///
/// Only the first two fields are significant. Neither the base64 alphabet of the
/// data segment nor the hex signature can contain the delimiter, so trailing
/// fields never come from a well-formed issuer and are ignored.
pub(crate) fn split(token: &str) -> Result<TokenParts<'_>> {
    if token.len() > MAX_TOKEN_LENGTH {
        return Err(Error::TokenTooLarge {
            size: token.len(),
            max: MAX_TOKEN_LENGTH,
        });
    }

    let mut parts = token.split(DELIMITER);
    let data = parts.next().ok_or(Error::MalformedToken)?;
    let signature = parts.next().ok_or(Error::MalformedToken)?;

    if data.is_empty() || signature.is_empty() {
        return Err(Error::MalformedToken);
    }

    Ok(TokenParts { data, signature })
}
