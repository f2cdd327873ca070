//! Token parser
//!
//! [`TokenParser`] runs the full verification pipeline in a fixed order:
//!
//! 1. split the raw token into data and signature segments
//! 2. verify the signature over the data segment
//! 3. decrypt and deserialize the data segment
//! 4. evaluate the token claims against the request context
//!
//! Decryption is never attempted before the signature is verified. Each stage
//! returns its own error kind and nothing is retried or wrapped.

use crate::claims::{self, ClaimRegistry, ClaimValidator, MissingClaimPolicy, RequestContext};
use crate::error::{Error, Result};
use crate::keys::KeyStorage;
use crate::payload::{self, DecryptedPayload};
use crate::signature;
use crate::token;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Token parser
///
/// The parser is configured once and can be reused for any number of tokens.
/// It holds no per-request state: the [`RequestContext`] is passed to every
/// call, so a single parser can be shared across threads.
#[derive(Clone)]
pub struct TokenParser {
    config_keys: Arc<dyn KeyStorage>,
    config_claims: ClaimRegistry,
    config_missing: MissingClaimPolicy,
}

impl TokenParser {
    /// Create a new parser with no claim validators
    pub fn new<K>(keys: K) -> Self
    where
        K: KeyStorage + 'static,
    {
        Self {
            config_keys: Arc::new(keys),
            config_claims: ClaimRegistry::default(),
            config_missing: MissingClaimPolicy::default(),
        }
    }

    /// Register the validator for a claim
    pub fn claim<V>(&mut self, name: impl Into<String>, validator: V) -> &mut Self
    where
        V: ClaimValidator + 'static,
    {
        self.config_claims.register(name, validator);
        self
    }

    /// Replace all claim validators
    pub fn claims(&mut self, registry: ClaimRegistry) -> &mut Self {
        self.config_claims = registry;
        self
    }

    /// Configure how token claims absent from the request context are handled
    ///
    /// Defaults to [`MissingClaimPolicy::Ignore`].
    pub fn missing_claims(&mut self, policy: MissingClaimPolicy) -> &mut Self {
        self.config_missing = policy;
        self
    }

    /// Finish configuration
    pub fn build(&mut self) -> Self {
        self.clone()
    }
}

impl TokenParser {
    /// Parse and verify a token, returning its `data`
    pub fn parse(&self, token: &str, context: &RequestContext) -> Result<Value> {
        let data_segment = self.validate(token)?;
        self.parse_token(data_segment, context)
    }

    /// Parse and verify a token, deserializing its `data` into `T`
    pub fn parse_as<T>(&self, token: &str, context: &RequestContext) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let data = self.parse(token, context)?;
        serde_json::from_value(data)
            .map_err(|e| Error::InvalidTokenData(format!("Failed to convert data: {e}")))
    }

    /// Split a token and verify its signature
    ///
    /// Returns the data segment. The signature segment is consumed.
    pub fn validate<'a>(&self, token: &'a str) -> Result<&'a str> {
        let parts = token::split(token)?;

        let algorithm = self.config_keys.signature_algorithm();
        let key = self.config_keys.signature_key();
        if let Err(e) = signature::verify(algorithm, parts.data, parts.signature, key) {
            // Key material faults are not forgeries
            if e == Error::InvalidSignature {
                tracing::warn!(
                    algorithm = %algorithm,
                    data_len = parts.data.len(),
                    "token signature verification failed"
                );
            }
            return Err(e);
        }

        tracing::debug!(algorithm = %algorithm, "token signature verified");
        Ok(parts.data)
    }

    /// Decrypt a verified data segment and evaluate its claims
    ///
    /// The data segment must come from [`validate`](Self::validate); this method
    /// performs no signature check of its own.
    pub fn parse_token(&self, data_segment: &str, context: &RequestContext) -> Result<Value> {
        let payload = self.decrypt(data_segment)?;

        claims::evaluate(
            &payload.claims,
            context,
            &self.config_claims,
            self.config_missing,
        )?;

        Ok(payload.data)
    }

    fn decrypt(&self, data_segment: &str) -> Result<DecryptedPayload> {
        let algorithm = self.config_keys.cipher_algorithm();
        let payload = payload::decrypt(
            data_segment,
            algorithm,
            self.config_keys.cipher_key(),
            self.config_keys.cipher_iv(),
        )?;

        tracing::debug!(
            algorithm = %algorithm,
            claims = payload.claims.len(),
            "token payload decrypted"
        );
        Ok(payload)
    }
}

impl std::fmt::Debug for TokenParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys = &self.config_keys;
        f.debug_struct("TokenParser")
            .field("signature_algorithm", &keys.signature_algorithm())
            .field("cipher_algorithm", &keys.cipher_algorithm())
            .field("claims", &self.config_claims)
            .field("missing_claims", &self.config_missing)
            .finish()
    }
}
