//! Claim evaluation
//!
//! A token carries a map of claim names to expected values. At parse time each
//! claim is looked up in the caller's [`RequestContext`] and, when present, handed
//! to the [`ClaimValidator`] registered under the same name in a [`ClaimRegistry`].
//! Claims the context does not carry are handled according to the configured
//! [`MissingClaimPolicy`].

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Business rule for a single claim
///
/// `expected` is the value embedded in the token, `actual` is the value the
/// caller observed for the current request. Returning an error aborts parsing
/// and the error reaches the caller unchanged.
pub trait ClaimValidator: Send + Sync {
    fn check(&self, claim: &str, expected: &Value, actual: &Value) -> Result<()>;
}

impl<F> ClaimValidator for F
where
    F: Fn(&str, &Value, &Value) -> Result<()> + Send + Sync,
{
    fn check(&self, claim: &str, expected: &Value, actual: &Value) -> Result<()> {
        self(claim, expected, actual)
    }
}

/// Accepts when the actual value equals the expected value
#[derive(Debug, Clone, Copy, Default)]
pub struct Equals;

impl ClaimValidator for Equals {
    fn check(&self, claim: &str, expected: &Value, actual: &Value) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Error::claim_rejected(
                claim,
                format!("expected {expected}, found {actual}"),
            ))
        }
    }
}

/// Accepts when the actual value is one of the expected values
///
/// A non-array expected value behaves like [`Equals`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OneOf;

impl ClaimValidator for OneOf {
    fn check(&self, claim: &str, expected: &Value, actual: &Value) -> Result<()> {
        let accepted = match expected {
            Value::Array(options) => options.contains(actual),
            other => other == actual,
        };
        if accepted {
            Ok(())
        } else {
            Err(Error::claim_rejected(
                claim,
                format!("{actual} is not one of {expected}"),
            ))
        }
    }
}

/// Accepts when the actual value is an array holding the expected value
///
/// An array expected value requires every element to be present.
#[derive(Debug, Clone, Copy, Default)]
pub struct Contains;

impl ClaimValidator for Contains {
    fn check(&self, claim: &str, expected: &Value, actual: &Value) -> Result<()> {
        let Value::Array(held) = actual else {
            return Err(Error::claim_rejected(
                claim,
                format!("expected an array, found {actual}"),
            ));
        };

        let missing = match expected {
            Value::Array(required) => required.iter().find(|value| !held.contains(*value)),
            single => (!held.contains(single)).then_some(single),
        };
        match missing {
            None => Ok(()),
            Some(value) => Err(Error::claim_rejected(
                claim,
                format!("{value} is missing from {actual}"),
            )),
        }
    }
}

/// Behavior for token claims the request context does not carry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingClaimPolicy {
    /// Skip the claim and keep evaluating (optional claims)
    #[default]
    Ignore,
    /// Fail with [`Error::ClaimNotFound`]
    Reject,
}

/// Validators keyed by claim name
#[derive(Clone, Default)]
pub struct ClaimRegistry {
    validators: HashMap<String, Arc<dyn ClaimValidator>>,
}

impl ClaimRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validator, replacing any previous one for the same claim
    pub fn register<V>(&mut self, claim: impl Into<String>, validator: V) -> &mut Self
    where
        V: ClaimValidator + 'static,
    {
        self.validators.insert(claim.into(), Arc::new(validator));
        self
    }

    /// Register a validator, consuming and returning the registry
    pub fn with<V>(mut self, claim: impl Into<String>, validator: V) -> Self
    where
        V: ClaimValidator + 'static,
    {
        self.register(claim, validator);
        self
    }

    /// Look up the validator for a claim
    pub fn get(&self, claim: &str) -> Option<&dyn ClaimValidator> {
        self.validators.get(claim).map(|v| v.as_ref())
    }

    /// Check whether a claim has a validator
    pub fn contains(&self, claim: &str) -> bool {
        self.validators.contains_key(claim)
    }

    /// Number of registered validators
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl std::fmt::Debug for ClaimRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut claims: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        claims.sort_unstable();
        f.debug_struct("ClaimRegistry")
            .field("claims", &claims)
            .finish()
    }
}

/// Actual claim values observed for the current request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    values: Map<String, Value>,
}

impl RequestContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, consuming and returning the context
    pub fn with(mut self, claim: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(claim, value);
        self
    }

    /// Add or replace a value
    pub fn insert(&mut self, claim: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(claim.into(), value.into());
        self
    }

    /// Get the value for a claim
    pub fn get(&self, claim: &str) -> Option<&Value> {
        self.values.get(claim)
    }

    /// Check whether a claim is present
    pub fn contains(&self, claim: &str) -> bool {
        self.values.contains_key(claim)
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the context is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for RequestContext {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl<K, V> FromIterator<(K, V)> for RequestContext
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(claim, value)| (claim.into(), value.into()))
                .collect(),
        }
    }
}

/// Evaluate token claims against a request context
///
/// Claims are checked in claim name order and the first failure is returned.
/// Context values the token does not name are never inspected.
pub(crate) fn evaluate(
    claims: &Map<String, Value>,
    context: &RequestContext,
    registry: &ClaimRegistry,
    policy: MissingClaimPolicy,
) -> Result<()> {
    for (claim, expected) in claims {
        let Some(actual) = context.get(claim) else {
            match policy {
                MissingClaimPolicy::Ignore => {
                    tracing::debug!(claim = %claim, "claim absent from request context");
                    continue;
                }
                MissingClaimPolicy::Reject => return Err(Error::ClaimNotFound(claim.clone())),
            }
        };

        let validator = registry
            .get(claim)
            .ok_or_else(|| Error::ClaimValidatorMissing(claim.clone()))?;
        validator.check(claim, expected, actual)?;

        tracing::debug!(claim = %claim, "claim accepted");
    }

    Ok(())
}
