//! Response envelope normalization
//!
//! Every GoPlus response is wrapped as `{code, message, msg?, result}`.
//! A call succeeds only when `msg` is absent or empty and `result` is present
//! and not empty (`null`, `false`, `0` and `""` all count as empty);
//! otherwise it fails with `"Error code: {code} | {msg or message}"`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::models::config::LookupPolicy;
use crate::models::errors::{GuardError, GuardResult};
use crate::models::types::TokenSecurity;

/// Decoded response wrapper. `result` is kept as raw JSON until the
/// envelope has been checked.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
}

impl Envelope {
    /// `msg` if non-empty, else `message`
    fn failure_text(&self) -> &str {
        self.msg
            .as_deref()
            .filter(|m| !m.is_empty())
            .or(self.message.as_deref())
            .unwrap_or_default()
    }

    fn has_msg(&self) -> bool {
        self.msg.as_deref().is_some_and(|m| !m.is_empty())
    }

    /// Envelope carried by an error-status body.
    ///
    /// Only objects holding `code` plus one of `msg`, `message` or `result`
    /// qualify; gateway pages and other JSON bodies yield `None`.
    pub fn from_error_body(body: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(body).ok()?;
        let fields = value.as_object()?;
        let shaped = fields.contains_key("code")
            && ["msg", "message", "result"].iter().any(|key| fields.contains_key(*key));
        if !shaped {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// Remote failure this envelope signals, if any
    pub fn failure(&self) -> Option<GuardError> {
        if self.has_msg() || is_empty_result(self.result.as_ref()) {
            Some(GuardError::remote(self.code, self.failure_text()))
        } else {
            None
        }
    }

    /// Checked payload: fails on `msg` or an empty `result`
    pub fn into_result(self) -> GuardResult<Value> {
        match self.failure() {
            Some(err) => Err(err),
            None => Ok(self.result.unwrap_or_default()),
        }
    }

    /// Checked payload decoded into `T`
    pub fn decode<T: DeserializeOwned>(self) -> GuardResult<T> {
        let result = self.into_result()?;
        Ok(serde_json::from_value(result)?)
    }

    /// `result` decoded without the failure check; a null or missing
    /// `result` yields `T::default()`.
    pub fn decode_unchecked<T: DeserializeOwned + Default>(self) -> GuardResult<T> {
        match self.result {
            Some(Value::Null) | None => Ok(T::default()),
            Some(result) => Ok(serde_json::from_value(result)?),
        }
    }

    /// Token security result: a map keyed by contract address.
    ///
    /// An array means the service has no audit for the contract. With
    /// [`LookupPolicy::StrictKey`] the entry must be keyed by `contract`;
    /// with [`LookupPolicy::FirstEntry`] the first entry is taken.
    pub fn token_security(self, contract: &str, policy: LookupPolicy) -> GuardResult<TokenSecurity> {
        let legacy = policy == LookupPolicy::FirstEntry;
        let audits = match self.into_result()? {
            Value::Object(map) => map,
            Value::Array(_) => return Err(GuardError::no_audit_data(legacy)),
            _ => return Err(GuardError::information_not_found()),
        };

        let entry = match policy {
            LookupPolicy::StrictKey => audits
                .into_iter()
                .find(|(key, _)| key == contract),
            LookupPolicy::FirstEntry => audits.into_iter().next(),
        };
        let (key, fields) = entry.ok_or_else(GuardError::information_not_found)?;

        let mut report: TokenSecurity = serde_json::from_value(fields)?;
        // Fields reported by the service win over the lookup key
        if report.address.is_empty() {
            report.address = key;
        }
        Ok(report)
    }
}

fn is_empty_result(result: Option<&Value>) -> bool {
    match result {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

/// Endpoints that answer with either a single record or a list of them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}
