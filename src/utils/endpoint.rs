//! Request URL construction
//!
//! Path segments and query pairs go through `url`'s builders so contract
//! addresses, chain names and site URLs are percent-encoded.

use url::Url;

use crate::models::errors::{GuardError, GuardResult};

/// API generation a path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V2,
}

/// Parsed v1 / v2 base endpoints
#[derive(Debug, Clone)]
pub struct Endpoints {
    v1: Url,
    v2: Url,
}

impl Endpoints {
    pub fn new(v1: &str, v2: &str) -> GuardResult<Self> {
        Ok(Self {
            v1: Self::parse_base(v1)?,
            v2: Self::parse_base(v2)?,
        })
    }

    fn parse_base(raw: &str) -> GuardResult<Url> {
        let url = Url::parse(raw.trim())?;
        if url.cannot_be_a_base() {
            return Err(GuardError::invalid_url(format!(
                "Base URL cannot carry a path: {}",
                raw
            )));
        }
        Ok(url)
    }

    pub fn base(&self, version: ApiVersion) -> &Url {
        match version {
            ApiVersion::V1 => &self.v1,
            ApiVersion::V2 => &self.v2,
        }
    }

    /// `{base}/{segments...}?{query}`
    pub fn url(
        &self,
        version: ApiVersion,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> GuardResult<Url> {
        let mut url = self.base(version).clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| GuardError::invalid_url("Base URL cannot carry a path"))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

/// Comma-joined address list for `contract_addresses` / `addresses`
pub fn join_addresses<S: AsRef<str>>(addresses: &[S]) -> String {
    addresses
        .iter()
        .map(|a| a.as_ref().trim())
        .filter(|a| !a.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
