// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Label selector parsing

use crate::error::{Result, ToolkitError};
use std::fmt;

/// A single `key=value` label pair used to select resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub key: String,
    pub value: String,
}

impl Selector {
    /// Parse a `key=value` string into a selector. Anything other than
    /// exactly one `=` is a configuration error, reported before any API
    /// call is made. Empty sides pass through; an empty value is a valid
    /// selector and the server rejects an empty key itself.
    pub fn parse(label: &str) -> Result<Self> {
        let mut parts = label.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => Ok(Selector {
                key: key.to_string(),
                value: value.to_string(),
            }),
            _ => Err(ToolkitError::InvalidLabel(label.to_string())),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
