// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Wire-parameter encoding rules shared by every resource operation.

use serde_json::{Map, Value};

use crate::types::OrderBy;

/// Flat request parameters, ready for the transport.
///
/// Values are JSON scalars (or strings produced by the list/sort rules
/// below); optional parameters that were not supplied are absent from the
/// map, never encoded as `null`.
pub type Params = Map<String, Value>;

/// Builder applying the Garoon parameter encoding rules.
///
/// - scalar lists join into a single `,`-separated string, and an empty
///   list omits the key entirely;
/// - a sort spec `{property, order}` encodes as `"<property> <order>"`;
/// - unset optionals never become keys;
/// - everything else passes through as the JSON scalar it already is.
#[derive(Debug, Default)]
pub(crate) struct ParamBuilder {
    map: Params,
}

impl ParamBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a scalar parameter, omitting the key when `value` is `None`.
    pub(crate) fn scalar<V: Into<Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.map.insert(key.to_string(), value.into());
        }
        self
    }

    /// Adds a list-of-scalar parameter as a `,`-joined string.
    ///
    /// `None` and `Some(&[])` both omit the key.
    pub(crate) fn csv(mut self, key: &str, values: Option<&[String]>) -> Self {
        if let Some(values) = values {
            if !values.is_empty() {
                self.map
                    .insert(key.to_string(), Value::String(values.join(",")));
            }
        }
        self
    }

    /// Adds a sort spec as the single string `"<property> <order>"`.
    pub(crate) fn order_by(mut self, key: &str, value: Option<&OrderBy>) -> Self {
        if let Some(order_by) = value {
            self.map.insert(
                key.to_string(),
                Value::String(format!("{} {}", order_by.property, order_by.order)),
            );
        }
        self
    }

    pub(crate) fn build(self) -> Params {
        self.map
    }
}
