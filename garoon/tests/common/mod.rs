// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities: a recording transport double.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use garoon_rest::{Error, FormData, FormPart, HttpClient, Params};
use serde_json::{Map, Value};

/// One request observed by [`MockClient`], in call order.
#[derive(Debug, Clone)]
pub struct RequestLog {
    pub path: String,
    pub method: &'static str,
    pub params: Value,
}

/// Transport double that records every {path, method, params} triple and
/// answers every call with an empty JSON object.
///
/// Clones share the same log, so a test can keep one handle while the
/// client under test owns another.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    logs: Arc<Mutex<Vec<RequestLog>>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logs(&self) -> Vec<RequestLog> {
        self.logs.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, path: &str, params: Value) {
        self.logs.lock().unwrap().push(RequestLog {
            path: path.to_string(),
            method,
            params,
        });
    }

    fn empty_object() -> Value {
        Value::Object(Map::new())
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get(&self, path: &str, params: &Params) -> Result<Value, Error> {
        self.record("get", path, Value::Object(params.clone()));
        Ok(Self::empty_object())
    }

    async fn get_binary(&self, path: &str, params: &Params) -> Result<Vec<u8>, Error> {
        self.record("getBinary", path, Value::Object(params.clone()));
        Ok(Vec::new())
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, Error> {
        self.record("post", path, body);
        Ok(Self::empty_object())
    }

    async fn post_form(&self, path: &str, form: FormData) -> Result<Value, Error> {
        let names: Vec<Value> = form
            .parts()
            .iter()
            .map(|part| match part {
                FormPart::Text { name, .. } | FormPart::File { name, .. } => {
                    Value::String(name.clone())
                }
            })
            .collect();
        self.record("postForm", path, Value::Array(names));
        Ok(Self::empty_object())
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, Error> {
        self.record("put", path, body);
        Ok(Self::empty_object())
    }

    async fn patch(&self, path: &str, body: Value) -> Result<Value, Error> {
        self.record("patch", path, body);
        Ok(Self::empty_object())
    }

    async fn delete(&self, path: &str, params: &Params) -> Result<Value, Error> {
        self.record("delete", path, Value::Object(params.clone()));
        Ok(Self::empty_object())
    }
}
