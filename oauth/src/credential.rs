// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};

use vzaar_core::utils::Redact;

/// The OAuth identity of the calling application.
///
/// Immutable after construction; signing operations borrow it and never
/// mutate it. vzaar issues no per-application consumer credentials, so the
/// empty pair is a legal consumer there.
#[derive(Clone)]
pub struct Consumer {
    /// Consumer key.
    pub key: String,
    /// Consumer secret, the first half of the signing key.
    pub secret: String,
    /// Callback URL, unused in the two-legged flow.
    pub callback_url: Option<String>,
}

impl Consumer {
    /// Create a new consumer.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            callback_url: None,
        }
    }

    /// Set the callback URL.
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }
}

impl Debug for Consumer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Consumer")
            .field("key", &self.key)
            .field("secret", &Redact::from(&self.secret))
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// An OAuth token/secret pair.
///
/// vzaar uses a static application-level pair rather than per-user delegated
/// tokens: the key is the account's API token and the secret signs requests.
#[derive(Clone)]
pub struct Token {
    /// Token key, sent as `oauth_token`.
    pub key: String,
    /// Token secret, the second half of the signing key.
    pub secret: String,
}

impl Token {
    /// Create a new token.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("key", &Redact::from(&self.key))
            .field("secret", &Redact::from(&self.secret))
            .finish()
    }
}

/// Everything the signer needs for one request.
#[derive(Clone, Debug)]
pub struct Credential {
    /// The calling application's identity.
    pub consumer: Consumer,
    /// The token authorizing the call, if any.
    pub token: Option<Token>,
}

impl Credential {
    /// Create a new credential.
    pub fn new(consumer: Consumer, token: Option<Token>) -> Self {
        Self { consumer, token }
    }
}
