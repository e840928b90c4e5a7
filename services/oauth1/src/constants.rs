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

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Env values used by AppMarket integrations.
pub const APPMARKET_CONSUMER_KEY: &str = "APPMARKET_CONSUMER_KEY";
pub const APPMARKET_CONSUMER_SECRET: &str = "APPMARKET_CONSUMER_SECRET";
pub const APPMARKET_SIGNATURE_METHOD: &str = "APPMARKET_SIGNATURE_METHOD";

// OAuth 1.0 protocol parameters.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_NONCE: &str = "oauth_nonce";
pub const OAUTH_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_VERSION: &str = "oauth_version";
pub const OAUTH_VERSION_1_0: &str = "1.0";

/// Everything but the RFC 3986 unreserved chars: `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
///
/// Reference: [RFC 5849 3.6. Percent Encoding](https://www.rfc-editor.org/rfc/rfc5849#section-3.6)
pub static OAUTH_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
