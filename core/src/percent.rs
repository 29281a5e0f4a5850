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

//! RFC 3986 percent-encoding.
//!
//! OAuth 1.0a signing requires the strict RFC 3986 variant: every octet
//! outside `A-Z a-z 0-9 - _ . ~` escaped as uppercase `%XX`, and space as
//! `%20` rather than `+`. Generic form-encoding helpers produce `+` and a
//! smaller escape set, which yields signatures the server rejects.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// AsciiSet for the RFC 3986 unreserved characters.
///
/// - Encode every byte except 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', '~'.
pub static RFC3986_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string per RFC 3986.
pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, &RFC3986_ENCODE_SET).to_string()
}

/// Decode a percent-encoded string.
///
/// Exact inverse of [`percent_encode`]. Malformed `%` sequences pass through
/// unchanged rather than failing.
pub fn percent_decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", ""; "empty")]
    #[test_case("abcXYZ019", "abcXYZ019"; "alphanumeric untouched")]
    #[test_case("~-._", "~-._"; "unreserved untouched")]
    #[test_case("hello world", "hello%20world"; "space is percent 20")]
    #[test_case("a+b", "a%2Bb"; "plus is escaped")]
    #[test_case("a&b=c", "a%26b%3Dc"; "separators escaped")]
    #[test_case("100%", "100%25"; "percent escaped")]
    #[test_case("café", "caf%C3%A9"; "utf8 escaped bytewise")]
    #[test_case("https://example.com/", "https%3A%2F%2Fexample.com%2F"; "url")]
    fn test_percent_encode(input: &str, expected: &str) {
        assert_eq!(percent_encode(input), expected);
    }

    #[test]
    fn test_round_trip() {
        let inputs = [
            "plain",
            "with space",
            "emoji 🎬 and accents éü",
            "query=a&b;c+d",
            "100% ~done~",
        ];
        for input in inputs {
            assert_eq!(percent_decode(&percent_encode(input)), input);
        }
    }

    #[test]
    fn test_encoder_never_emits_plus_for_space() {
        let encoded = percent_encode("a b c");
        assert!(!encoded.contains('+'));
        assert_eq!(encoded, "a%20b%20c");
    }

    #[test]
    fn test_malformed_input_passes_through() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }
}
