//! Centralized configuration for the APE tag reader.
//!
//! Goals:
//! - Single place to collect limits instead of scattering constants/env lookups.
//! - ApeConfig::default() reproduces the built-in format limits from `consts`.
//! - ApeConfig::from_env() lets tools tune limits without recompiling.
//!
//! Env:
//! - APETAG_MAX_ITEMS    — item_count clamp (default 256)
//! - APETAG_MAX_KEY_LEN  — max key length in bytes, without NUL (default 255)
//! - APETAG_ALLOW_V1     — accept version 1000 footers (default true)
//! - APETAG_LOSSY_UTF8   — replace invalid UTF-8 in text values instead of failing (default true)

use std::fmt;

use crate::consts::{MAX_ITEM_COUNT, MAX_KEY_LEN};

#[derive(Clone, Debug)]
pub struct ApeConfig {
    /// Upper bound for the footer's item count; larger values are clamped, not rejected.
    /// Env: APETAG_MAX_ITEMS
    pub max_item_count: u32,

    /// Terminator search window for item keys (bytes, NUL excluded).
    /// Env: APETAG_MAX_KEY_LEN
    pub max_key_len: usize,

    /// Accept APEv1 (version 1000) footers besides APEv2 (2000).
    /// Env: APETAG_ALLOW_V1 = 0|1|true|false
    pub allow_v1: bool,

    /// Decode invalid UTF-8 text values with U+FFFD instead of reporting them undecodable.
    /// Env: APETAG_LOSSY_UTF8 = 0|1|true|false
    pub lossy_utf8: bool,
}

impl Default for ApeConfig {
    fn default() -> Self {
        Self {
            max_item_count: MAX_ITEM_COUNT,
            max_key_len: MAX_KEY_LEN,
            allow_v1: true,
            lossy_utf8: true,
        }
    }
}

fn parse_bool(v: &str) -> bool {
    let s = v.trim().to_ascii_lowercase();
    s == "1" || s == "true" || s == "yes" || s == "on"
}

impl ApeConfig {
    /// Load configuration from environment variables on top of the defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("APETAG_MAX_ITEMS") {
            if let Ok(n) = v.trim().parse::<u32>() {
                cfg.max_item_count = n;
            }
        }

        if let Ok(v) = std::env::var("APETAG_MAX_KEY_LEN") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.max_key_len = n;
            }
        }

        if let Ok(v) = std::env::var("APETAG_ALLOW_V1") {
            cfg.allow_v1 = parse_bool(&v);
        }

        if let Ok(v) = std::env::var("APETAG_LOSSY_UTF8") {
            cfg.lossy_utf8 = parse_bool(&v);
        }

        cfg
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_max_item_count(mut self, n: u32) -> Self {
        self.max_item_count = n;
        self
    }

    pub fn with_max_key_len(mut self, n: usize) -> Self {
        self.max_key_len = n;
        self
    }

    pub fn with_allow_v1(mut self, on: bool) -> Self {
        self.allow_v1 = on;
        self
    }

    pub fn with_lossy_utf8(mut self, on: bool) -> Self {
        self.lossy_utf8 = on;
        self
    }
}

impl fmt::Display for ApeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ApeConfig {{ \
             max_item_count: {}, \
             max_key_len: {}, \
             allow_v1: {}, \
             lossy_utf8: {} \
             }}",
            self.max_item_count, self.max_key_len, self.allow_v1, self.lossy_utf8,
        )
    }
}
