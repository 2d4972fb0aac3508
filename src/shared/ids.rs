use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn base36_encode_u64(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut chars = Vec::new();
    while value > 0 {
        let idx = (value % 36) as usize;
        chars.push(BASE36_ALPHABET[idx] as char);
        value /= 36;
    }
    chars.iter().rev().collect()
}

/// Attempt names handed to the server for backfills and retries: the current
/// Unix time in milliseconds, radix 36.
pub fn attempt_name_now() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    base36_encode_u64(u64::try_from(millis).unwrap_or(0))
}

pub fn validate_identifier_value(kind: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{kind} must be non-empty"));
    }
    if value.chars().any(|ch| ch.is_whitespace() || ch == '/') {
        return Err(format!("{kind} must not contain whitespace or '/'"));
    }
    Ok(())
}

/// Ordinal of a task within one attempt. The server sends these as decimal
/// strings; ordering is numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        raw.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| format!("task id `{raw}` must be a non-negative integer"))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = crate::shared::serde_ext::string_or_number(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}
