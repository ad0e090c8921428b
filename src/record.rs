use serde::{Deserialize, Deserializer, de};
use serde_json::{Map, Number, Value};

/// Storage-layer artifact keys. Present on fetched records but never part of
/// the discovered schema.
pub const RESERVED_KEYS: [&str; 2] = ["PK", "SK"];

/// The reserved field carrying a record's raw unix timestamp (seconds).
pub const TIMESTAMP_KEY: &str = "SK";

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// One historical snapshot for a protocol.
///
/// A record is sparse on purpose: it carries only the chains tracked at the
/// time it was written, each either a bare number (aggregate TVL) or a
/// token -> number map. Field order is preserved from the source object and
/// determines row discovery order downstream.
#[derive(Clone, Debug, PartialEq)]
pub struct PartialRecord {
    timestamp: i64,
    partitions: Map<String, Value>,
}

/// Time-ordered (oldest first) sequence of partial records.
pub type Series = Vec<PartialRecord>;

impl PartialRecord {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            partitions: Map::new(),
        }
    }

    /// Adds a bare scalar value under a chain key.
    pub fn with_scalar(mut self, chain: &str, value: impl Into<Number>) -> Self {
        self.partitions
            .insert(chain.to_string(), Value::Number(value.into()));
        self
    }

    /// Adds a token value nested under a chain key, creating the nested map
    /// on first use.
    pub fn with_nested(mut self, chain: &str, token: &str, value: impl Into<Number>) -> Self {
        let entry = self
            .partitions
            .entry(chain.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(tokens) = entry {
            tokens.insert(token.to_string(), Value::Number(value.into()));
        }
        self
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The chain's aggregate value, if the chain is present in this record
    /// as a bare number.
    pub fn scalar(&self, chain: &str) -> Option<&Number> {
        match self.partitions.get(chain)? {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The token value nested under a chain. Absent when the chain is
    /// missing from this record, holds a bare scalar, or does not track the
    /// token on this day. Absence is expected and meaningful.
    pub fn nested_value(&self, chain: &str, token: &str) -> Option<&Number> {
        match self.partitions.get(chain)? {
            Value::Object(tokens) => match tokens.get(token)? {
                Value::Number(n) => Some(n),
                _ => None,
            },
            _ => None,
        }
    }

    /// All partition fields in source order, reserved keys skipped.
    pub fn partition_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.partitions
            .iter()
            .filter(|(key, _)| !is_reserved_key(key))
            .map(|(key, value)| (key.as_str(), value))
    }
}

impl<'de> Deserialize<'de> for PartialRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut partitions = Map::deserialize(deserializer)?;
        let timestamp = match partitions.remove(TIMESTAMP_KEY) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .ok_or_else(|| de::Error::custom(format!("non-integer {TIMESTAMP_KEY}: {n}")))?,
            Some(other) => {
                return Err(de::Error::custom(format!(
                    "non-numeric {TIMESTAMP_KEY}: {other}"
                )));
            }
            None => return Err(de::Error::custom(format!("missing {TIMESTAMP_KEY} field"))),
        };
        Ok(Self {
            timestamp,
            partitions,
        })
    }
}
