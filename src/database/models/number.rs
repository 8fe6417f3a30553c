use serde::{Deserialize, Serialize, Serializer};

/// Numeric field as it arrives over the wire.
///
/// Clients send either a JSON number (`325`) or a string holding one (`"325"`);
/// both are accepted the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

/// Outcome of coercing a [`NumberInput`] into a finite number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    /// Empty or whitespace-only string
    Missing,
    Value(f64),
    /// Text that doesn't parse, or a non-finite value
    Invalid,
}

impl NumberInput {
    pub fn coerce(&self) -> Coerced {
        match self {
            NumberInput::Number(n) if n.is_finite() => Coerced::Value(*n),
            NumberInput::Number(_) => Coerced::Invalid,
            NumberInput::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Coerced::Missing;
                }
                match text.parse::<f64>() {
                    Ok(n) if n.is_finite() => Coerced::Value(n),
                    _ => Coerced::Invalid,
                }
            }
        }
    }
}

impl From<f64> for NumberInput {
    fn from(n: f64) -> Self {
        NumberInput::Number(n)
    }
}

impl From<&str> for NumberInput {
    fn from(text: &str) -> Self {
        NumberInput::Text(text.to_string())
    }
}

/// Serializes whole numbers as JSON integers so `325` round-trips as `325`, not `325.0`.
pub fn serialize_whole<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

    if value.fract() == 0.0 && value.abs() <= LIMIT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
