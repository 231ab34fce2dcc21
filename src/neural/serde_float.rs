//! Float encoding for persisted parameters.
//!
//! JSON has no literal for NaN or the infinities, so human-readable formats
//! write them as the strings `"NaN"`, `"Infinity"` and `"-Infinity"`. Finite
//! values stay plain numbers. Binary formats store the raw `f64`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const NAN: &str = "NaN";
const INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

/// An `f64` that survives a JSON round trip bit-for-bit in value.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PersistedFloat(pub f64);

impl Serialize for PersistedFloat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let x = self.0;
        if !serializer.is_human_readable() || x.is_finite() {
            return serializer.serialize_f64(x);
        }
        let text = if x.is_nan() {
            NAN
        } else if x > 0.0 {
            INFINITY
        } else {
            NEG_INFINITY
        };
        serializer.serialize_str(text)
    }
}

impl<'de> Deserialize<'de> for PersistedFloat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(FloatVisitor).map(PersistedFloat)
        } else {
            f64::deserialize(deserializer).map(PersistedFloat)
        }
    }
}

struct FloatVisitor;

impl<'de> Visitor<'de> for FloatVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "a number or one of \"{}\", \"{}\", \"{}\"", NAN, INFINITY, NEG_INFINITY)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        match v {
            NAN => Ok(f64::NAN),
            INFINITY => Ok(f64::INFINITY),
            NEG_INFINITY => Ok(f64::NEG_INFINITY),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_values_as_strings() {
        assert_eq!(serde_json::to_string(&PersistedFloat(f64::NAN)).unwrap(), "\"NaN\"");
        assert_eq!(
            serde_json::to_string(&PersistedFloat(f64::NEG_INFINITY)).unwrap(),
            "\"-Infinity\""
        );
        assert_eq!(serde_json::to_string(&PersistedFloat(1.5)).unwrap(), "1.5");
    }

    #[test]
    fn test_json_decode() {
        let v: PersistedFloat = serde_json::from_str("\"Infinity\"").unwrap();
        assert_eq!(v.0, f64::INFINITY);
        let v: PersistedFloat = serde_json::from_str("\"NaN\"").unwrap();
        assert!(v.0.is_nan());
        let v: PersistedFloat = serde_json::from_str("-3").unwrap();
        assert_eq!(v.0, -3.0);
        assert!(serde_json::from_str::<PersistedFloat>("\"nan\"").is_err());
    }

    #[test]
    fn test_binary_keeps_raw_bits() {
        let bytes = bincode::serialize(&PersistedFloat(f64::NAN)).unwrap();
        assert_eq!(bytes.len(), 8);
        let back: PersistedFloat = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back.0.to_bits(), f64::NAN.to_bits());
    }
}
