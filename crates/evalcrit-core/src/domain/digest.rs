//! Canonical JSON and SHA256 digests of evaluation criteria.
//!
//! Two criteria sets that only differ in key order or in writing `10.0` versus
//! `10` hash the same. Object keys come out in byte order, since
//! `serde_json::Map` is a `BTreeMap` without the `preserve_order` feature.
//! Non-finite numbers are rejected.

use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};

use super::criterion::EvaluationCriteria;
use super::error::{CriteriaError, Result};

fn canonicalize(value: &Value) -> Result<Value> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, item)| Ok((key.clone(), canonicalize(item)?)))
            .collect::<Result<Map<_, _>>>()
            .map(Value::Object),
        Value::Array(items) => items
            .iter()
            .map(canonicalize)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Number(n) if !(n.is_i64() || n.is_u64()) => {
            let Some(f) = n.as_f64() else {
                return Ok(value.clone());
            };
            if !f.is_finite() {
                return Err(CriteriaError::NonFiniteNumber);
            }
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                Ok(Value::Number(Number::from(f as i64)))
            } else {
                Ok(value.clone())
            }
        }
        other => Ok(other.clone()),
    }
}

/// Compact canonical JSON text of `value`.
pub fn canonical_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(&canonicalize(value)?)?)
}

/// SHA256 hex digest of the canonical JSON text of `value`.
pub fn compute_digest(value: &Value) -> Result<String> {
    let canonical = canonical_json(value)?;
    Ok(hex::encode(Sha256::digest(canonical.as_bytes())))
}

impl EvaluationCriteria {
    /// Stable digest of these criteria, used to tell whether the criteria a
    /// session was evaluated with differ from the gallery's current ones.
    pub fn digest(&self) -> Result<String> {
        compute_digest(&serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Criterion, CriterionType, HardCriterion, NumericalHardCriterion};

    #[test]
    fn test_canonical_json_integer_valued_float() {
        let input = serde_json::json!({ "Float": { "Equal": 10.0 } });
        assert_eq!(canonical_json(&input).unwrap(), r#"{"Float":{"Equal":10}}"#);
    }

    #[test]
    fn test_canonical_json_keeps_fraction() {
        let input = serde_json::json!({ "Float": { "LessThan": 2.5 } });
        assert_eq!(canonical_json(&input).unwrap(), r#"{"Float":{"LessThan":2.5}}"#);
    }

    #[test]
    fn test_canonical_json_key_order_invariant() {
        let a = serde_json::json!({ "question": "q", "criterion_type": "Int" });
        let b = serde_json::json!({ "criterion_type": "Int", "question": "q" });
        assert_eq!(canonical_json(&a).unwrap(), canonical_json(&b).unwrap());
    }

    #[test]
    fn test_canonical_json_orders_keys_bytewise() {
        let input = serde_json::json!({ "b": 1, "a": 2, "B": 3, "_": 4 });
        assert_eq!(
            canonical_json(&input).unwrap(),
            r#"{"B":3,"_":4,"a":2,"b":1}"#
        );
    }

    #[test]
    fn test_criteria_order_changes_digest() {
        let shirt = Criterion::new("Is it a shirt?", CriterionType::YesNo);
        let price = Criterion::new("Price?", CriterionType::Int).with_hard_criterion(
            HardCriterion::Int(Some(NumericalHardCriterion::Between(1000, 5000))),
        );

        let ab = EvaluationCriteria::new(vec![shirt.clone(), price.clone()]).unwrap();
        let ba = EvaluationCriteria::new(vec![price, shirt]).unwrap();

        let digest = ab.digest().unwrap();
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, ab.clone().digest().unwrap());
        assert_ne!(digest, ba.digest().unwrap());
    }
}
