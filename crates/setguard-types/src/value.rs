//! Typed setting values and the accurate comparator used for bound checks

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, SgResult};

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)] // No type tag - the declared kind lives in the registry
pub enum SettingValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	UInt(u64),
	Float(f64),
	String(String),
	Json(serde_json::Value),
}

/// Numeric view used for cross-kind comparison
#[derive(Clone, Copy)]
enum Num {
	Int(i128),
	Float(f64),
}

// 2^64 as f64, exact
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

impl SettingValue {
	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::String(_) => "string",
			SettingValue::Int(_) => "int",
			SettingValue::UInt(_) => "uint",
			SettingValue::Float(_) => "float",
			SettingValue::Bool(_) => "bool",
			SettingValue::Json(_) => "json",
		}
	}

	fn as_num(&self) -> Option<Num> {
		match self {
			SettingValue::Bool(b) => Some(Num::Int(i128::from(*b))),
			SettingValue::Int(i) => Some(Num::Int(i128::from(*i))),
			SettingValue::UInt(u) => Some(Num::Int(i128::from(*u))),
			SettingValue::Float(f) => Some(Num::Float(*f)),
			SettingValue::String(_) | SettingValue::Json(_) => None,
		}
	}

	/// Strict "less than" without lossy conversions.
	///
	/// Numbers of different kinds are compared by exact value, strings
	/// lexicographically. Any other pairing, NaN, or JSON fails with
	/// [`Error::NotComparable`].
	pub fn accurate_less(&self, other: &SettingValue) -> SgResult<bool> {
		let ord = match (self, other) {
			(SettingValue::String(a), SettingValue::String(b)) => Some(a.as_str().cmp(b.as_str())),
			_ => match (self.as_num(), other.as_num()) {
				(Some(a), Some(b)) => cmp_num(a, b),
				_ => None,
			},
		};

		match ord {
			Some(ord) => Ok(ord == Ordering::Less),
			None => Err(Error::NotComparable { left: self.to_string(), right: other.to_string() }),
		}
	}
}

fn cmp_num(a: Num, b: Num) -> Option<Ordering> {
	match (a, b) {
		(Num::Int(a), Num::Int(b)) => Some(a.cmp(&b)),
		(Num::Float(a), Num::Float(b)) => a.partial_cmp(&b),
		(Num::Float(f), Num::Int(i)) => cmp_float_int(f, i),
		(Num::Int(i), Num::Float(f)) => cmp_float_int(f, i).map(Ordering::reverse),
	}
}

/// Compares a float to an integer of at most 64 significant bits
#[allow(clippy::cast_possible_truncation)]
fn cmp_float_int(f: f64, i: i128) -> Option<Ordering> {
	if f.is_nan() {
		return None;
	}
	if f >= TWO_POW_64 {
		return Some(Ordering::Greater);
	}
	if f < -TWO_POW_64 {
		return Some(Ordering::Less);
	}
	// |trunc| <= 2^64 so the cast is exact
	let whole = f.trunc();
	match (whole as i128).cmp(&i) {
		Ordering::Equal => (f - whole).partial_cmp(&0.0),
		ord => Some(ord),
	}
}

impl fmt::Display for SettingValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SettingValue::Bool(b) => write!(f, "{}", b),
			SettingValue::Int(i) => write!(f, "{}", i),
			SettingValue::UInt(u) => write!(f, "{}", u),
			SettingValue::Float(x) => write!(f, "{}", x),
			SettingValue::String(s) => write!(f, "'{}'", s.replace('\'', "\\'")),
			SettingValue::Json(j) => write!(f, "{}", j),
		}
	}
}

impl From<bool> for SettingValue {
	fn from(v: bool) -> Self {
		SettingValue::Bool(v)
	}
}

impl From<i64> for SettingValue {
	fn from(v: i64) -> Self {
		SettingValue::Int(v)
	}
}

impl From<i32> for SettingValue {
	fn from(v: i32) -> Self {
		SettingValue::Int(i64::from(v))
	}
}

impl From<u64> for SettingValue {
	fn from(v: u64) -> Self {
		SettingValue::UInt(v)
	}
}

impl From<f64> for SettingValue {
	fn from(v: f64) -> Self {
		SettingValue::Float(v)
	}
}

impl From<&str> for SettingValue {
	fn from(v: &str) -> Self {
		SettingValue::String(v.to_string())
	}
}

impl From<String> for SettingValue {
	fn from(v: String) -> Self {
		SettingValue::String(v)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn less(a: impl Into<SettingValue>, b: impl Into<SettingValue>) -> bool {
		a.into().accurate_less(&b.into()).unwrap()
	}

	#[test]
	fn test_same_kind_ordering() {
		assert!(less(5i64, 10i64));
		assert!(!less(10i64, 10i64));
		assert!(less(1.5, 2.5));
		assert!(less("abc", "abd"));
		assert!(!less("b", "a"));
	}

	#[test]
	fn test_cross_kind_numbers() {
		assert!(less(-1i64, 0u64));
		assert!(!less(u64::MAX, i64::MAX));
		assert!(less(i64::MAX, u64::MAX));
		assert!(less(2i64, 2.5));
		assert!(less(2.5, 3u64));
		assert!(!less(3.0, 3i64));
		assert!(!less(3i64, 3.0));
		assert!(less(false, 1i64));
		assert!(less(-0.5, 0i64));
		assert!(less(u64::MAX, 1e30));
	}

	#[test]
	fn test_not_comparable() {
		let s = SettingValue::from("10");
		let n = SettingValue::from(10i64);
		assert!(matches!(s.accurate_less(&n), Err(Error::NotComparable { .. })));
		assert!(n.accurate_less(&SettingValue::Float(f64::NAN)).is_err());

		let j = SettingValue::Json(serde_json::json!({"a": 1}));
		assert!(j.accurate_less(&j).is_err());
	}

	#[test]
	fn test_display() {
		assert_eq!(SettingValue::from(1_000_000i64).to_string(), "1000000");
		assert_eq!(SettingValue::from("it's").to_string(), "'it\\'s'");
		assert_eq!(SettingValue::from(true).to_string(), "true");
		assert_eq!(SettingValue::Json(serde_json::json!([1, 2])).to_string(), "[1,2]");
	}

	#[test]
	fn test_untagged_deserialize() {
		let v: SettingValue = serde_json::from_str("true").unwrap();
		assert_eq!(v, SettingValue::Bool(true));
		let v: SettingValue = serde_json::from_str("-3").unwrap();
		assert_eq!(v, SettingValue::Int(-3));
		let v: SettingValue = serde_json::from_str("18446744073709551615").unwrap();
		assert_eq!(v, SettingValue::UInt(u64::MAX));
		let v: SettingValue = serde_json::from_str("\"x\"").unwrap();
		assert_eq!(v, SettingValue::from("x"));
	}
}

// vim: ts=4
