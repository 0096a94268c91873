use num_bigint::Sign;

use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::value::JsValue;

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_SYMBOL: &str = "symbol";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_BIGINT: &str = "bigint";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

/// The `typeof` operator, except that `null` reports `"null"`.
pub fn get_type(a: &JsValue) -> &'static str {
    match a {
        JsValue::Undefined => TYPE_STR_UNDEFINED,
        JsValue::Null => TYPE_STR_NULL,
        JsValue::Boolean(_) => TYPE_STR_BOOLEAN,
        JsValue::String(_) => TYPE_STR_STRING,
        JsValue::Symbol(_) => TYPE_STR_SYMBOL,
        JsValue::Number(_) => TYPE_STR_NUMBER,
        JsValue::BigInt(_) => TYPE_STR_BIGINT,
        JsValue::Object(o) => {
            if (**o).borrow().is_callable() {
                TYPE_STR_FUNCTION
            } else {
                TYPE_STR_OBJECT
            }
        }
    }
}

pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

pub fn to_boolean(v: &JsValue) -> bool {
    match v {
        JsValue::Undefined | JsValue::Null => false,
        JsValue::Boolean(b) => *b,
        JsValue::String(s) => !s.is_empty(),
        JsValue::Symbol(_) => true,
        JsValue::Number(n) => !(n.is_nan() || *n == 0.0),
        JsValue::BigInt(b) => b.sign() != Sign::NoSign,
        JsValue::Object(_) => true,
    }
}

/// ToNumber without ToPrimitive: objects and symbols give NaN, BigInts are
/// converted through their decimal form.
pub fn to_number(v: &JsValue) -> f64 {
    match v {
        JsValue::Undefined => f64::NAN,
        JsValue::Null => 0.0,
        JsValue::Boolean(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        JsValue::String(s) => string_to_number(s),
        JsValue::Symbol(_) => f64::NAN,
        JsValue::Number(n) => *n,
        JsValue::BigInt(b) => b.to_string().parse().unwrap_or(f64::NAN),
        JsValue::Object(_) => f64::NAN,
    }
}

fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => {
            if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                u64::from_str_radix(hex, 16)
                    .map(|n| n as f64)
                    .unwrap_or(f64::NAN)
            } else if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
                f64::NAN
            } else {
                s.parse().unwrap_or(f64::NAN)
            }
        }
    }
}

/// ToUint32: modular conversion of the truncated number.
pub fn to_uint32(v: &JsValue) -> u32 {
    let n = to_number(v);
    if !n.is_finite() {
        return 0;
    }
    let int = n.trunc() % 4294967296.0;
    let int = if int < 0.0 { int + 4294967296.0 } else { int };
    int as u32
}

pub fn to_int32(v: &JsValue) -> i32 {
    to_uint32(v) as i32
}

/// ToPropertyKey. Symbols stay symbols, everything else goes through
/// ToString (so `1` and `"1"` address the same property).
pub fn to_property_key(v: &JsValue) -> PropertyKey {
    match v {
        JsValue::Symbol(s) => PropertyKey::Sym(s.clone()),
        JsValue::String(s) => PropertyKey::from_name(s),
        other => PropertyKey::from_name(&other.to_string()),
    }
}
