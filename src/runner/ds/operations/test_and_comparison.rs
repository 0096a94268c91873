use crate::runner::ds::value::JsValue;
use std::rc::Rc;

fn is_same_value(a: &JsValue, b: &JsValue, strict_mode: bool) -> bool {
    match (a, b) {
        (JsValue::Number(na), JsValue::Number(nb)) => {
            if strict_mode {
                na == nb
            } else if na.is_nan() && nb.is_nan() {
                true
            } else {
                na == nb && na.is_sign_negative() == nb.is_sign_negative()
            }
        }
        (JsValue::Object(oa), JsValue::Object(ob)) => Rc::ptr_eq(oa, ob),
        _ => a == b,
    }
}

/// SameValue: NaN equals NaN, +0 and -0 differ.
pub fn same_value(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, false)
}

pub fn strict_equality_comparison(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_and_signed_zero() {
        let nan = JsValue::Number(f64::NAN);
        assert!(same_value(&nan, &nan));
        assert!(!strict_equality_comparison(&nan, &nan));
        assert!(!same_value(&JsValue::Number(0.0), &JsValue::Number(-0.0)));
        assert!(strict_equality_comparison(
            &JsValue::Number(0.0),
            &JsValue::Number(-0.0)
        ));
    }
}
