//! Tests for host value coercion.
//!
//! Every supported primitive produces an engine value of the matching type;
//! wrapped values pass through without allocating; anything else is rejected
//! before the engine is touched.

extern crate just_bind;

use std::collections::HashMap;

use num_bigint::BigInt;

use just_bind::binding::{coerce, BindingError, Coercible, Context, Function, Primitive, Symbol, Value};

fn supported_primitives() -> Vec<(Primitive, &'static str)> {
    vec![
        (Primitive::from("text"), "string"),
        (Primitive::from(-7i32), "number"),
        (Primitive::from(7u32), "number"),
        (Primitive::from(i64::MIN), "bigint"),
        (Primitive::from(u64::MAX), "bigint"),
        (Primitive::from(1.5f64), "number"),
        (Primitive::from(true), "boolean"),
        (Primitive::from(BigInt::from(10).pow(30)), "bigint"),
    ]
}

// ============================================================================
// Primitive branch
// ============================================================================

mod primitive_tests {
    use super::*;

    #[test]
    fn test_each_primitive_keeps_its_shape() {
        let ctx = Context::new();
        for (primitive, expected) in supported_primitives() {
            let value = coerce(&ctx, primitive.clone()).unwrap();
            assert_eq!(value.type_of(), expected, "coercing {:?}", primitive);
        }
    }

    #[test]
    fn test_primitive_allocates_exactly_one_value() {
        let ctx = Context::new();
        for (primitive, _) in supported_primitives() {
            let before = ctx.allocation_count();
            coerce(&ctx, primitive).unwrap();
            assert_eq!(ctx.allocation_count(), before + 1);
        }
    }

    #[test]
    fn test_primitive_contents_survive() {
        let ctx = Context::new();
        assert_eq!(coerce(&ctx, "héllo").unwrap().to_string(), "héllo");
        assert_eq!(coerce(&ctx, -42i32).unwrap().int32(), -42);
        assert_eq!(coerce(&ctx, u32::MAX).unwrap().uint32(), u32::MAX);
        assert_eq!(coerce(&ctx, 0.25f64).unwrap().number(), 0.25);
        assert!(!coerce(&ctx, false).unwrap().boolean());
        assert_eq!(
            coerce(&ctx, u64::MAX).unwrap().big_int(),
            Some(BigInt::from(u64::MAX))
        );
        assert_eq!(
            coerce(&ctx, i64::MIN).unwrap().big_int(),
            Some(BigInt::from(i64::MIN))
        );
    }

    #[test]
    fn test_value_new_matches_coerce() {
        let ctx = Context::new();
        let a = Value::new(&ctx, "same");
        let b = coerce(&ctx, "same").unwrap();
        assert!(a.strict_equals(&b));
    }
}

// ============================================================================
// Wrapper branch
// ============================================================================

mod wrapper_tests {
    use super::*;

    #[test]
    fn test_wrapped_values_do_not_allocate() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        let sym = Symbol::new(&ctx, Some("key"));
        let func = Function::new(&ctx, "noop", |info| Ok(info.context().undefined()));
        let plain = Value::new(&ctx, 3i32);

        let before = ctx.allocation_count();
        let from_obj = coerce(&ctx, &obj).unwrap();
        let from_sym = coerce(&ctx, &sym).unwrap();
        let from_func = coerce(&ctx, &func).unwrap();
        let from_plain = coerce(&ctx, &plain).unwrap();
        assert_eq!(ctx.allocation_count(), before);

        assert!(from_obj.strict_equals(&obj));
        assert!(from_sym.strict_equals(&sym));
        assert!(from_func.strict_equals(&func));
        assert_eq!(from_plain.ptr(), plain.ptr());
    }

    #[test]
    fn test_value_from_other_context_is_rejected() {
        let home = Context::new();
        let away = Context::new();
        let _occupies_slot_zero = Value::new(&home, "home value");
        let foreign = Value::new(&away, "away value");

        let before = home.allocation_count();
        let err = coerce(&home, &foreign).unwrap_err();
        assert_eq!(err, BindingError::ForeignContext);
        assert_eq!(home.allocation_count(), before);

        let obj = home.new_object();
        assert_eq!(obj.set("k", &foreign), Err(BindingError::ForeignContext));
        assert!(!obj.has("k"));
    }

    #[test]
    fn test_dynamic_input_finds_wrappers() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        let before = ctx.allocation_count();
        let value = coerce(&ctx, Coercible::dynamic(&obj)).unwrap();
        assert_eq!(ctx.allocation_count(), before);
        assert!(value.same_value(&obj));
    }
}

// ============================================================================
// Unsupported branch
// ============================================================================

mod unsupported_tests {
    use super::*;

    #[derive(Debug)]
    struct Point {
        _x: i32,
        _y: i32,
    }

    #[test]
    fn test_unsupported_types_fail_without_allocating() {
        let ctx = Context::new();
        let map: HashMap<String, i32> = HashMap::new();
        let point = Point { _x: 1, _y: 2 };
        let before = ctx.allocation_count();

        match coerce(&ctx, Coercible::dynamic(&map)) {
            Err(BindingError::UnsupportedType(name)) => assert!(name.contains("HashMap")),
            other => panic!("unexpected {:?}", other),
        }
        match coerce(&ctx, Coercible::dynamic(&point)) {
            Err(BindingError::UnsupportedType(name)) => assert!(name.ends_with("Point")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(ctx.allocation_count(), before);
    }

    #[test]
    fn test_dynamic_input_finds_primitives() {
        let ctx = Context::new();
        let n: u64 = 5;
        assert_eq!(coerce(&ctx, Coercible::dynamic(&n)).unwrap().type_of(), "bigint");
        let s = String::from("s");
        assert_eq!(coerce(&ctx, Coercible::dynamic(&s)).unwrap().type_of(), "string");
    }

    #[test]
    fn test_error_message_names_type() {
        let ctx = Context::new();
        let err = coerce(&ctx, Coercible::dynamic(&vec![1u8])).unwrap_err();
        assert!(err.to_string().starts_with("unsupported object property type `"));
    }
}
