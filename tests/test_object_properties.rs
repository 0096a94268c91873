//! Tests for property access by name, symbol and index.

extern crate just_bind;

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use just_bind::binding::{
    coerce, BindingError, Coercible, Context, Function, Object, Primitive, Symbol, Value,
};

fn samples() -> Vec<Primitive> {
    vec![
        Primitive::from("v"),
        Primitive::from(i32::MIN),
        Primitive::from(u32::MAX),
        Primitive::from(-1i64),
        Primitive::from(u64::MAX),
        Primitive::from(-0.5f64),
        Primitive::from(true),
        Primitive::from(num_bigint::BigInt::from(-99)),
    ]
}

fn throwing_function(ctx: &Context, message: &'static str) -> Function {
    Function::new(ctx, "thrower", move |info| {
        Err(Value::new(info.context(), message))
    })
}

// ============================================================================
// Name keys
// ============================================================================

mod name_key_tests {
    use super::*;

    #[test]
    fn test_missing_property_is_undefined() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        let result = obj.get("absent").unwrap();
        assert!(result.is_undefined());
    }

    #[test]
    fn test_set_then_get_every_shape() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        for primitive in samples() {
            obj.set("k", primitive.clone()).unwrap();
            let expected = coerce(&ctx, primitive.clone()).unwrap();
            let got = obj.get("k").unwrap();
            assert!(got.strict_equals(&expected), "round trip of {:?}", primitive);
            assert_eq!(got.type_of(), expected.type_of());
        }
    }

    #[test]
    fn test_has_and_delete_lifecycle() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        assert!(!obj.has("k"));
        obj.set("k", 1i32).unwrap();
        assert!(obj.has("k"));
        assert!(obj.delete("k"));
        assert!(!obj.has("k"));
        assert!(!obj.delete("k"));
    }

    #[test]
    fn test_has_sees_prototype_chain() {
        let ctx = Context::new();
        let proto = ctx.new_object();
        proto.set("inherited", "yes").unwrap();
        let obj = ctx.new_object();
        obj.set_prototype(&proto);
        assert!(obj.has("inherited"));
        assert_eq!(obj.get("inherited").unwrap().to_string(), "yes");
        // delete only removes own properties
        assert!(!obj.delete("inherited"));
        assert!(obj.has("inherited"));
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        obj.set("k", "first").unwrap();
        obj.set("k", 2i32).unwrap();
        assert_eq!(obj.get("k").unwrap().int32(), 2);
    }

    #[test]
    fn test_unsupported_set_touches_nothing() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        let map: HashMap<u8, u8> = HashMap::new();
        let before = ctx.allocation_count();
        let err = obj.set("k", Coercible::dynamic(&map)).unwrap_err();
        assert!(matches!(err, BindingError::UnsupportedType(_)));
        assert_eq!(ctx.allocation_count(), before);
        assert!(!obj.has("k"));
    }

    #[test]
    fn test_setting_wrapped_value_does_not_allocate() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        let child = ctx.new_object();
        let before = ctx.allocation_count();
        obj.set("child", &child).unwrap();
        assert_eq!(ctx.allocation_count(), before);
        assert!(obj.get("child").unwrap().same_value(&child));
    }

    #[test]
    fn test_interior_nul_is_rejected() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        let before = ctx.allocation_count();
        assert!(matches!(
            obj.set("bad\0key", "value"),
            Err(BindingError::InvalidPropertyName(_))
        ));
        assert_eq!(ctx.allocation_count(), before);
        assert!(matches!(
            obj.get("bad\0key"),
            Err(BindingError::InvalidPropertyName(_))
        ));
        assert!(!obj.has("bad\0key"));
    }
}

// ============================================================================
// Accessors
// ============================================================================

mod accessor_tests {
    use super::*;

    #[test]
    fn test_throwing_getter_is_js_error() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        let getter = throwing_function(&ctx, "getter failed");
        assert!(obj.define_accessor("x", Some(&getter), None).unwrap());
        match obj.get("x") {
            Err(BindingError::JsError(e)) => assert_eq!(e.message, "getter failed"),
            other => panic!("unexpected {:?}", other),
        }
        // The property exists even though reading it throws.
        assert!(obj.has("x"));
    }

    #[test]
    fn test_throwing_setter_is_js_error() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        let setter = throwing_function(&ctx, "read only");
        obj.define_accessor("x", None, Some(&setter)).unwrap();
        match obj.set("x", 5i32) {
            Err(BindingError::JsError(e)) => assert_eq!(e.to_string(), "read only"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_getter_receives_object_as_receiver() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        obj.set("name", "widget").unwrap();
        let getter = Function::new(&ctx, "label", |info| {
            let this = info.this().as_object().map_err(|_| info.context().undefined())?;
            this.get("name").map_err(|_| info.context().undefined())
        });
        obj.define_accessor("label", Some(&getter), None).unwrap();
        assert_eq!(obj.get("label").unwrap().to_string(), "widget");
    }

    #[test]
    fn test_setter_sees_coerced_value() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        let seen = Rc::new(Cell::new(0.0));
        let sink = seen.clone();
        let setter = Function::new(&ctx, "store", move |info| {
            sink.set(info.arg(0).number());
            Ok(info.context().undefined())
        });
        obj.define_accessor("n", None, Some(&setter)).unwrap();
        obj.set("n", 12.5f64).unwrap();
        assert_eq!(seen.get(), 12.5);
    }
}

// ============================================================================
// Symbol keys
// ============================================================================

mod symbol_key_tests {
    use super::*;

    #[test]
    fn test_symbol_lifecycle() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        let key = Symbol::new(&ctx, Some("secret"));
        assert!(!obj.has_symbol(&key));
        assert!(obj.get_symbol(&key).unwrap().is_undefined());
        obj.set_symbol(&key, 3u32).unwrap();
        assert!(obj.has_symbol(&key));
        assert_eq!(obj.get_symbol(&key).unwrap().uint32(), 3);
        assert!(obj.delete_symbol(&key));
        assert!(!obj.has_symbol(&key));
        assert!(!obj.delete_symbol(&key));
    }

    #[test]
    fn test_symbols_do_not_collide_with_names() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        let key = Symbol::new(&ctx, Some("k"));
        obj.set_symbol(&key, "by symbol").unwrap();
        assert!(!obj.has("k"));
        assert!(!obj.has("Symbol(k)"));

        let twin = Symbol::new(&ctx, Some("k"));
        assert!(!obj.has_symbol(&twin));
    }
}

// ============================================================================
// Index keys
// ============================================================================

mod index_key_tests {
    use super::*;

    fn check_index_laws(obj: &Object, ctx: &Context, idx: u32) {
        assert!(!obj.has_idx(idx), "index {} present too early", idx);
        assert!(obj.get_idx(idx).unwrap().is_undefined());
        for primitive in samples() {
            obj.set_idx(idx, primitive.clone()).unwrap();
            let expected = coerce(ctx, primitive).unwrap();
            assert!(obj.get_idx(idx).unwrap().strict_equals(&expected));
        }
        assert!(obj.has_idx(idx));
        assert!(obj.delete_idx(idx));
        assert!(!obj.has_idx(idx));
        assert!(!obj.delete_idx(idx));
    }

    #[test]
    fn test_index_zero() {
        let ctx = Context::new();
        check_index_laws(&ctx.new_object(), &ctx, 0);
    }

    #[test]
    fn test_index_one() {
        let ctx = Context::new();
        check_index_laws(&ctx.new_object(), &ctx, 1);
    }

    #[test]
    fn test_sparse_index() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        check_index_laws(&obj, &ctx, 1000);
        assert!(!obj.has_idx(999));
    }

    #[test]
    fn test_index_and_name_alias() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        obj.set_idx(1000, "sparse").unwrap();
        assert!(obj.has("1000"));
        assert!(obj.delete("1000"));
        assert!(!obj.has_idx(1000));
    }

    #[test]
    fn test_max_index_is_a_string_key() {
        let ctx = Context::new();
        let obj = ctx.new_object();
        obj.set_idx(u32::MAX, 1i32).unwrap();
        assert!(obj.has_idx(u32::MAX));
        assert!(obj.has("4294967295"));
        assert_eq!(obj.get("4294967295").unwrap().int32(), 1);

        obj.set("4294967295", 2i32).unwrap();
        assert_eq!(obj.get_idx(u32::MAX).unwrap().int32(), 2);
        assert!(obj.delete("4294967295"));
        assert!(!obj.has_idx(u32::MAX));
    }
}
