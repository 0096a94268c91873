//! Tests for template-declared internal fields.
//!
//! Out of range access is a caller bug and panics with a `ContractViolation`
//! payload, which these tests recover with `catch_unwind`.

extern crate just_bind;

use std::panic::{catch_unwind, AssertUnwindSafe};

use just_bind::binding::{
    BindingError, Coercible, Context, ContractViolation, Object, ObjectTemplate,
};
use just_bind::runner::boundary::Boundary;

fn instance(ctx: &Context, count: u32) -> Object {
    let mut tmpl = ObjectTemplate::new();
    tmpl.set_internal_field_count(count);
    tmpl.new_instance(ctx).unwrap()
}

fn expect_violation<F: FnOnce()>(f: F) -> ContractViolation {
    let payload = catch_unwind(AssertUnwindSafe(f)).unwrap_err();
    match payload.downcast_ref::<ContractViolation>() {
        Some(v) => v.clone(),
        None => panic!("panic payload was not a ContractViolation"),
    }
}

#[test]
fn test_count_matches_template() {
    let ctx = Context::new();
    assert_eq!(instance(&ctx, 3).internal_field_count(), 3);
    assert_eq!(instance(&ctx, 0).internal_field_count(), 0);
    assert_eq!(ctx.new_object().internal_field_count(), 0);
}

#[test]
fn test_set_then_get_round_trips() {
    let ctx = Context::new();
    let obj = instance(&ctx, 2);
    obj.set_internal_field(0, "state").unwrap();
    obj.set_internal_field(1, 99u64).unwrap();
    assert_eq!(obj.get_internal_field(0).to_string(), "state");
    assert_eq!(obj.get_internal_field(1).type_of(), "bigint");

    let payload = ctx.new_object();
    obj.set_internal_field(0, &payload).unwrap();
    assert!(obj.get_internal_field(0).same_value(&payload));
}

#[test]
fn test_unset_field_is_undefined() {
    let ctx = Context::new();
    let obj = instance(&ctx, 1);
    assert!(obj.get_internal_field(0).is_undefined());
}

#[test]
fn test_fields_are_not_properties() {
    let ctx = Context::new();
    let obj = instance(&ctx, 1);
    obj.set_internal_field(0, "hidden").unwrap();
    assert!(!obj.has_idx(0));
    assert!(!obj.has("0"));
    assert!(obj.get_idx(0).unwrap().is_undefined());

    obj.set_idx(0, "visible").unwrap();
    assert_eq!(obj.get_internal_field(0).to_string(), "hidden");
}

#[test]
fn test_set_out_of_range_is_fatal() {
    let ctx = Context::new();
    let obj = instance(&ctx, 1);
    let violation = expect_violation(|| {
        let _ = obj.set_internal_field(1, true);
    });
    assert_eq!(
        violation,
        ContractViolation::InternalFieldOutOfRange { index: 1, count: 1 }
    );
}

#[test]
fn test_get_out_of_range_is_fatal() {
    let ctx = Context::new();
    let obj = instance(&ctx, 2);
    let violation = expect_violation(|| {
        obj.get_internal_field(2);
    });
    assert_eq!(violation.to_string(), "index out of range [2] with length 2");
}

#[test]
fn test_plain_object_has_no_slots_to_use() {
    let ctx = Context::new();
    let obj = ctx.new_object();
    let violation = expect_violation(|| {
        let _ = obj.set_internal_field(0, 1i32);
    });
    assert!(matches!(
        violation,
        ContractViolation::InternalFieldOutOfRange { index: 0, count: 0 }
    ));
}

#[test]
fn test_native_payload_is_not_a_value() {
    let ctx = Context::new();
    let obj = instance(&ctx, 1);
    assert!(ctx
        .isolate()
        .object_set_internal_field_native(obj.ptr(), 0, 0x1000));
    let violation = expect_violation(|| {
        obj.get_internal_field(0);
    });
    assert_eq!(violation, ContractViolation::InternalFieldNotAValue { index: 0 });
}

#[test]
fn test_unsupported_input_is_recoverable_even_out_of_range() {
    let ctx = Context::new();
    let obj = instance(&ctx, 1);
    let input = vec![1, 2, 3];
    let err = obj
        .set_internal_field(5, Coercible::dynamic(&input))
        .unwrap_err();
    assert!(matches!(err, BindingError::UnsupportedType(_)));
}
