use std::fmt;

use num_bigint::BigInt;

use crate::binding::coerce::{new_primitive, Primitive};
use crate::binding::context::Context;
use crate::binding::error::BindingError;
use crate::binding::function::Function;
use crate::binding::object::Object;
use crate::binding::symbol::Symbol;
use crate::runner::boundary::{Boundary, ValuePtr};
use crate::runner::ds::operations::test_and_comparison::{
    same_value, strict_equality_comparison,
};
use crate::runner::ds::operations::type_conversion::{
    get_type, to_boolean, to_int32, to_number, to_uint32,
};
use crate::runner::ds::value::JsValue;

/// Handle to an engine-resident value.
///
/// Cloning copies the handle; the engine value itself is shared. Nothing is
/// released when a handle is dropped: the value lives as long as its context.
#[derive(Clone)]
pub struct Value {
    pub(crate) ptr: ValuePtr,
    pub(crate) ctx: Context,
}

/// Anything that can hand over the engine value it wraps without allocating.
pub trait Valuer {
    fn value(&self) -> &Value;
}

impl Valuer for Value {
    fn value(&self) -> &Value {
        self
    }
}

impl Value {
    /// Allocates a new engine value for a host primitive.
    pub fn new(ctx: &Context, primitive: impl Into<Primitive>) -> Value {
        new_primitive(ctx, primitive.into())
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn ptr(&self) -> ValuePtr {
        self.ptr
    }

    fn inner(&self) -> JsValue {
        self.ctx.isolate().value_get(self.ptr)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self.inner(), JsValue::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.inner(), JsValue::Null)
    }

    pub fn is_null_or_undefined(&self) -> bool {
        matches!(self.inner(), JsValue::Null | JsValue::Undefined)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.inner(), JsValue::Boolean(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.inner(), JsValue::String(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self.inner(), JsValue::Number(_))
    }

    pub fn is_big_int(&self) -> bool {
        matches!(self.inner(), JsValue::BigInt(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self.inner(), JsValue::Symbol(_))
    }

    /// True for functions as well.
    pub fn is_object(&self) -> bool {
        self.inner().is_object()
    }

    pub fn is_function(&self) -> bool {
        self.inner().is_callable()
    }

    /// `typeof`, except that `null` reports `"null"`.
    pub fn type_of(&self) -> &'static str {
        get_type(&self.inner())
    }

    /// ToBoolean.
    pub fn boolean(&self) -> bool {
        to_boolean(&self.inner())
    }

    /// ToNumber. Objects and symbols give NaN.
    pub fn number(&self) -> f64 {
        to_number(&self.inner())
    }

    pub fn int32(&self) -> i32 {
        to_int32(&self.inner())
    }

    pub fn uint32(&self) -> u32 {
        to_uint32(&self.inner())
    }

    /// The number truncated towards zero, saturating at the i64 bounds.
    pub fn integer(&self) -> i64 {
        self.number().trunc() as i64
    }

    pub fn big_int(&self) -> Option<BigInt> {
        match self.inner() {
            JsValue::BigInt(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Result<Object, BindingError> {
        if self.is_object() {
            Ok(Object::from_value(self.clone()))
        } else {
            Err(BindingError::NotAnObject(self.to_string()))
        }
    }

    pub fn as_function(&self) -> Result<Function, BindingError> {
        if self.is_function() {
            Ok(Function::from_value(self.clone()))
        } else {
            Err(BindingError::NotAFunction(self.to_string()))
        }
    }

    pub fn as_symbol(&self) -> Result<Symbol, BindingError> {
        if self.is_symbol() {
            Ok(Symbol::from_value(self.clone()))
        } else {
            Err(BindingError::NotASymbol(self.to_string()))
        }
    }

    /// SameValue: objects by identity, NaN equal to itself.
    pub fn same_value(&self, other: &dyn Valuer) -> bool {
        same_value(&self.inner(), &other.value().inner())
    }

    /// The `===` operator.
    pub fn strict_equals(&self, other: &dyn Valuer) -> bool {
        strict_equality_comparison(&self.inner(), &other.value().inner())
    }
}

/// JS ToString of the value (symbols render as `Symbol(description)`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({:?}, {:?})", self.ptr, self.inner())
    }
}
