//! Host value to engine value conversion.

use std::any::{type_name, Any};

use num_bigint::BigInt;

use crate::binding::context::Context;
use crate::binding::error::BindingError;
use crate::binding::function::Function;
use crate::binding::object::Object;
use crate::binding::symbol::Symbol;
use crate::binding::value::{Value, Valuer};
use crate::runner::boundary::Boundary;
use crate::runner::ds::value::JsValue;

/// Host primitive with a direct engine representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    String(String),
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
    Float64(f64),
    Bool(bool),
    BigInt(BigInt),
}

impl Primitive {
    /// 64 bit and arbitrary precision integers become engine BigInts, every
    /// other number becomes an engine Number.
    pub fn into_js_value(self) -> JsValue {
        match self {
            Primitive::String(s) => JsValue::String(s),
            Primitive::Int32(n) => JsValue::Number(n as f64),
            Primitive::Uint32(n) => JsValue::Number(n as f64),
            Primitive::Int64(n) => JsValue::BigInt(BigInt::from(n)),
            Primitive::Uint64(n) => JsValue::BigInt(BigInt::from(n)),
            Primitive::Float64(n) => JsValue::Number(n),
            Primitive::Bool(b) => JsValue::Boolean(b),
            Primitive::BigInt(b) => JsValue::BigInt(b),
        }
    }
}

macro_rules! primitive_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Primitive {
                fn from(v: $t) -> Self {
                    Primitive::$variant(v)
                }
            }

            impl<'a> From<$t> for Coercible<'a> {
                fn from(v: $t) -> Self {
                    Coercible::Primitive(Primitive::$variant(v))
                }
            }
        )*
    };
}

primitive_from! {
    String => String,
    i32 => Int32,
    u32 => Uint32,
    i64 => Int64,
    u64 => Uint64,
    f64 => Float64,
    bool => Bool,
    BigInt => BigInt,
}

impl From<&str> for Primitive {
    fn from(s: &str) -> Self {
        Primitive::String(s.to_string())
    }
}

/// Input accepted by [`coerce`]. Exactly one variant describes any input.
#[derive(Debug, Clone)]
pub enum Coercible<'a> {
    Primitive(Primitive),
    /// Something that already wraps an engine value.
    Value(&'a Value),
    /// Anything else, with its type name.
    Unsupported(&'static str),
}

impl<'a> Coercible<'a> {
    /// Classifies a value whose type is only known at runtime.
    pub fn dynamic<T: Any>(input: &'a T) -> Coercible<'a> {
        let any = input as &dyn Any;
        if let Some(v) = any.downcast_ref::<Value>() {
            return Coercible::Value(v);
        }
        if let Some(o) = any.downcast_ref::<Object>() {
            return Coercible::Value(o.value());
        }
        if let Some(f) = any.downcast_ref::<Function>() {
            return Coercible::Value(f.value());
        }
        if let Some(s) = any.downcast_ref::<Symbol>() {
            return Coercible::Value(s.value());
        }
        if let Some(p) = any.downcast_ref::<Primitive>() {
            return Coercible::Primitive(p.clone());
        }
        if let Some(s) = any.downcast_ref::<String>() {
            return Coercible::Primitive(Primitive::String(s.clone()));
        }
        if let Some(s) = any.downcast_ref::<&str>() {
            return Coercible::Primitive(Primitive::from(*s));
        }
        if let Some(n) = any.downcast_ref::<i32>() {
            return Coercible::Primitive(Primitive::Int32(*n));
        }
        if let Some(n) = any.downcast_ref::<u32>() {
            return Coercible::Primitive(Primitive::Uint32(*n));
        }
        if let Some(n) = any.downcast_ref::<i64>() {
            return Coercible::Primitive(Primitive::Int64(*n));
        }
        if let Some(n) = any.downcast_ref::<u64>() {
            return Coercible::Primitive(Primitive::Uint64(*n));
        }
        if let Some(n) = any.downcast_ref::<f64>() {
            return Coercible::Primitive(Primitive::Float64(*n));
        }
        if let Some(b) = any.downcast_ref::<bool>() {
            return Coercible::Primitive(Primitive::Bool(*b));
        }
        if let Some(b) = any.downcast_ref::<BigInt>() {
            return Coercible::Primitive(Primitive::BigInt(b.clone()));
        }
        Coercible::Unsupported(type_name::<T>())
    }
}

impl<'a> From<&str> for Coercible<'a> {
    fn from(s: &str) -> Self {
        Coercible::Primitive(Primitive::from(s))
    }
}

impl<'a> From<Primitive> for Coercible<'a> {
    fn from(p: Primitive) -> Self {
        Coercible::Primitive(p)
    }
}

impl<'a> From<&'a Value> for Coercible<'a> {
    fn from(v: &'a Value) -> Self {
        Coercible::Value(v)
    }
}

impl<'a> From<&'a Object> for Coercible<'a> {
    fn from(o: &'a Object) -> Self {
        Coercible::Value(o.value())
    }
}

impl<'a> From<&'a Function> for Coercible<'a> {
    fn from(f: &'a Function) -> Self {
        Coercible::Value(f.value())
    }
}

impl<'a> From<&'a Symbol> for Coercible<'a> {
    fn from(s: &'a Symbol) -> Self {
        Coercible::Value(s.value())
    }
}

pub(crate) fn new_primitive(ctx: &Context, primitive: Primitive) -> Value {
    ctx.wrap(ctx.isolate().new_value(primitive.into_js_value()))
}

/// Produces the engine value for `input`.
///
/// Primitives allocate exactly one engine value. Wrapped values are returned
/// as another handle on the same engine value and allocate nothing; they
/// must come from `ctx`. Unsupported input fails before the engine is touched.
pub fn coerce<'a>(ctx: &Context, input: impl Into<Coercible<'a>>) -> Result<Value, BindingError> {
    match input.into() {
        Coercible::Primitive(p) => Ok(new_primitive(ctx, p)),
        Coercible::Value(v) => {
            ctx.own_ptr(v)?;
            Ok(v.clone())
        }
        Coercible::Unsupported(name) => Err(BindingError::UnsupportedType(name.to_string())),
    }
}
