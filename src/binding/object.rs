use std::ffi::CString;
use std::ops::Deref;

use crate::binding::coerce::{coerce, Coercible};
use crate::binding::error::{fatal, BindingError, ContractViolation};
use crate::binding::function::Function;
use crate::binding::symbol::Symbol;
use crate::binding::value::{Value, Valuer};
use crate::runner::boundary::{Boundary, RtnValue};

/// A value known to be an engine object (functions included).
#[derive(Clone, Debug)]
pub struct Object {
    value: Value,
}

impl Valuer for Object {
    fn value(&self) -> &Value {
        &self.value
    }
}

impl Deref for Object {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.value
    }
}

impl Object {
    pub(crate) fn from_value(value: Value) -> Object {
        Object { value }
    }

    fn wrap_result(&self, result: RtnValue) -> Result<Value, BindingError> {
        match result {
            Ok(ptr) => Ok(self.ctx.wrap(ptr)),
            Err(info) => Err(BindingError::from(info)),
        }
    }

    /// The property, or `undefined` when it does not exist. Errors only when
    /// the engine throws, for example from a getter.
    pub fn get(&self, key: &str) -> Result<Value, BindingError> {
        let ckey = marshal_key(key)?;
        let result = self.ctx.isolate().object_get(self.ptr, &ckey);
        self.wrap_result(result)
    }

    pub fn get_symbol(&self, key: &Symbol) -> Result<Value, BindingError> {
        let key = self.ctx.own_ptr(key)?;
        let result = self.ctx.isolate().object_get_any_key(self.ptr, key);
        self.wrap_result(result)
    }

    pub fn get_idx(&self, idx: u32) -> Result<Value, BindingError> {
        let result = self.ctx.isolate().object_get_idx(self.ptr, idx);
        self.wrap_result(result)
    }

    /// Coerces `input` and stores it. A coercion failure is returned before
    /// the engine is reached.
    pub fn set<'a>(&self, key: &str, input: impl Into<Coercible<'a>>) -> Result<(), BindingError> {
        let ckey = marshal_key(key)?;
        let value = coerce(&self.ctx, input)?;
        self.ctx.isolate().object_set(self.ptr, &ckey, value.ptr)?;
        Ok(())
    }

    pub fn set_symbol<'a>(
        &self,
        key: &Symbol,
        input: impl Into<Coercible<'a>>,
    ) -> Result<(), BindingError> {
        let key = self.ctx.own_ptr(key)?;
        let value = coerce(&self.ctx, input)?;
        self.ctx
            .isolate()
            .object_set_any_key(self.ptr, key, value.ptr)?;
        Ok(())
    }

    pub fn set_idx<'a>(&self, idx: u32, input: impl Into<Coercible<'a>>) -> Result<(), BindingError> {
        let value = coerce(&self.ctx, input)?;
        self.ctx.isolate().object_set_idx(self.ptr, idx, value.ptr)?;
        Ok(())
    }

    /// HasProperty: own properties and the prototype chain.
    pub fn has(&self, key: &str) -> bool {
        match CString::new(key) {
            Ok(ckey) => self.ctx.isolate().object_has(self.ptr, &ckey),
            Err(_) => false,
        }
    }

    /// False for a symbol from another context.
    pub fn has_symbol(&self, key: &Symbol) -> bool {
        match self.ctx.own_ptr(key) {
            Ok(key) => self.ctx.isolate().object_has_any_key(self.ptr, key),
            Err(_) => false,
        }
    }

    pub fn has_idx(&self, idx: u32) -> bool {
        self.ctx.isolate().object_has_idx(self.ptr, idx)
    }

    /// True only when an own property was removed.
    pub fn delete(&self, key: &str) -> bool {
        match CString::new(key) {
            Ok(ckey) => self.ctx.isolate().object_delete(self.ptr, &ckey),
            Err(_) => false,
        }
    }

    pub fn delete_symbol(&self, key: &Symbol) -> bool {
        match self.ctx.own_ptr(key) {
            Ok(key) => self.ctx.isolate().object_delete_any_key(self.ptr, key),
            Err(_) => false,
        }
    }

    pub fn delete_idx(&self, idx: u32) -> bool {
        self.ctx.isolate().object_delete_idx(self.ptr, idx)
    }

    /// Installs an accessor property. Returns false when the existing
    /// property cannot be redefined.
    pub fn define_accessor(
        &self,
        key: &str,
        getter: Option<&Function>,
        setter: Option<&Function>,
    ) -> Result<bool, BindingError> {
        let ckey = marshal_key(key)?;
        let getter = match getter {
            Some(g) => Some(self.ctx.own_ptr(g)?),
            None => None,
        };
        let setter = match setter {
            Some(s) => Some(self.ctx.own_ptr(s)?),
            None => None,
        };
        Ok(self
            .ctx
            .isolate()
            .object_define_accessor(self.ptr, &ckey, getter, setter))
    }

    /// Stores `input` in internal field `idx`.
    ///
    /// # Panics
    ///
    /// With a [`ContractViolation`] when `idx` is not below
    /// [`internal_field_count`](Object::internal_field_count).
    pub fn set_internal_field<'a>(
        &self,
        idx: u32,
        input: impl Into<Coercible<'a>>,
    ) -> Result<(), BindingError> {
        let value = coerce(&self.ctx, input)?;
        let inserted = self
            .ctx
            .isolate()
            .object_set_internal_field(self.ptr, idx, value.ptr);
        if !inserted {
            fatal(ContractViolation::InternalFieldOutOfRange {
                index: idx,
                count: self.internal_field_count(),
            });
        }
        Ok(())
    }

    /// The stored value, or `undefined` for a slot never written.
    ///
    /// # Panics
    ///
    /// With a [`ContractViolation`] when `idx` is out of range or the slot
    /// holds native data rather than a value.
    pub fn get_internal_field(&self, idx: u32) -> Value {
        let count = self.internal_field_count();
        if idx >= count {
            fatal(ContractViolation::InternalFieldOutOfRange { index: idx, count });
        }
        match self.ctx.isolate().object_get_internal_field(self.ptr, idx) {
            Ok(ptr) => self.ctx.wrap(ptr),
            Err(_) => fatal(ContractViolation::InternalFieldNotAValue { index: idx }),
        }
    }

    /// Zero for objects not created from a template with internal fields.
    pub fn internal_field_count(&self) -> u32 {
        self.ctx.isolate().object_internal_field_count(self.ptr)
    }

    /// The prototype link. For an object whose prototype is null the
    /// returned handle wraps `null`.
    pub fn prototype(&self) -> Object {
        let ptr = self.ctx.isolate().object_get_prototype(self.ptr);
        Object::from_value(self.ctx.wrap(ptr))
    }

    /// # Panics
    ///
    /// With [`ContractViolation::PrototypeRejected`] when the engine refuses
    /// the link: a cycle, or a non-extensible object. With
    /// [`ContractViolation::ForeignContext`] when `proto` belongs to another
    /// context.
    pub fn set_prototype(&self, proto: &dyn Valuer) {
        let proto = match self.ctx.own_ptr(proto.value()) {
            Ok(ptr) => ptr,
            Err(_) => fatal(ContractViolation::ForeignContext),
        };
        let accepted = self.ctx.isolate().object_set_prototype(self.ptr, proto);
        if !accepted {
            fatal(ContractViolation::PrototypeRejected);
        }
    }

    /// Looks up `name` and calls it with this object as the receiver.
    ///
    /// Arguments must already be engine values. A missing property reads as
    /// `undefined` and so fails with [`BindingError::NotAFunction`].
    pub fn method_call(&self, name: &str, args: &[&dyn Valuer]) -> Result<Value, BindingError> {
        let method = self.get(name)?;
        let function = method.as_function()?;
        function.call(self, args)
    }
}

/// The null terminated copy lives until the end of the calling scope.
fn marshal_key(key: &str) -> Result<CString, BindingError> {
    CString::new(key).map_err(|_| BindingError::InvalidPropertyName(key.to_string()))
}
