//! The narrow operation set through which host code reaches the engine.
//!
//! Every call is synchronous and returns once the engine side work is done,
//! including any getter, setter or function it runs along the way. Value
//! producing calls return [`RtnValue`]: a property that does not exist is a
//! successful `undefined` handle, only a thrown completion is an `Err`.

use std::ffi::CStr;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::NativeFn;
pub use crate::runner::ds::heap::ValuePtr;
use crate::runner::ds::value::JsValue;

/// Exception reported across the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorInfo {
    /// Error constructor name (`TypeError`, ...) when the engine raised it
    /// itself. None for values thrown by native functions.
    pub kind: Option<String>,
    pub message: String,
}

impl From<JErrorType> for ErrorInfo {
    fn from(e: JErrorType) -> Self {
        ErrorInfo {
            kind: e.kind().map(str::to_string),
            message: e.message(),
        }
    }
}

pub type RtnValue = Result<ValuePtr, ErrorInfo>;

pub trait Boundary {
    /// Allocates a handle for `value`. Never fails for primitives.
    fn new_value(&self, value: JsValue) -> ValuePtr;

    /// Reads the engine value behind a handle.
    fn value_get(&self, ptr: ValuePtr) -> JsValue;

    /// Number of handles allocated by this engine so far.
    fn allocation_count(&self) -> usize;

    fn global(&self) -> ValuePtr;

    fn object_new(&self, internal_field_count: u32) -> ValuePtr;

    fn function_new(&self, name: &str, behaviour: NativeFn) -> ValuePtr;

    fn function_call(&self, function: ValuePtr, this: ValuePtr, args: &[ValuePtr]) -> RtnValue;

    fn symbol_new(&self, description: Option<&str>) -> ValuePtr;

    fn object_get(&self, object: ValuePtr, key: &CStr) -> RtnValue;

    fn object_get_any_key(&self, object: ValuePtr, key: ValuePtr) -> RtnValue;

    fn object_get_idx(&self, object: ValuePtr, idx: u32) -> RtnValue;

    fn object_set(&self, object: ValuePtr, key: &CStr, value: ValuePtr) -> Result<(), ErrorInfo>;

    fn object_set_any_key(
        &self,
        object: ValuePtr,
        key: ValuePtr,
        value: ValuePtr,
    ) -> Result<(), ErrorInfo>;

    fn object_set_idx(&self, object: ValuePtr, idx: u32, value: ValuePtr) -> Result<(), ErrorInfo>;

    fn object_has(&self, object: ValuePtr, key: &CStr) -> bool;

    fn object_has_any_key(&self, object: ValuePtr, key: ValuePtr) -> bool;

    fn object_has_idx(&self, object: ValuePtr, idx: u32) -> bool;

    fn object_delete(&self, object: ValuePtr, key: &CStr) -> bool;

    fn object_delete_any_key(&self, object: ValuePtr, key: ValuePtr) -> bool;

    fn object_delete_idx(&self, object: ValuePtr, idx: u32) -> bool;

    /// Installs an accessor property. False if either accessor is not
    /// callable or the property cannot be redefined.
    fn object_define_accessor(
        &self,
        object: ValuePtr,
        key: &CStr,
        getter: Option<ValuePtr>,
        setter: Option<ValuePtr>,
    ) -> bool;

    /// False when `idx` is outside the object's internal fields.
    fn object_set_internal_field(&self, object: ValuePtr, idx: u32, value: ValuePtr) -> bool;

    /// Stores host data that is not an engine value in an internal field.
    fn object_set_internal_field_native(&self, object: ValuePtr, idx: u32, data: usize) -> bool;

    /// `undefined` for a slot that was never set. Errors for an index out of
    /// range or a slot holding native data.
    fn object_get_internal_field(&self, object: ValuePtr, idx: u32) -> RtnValue;

    fn object_internal_field_count(&self, object: ValuePtr) -> u32;

    fn object_get_prototype(&self, object: ValuePtr) -> ValuePtr;

    /// False when the engine refuses the new link (cycle, non-extensible
    /// object, prototype that is neither an object nor null).
    fn object_set_prototype(&self, object: ValuePtr, proto: ValuePtr) -> bool;
}
