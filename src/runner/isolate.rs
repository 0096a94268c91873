//! In-process engine instance.

use std::cell::RefCell;
use std::ffi::CStr;
use std::fmt;
use std::rc::Rc;

use log::{debug, error, trace};

use crate::runner::boundary::{Boundary, ErrorInfo, RtnValue, ValuePtr};
use crate::runner::config::IsolateConfig;
use crate::runner::ds::error::{fatal, ContractViolation, JErrorType};
use crate::runner::ds::function_object::{FunctionObject, NativeFn};
use crate::runner::ds::heap::Heap;
use crate::runner::ds::object::{self, InternalSlot, JsObjectType, ObjectBase};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::operations::type_conversion::to_property_key;
use crate::runner::ds::symbol::SymbolData;
use crate::runner::ds::value::JsValue;

/// One engine instance. Single threaded: it is neither `Send` nor `Sync`,
/// and callers must not share it across threads.
pub struct Isolate {
    config: IsolateConfig,
    heap: RefCell<Heap>,
    global: JsObjectType,
    object_prototype: JsObjectType,
    function_prototype: JsObjectType,
}

impl Isolate {
    pub fn new(config: IsolateConfig) -> Self {
        let object_prototype = ObjectBase::new().into_js_object();
        let function_prototype = ObjectBase::new()
            .with_prototype(Some(object_prototype.clone()))
            .into_js_object();
        let global = ObjectBase::new()
            .with_prototype(Some(object_prototype.clone()))
            .into_js_object();

        let to_string: NativeFn = Rc::new(object_prototype_to_string);
        let to_string = ObjectBase::new_function(FunctionObject::new("toString", to_string))
            .with_prototype(Some(function_prototype.clone()))
            .into_js_object();
        let mut proto = (*object_prototype).borrow_mut();
        proto.define_own_property(
            PropertyKey::from_name("toString"),
            PropertyDescriptor::Data {
                value: JsValue::Object(to_string),
                writable: true,
                enumerable: false,
                configurable: true,
            },
        );
        drop(proto);

        debug!(
            "isolate created (initial capacity: {}, max handles: {:?})",
            config.heap.initial_capacity, config.heap.max_handles
        );
        Isolate {
            heap: RefCell::new(Heap::new(config.heap.clone())),
            config,
            global,
            object_prototype,
            function_prototype,
        }
    }

    pub fn config(&self) -> &IsolateConfig {
        &self.config
    }

    fn trace_call(&self, op: &str, detail: fmt::Arguments<'_>) {
        if self.config.trace_boundary_calls {
            trace!("{}({})", op, detail);
        }
    }

    fn alloc(&self, value: JsValue) -> ValuePtr {
        let allocated = self.heap.borrow_mut().allocate(value);
        match allocated {
            Ok(ptr) => ptr,
            Err(e) => {
                error!("handle allocation failed: {}", e);
                fatal(ContractViolation::HeapExhausted {
                    max_handles: self.heap.borrow().get_max_handles().unwrap_or(0),
                })
            }
        }
    }

    fn resolve(&self, ptr: ValuePtr) -> JsValue {
        let value = self.heap.borrow().get(ptr).cloned();
        match value {
            Some(v) => v,
            None => fatal(ContractViolation::InvalidHandle(ptr.index())),
        }
    }

    fn resolve_object(&self, ptr: ValuePtr) -> Result<JsObjectType, JErrorType> {
        match self.resolve(ptr) {
            JsValue::Object(o) => Ok(o),
            other => Err(JErrorType::TypeError(format!(
                "Cannot access properties of {}",
                other
            ))),
        }
    }

    fn resolve_function(&self, ptr: ValuePtr) -> Option<JsObjectType> {
        match self.resolve(ptr) {
            JsValue::Object(o) if (*o).borrow().is_callable() => Some(o),
            _ => None,
        }
    }

    fn name_key(key: &CStr) -> PropertyKey {
        PropertyKey::from_name(&key.to_string_lossy())
    }

    fn value_result(&self, result: Result<JsValue, JErrorType>) -> RtnValue {
        match result {
            Ok(v) => Ok(self.alloc(v)),
            Err(e) => Err(ErrorInfo::from(e)),
        }
    }

    fn get_with_key(&self, object: ValuePtr, key: &PropertyKey) -> RtnValue {
        let o = self.resolve_object(object)?;
        let receiver = JsValue::Object(o.clone());
        self.value_result(object::get(&o, key, &receiver))
    }

    fn set_with_key(
        &self,
        object: ValuePtr,
        key: PropertyKey,
        value: ValuePtr,
    ) -> Result<(), ErrorInfo> {
        let o = self.resolve_object(object)?;
        let value = self.resolve(value);
        let receiver = JsValue::Object(o.clone());
        object::set(&o, key, value, &receiver)?;
        Ok(())
    }

    fn has_with_key(&self, object: ValuePtr, key: &PropertyKey) -> bool {
        match self.resolve_object(object) {
            Ok(o) => object::has_property(&o, key),
            Err(_) => false,
        }
    }

    fn delete_with_key(&self, object: ValuePtr, key: &PropertyKey) -> bool {
        match self.resolve_object(object) {
            Ok(o) => object::delete(&o, key),
            Err(_) => false,
        }
    }
}

impl Default for Isolate {
    fn default() -> Self {
        Self::new(IsolateConfig::default())
    }
}

fn object_prototype_to_string(this: &JsValue, _args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
    let tag = match this {
        JsValue::Undefined => "Undefined",
        JsValue::Null => "Null",
        JsValue::Boolean(_) => "Boolean",
        JsValue::String(_) => "String",
        JsValue::Symbol(_) => "Symbol",
        JsValue::Number(_) => "Number",
        JsValue::BigInt(_) => "BigInt",
        JsValue::Object(o) => {
            if (**o).borrow().is_callable() {
                "Function"
            } else {
                "Object"
            }
        }
    };
    Ok(JsValue::String(format!("[object {}]", tag)))
}

impl Boundary for Isolate {
    fn new_value(&self, value: JsValue) -> ValuePtr {
        self.alloc(value)
    }

    fn value_get(&self, ptr: ValuePtr) -> JsValue {
        self.resolve(ptr)
    }

    fn allocation_count(&self) -> usize {
        self.heap.borrow().get_allocated()
    }

    fn global(&self) -> ValuePtr {
        self.alloc(JsValue::Object(self.global.clone()))
    }

    fn object_new(&self, internal_field_count: u32) -> ValuePtr {
        self.trace_call("ObjectNew", format_args!("{}", internal_field_count));
        let o = ObjectBase::with_internal_fields(internal_field_count as usize)
            .with_prototype(Some(self.object_prototype.clone()))
            .into_js_object();
        self.alloc(JsValue::Object(o))
    }

    fn function_new(&self, name: &str, behaviour: NativeFn) -> ValuePtr {
        self.trace_call("FunctionNew", format_args!("{:?}", name));
        let f = ObjectBase::new_function(FunctionObject::new(name, behaviour))
            .with_prototype(Some(self.function_prototype.clone()))
            .into_js_object();
        self.alloc(JsValue::Object(f))
    }

    fn function_call(&self, function: ValuePtr, this: ValuePtr, args: &[ValuePtr]) -> RtnValue {
        self.trace_call(
            "FunctionCall",
            format_args!("{:?}, {:?}, {} args", function, this, args.len()),
        );
        let f = match self.resolve_function(function) {
            Some(f) => f,
            None => {
                return Err(ErrorInfo::from(JErrorType::TypeError(format!(
                    "{} is not a function",
                    self.resolve(function)
                ))))
            }
        };
        let this = self.resolve(this);
        let args = args.iter().map(|a| self.resolve(*a)).collect();
        self.value_result(object::call(&f, &this, args))
    }

    fn symbol_new(&self, description: Option<&str>) -> ValuePtr {
        let symbol = match description {
            Some(d) => SymbolData::new(d.to_string()),
            None => SymbolData::new_empty(),
        };
        self.alloc(JsValue::Symbol(symbol))
    }

    fn object_get(&self, object: ValuePtr, key: &CStr) -> RtnValue {
        self.trace_call("ObjectGet", format_args!("{:?}, {:?}", object, key));
        self.get_with_key(object, &Self::name_key(key))
    }

    fn object_get_any_key(&self, object: ValuePtr, key: ValuePtr) -> RtnValue {
        self.trace_call("ObjectGetAnyKey", format_args!("{:?}, {:?}", object, key));
        let key = to_property_key(&self.resolve(key));
        self.get_with_key(object, &key)
    }

    fn object_get_idx(&self, object: ValuePtr, idx: u32) -> RtnValue {
        self.trace_call("ObjectGetIdx", format_args!("{:?}, {}", object, idx));
        self.get_with_key(object, &PropertyKey::from_index(idx))
    }

    fn object_set(&self, object: ValuePtr, key: &CStr, value: ValuePtr) -> Result<(), ErrorInfo> {
        self.trace_call("ObjectSet", format_args!("{:?}, {:?}, {:?}", object, key, value));
        self.set_with_key(object, Self::name_key(key), value)
    }

    fn object_set_any_key(
        &self,
        object: ValuePtr,
        key: ValuePtr,
        value: ValuePtr,
    ) -> Result<(), ErrorInfo> {
        self.trace_call("ObjectSetAnyKey", format_args!("{:?}, {:?}, {:?}", object, key, value));
        let key = to_property_key(&self.resolve(key));
        self.set_with_key(object, key, value)
    }

    fn object_set_idx(&self, object: ValuePtr, idx: u32, value: ValuePtr) -> Result<(), ErrorInfo> {
        self.trace_call("ObjectSetIdx", format_args!("{:?}, {}, {:?}", object, idx, value));
        self.set_with_key(object, PropertyKey::from_index(idx), value)
    }

    fn object_has(&self, object: ValuePtr, key: &CStr) -> bool {
        self.trace_call("ObjectHas", format_args!("{:?}, {:?}", object, key));
        self.has_with_key(object, &Self::name_key(key))
    }

    fn object_has_any_key(&self, object: ValuePtr, key: ValuePtr) -> bool {
        self.trace_call("ObjectHasAnyKey", format_args!("{:?}, {:?}", object, key));
        let key = to_property_key(&self.resolve(key));
        self.has_with_key(object, &key)
    }

    fn object_has_idx(&self, object: ValuePtr, idx: u32) -> bool {
        self.trace_call("ObjectHasIdx", format_args!("{:?}, {}", object, idx));
        self.has_with_key(object, &PropertyKey::from_index(idx))
    }

    fn object_delete(&self, object: ValuePtr, key: &CStr) -> bool {
        self.trace_call("ObjectDelete", format_args!("{:?}, {:?}", object, key));
        self.delete_with_key(object, &Self::name_key(key))
    }

    fn object_delete_any_key(&self, object: ValuePtr, key: ValuePtr) -> bool {
        self.trace_call("ObjectDeleteAnyKey", format_args!("{:?}, {:?}", object, key));
        let key = to_property_key(&self.resolve(key));
        self.delete_with_key(object, &key)
    }

    fn object_delete_idx(&self, object: ValuePtr, idx: u32) -> bool {
        self.trace_call("ObjectDeleteIdx", format_args!("{:?}, {}", object, idx));
        self.delete_with_key(object, &PropertyKey::from_index(idx))
    }

    fn object_define_accessor(
        &self,
        object: ValuePtr,
        key: &CStr,
        getter: Option<ValuePtr>,
        setter: Option<ValuePtr>,
    ) -> bool {
        self.trace_call("ObjectDefineAccessor", format_args!("{:?}, {:?}", object, key));
        let o = match self.resolve_object(object) {
            Ok(o) => o,
            Err(_) => return false,
        };
        let get = match getter {
            Some(ptr) => match self.resolve_function(ptr) {
                Some(f) => Some(f),
                None => return false,
            },
            None => None,
        };
        let set = match setter {
            Some(ptr) => match self.resolve_function(ptr) {
                Some(f) => Some(f),
                None => return false,
            },
            None => None,
        };
        let mut base = (*o).borrow_mut();
        base.define_own_property(Self::name_key(key), PropertyDescriptor::new_accessor(get, set))
    }

    fn object_set_internal_field(&self, object: ValuePtr, idx: u32, value: ValuePtr) -> bool {
        self.trace_call("ObjectSetInternalField", format_args!("{:?}, {}", object, idx));
        let value = self.resolve(value);
        match self.resolve_object(object) {
            Ok(o) => (*o)
                .borrow_mut()
                .set_internal_field(idx as usize, InternalSlot::Value(value)),
            Err(_) => false,
        }
    }

    fn object_set_internal_field_native(&self, object: ValuePtr, idx: u32, data: usize) -> bool {
        self.trace_call("ObjectSetInternalFieldNative", format_args!("{:?}, {}", object, idx));
        match self.resolve_object(object) {
            Ok(o) => (*o)
                .borrow_mut()
                .set_internal_field(idx as usize, InternalSlot::Native(data)),
            Err(_) => false,
        }
    }

    fn object_get_internal_field(&self, object: ValuePtr, idx: u32) -> RtnValue {
        self.trace_call("ObjectGetInternalField", format_args!("{:?}, {}", object, idx));
        let o = self.resolve_object(object)?;
        let slot = (*o).borrow().internal_field(idx as usize).cloned();
        match slot {
            Some(InternalSlot::Value(v)) => Ok(self.alloc(v)),
            Some(InternalSlot::Empty) => Ok(self.alloc(JsValue::Undefined)),
            Some(InternalSlot::Native(_)) => Err(ErrorInfo::from(JErrorType::TypeError(format!(
                "internal field {} does not contain a value",
                idx
            )))),
            None => Err(ErrorInfo::from(JErrorType::RangeError(format!(
                "index out of range [{}] with length {}",
                idx,
                (*o).borrow().internal_field_count()
            )))),
        }
    }

    fn object_internal_field_count(&self, object: ValuePtr) -> u32 {
        match self.resolve_object(object) {
            Ok(o) => (*o).borrow().internal_field_count() as u32,
            Err(_) => 0,
        }
    }

    fn object_get_prototype(&self, object: ValuePtr) -> ValuePtr {
        self.trace_call("ObjectGetPrototype", format_args!("{:?}", object));
        let proto = match self.resolve_object(object) {
            Ok(o) => object::get_prototype_of(&o),
            Err(_) => None,
        };
        match proto {
            Some(p) => self.alloc(JsValue::Object(p)),
            None => self.alloc(JsValue::Null),
        }
    }

    fn object_set_prototype(&self, object: ValuePtr, proto: ValuePtr) -> bool {
        self.trace_call("ObjectSetPrototype", format_args!("{:?}, {:?}", object, proto));
        let o = match self.resolve_object(object) {
            Ok(o) => o,
            Err(_) => return false,
        };
        match self.resolve(proto) {
            JsValue::Object(p) => object::set_prototype_of(&o, Some(p)),
            JsValue::Null => object::set_prototype_of(&o, None),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn key(name: &str) -> CString {
        CString::new(name).unwrap()
    }

    #[test]
    fn test_missing_property_is_undefined_not_error() {
        let iso = Isolate::default();
        let obj = iso.object_new(0);
        let result = iso.object_get(obj, &key("nope")).unwrap();
        assert_eq!(iso.value_get(result), JsValue::Undefined);
    }

    #[test]
    fn test_new_objects_inherit_to_string() {
        let iso = Isolate::default();
        let obj = iso.object_new(0);
        assert!(iso.object_has(obj, &key("toString")));
        let f = iso.object_get(obj, &key("toString")).unwrap();
        let result = iso.function_call(f, obj, &[]).unwrap();
        assert_eq!(
            iso.value_get(result),
            JsValue::String("[object Object]".to_string())
        );
    }

    #[test]
    fn test_property_access_on_non_object_fails() {
        let iso = Isolate::default();
        let num = iso.new_value(JsValue::Number(1.0));
        let err = iso.object_get(num, &key("x")).unwrap_err();
        assert_eq!(err.kind.as_deref(), Some("TypeError"));
        assert!(!iso.object_has(num, &key("x")));
        assert!(!iso.object_delete(num, &key("x")));
        assert_eq!(iso.object_internal_field_count(num), 0);
    }

    #[test]
    fn test_calling_non_function_is_type_error() {
        let iso = Isolate::default();
        let obj = iso.object_new(0);
        let err = iso.function_call(obj, obj, &[]).unwrap_err();
        assert_eq!(err.kind.as_deref(), Some("TypeError"));
        assert_eq!(err.message, "[object Object] is not a function");
    }

    #[test]
    fn test_internal_field_errors() {
        let iso = Isolate::default();
        let obj = iso.object_new(1);
        assert!(iso.object_set_internal_field_native(obj, 0, 0xdead));
        let err = iso.object_get_internal_field(obj, 0).unwrap_err();
        assert_eq!(err.kind.as_deref(), Some("TypeError"));
        let err = iso.object_get_internal_field(obj, 1).unwrap_err();
        assert_eq!(err.message, "index out of range [1] with length 1");
    }

    #[test]
    fn test_any_key_uses_property_key_conversion() {
        let iso = Isolate::default();
        let obj = iso.object_new(0);
        let one = iso.new_value(JsValue::Number(1.0));
        let v = iso.new_value(JsValue::Boolean(true));
        iso.object_set_any_key(obj, one, v).unwrap();
        assert!(iso.object_has_idx(obj, 1));
        assert!(iso.object_has(obj, &key("1")));
    }

    #[test]
    fn test_heap_limit_is_fatal() {
        let iso = Isolate::new(IsolateConfig::new().with_heap(
            crate::runner::ds::heap::HeapConfig::with_limit(1),
        ));
        iso.new_value(JsValue::Null);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            iso.new_value(JsValue::Null);
        }));
        let payload = result.unwrap_err();
        assert!(matches!(
            payload.downcast_ref::<ContractViolation>(),
            Some(ContractViolation::HeapExhausted { max_handles: 1 })
        ));
    }
}
