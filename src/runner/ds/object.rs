use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::FunctionObject;
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::value::JsValue;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub type JsObjectType = Rc<RefCell<ObjectBase>>;

/// Payload of an internal field slot.
#[derive(Clone, Debug)]
pub enum InternalSlot {
    Empty,
    Value(JsValue),
    /// Host data that is not an engine value (an aligned pointer in native
    /// engines).
    Native(usize),
}

pub enum ObjectKind {
    Ordinary,
    Function(FunctionObject),
}

pub struct ObjectBase {
    properties: HashMap<PropertyKey, PropertyDescriptor>,
    is_extensible: bool,
    prototype: Option<JsObjectType>,
    internal_fields: Vec<InternalSlot>,
    kind: ObjectKind,
}
impl ObjectBase {
    pub fn new() -> Self {
        ObjectBase {
            properties: HashMap::new(),
            is_extensible: true,
            prototype: None,
            internal_fields: Vec::new(),
            kind: ObjectKind::Ordinary,
        }
    }

    pub fn with_internal_fields(count: usize) -> Self {
        let mut base = ObjectBase::new();
        base.internal_fields = vec![InternalSlot::Empty; count];
        base
    }

    pub fn new_function(function: FunctionObject) -> Self {
        let mut base = ObjectBase::new();
        base.kind = ObjectKind::Function(function);
        base
    }

    pub fn with_prototype(mut self, prototype: Option<JsObjectType>) -> Self {
        self.prototype = prototype;
        self
    }

    pub fn into_js_object(self) -> JsObjectType {
        Rc::new(RefCell::new(self))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.kind, ObjectKind::Function(_))
    }

    pub fn function(&self) -> Option<&FunctionObject> {
        match &self.kind {
            ObjectKind::Function(f) => Some(f),
            ObjectKind::Ordinary => None,
        }
    }

    pub fn is_extensible(&self) -> bool {
        self.is_extensible
    }

    pub fn prevent_extensions(&mut self) -> bool {
        self.is_extensible = false;
        true
    }

    pub fn get_own_property(&self, property: &PropertyKey) -> Option<&PropertyDescriptor> {
        self.properties.get(property)
    }

    pub fn define_own_property(
        &mut self,
        property: PropertyKey,
        descriptor: PropertyDescriptor,
    ) -> bool {
        let configurable = self.properties.get(&property).map(|pd| pd.is_configurable());
        match configurable {
            Some(false) => false,
            Some(true) => {
                self.properties.insert(property, descriptor);
                true
            }
            None => {
                if self.is_extensible {
                    self.properties.insert(property, descriptor);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn internal_field_count(&self) -> usize {
        self.internal_fields.len()
    }

    pub fn internal_field(&self, idx: usize) -> Option<&InternalSlot> {
        self.internal_fields.get(idx)
    }

    /// Returns false when `idx` is outside the declared slots.
    pub fn set_internal_field(&mut self, idx: usize, slot: InternalSlot) -> bool {
        match self.internal_fields.get_mut(idx) {
            Some(current) => {
                *current = slot;
                true
            }
            None => false,
        }
    }
}
impl Default for ObjectBase {
    fn default() -> Self {
        Self::new()
    }
}
impl fmt::Display for ObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ObjectKind::Ordinary => write!(f, "[object Object]"),
            ObjectKind::Function(func) => {
                write!(f, "function {}() {{ [native code] }}", func.name)
            }
        }
    }
}

enum Lookup {
    Found(PropertyDescriptor),
    Parent(Option<JsObjectType>),
}

fn lookup_own(o: &JsObjectType, property: &PropertyKey) -> Lookup {
    let base = (**o).borrow();
    match base.get_own_property(property) {
        Some(pd) => Lookup::Found(pd.clone()),
        None => Lookup::Parent(base.prototype.clone()),
    }
}

/// Finds the descriptor for `property` on `o` or along its prototype chain.
/// No borrow is held once this returns, so accessors can be run safely.
fn find_property(o: &JsObjectType, property: &PropertyKey) -> Option<PropertyDescriptor> {
    let mut current = o.clone();
    loop {
        match lookup_own(&current, property) {
            Lookup::Found(pd) => return Some(pd),
            Lookup::Parent(Some(p)) => current = p,
            Lookup::Parent(None) => return None,
        }
    }
}

pub fn get_prototype_of(o: &JsObjectType) -> Option<JsObjectType> {
    (**o).borrow().prototype.clone()
}

pub fn set_prototype_of(o: &JsObjectType, prototype: Option<JsObjectType>) -> bool {
    let unchanged = match (&get_prototype_of(o), &prototype) {
        (None, None) => true,
        (Some(current), Some(p)) => Rc::ptr_eq(current, p),
        _ => false,
    };
    if unchanged {
        return true;
    }
    if !(**o).borrow().is_extensible() {
        return false;
    }
    let mut p = prototype.clone();
    while let Some(some_p) = p {
        if Rc::ptr_eq(&some_p, o) {
            // To prevent circular chain
            return false;
        }
        p = get_prototype_of(&some_p);
    }
    (**o).borrow_mut().prototype = prototype;
    true
}

pub fn has_property(o: &JsObjectType, property: &PropertyKey) -> bool {
    find_property(o, property).is_some()
}

pub fn get(o: &JsObjectType, property: &PropertyKey, receiver: &JsValue) -> Result<JsValue, JErrorType> {
    match find_property(o, property) {
        None => Ok(JsValue::Undefined),
        Some(PropertyDescriptor::Data { value, .. }) => Ok(value),
        Some(PropertyDescriptor::Accessor { get, .. }) => match get {
            None => Ok(JsValue::Undefined),
            Some(getter) => call(&getter, receiver, Vec::new()),
        },
    }
}

/// OrdinarySet. Returns Ok(false) when the assignment is silently rejected
/// (non-writable, setter-less accessor, non-extensible receiver).
pub fn set(
    o: &JsObjectType,
    property: PropertyKey,
    value: JsValue,
    receiver: &JsValue,
) -> Result<bool, JErrorType> {
    match find_property(o, &property) {
        Some(PropertyDescriptor::Accessor { set, .. }) => match set {
            None => Ok(false),
            Some(setter) => {
                call(&setter, receiver, vec![value])?;
                Ok(true)
            }
        },
        Some(PropertyDescriptor::Data {
            writable: false, ..
        }) => Ok(false),
        _ => {
            let receiver = match receiver {
                JsValue::Object(r) => r,
                _ => return Ok(false),
            };
            let mut base = (**receiver).borrow_mut();
            if let Some(existing) = base.properties.get_mut(&property) {
                return match existing {
                    PropertyDescriptor::Data {
                        value: current,
                        writable: true,
                        ..
                    } => {
                        *current = value;
                        Ok(true)
                    }
                    _ => Ok(false),
                };
            }
            Ok(base.define_own_property(property, PropertyDescriptor::new_data(value)))
        }
    }
}

/// Removes an own property. False when nothing was removed: the property is
/// absent or non-configurable.
pub fn delete(o: &JsObjectType, property: &PropertyKey) -> bool {
    let mut base = (**o).borrow_mut();
    let configurable = base.get_own_property(property).map(|pd| pd.is_configurable());
    match configurable {
        Some(true) => {
            base.properties.remove(property);
            true
        }
        _ => false,
    }
}

pub fn call(f: &JsObjectType, this: &JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
    let behaviour = match (**f).borrow().function() {
        Some(func) => func.behaviour(),
        None => {
            return Err(JErrorType::TypeError(
                "object is not a function".to_string(),
            ))
        }
    };
    behaviour(this, args)
}
