use std::fmt;
use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;

/// Native behaviour of a function object. Receives the `this` value and the
/// positional arguments.
pub type NativeFn = Rc<dyn Fn(&JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType>>;

#[derive(Clone)]
pub struct FunctionObject {
    pub name: String,
    behaviour: NativeFn,
}
impl FunctionObject {
    pub fn new(name: impl Into<String>, behaviour: NativeFn) -> Self {
        FunctionObject {
            name: name.into(),
            behaviour,
        }
    }

    /// Handle on the behaviour, so the caller can drop any borrow of the
    /// owning object before running it.
    pub fn behaviour(&self) -> NativeFn {
        self.behaviour.clone()
    }

    pub fn call(&self, this: &JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
        (self.behaviour)(this, args)
    }
}
impl fmt::Debug for FunctionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionObject({})", self.name)
    }
}
