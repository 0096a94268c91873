use std::fmt;
use std::rc::{Rc, Weak};

use log::debug;

use crate::binding::error::BindingError;
use crate::binding::object::Object;
use crate::binding::value::Value;
use crate::runner::boundary::{Boundary, ValuePtr};
use crate::runner::config::IsolateConfig;
use crate::runner::ds::value::JsValue;
use crate::runner::isolate::Isolate;

/// Execution session owning every value created in it.
///
/// Cloning a `Context` is cheap and yields another handle on the same
/// session. Values keep their context alive, so a value can never outlive
/// it. A context is bound to the thread that created it.
#[derive(Clone)]
pub struct Context {
    iso: Rc<Isolate>,
}

impl Context {
    pub fn new() -> Self {
        Self::with_config(IsolateConfig::default())
    }

    pub fn with_config(config: IsolateConfig) -> Self {
        debug!("creating context");
        Context {
            iso: Rc::new(Isolate::new(config)),
        }
    }

    /// The engine behind this context.
    pub fn isolate(&self) -> &Isolate {
        &self.iso
    }

    pub(crate) fn downgrade(&self) -> WeakContext {
        WeakContext(Rc::downgrade(&self.iso))
    }

    pub(crate) fn wrap(&self, ptr: ValuePtr) -> Value {
        Value {
            ptr,
            ctx: self.clone(),
        }
    }

    /// The handle behind `value`, provided this context created it. A
    /// handle indexes one isolate's heap only.
    pub(crate) fn own_ptr(&self, value: &Value) -> Result<ValuePtr, BindingError> {
        if self.same_context(&value.ctx) {
            Ok(value.ptr)
        } else {
            Err(BindingError::ForeignContext)
        }
    }

    pub fn global(&self) -> Object {
        Object::from_value(self.wrap(self.iso.global()))
    }

    pub fn new_object(&self) -> Object {
        Object::from_value(self.wrap(self.iso.object_new(0)))
    }

    pub fn undefined(&self) -> Value {
        self.wrap(self.iso.new_value(JsValue::Undefined))
    }

    pub fn null(&self) -> Value {
        self.wrap(self.iso.new_value(JsValue::Null))
    }

    /// Number of engine values allocated in this context so far.
    pub fn allocation_count(&self) -> usize {
        self.iso.allocation_count()
    }

    pub fn same_context(&self, other: &Context) -> bool {
        Rc::ptr_eq(&self.iso, &other.iso)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Context({:p})", Rc::as_ptr(&self.iso))
    }
}

/// Non-owning reference held by host callbacks stored inside the engine.
#[derive(Clone)]
pub(crate) struct WeakContext(Weak<Isolate>);

impl WeakContext {
    pub(crate) fn upgrade(&self) -> Option<Context> {
        self.0.upgrade().map(|iso| Context { iso })
    }
}
