use std::ops::Deref;
use std::rc::Rc;

use crate::binding::context::Context;
use crate::binding::error::BindingError;
use crate::binding::value::{Value, Valuer};
use crate::runner::boundary::{Boundary, ValuePtr};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::NativeFn;
use crate::runner::ds::value::JsValue;

/// What a host callback sees when the engine calls it.
pub struct CallbackInfo {
    ctx: Context,
    this: Value,
    args: Vec<Value>,
}

impl CallbackInfo {
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn this(&self) -> &Value {
        &self.this
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// The argument at `idx`, or `undefined` past the end.
    pub fn arg(&self, idx: usize) -> Value {
        match self.args.get(idx) {
            Some(v) => v.clone(),
            None => self.ctx.undefined(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Function {
    value: Value,
}

impl Valuer for Function {
    fn value(&self) -> &Value {
        &self.value
    }
}

impl Deref for Function {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.value
    }
}

impl Function {
    pub(crate) fn from_value(value: Value) -> Function {
        Function { value }
    }

    /// Creates a function backed by `callback`. Returning `Err(v)` throws `v`
    /// in the engine.
    pub fn new<F>(ctx: &Context, name: &str, callback: F) -> Function
    where
        F: Fn(&CallbackInfo) -> Result<Value, Value> + 'static,
    {
        let weak = ctx.downgrade();
        let behaviour: NativeFn = Rc::new(move |this: &JsValue, args: Vec<JsValue>| {
            let ctx = match weak.upgrade() {
                Some(ctx) => ctx,
                None => {
                    return Err(JErrorType::ReferenceError(
                        "context is no longer alive".to_string(),
                    ))
                }
            };
            let iso = ctx.isolate();
            let info = CallbackInfo {
                this: ctx.wrap(iso.new_value(this.clone())),
                args: args
                    .into_iter()
                    .map(|a| ctx.wrap(iso.new_value(a)))
                    .collect(),
                ctx: ctx.clone(),
            };
            match callback(&info) {
                Ok(v) => Ok(v.ctx.isolate().value_get(v.ptr)),
                Err(v) => Err(JErrorType::Thrown(v.ctx.isolate().value_get(v.ptr))),
            }
        });
        let ptr = ctx.isolate().function_new(name, behaviour);
        Function::from_value(ctx.wrap(ptr))
    }

    /// Calls the function with an explicit receiver. The receiver and the
    /// arguments must come from the function's context.
    pub fn call(&self, this: &dyn Valuer, args: &[&dyn Valuer]) -> Result<Value, BindingError> {
        let this = self.ctx.own_ptr(this.value())?;
        let args = args
            .iter()
            .map(|a| self.ctx.own_ptr(a.value()))
            .collect::<Result<Vec<ValuePtr>, BindingError>>()?;
        let result = self.ctx.isolate().function_call(self.ptr, this, &args);
        match result {
            Ok(ptr) => Ok(self.ctx.wrap(ptr)),
            Err(info) => Err(BindingError::from(info)),
        }
    }
}
