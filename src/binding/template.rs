use log::debug;

use crate::binding::coerce::Primitive;
use crate::binding::context::Context;
use crate::binding::error::BindingError;
use crate::binding::object::Object;
use crate::runner::boundary::Boundary;

/// Blueprint for objects that carry internal fields.
///
/// Templates are not bound to a context; one template can stamp out
/// instances in any number of contexts.
#[derive(Debug, Clone, Default)]
pub struct ObjectTemplate {
    internal_field_count: u32,
    properties: Vec<(String, Primitive)>,
}

impl ObjectTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_internal_field_count(&mut self, count: u32) -> &mut Self {
        self.internal_field_count = count;
        self
    }

    pub fn internal_field_count(&self) -> u32 {
        self.internal_field_count
    }

    /// Adds a property every instance starts with. Setting a name twice keeps
    /// the last value.
    pub fn set(&mut self, name: &str, value: impl Into<Primitive>) -> Result<(), BindingError> {
        if name.contains('\0') {
            return Err(BindingError::InvalidPropertyName(name.to_string()));
        }
        let value = value.into();
        match self.properties.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.properties.push((name.to_string(), value)),
        }
        Ok(())
    }

    pub fn new_instance(&self, ctx: &Context) -> Result<Object, BindingError> {
        debug!(
            "instantiating template ({} internal fields, {} properties)",
            self.internal_field_count,
            self.properties.len()
        );
        let ptr = ctx.isolate().object_new(self.internal_field_count);
        let object = Object::from_value(ctx.wrap(ptr));
        for (name, value) in &self.properties {
            object.set(name, value.clone())?;
        }
        Ok(object)
    }
}
