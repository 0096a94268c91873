//! # just-bind - JavaScript object access from Rust
//!
//! Host-side handles for reading and writing JavaScript objects living in an
//! engine instance: properties by name, symbol or index, internal fields,
//! prototype links and method calls.
//!
//! ## Quick Start
//!
//! ```
//! use just_bind::binding::{Context, Function, ObjectTemplate, Value};
//!
//! let ctx = Context::new();
//! let obj = ctx.new_object();
//! obj.set("answer", 42i32).unwrap();
//! assert_eq!(obj.get("answer").unwrap().int32(), 42);
//!
//! let greet = Function::new(&ctx, "greet", |info| {
//!     let name = info.arg(0);
//!     Ok(Value::new(info.context(), format!("hello {}", name)))
//! });
//! obj.set("greet", &greet).unwrap();
//! let who = Value::new(&ctx, "world");
//! let said = obj.method_call("greet", &[&who]).unwrap();
//! assert_eq!(said.to_string(), "hello world");
//!
//! let mut tmpl = ObjectTemplate::new();
//! tmpl.set_internal_field_count(1);
//! let wrapped = tmpl.new_instance(&ctx).unwrap();
//! wrapped.set_internal_field(0, "native state").unwrap();
//! assert_eq!(wrapped.get_internal_field(0).to_string(), "native state");
//! ```
//!
//! ## Errors
//!
//! Recoverable failures (unsupported host types, exceptions thrown in the
//! engine, calling something that is not a function) come back as
//! [`binding::BindingError`]. Misuse that can only be a bug in the caller,
//! such as an internal field index past the declared count, panics with a
//! [`binding::ContractViolation`] payload.
//!
//! ## Architecture
//!
//! - **[`binding`]** - Handles used by host code
//! - **[`runner`]** - The engine instance, reached through
//!   [`runner::boundary::Boundary`]

#[macro_use]
extern crate lazy_static;

pub mod binding;
pub mod runner;
