//! Host-facing handles over engine values.
//!
//! - **[`context`]** - The session owning every value
//! - **[`value`]** - Value handles and introspection
//! - **[`coerce`]** - Host value to engine value conversion
//! - **[`object`]** - Property, internal field and prototype access
//! - **[`function`]** - Calling engine functions and exposing host callbacks
//! - **[`symbol`]** - Symbol keys
//! - **[`template`]** - Object templates declaring internal fields
//! - **[`error`]** - Recoverable errors and contract violations

pub mod coerce;
pub mod context;
pub mod error;
pub mod function;
pub mod object;
pub mod symbol;
pub mod template;
pub mod value;

pub use self::coerce::{coerce, Coercible, Primitive};
pub use self::context::Context;
pub use self::error::{BindingError, ContractViolation, JsError};
pub use self::function::{CallbackInfo, Function};
pub use self::object::Object;
pub use self::symbol::{Symbol, WellKnownSymbol};
pub use self::template::ObjectTemplate;
pub use self::value::{Value, Valuer};
