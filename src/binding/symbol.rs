use std::ops::Deref;

use crate::binding::context::Context;
use crate::binding::value::{Value, Valuer};
use crate::runner::boundary::Boundary;
use crate::runner::ds::symbol::{
    SymbolData, SYMBOL_ASYNC_ITERATOR, SYMBOL_HAS_INSTANCE, SYMBOL_IS_CONCAT_SPREADABLE,
    SYMBOL_ITERATOR, SYMBOL_MATCH, SYMBOL_REPLACE, SYMBOL_SEARCH, SYMBOL_SPECIES, SYMBOL_SPLIT,
    SYMBOL_TO_PRIMITIVE, SYMBOL_TO_STRING_TAG,
};
use crate::runner::ds::value::JsValue;

/// Symbols shared by every context in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnownSymbol {
    HasInstance,
    IsConcatSpreadable,
    Iterator,
    AsyncIterator,
    Match,
    Replace,
    Search,
    Species,
    Split,
    ToPrimitive,
    ToStringTag,
}

impl WellKnownSymbol {
    fn data(self) -> &'static SymbolData {
        match self {
            WellKnownSymbol::HasInstance => &*SYMBOL_HAS_INSTANCE,
            WellKnownSymbol::IsConcatSpreadable => &*SYMBOL_IS_CONCAT_SPREADABLE,
            WellKnownSymbol::Iterator => &*SYMBOL_ITERATOR,
            WellKnownSymbol::AsyncIterator => &*SYMBOL_ASYNC_ITERATOR,
            WellKnownSymbol::Match => &*SYMBOL_MATCH,
            WellKnownSymbol::Replace => &*SYMBOL_REPLACE,
            WellKnownSymbol::Search => &*SYMBOL_SEARCH,
            WellKnownSymbol::Species => &*SYMBOL_SPECIES,
            WellKnownSymbol::Split => &*SYMBOL_SPLIT,
            WellKnownSymbol::ToPrimitive => &*SYMBOL_TO_PRIMITIVE,
            WellKnownSymbol::ToStringTag => &*SYMBOL_TO_STRING_TAG,
        }
    }
}

/// A symbol, usable as a property key.
#[derive(Clone, Debug)]
pub struct Symbol {
    value: Value,
}

impl Valuer for Symbol {
    fn value(&self) -> &Value {
        &self.value
    }
}

impl Deref for Symbol {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.value
    }
}

impl Symbol {
    pub(crate) fn from_value(value: Value) -> Symbol {
        Symbol { value }
    }

    /// A fresh symbol, distinct from every other even with the same
    /// description.
    pub fn new(ctx: &Context, description: Option<&str>) -> Symbol {
        Symbol::from_value(ctx.wrap(ctx.isolate().symbol_new(description)))
    }

    pub fn well_known(ctx: &Context, which: WellKnownSymbol) -> Symbol {
        let ptr = ctx.isolate().new_value(JsValue::Symbol(which.data().clone()));
        Symbol::from_value(ctx.wrap(ptr))
    }

    pub fn description(&self) -> Option<String> {
        match self.ctx.isolate().value_get(self.ptr) {
            JsValue::Symbol(s) => s.description().map(str::to_string),
            _ => None,
        }
    }
}
