use std::fmt;
use std::fmt::{Display, Formatter};

use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::symbol::SymbolData;
use crate::runner::ds::value::JsValue;

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum PropertyKey {
    Str(String),
    Int(u32),
    Sym(SymbolData),
}
impl PropertyKey {
    /// Builds the key for a property name. Canonical array indices (`"0"`,
    /// `"17"`, but not `"017"` or `"4294967295"`) map onto the same key as
    /// the equivalent integer index.
    pub fn from_name(name: &str) -> Self {
        match name.parse::<u32>() {
            Ok(idx) if idx != u32::MAX && idx.to_string() == name => PropertyKey::Int(idx),
            _ => PropertyKey::Str(name.to_string()),
        }
    }

    /// Key for an integer index. `u32::MAX` is not an array index, so it
    /// is the string key `"4294967295"`, as `from_name` produces.
    pub fn from_index(idx: u32) -> Self {
        if idx == u32::MAX {
            PropertyKey::Str(idx.to_string())
        } else {
            PropertyKey::Int(idx)
        }
    }
}
impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Str(s) => write!(f, "{}", s),
            PropertyKey::Int(i) => write!(f, "{}", i),
            PropertyKey::Sym(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Clone)]
pub enum PropertyDescriptor {
    Data {
        value: JsValue,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    Accessor {
        get: Option<JsObjectType>,
        set: Option<JsObjectType>,
        enumerable: bool,
        configurable: bool,
    },
}
impl PropertyDescriptor {
    /// Descriptor produced by a plain assignment.
    pub fn new_data(value: JsValue) -> Self {
        PropertyDescriptor::Data {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    pub fn new_accessor(get: Option<JsObjectType>, set: Option<JsObjectType>) -> Self {
        PropertyDescriptor::Accessor {
            get,
            set,
            enumerable: true,
            configurable: true,
        }
    }

    pub(crate) fn is_configurable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { configurable, .. } => *configurable,
            PropertyDescriptor::Accessor { configurable, .. } => *configurable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_index_names_become_int_keys() {
        assert_eq!(PropertyKey::from_name("0"), PropertyKey::Int(0));
        assert_eq!(PropertyKey::from_name("1000"), PropertyKey::Int(1000));
    }

    #[test]
    fn test_non_canonical_names_stay_strings() {
        assert_eq!(
            PropertyKey::from_name("01"),
            PropertyKey::Str("01".to_string())
        );
        assert_eq!(
            PropertyKey::from_name("-1"),
            PropertyKey::Str("-1".to_string())
        );
        assert_eq!(
            PropertyKey::from_name("4294967295"),
            PropertyKey::Str("4294967295".to_string())
        );
        assert_eq!(
            PropertyKey::from_name("name"),
            PropertyKey::Str("name".to_string())
        );
    }

    #[test]
    fn test_index_and_name_keys_agree() {
        for idx in &[0u32, 1, 1000, u32::MAX - 1, u32::MAX] {
            assert_eq!(
                PropertyKey::from_index(*idx),
                PropertyKey::from_name(&idx.to_string())
            );
        }
        assert_eq!(
            PropertyKey::from_index(u32::MAX),
            PropertyKey::Str("4294967295".to_string())
        );
    }
}
