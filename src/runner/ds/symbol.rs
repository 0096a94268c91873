use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Engine side symbol. Identity is the id, never the description, so two
/// symbols created with the same description stay distinct keys.
#[derive(Clone)]
pub struct SymbolData {
    id: Uuid,
    description: Option<String>,
}

impl SymbolData {
    pub fn new(description: String) -> Self {
        SymbolData {
            id: Uuid::new_v4(),
            description: Some(description),
        }
    }

    pub fn new_empty() -> Self {
        SymbolData {
            id: Uuid::new_v4(),
            description: None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }
}
impl PartialEq for SymbolData {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for SymbolData {}
impl Hash for SymbolData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
impl Display for SymbolData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(d) => write!(f, "Symbol({})", d),
            None => write!(f, "Symbol()"),
        }
    }
}
impl fmt::Debug for SymbolData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self, self.id.to_hyphenated())
    }
}

/* Well known symbols */
lazy_static! {
    pub static ref SYMBOL_HAS_INSTANCE: SymbolData =
        SymbolData::new("Symbol.hasInstance".to_string());
    pub static ref SYMBOL_IS_CONCAT_SPREADABLE: SymbolData =
        SymbolData::new("Symbol.isConcatSpreadable".to_string());
    pub static ref SYMBOL_ITERATOR: SymbolData = SymbolData::new("Symbol.iterator".to_string());
    pub static ref SYMBOL_ASYNC_ITERATOR: SymbolData =
        SymbolData::new("Symbol.asyncIterator".to_string());
    pub static ref SYMBOL_MATCH: SymbolData = SymbolData::new("Symbol.match".to_string());
    pub static ref SYMBOL_REPLACE: SymbolData = SymbolData::new("Symbol.replace".to_string());
    pub static ref SYMBOL_SEARCH: SymbolData = SymbolData::new("Symbol.search".to_string());
    pub static ref SYMBOL_SPECIES: SymbolData = SymbolData::new("Symbol.species".to_string());
    pub static ref SYMBOL_SPLIT: SymbolData = SymbolData::new("Symbol.split".to_string());
    pub static ref SYMBOL_TO_PRIMITIVE: SymbolData =
        SymbolData::new("Symbol.toPrimitive".to_string());
    pub static ref SYMBOL_TO_STRING_TAG: SymbolData =
        SymbolData::new("Symbol.toStringTag".to_string());
}
