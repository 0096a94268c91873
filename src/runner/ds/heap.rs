//! Handle arena for the engine.
//!
//! Every value that crosses the boundary lives in one slot of the arena and
//! is addressed by a [`ValuePtr`]. Slots are never freed individually; they
//! are released together with the isolate that owns the heap.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;

/// Opaque handle to an engine-resident value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValuePtr(usize);

impl ValuePtr {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Configuration for the heap manager.
#[derive(Debug, Clone, PartialEq)]
pub struct HeapConfig {
    /// Slots reserved up front.
    pub initial_capacity: usize,
    /// Maximum number of live handles. None means unlimited.
    pub max_handles: Option<usize>,
}

impl HeapConfig {
    /// Create a new heap configuration with no handle limit.
    pub fn unlimited() -> Self {
        HeapConfig {
            initial_capacity: 0,
            max_handles: None,
        }
    }

    /// Create a new heap configuration with a handle limit.
    pub fn with_limit(max_handles: usize) -> Self {
        HeapConfig {
            initial_capacity: 0,
            max_handles: Some(max_handles),
        }
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self::unlimited()
    }
}

pub struct Heap {
    config: HeapConfig,
    slots: Vec<JsValue>,
}

impl Heap {
    /// Create a new heap with the given configuration.
    pub fn new(config: HeapConfig) -> Self {
        Heap {
            slots: Vec::with_capacity(config.initial_capacity),
            config,
        }
    }

    /// Store a value in a fresh slot.
    ///
    /// Returns an error if the allocation would exceed the handle limit.
    pub fn allocate(&mut self, value: JsValue) -> Result<ValuePtr, JErrorType> {
        if !self.can_allocate(1) {
            return Err(JErrorType::RangeError("Out of memory".to_string()));
        }
        self.slots.push(value);
        Ok(ValuePtr(self.slots.len() - 1))
    }

    pub fn get(&self, ptr: ValuePtr) -> Option<&JsValue> {
        self.slots.get(ptr.0)
    }

    /// Number of handles allocated so far.
    pub fn get_allocated(&self) -> usize {
        self.slots.len()
    }

    /// Get the maximum allowed handles, if any.
    pub fn get_max_handles(&self) -> Option<usize> {
        self.config.max_handles
    }

    /// Check if allocation of the given number of handles would succeed.
    pub fn can_allocate(&self, handles: usize) -> bool {
        match self.config.max_handles {
            Some(max) => self.slots.len() + handles <= max,
            None => true,
        }
    }

    /// Get the remaining available handles, if limited.
    pub fn available_handles(&self) -> Option<usize> {
        self.config
            .max_handles
            .map(|max| max.saturating_sub(self.slots.len()))
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new(HeapConfig::default())
    }
}
