pub mod error;
pub mod function_object;
pub mod heap;
pub mod object;
pub mod object_property;
pub mod operations;
pub mod symbol;
pub mod value;
