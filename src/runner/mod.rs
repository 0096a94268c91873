//! The in-process engine behind the binding layer.
//!
//! - **[`ds`]** - Data structures (values, objects, symbols, handle heap)
//! - **[`boundary`]** - The operation set exposed to host code
//! - **[`isolate`]** - The engine instance implementing [`boundary::Boundary`]
//! - **[`config`]** - Isolate configuration

pub mod boundary;
pub mod config;
pub mod ds;
pub mod isolate;
