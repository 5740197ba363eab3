//! View-independent state machines and rules of the VisaMaster front end.
//!
//! Everything in here is plain Rust so that it can be exercised by
//! native tests, the browser application only wires it to signals.

pub mod fetch;
pub mod form;
pub mod gate;
pub mod notify;
pub mod profile;
pub mod query;
pub mod theme;
pub mod ticket;
pub mod validate;

pub use vm_boundary as boundary;
