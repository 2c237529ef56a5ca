//! Admin admission: who may pass the access gate.

mod resolver;

pub use resolver::resolve_admin;
