//! Taste-driven coffee brew advisor.
//!
//! The core is [`advisor::evaluate`]: a pure function from a reported
//! taste plus brew parameters to a static recommendation. Everything
//! else — the log store, tables, charts, the interactive session — is
//! glue around that function.

pub mod advisor;
pub mod config;
pub mod history;
pub mod output;
pub mod session;
