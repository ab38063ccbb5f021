//! Per-resource operations.
//!
//! Each handle borrows the client and maps one method onto one registrar
//! action (or one pagination run). Write operations return `Ok(())` once
//! the registrar acknowledges with status 200.

mod dns;
mod domains;

pub use dns::Dns;
pub use domains::Domains;
