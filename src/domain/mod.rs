//! Pure domain logic: record types, identifier scheme, template builder,
//! custody transitions, and the error taxonomy. Nothing here touches a
//! port; all I/O lives in the service layer.

pub mod custody;
pub mod entities;
pub mod errors;
pub mod identifiers;
pub mod template;

pub use entities::*;
pub use errors::{CustodyError, ErrorKind, LedgerError};
