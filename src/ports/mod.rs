pub mod inbound;
pub mod outbound;

pub use inbound::CustodyApi;
pub use outbound::{IdentityAttributes, LedgerStore, RecordWrite, TimeSource};
