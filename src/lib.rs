//! Library core for mailsweep.

// --- Modules ---
pub mod imap;
pub mod prompt;
pub mod purge;

// Re-export key types for convenience
pub mod prelude {
    pub use crate::imap::client::connect;
    pub use crate::imap::error::ImapError;
    pub use crate::imap::session::{ImapOps, TlsSession};
    pub use crate::prompt::{Credentials, PurgeRequest};
    pub use crate::purge::{FlagFailure, PurgeOutcome};
}
