use std::net::TcpStream;

use native_tls::TlsStream;

use crate::imap::error::ImapError;

/// The concrete session type behind [`TlsSession`].
pub type UnderlyingImapSession = ::imap::Session<TlsStream<TcpStream>>;

/// The session operations the deletion workflow needs.
///
/// The orchestrator and executor only ever see this trait, so tests can drive
/// them with a scripted mailbox instead of a live server.
pub trait ImapOps {
    /// Lists all folders in the mailbox.
    fn list_folders(&mut self) -> Result<Vec<String>, ImapError>;

    /// Selects a folder for subsequent operations.
    fn select_folder(&mut self, name: &str) -> Result<(), ImapError>;

    /// Searches the selected folder, returning matching sequence numbers.
    fn search(&mut self, query: &str) -> Result<Vec<u32>, ImapError>;

    /// Sets the `\Deleted` flag on a single message.
    fn flag_deleted(&mut self, seq: u32) -> Result<(), ImapError>;

    /// Permanently removes messages flagged `\Deleted` in the selected folder.
    fn expunge(&mut self) -> Result<(), ImapError>;

    /// Closes the selected folder.
    fn close(&mut self) -> Result<(), ImapError>;

    /// Logs out the current session.
    fn logout(&mut self) -> Result<(), ImapError>;
}

/// Authenticated IMAP session over native-TLS.
pub struct TlsSession {
    session: UnderlyingImapSession,
}

impl TlsSession {
    pub fn new(session: UnderlyingImapSession) -> Self {
        Self { session }
    }
}

impl ImapOps for TlsSession {
    fn list_folders(&mut self) -> Result<Vec<String>, ImapError> {
        let names = self.session.list(Some(""), Some("*"))?;
        Ok(names.iter().map(|name| name.name().to_string()).collect())
    }

    fn select_folder(&mut self, name: &str) -> Result<(), ImapError> {
        // The imap crate quotes the mailbox name on the wire, exactly once.
        self.session.select(name).map(|_| ()).map_err(ImapError::from)
    }

    fn search(&mut self, query: &str) -> Result<Vec<u32>, ImapError> {
        let mut seqs: Vec<u32> = self.session.search(query)?.into_iter().collect();
        seqs.sort_unstable();
        Ok(seqs)
    }

    fn flag_deleted(&mut self, seq: u32) -> Result<(), ImapError> {
        self.session
            .store(seq.to_string(), r"+FLAGS (\Deleted)")
            .map(|_| ())
            .map_err(ImapError::from)
    }

    fn expunge(&mut self) -> Result<(), ImapError> {
        self.session.expunge().map(|_| ()).map_err(ImapError::from)
    }

    fn close(&mut self) -> Result<(), ImapError> {
        self.session.close().map_err(ImapError::from)
    }

    fn logout(&mut self) -> Result<(), ImapError> {
        self.session.logout().map_err(ImapError::from)
    }
}
