// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io;

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ImapError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Operation error: {0}")]
    Operation(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<io::Error> for ImapError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
                ImapError::Timeout(err.to_string())
            }
            _ => ImapError::Connection(err.to_string()),
        }
    }
}

impl From<native_tls::Error> for ImapError {
    fn from(err: native_tls::Error) -> Self {
        ImapError::Tls(err.to_string())
    }
}

impl From<::imap::Error> for ImapError {
    fn from(err: ::imap::Error) -> Self {
        match err {
            ::imap::Error::Io(err) => ImapError::Connection(err.to_string()),
            other => ImapError::Operation(other.to_string()),
        }
    }
}
