use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::{debug, info};
use native_tls::TlsConnector;

use crate::imap::error::ImapError;
use crate::imap::session::TlsSession;

/// Connects to `host:port`, performs the TLS handshake, and logs in.
///
/// The timeout bounds the TCP connect and is also installed as the stream's
/// read/write timeout, so a stalled server cannot hang the session forever.
/// Certificate-chain validation and hostname verification are the native-TLS
/// defaults and stay enabled.
pub fn connect(
    host: &str,
    port: u16,
    address: &str,
    app_password: &str,
    timeout: Duration,
) -> Result<TlsSession, ImapError> {
    debug!("resolving {}:{}", host, port);
    let addr = (host, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| ImapError::Connection(format!("no addresses found for {}:{}", host, port)))?;

    let tcp = TcpStream::connect_timeout(&addr, timeout)?;
    tcp.set_read_timeout(Some(timeout))?;
    tcp.set_write_timeout(Some(timeout))?;
    debug!("TCP connected, performing TLS handshake");

    let tls = TlsConnector::builder().build()?;
    let tls_stream = tls
        .connect(host, tcp)
        .map_err(|err| ImapError::Tls(err.to_string()))?;
    debug!("TLS handshake successful");

    let mut client = ::imap::Client::new(tls_stream);
    client.read_greeting()?;

    let session = client
        .login(address, app_password)
        .map_err(|(err, _client)| ImapError::Auth(err.to_string()))?;
    info!("IMAP login successful for {}", address);

    Ok(TlsSession::new(session))
}
