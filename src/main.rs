use std::io;
use std::time::Duration;

use env_logger::Env;

use mailsweep::imap::client;
use mailsweep::imap::session::ImapOps;
use mailsweep::prompt;
use mailsweep::purge;

const IMAP_HOST: &str = "imap.gmail.com";
const IMAP_PORT: u16 = 993;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

fn main() {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let credentials = match prompt::read_credentials() {
        Ok(credentials) => credentials,
        Err(err) => {
            eprintln!("Error reading credentials: {}", err);
            return;
        }
    };

    let stdin = io::stdin();
    let request = match prompt::read_purge_request(&mut stdin.lock(), &mut io::stdout()) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("Error reading deletion parameters: {}", err);
            return;
        }
    };

    let mut session = match client::connect(
        IMAP_HOST,
        IMAP_PORT,
        &credentials.address,
        &credentials.app_password,
        CONNECT_TIMEOUT,
    ) {
        Ok(session) => {
            println!("Successfully authenticated!");
            session
        }
        Err(err) => {
            eprintln!("Connection Error: {}", err);
            print_troubleshooting_tips();
            return;
        }
    };

    purge::delete_old_messages(&mut session, &request.folder, request.days_old);

    // Best effort on both; a failed close must not skip the logout.
    if let Err(err) = session.close() {
        eprintln!("Error closing connection: {}", err);
    }
    if let Err(err) = session.logout() {
        eprintln!("Error closing connection: {}", err);
    }
}

fn print_troubleshooting_tips() {
    println!("\nTroubleshooting Tips:");
    println!("1. Check your internet connection");
    println!("2. Verify App Password is correct");
    println!("3. Ensure Gmail IMAP is enabled");
    println!("4. Check firewall or antivirus settings");
}
