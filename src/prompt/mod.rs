// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Terminal prompts: credentials, deletion parameters, confirmation.

use std::io::{self, BufRead, Write};

/// Account credentials as entered by the operator. Opaque strings; the server
/// is the only validator.
pub struct Credentials {
    pub address: String,
    pub app_password: String,
}

/// A confirmed (folder, age threshold) pair.
#[derive(Debug, PartialEq, Eq)]
pub struct PurgeRequest {
    pub folder: String,
    pub days_old: u32,
}

const AFFIRMATIVE: [&str; 2] = ["yes", "y"];

/// Prompts for the Gmail address (plain echo) and the App Password (masked).
///
/// The password never touches stdout or the logs.
pub fn read_credentials() -> io::Result<Credentials> {
    println!("Gmail Email Deletion Tool");
    print!("Enter your Gmail address: ");
    io::stdout().flush()?;

    let mut address = String::new();
    if io::stdin().read_line(&mut address)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    let address = address.trim().to_string();

    let app_password =
        rpassword::prompt_password("Enter your App Password (characters won't show): ")?;

    Ok(Credentials {
        address,
        app_password,
    })
}

/// Collects a folder name and day count, then an explicit confirmation.
///
/// Loops until a syntactically valid non-negative integer day count is given;
/// a declined confirmation restarts the whole collection. Only `yes`/`y`
/// (case-insensitive) confirm. EOF on `input` is an error, not a hang.
pub fn read_purge_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<PurgeRequest> {
    writeln!(output, "Email Bulk Deletion Tool")?;
    writeln!(output, "Available Gmail folders typically include:")?;
    writeln!(output, "- INBOX")?;
    writeln!(output, "- [Gmail]/All Mail")?;
    writeln!(output, "- [Gmail]/Sent Mail")?;
    writeln!(output, "- [Gmail]/Trash")?;

    loop {
        let folder = prompt_line(input, output, "\nEnter the email folder to delete from: ")?;
        let days_raw = prompt_line(
            input,
            output,
            "Enter the number of days old to delete emails (e.g., 30): ",
        )?;
        let days_old: u32 = match days_raw.parse() {
            Ok(days) => days,
            Err(_) => {
                writeln!(output, "Please enter a valid number for days.")?;
                continue;
            }
        };

        let confirm = prompt_line(
            input,
            output,
            &format!(
                "\nConfirm deletion of emails older than {} days from '{}'? (yes/no): ",
                days_old, folder
            ),
        )?;
        if AFFIRMATIVE.contains(&confirm.to_lowercase().as_str()) {
            return Ok(PurgeRequest { folder, days_old });
        }
        writeln!(output, "Deletion cancelled. Please try again.")?;
    }
}

fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}
