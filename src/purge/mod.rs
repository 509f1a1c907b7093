// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Age-based deletion: list folders, select, search, flag, expunge.

use chrono::{DateTime, Duration, Local};
use log::warn;

use crate::imap::error::ImapError;
use crate::imap::session::ImapOps;

/// A `STORE +FLAGS (\Deleted)` attempt that failed for one message.
#[derive(Debug)]
pub struct FlagFailure {
    pub seq: u32,
    pub error: ImapError,
}

/// Running totals for one executor run.
///
/// `flagged` counts successful flag attempts across both search passes. The
/// passes overlap on purpose (see [`delete_old_messages`]); the counter does
/// not deduplicate, so if a pass's expunge fails the same message can be
/// counted again by the next pass.
#[derive(Debug, Default)]
pub struct PurgeOutcome {
    pub flagged: usize,
    pub failures: Vec<FlagFailure>,
}

/// Wraps a folder name in double quotes, exactly once.
///
/// Embedded quotes are not escaped; a pre-quoted name comes out double-quoted.
pub fn quoted(folder: &str) -> String {
    format!("\"{}\"", folder)
}

/// The IMAP date token for "now minus `days_old` days", e.g. `09-Feb-2024`.
pub fn cutoff_date(now: DateTime<Local>, days_old: u32) -> String {
    (now - Duration::days(i64::from(days_old)))
        .format("%d-%b-%Y")
        .to_string()
}

/// Prints every folder in the mailbox. Diagnostic aid only: a failure is
/// printed and swallowed, never escalated to the caller.
pub fn list_folders(session: &mut impl ImapOps) {
    match session.list_folders() {
        Ok(folders) => {
            println!("Available folders:");
            for folder in folders {
                println!("{}", folder);
            }
        }
        Err(err) => eprintln!("Error listing folders: {}", err),
    }
}

/// Flags and expunges every message in `folder` older than `days_old` days.
///
/// Two overlapping search passes run back to back: `BEFORE <cutoff>` and
/// `OLDER <days>`. Each pass re-queries the then-current folder state, flags
/// each match individually, and expunges once. Sequence numbers from one pass
/// are never reused in the other; the first pass's expunge shifts them.
///
/// Every remote failure is caught at its own granularity (search, per-message
/// store, expunge) and reported; none aborts the run.
pub fn delete_old_messages(
    session: &mut impl ImapOps,
    folder: &str,
    days_old: u32,
) -> PurgeOutcome {
    list_folders(session);

    if let Err(err) = session.select_folder(folder) {
        // The server's responses to the searches below govern what happens
        // next; an unknown folder typically yields zero matches.
        warn!("could not select {}: {}", quoted(folder), err);
    }

    let cutoff = cutoff_date(Local::now(), days_old);
    println!(
        "\nSearching for emails in {} older than {}",
        quoted(folder),
        cutoff
    );

    let queries = [format!("BEFORE {}", cutoff), format!("OLDER {}", days_old)];

    let mut outcome = PurgeOutcome::default();
    for query in &queries {
        let seqs = match session.search(query) {
            Ok(seqs) => seqs,
            Err(err) => {
                eprintln!("Error during email search with {}: {}", query, err);
                continue;
            }
        };
        println!("Found {} emails matching {}", seqs.len(), query);

        for seq in seqs {
            match session.flag_deleted(seq) {
                Ok(()) => outcome.flagged += 1,
                Err(error) => {
                    eprintln!("Error deleting individual email {}: {}", seq, error);
                    outcome.failures.push(FlagFailure { seq, error });
                }
            }
        }

        if let Err(err) = session.expunge() {
            eprintln!("Error expunging {}: {}", quoted(folder), err);
        }
    }

    if outcome.flagged > 0 {
        println!("\nSuccessfully deleted {} emails", outcome.flagged);
    } else {
        println!("\nNo emails found to delete");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    /// Scripted mailbox; message ages are days, seq = index + 1. Both search
    /// queries behave identically: they match every message strictly older
    /// than the configured threshold. Expunge drops flagged messages, so
    /// sequence numbers shift between passes like on a real server.
    struct FakeMailbox {
        ages: Vec<i64>,
        threshold: i64,
        flagged: Vec<bool>,
        selected: Option<String>,
        select_error: bool,
        search_errors_remaining: usize,
        fail_flag_seqs: Vec<u32>,
        expunge_fails: bool,
        search_calls: usize,
        expunge_calls: usize,
    }

    impl FakeMailbox {
        fn new(ages: Vec<i64>, threshold: i64) -> Self {
            let flagged = vec![false; ages.len()];
            Self {
                ages,
                threshold,
                flagged,
                selected: None,
                select_error: false,
                search_errors_remaining: 0,
                fail_flag_seqs: Vec::new(),
                expunge_fails: false,
                search_calls: 0,
                expunge_calls: 0,
            }
        }
    }

    impl ImapOps for FakeMailbox {
        fn list_folders(&mut self) -> Result<Vec<String>, ImapError> {
            Ok(vec!["INBOX".to_string(), "[Gmail]/Trash".to_string()])
        }

        fn select_folder(&mut self, name: &str) -> Result<(), ImapError> {
            if self.select_error {
                return Err(ImapError::Operation("no such mailbox".to_string()));
            }
            self.selected = Some(name.to_string());
            Ok(())
        }

        fn search(&mut self, _query: &str) -> Result<Vec<u32>, ImapError> {
            self.search_calls += 1;
            if self.search_errors_remaining > 0 {
                self.search_errors_remaining -= 1;
                return Err(ImapError::Operation("search failed".to_string()));
            }
            Ok(self
                .ages
                .iter()
                .enumerate()
                .filter(|(_, age)| **age > self.threshold)
                .map(|(idx, _)| (idx + 1) as u32)
                .collect())
        }

        fn flag_deleted(&mut self, seq: u32) -> Result<(), ImapError> {
            if self.fail_flag_seqs.contains(&seq) {
                return Err(ImapError::Operation("store failed".to_string()));
            }
            let idx = seq as usize - 1;
            assert!(idx < self.ages.len(), "flagged unknown sequence {}", seq);
            self.flagged[idx] = true;
            Ok(())
        }

        fn expunge(&mut self) -> Result<(), ImapError> {
            self.expunge_calls += 1;
            if self.expunge_fails {
                return Err(ImapError::Operation("expunge failed".to_string()));
            }
            let mut kept_ages = Vec::new();
            for (idx, age) in self.ages.iter().enumerate() {
                if !self.flagged[idx] {
                    kept_ages.push(*age);
                }
            }
            self.ages = kept_ages;
            self.flagged = vec![false; self.ages.len()];
            Ok(())
        }

        fn close(&mut self) -> Result<(), ImapError> {
            Ok(())
        }

        fn logout(&mut self) -> Result<(), ImapError> {
            Ok(())
        }
    }

    #[test]
    fn cutoff_is_now_minus_days() {
        let now = Local.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(cutoff_date(now, 0), "10-Mar-2024");
        assert_eq!(cutoff_date(now, 1), "09-Mar-2024");
        assert_eq!(cutoff_date(now, 30), "09-Feb-2024");
        // 2024 is a leap year, so 365 days spans back past Feb 29.
        assert_eq!(cutoff_date(now, 365), "11-Mar-2023");
    }

    #[test]
    fn quoted_wraps_exactly_once() {
        assert_eq!(quoted("INBOX"), "\"INBOX\"");
        assert_eq!(quoted("[Gmail]/All Mail"), "\"[Gmail]/All Mail\"");
        // Pre-quoted names are not escaped, just wrapped again.
        assert_eq!(quoted("\"INBOX\""), "\"\"INBOX\"\"");
    }

    #[test]
    fn deletes_only_messages_older_than_threshold() {
        let mut mailbox = FakeMailbox::new(vec![40, 35, 10], 30);
        let outcome = delete_old_messages(&mut mailbox, "INBOX", 30);

        assert_eq!(outcome.flagged, 2);
        assert!(outcome.failures.is_empty());
        assert_eq!(mailbox.ages, vec![10]);
        assert_eq!(mailbox.selected.as_deref(), Some("INBOX"));
        // One expunge per search pass, not one global expunge.
        assert_eq!(mailbox.search_calls, 2);
        assert_eq!(mailbox.expunge_calls, 2);
    }

    #[test]
    fn empty_mailbox_reports_zero() {
        let mut mailbox = FakeMailbox::new(vec![5, 12], 30);
        let outcome = delete_old_messages(&mut mailbox, "INBOX", 30);

        assert_eq!(outcome.flagged, 0);
        assert!(outcome.failures.is_empty());
        assert_eq!(mailbox.ages, vec![5, 12]);
    }

    #[test]
    fn select_failure_does_not_abort_the_searches() {
        let mut mailbox = FakeMailbox::new(Vec::new(), 30);
        mailbox.select_error = true;

        let outcome = delete_old_messages(&mut mailbox, "NoSuchFolder", 30);

        assert_eq!(outcome.flagged, 0);
        assert_eq!(mailbox.search_calls, 2);
    }

    #[test]
    fn one_failing_store_does_not_stop_the_pass() {
        let mut mailbox = FakeMailbox::new(vec![40, 41, 42, 43, 44], 30);
        mailbox.fail_flag_seqs = vec![3];

        let outcome = delete_old_messages(&mut mailbox, "INBOX", 30);

        // Pass one flags four of five; the survivor shifts to seq 1 after the
        // expunge and the second pass picks it up.
        assert_eq!(outcome.flagged, 5);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].seq, 3);
        assert!(mailbox.ages.is_empty());
    }

    #[test]
    fn failed_search_skips_that_pass_only() {
        let mut mailbox = FakeMailbox::new(vec![40, 50], 30);
        mailbox.search_errors_remaining = 1;

        let outcome = delete_old_messages(&mut mailbox, "INBOX", 30);

        assert_eq!(outcome.flagged, 2);
        assert!(mailbox.ages.is_empty());
        // The failed pass never reached its expunge.
        assert_eq!(mailbox.expunge_calls, 1);
    }

    #[test]
    fn failed_expunge_lets_the_second_pass_recount() {
        let mut mailbox = FakeMailbox::new(vec![40], 30);
        mailbox.expunge_fails = true;

        let outcome = delete_old_messages(&mut mailbox, "INBOX", 30);

        // The counter does not deduplicate across passes; a failed expunge
        // leaves the message visible to the second search.
        assert_eq!(outcome.flagged, 2);
        assert_eq!(mailbox.ages, vec![40]);
    }
}
