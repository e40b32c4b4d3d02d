//! The `schedule` command: collect a draft schedule and persist it.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chime_core::schedule::ScheduleDraft;
use chime_core::store::ScheduleStore;

/// Where the schedule fields come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputMode {
    /// Prompt for each field on standard input
    Stdin,
    /// Take every field from command-line flags
    Cli,
}

pub fn run(
    db: &Path,
    input: InputMode,
    title: Option<String>,
    body: Option<String>,
    rrule: Option<String>,
) -> Result<()> {
    let draft = match input {
        InputMode::Stdin => prompt_for_draft()?,
        InputMode::Cli => ScheduleDraft::new(
            &title.unwrap_or_default(),
            &body.unwrap_or_default(),
            &rrule.unwrap_or_default(),
        ),
    };

    // Validate before touching the database so a rejected draft leaves no
    // file behind.
    draft.validate()?;

    let store = ScheduleStore::open(db)
        .with_context(|| format!("open schedule database {}", db.display()))?;
    let id = store.create(&draft).context("store the new schedule")?;

    println!("Notification schedule [{}] '{}' created.", id, draft.title);
    Ok(())
}

fn prompt_for_draft() -> Result<ScheduleDraft> {
    let stdin = io::stdin();
    let mut lines = stdin.lock();

    let title = prompt_line(&mut lines, "Enter title: ")?;
    let body = prompt_line(&mut lines, "Enter body: ")?;
    let rule = prompt_line(&mut lines, "Enter recurrence rule (RFC5545): ")?;
    Ok(ScheduleDraft::new(&title, &body, &rule))
}

fn prompt_line(reader: &mut impl BufRead, label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush().context("flush prompt")?;

    let mut line = String::new();
    reader
        .read_line(&mut line)
        .with_context(|| format!("read response to {label:?}"))?;
    Ok(line)
}
