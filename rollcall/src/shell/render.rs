use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use crate::models::{Event, HistoryEntry, User};

pub fn header(title: &str) -> ColoredString {
    format!("=== {title} ===").bold().cyan()
}

pub fn events<'a, W, I>(out: &mut W, title: &str, events: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Event>,
{
    writeln!(out, "{}", header(title))?;
    let mut any = false;
    for ev in events {
        writeln!(out, "  {ev}")?;
        any = true;
    }
    if !any {
        writeln!(out, "  No events found.")?;
    }
    Ok(())
}

pub fn users<'a, W, I>(out: &mut W, title: &str, users: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a User>,
{
    writeln!(out, "{}", header(title))?;
    let mut any = false;
    for user in users {
        writeln!(out, "  {user}")?;
        any = true;
    }
    if !any {
        writeln!(out, "  No users found.")?;
    }
    Ok(())
}

pub fn history<W: Write>(out: &mut W, entries: &[HistoryEntry<'_>]) -> io::Result<()> {
    writeln!(out, "{}", header("My Events"))?;
    if entries.is_empty() {
        writeln!(out, "  You are not registered for any events.")?;
    }
    for entry in entries {
        match entry {
            HistoryEntry::Known(ev) => writeln!(out, "  {ev}")?,
            HistoryEntry::Missing(id) => writeln!(out, "  [{id}] {}", "(event no longer exists)".dimmed())?,
        }
    }
    Ok(())
}
