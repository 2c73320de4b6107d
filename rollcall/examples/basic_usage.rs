use chrono::NaiveDate;
use rollcall::models::{HistoryEntry, Registration, Repository};

fn main() -> rollcall::Result<()> {
    // Loading creates nothing on disk, missing files just mean an empty repository.
    let mut repo = Repository::load("users.txt", "events.txt")?;

    // Every mutation below rewrites both files.
    let alice = repo.register_user("Alice", "alice@example.com")?;
    let meetup = repo.create_event(
        "Monthly club meeting",
        "Monthly updates of the activities related to the club",
        NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
    )?;
    println!("Alice got id {alice}, the meeting got id {meetup}");

    match repo.join_event("alice@example.com", meetup)? {
        Registration::Joined => println!("Alice joined"),
        Registration::AlreadyRegistered => println!("Alice was already there"),
    }

    for hit in repo.search_events("club") {
        println!("Found: {hit}");
    }

    // Deleting an event does not touch anyone's history.
    repo.delete_event(meetup)?;
    for entry in repo.event_history("alice@example.com")? {
        match entry {
            HistoryEntry::Known(ev) => println!("Still going to {}", ev.title),
            HistoryEntry::Missing(id) => println!("Event {id} is gone"),
        }
    }
    Ok(())
}
