use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use super::{
    event::EventBuilder,
    record::{decode_event, decode_user, encode_event, encode_user},
    user::same_email,
    Event, EventId, User, UserId,
};
use crate::error::{Error, Result};

/// Outcome of [`Repository::join_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Joined,
    AlreadyRegistered,
}

/// Outcome of [`Repository::leave_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Withdrawal {
    Left,
    NotRegistered,
}

/// One id out of a user's history, resolved against the current events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEntry<'a> {
    Known(&'a Event),
    /// The event was deleted after the user registered for it.
    Missing(EventId),
}

/// All users and events, kept in memory and mirrored to two text files.
///
/// Every mutation rewrites both files from scratch. The write is not atomic:
/// if the process dies halfway through [`Repository::save`] the users file can
/// be complete while the events file is truncated.
#[derive(Debug, Default)]
pub struct Repository {
    users_path: PathBuf,
    events_path: PathBuf,
    users: Vec<User>,
    events: Vec<Event>,
}
impl Repository {
    /// An empty repository that will save to the given files. Nothing is read.
    pub fn with_paths<P, Q>(users_path: P, events_path: Q) -> Self
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        Self {
            users_path: users_path.as_ref().to_path_buf(),
            events_path: events_path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Reads both files. A file that does not exist yet counts as empty and
    /// lines that cannot be parsed are dropped.
    pub fn load<P, Q>(users_path: P, events_path: Q) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let mut repo = Self::with_paths(users_path, events_path);
        repo.users = read_records(&repo.users_path, decode_user)?;
        repo.events = read_records(&repo.events_path, decode_event)?;
        tracing::info!(
            users = repo.users.len(),
            events = repo.events.len(),
            "repository loaded"
        );
        Ok(repo)
    }

    /// Truncates and rewrites both files.
    pub fn save(&self) -> Result<()> {
        write_records(&self.users_path, self.users.iter().map(encode_user))?;
        write_records(&self.events_path, self.events.iter().map(encode_event))?;
        tracing::debug!(
            users = self.users.len(),
            events = self.events.len(),
            "repository saved"
        );
        Ok(())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        let email = email.trim();
        self.users
            .iter()
            .find(|u| same_email(&u.email, email))
    }
    pub fn find_event_by_id(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn search_events(&self, term: &str) -> Vec<&Event> {
        self.events.iter().filter(|e| e.title_contains(term)).collect()
    }
    pub fn search_users(&self, term: &str) -> Vec<&User> {
        let term = term.to_lowercase();
        self.users
            .iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&term) || u.email.to_lowercase().contains(&term)
            })
            .collect()
    }

    // Ids are `len + 1`, so deleting an event and creating another can hand
    // out an id that was used before.
    pub fn next_user_id(&self) -> UserId {
        UserId(self.users.len() as u64 + 1)
    }
    pub fn next_event_id(&self) -> EventId {
        EventId(self.events.len() as u64 + 1)
    }

    pub fn register_user(&mut self, name: &str, email: &str) -> Result<UserId> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() {
            return Err(Error::InvalidInput(String::from(
                "name and email must not be empty",
            )));
        }
        if self.find_user_by_email(email).is_some() {
            return Err(Error::EmailTaken(String::from(email)));
        }
        let user = User::new(self.next_user_id(), name, email);
        let id = user.id;
        tracing::info!(%id, email, "user registered");
        self.users.push(user);
        self.save()?;
        Ok(id)
    }

    pub fn create_event(&mut self, title: &str, description: &str, date: NaiveDate) -> Result<EventId> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput(String::from("title must not be empty")));
        }
        let event = EventBuilder::new(self.next_event_id(), title, date)
            .description(description.trim())
            .build();
        let id = event.id;
        tracing::info!(%id, title, %date, "event created");
        self.events.push(event);
        self.save()?;
        Ok(id)
    }

    /// Removes the event but leaves its id in every user's history.
    pub fn delete_event(&mut self, id: EventId) -> Result<Event> {
        let pos = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(Error::EventNotFound(id))?;
        let event = self.events.remove(pos);
        tracing::info!(%id, title = %event.title, "event deleted");
        self.save()?;
        Ok(event)
    }

    pub fn join_event(&mut self, email: &str, id: EventId) -> Result<Registration> {
        if self.find_event_by_id(id).is_none() {
            return Err(Error::EventNotFound(id));
        }
        let user = self.user_mut(email)?;
        if !user.register(id) {
            return Ok(Registration::AlreadyRegistered);
        }
        tracing::info!(user = %user.id, event = %id, "joined event");
        self.save()?;
        Ok(Registration::Joined)
    }

    /// Works for ids whose event has since been deleted, so stale entries can
    /// still be cleared by hand.
    pub fn leave_event(&mut self, email: &str, id: EventId) -> Result<Withdrawal> {
        let user = self.user_mut(email)?;
        if !user.withdraw(id) {
            return Ok(Withdrawal::NotRegistered);
        }
        tracing::info!(user = %user.id, event = %id, "left event");
        self.save()?;
        Ok(Withdrawal::Left)
    }

    pub fn event_history(&self, email: &str) -> Result<Vec<HistoryEntry<'_>>> {
        let user = self
            .find_user_by_email(email)
            .ok_or_else(|| Error::UserNotFound(String::from(email.trim())))?;
        Ok(user
            .event_history
            .iter()
            .map(|id| match self.find_event_by_id(*id) {
                Some(ev) => HistoryEntry::Known(ev),
                None => HistoryEntry::Missing(*id),
            })
            .collect())
    }

    fn user_mut(&mut self, email: &str) -> Result<&mut User> {
        let email = email.trim();
        self.users
            .iter_mut()
            .find(|u| same_email(&u.email, email))
            .ok_or_else(|| Error::UserNotFound(String::from(email)))
    }
}

fn read_records<T>(path: &Path, decode: fn(&str) -> Option<T>) -> io::Result<Vec<T>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };
    let mut records = vec![];
    for (n, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match decode(&line) {
            Some(record) => records.push(record),
            None => tracing::debug!(path = %path.display(), line = n + 1, "skipping malformed record"),
        }
    }
    Ok(records)
}

fn write_records<I>(path: &Path, lines: I) -> io::Result<()>
where
    I: IntoIterator<Item = String>,
{
    let mut buf = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(buf, "{line}")?;
    }
    buf.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn repo_in(dir: &tempfile::TempDir) -> Repository {
        Repository::with_paths(dir.path().join("users.txt"), dir.path().join("events.txt"))
    }

    #[test]
    fn missing_files_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::load(dir.path().join("users.txt"), dir.path().join("events.txt")).unwrap();
        assert!(repo.users().is_empty());
        assert!(repo.events().is_empty());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let users = dir.path().join("users.txt");
        let events = dir.path().join("events.txt");
        std::fs::write(&users, "1|Alice|a@x.com|User|\nbroken line\n\n2|Bob|b@x.com|User|1\n").unwrap();
        std::fs::write(&events, "1|Meetup|d|2025-01-01\n2|Bad|d|someday\n").unwrap();

        let repo = Repository::load(&users, &events).unwrap();
        assert_eq!(repo.users().len(), 2);
        assert_eq!(repo.events().len(), 1);
        assert_eq!(repo.users()[1].event_history, vec![EventId(1)]);
    }

    #[test]
    fn email_lookup_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = repo_in(&dir);
        repo.register_user("Alice", "Alice@X.com").unwrap();
        assert_eq!(repo.find_user_by_email("alice@x.com").map(|u| u.id), Some(UserId(1)));
        assert!(repo.find_user_by_email("bob@x.com").is_none());
    }

    #[test]
    fn duplicate_and_blank_registrations_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = repo_in(&dir);
        repo.register_user("Alice", "a@x.com").unwrap();
        assert!(matches!(repo.register_user("Other", "A@X.COM"), Err(Error::EmailTaken(_))));
        assert!(matches!(repo.register_user("  ", "c@x.com"), Err(Error::InvalidInput(_))));
        assert!(matches!(
            repo.create_event("", "d", date(2025, 1, 1)),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(repo.users().len(), 1);
    }

    #[test]
    fn accented_emails_match_the_same_way_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = repo_in(&dir);
        repo.create_event("Meetup", "", date(2025, 1, 1)).unwrap();
        repo.register_user("Élise", "ÉLISE@x.com").unwrap();

        assert_eq!(repo.search_users("élise").len(), 1);
        assert_eq!(repo.find_user_by_email("élise@x.com").map(|u| u.id), Some(UserId(1)));
        assert!(matches!(repo.register_user("Other", "élise@x.com"), Err(Error::EmailTaken(_))));
        assert_eq!(repo.join_event("élise@x.com", EventId(1)).unwrap(), Registration::Joined);
        assert_eq!(repo.users().len(), 1);
    }

    #[test]
    fn searches_keep_original_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = repo_in(&dir);
        repo.create_event("Rust Meetup", "", date(2025, 1, 1)).unwrap();
        repo.create_event("Board games", "", date(2025, 2, 1)).unwrap();
        repo.create_event("meetup afterparty", "", date(2025, 1, 1)).unwrap();
        repo.register_user("Alice", "alice@x.com").unwrap();
        repo.register_user("Bob", "bob@alice.org").unwrap();
        repo.register_user("Carol", "c@x.com").unwrap();

        let titles: Vec<_> = repo.search_events("MEETUP").iter().map(|e| e.id).collect();
        assert_eq!(titles, vec![EventId(1), EventId(3)]);
        let users: Vec<_> = repo.search_users("alice").iter().map(|u| u.id).collect();
        assert_eq!(users, vec![UserId(1), UserId(2)]);
        assert!(repo.search_events("description").is_empty());
    }

    #[test]
    fn joining_twice_is_reported_and_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = repo_in(&dir);
        repo.create_event("Meetup", "d", date(2025, 1, 1)).unwrap();
        repo.register_user("Alice", "a@x.com").unwrap();

        assert_eq!(repo.join_event("a@x.com", EventId(1)).unwrap(), Registration::Joined);
        assert_eq!(
            repo.join_event("A@x.com", EventId(1)).unwrap(),
            Registration::AlreadyRegistered
        );
        assert_eq!(repo.users()[0].event_history, vec![EventId(1)]);
    }

    #[test]
    fn join_and_leave_report_unknown_targets() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = repo_in(&dir);
        repo.register_user("Alice", "a@x.com").unwrap();
        assert!(matches!(repo.join_event("a@x.com", EventId(9)), Err(Error::EventNotFound(EventId(9)))));

        repo.create_event("Meetup", "d", date(2025, 1, 1)).unwrap();
        assert!(matches!(repo.join_event("z@x.com", EventId(1)), Err(Error::UserNotFound(_))));
        assert_eq!(repo.leave_event("a@x.com", EventId(1)).unwrap(), Withdrawal::NotRegistered);
        assert!(matches!(repo.event_history("z@x.com"), Err(Error::UserNotFound(_))));
    }

    #[test]
    fn deleted_events_stay_in_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = repo_in(&dir);
        repo.create_event("Meetup", "d", date(2025, 1, 1)).unwrap();
        repo.create_event("Workshop", "", date(2025, 3, 1)).unwrap();
        repo.register_user("Alice", "a@x.com").unwrap();
        repo.join_event("a@x.com", EventId(1)).unwrap();
        repo.join_event("a@x.com", EventId(2)).unwrap();

        let removed = repo.delete_event(EventId(1)).unwrap();
        assert_eq!(removed.title, "Meetup");
        assert!(repo.find_event_by_id(EventId(1)).is_none());
        assert!(matches!(repo.delete_event(EventId(1)), Err(Error::EventNotFound(_))));

        let history = repo.event_history("a@x.com").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], HistoryEntry::Missing(EventId(1)));
        assert!(matches!(history[1], HistoryEntry::Known(e) if e.title == "Workshop"));

        assert_eq!(repo.leave_event("a@x.com", EventId(1)).unwrap(), Withdrawal::Left);
    }

    #[test]
    fn ids_are_reused_after_deletion() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = repo_in(&dir);
        let first = repo.create_event("Meetup", "", date(2025, 1, 1)).unwrap();
        repo.delete_event(first).unwrap();
        let second = repo.create_event("Another", "", date(2025, 1, 2)).unwrap();
        assert_eq!(first, second);
        assert_eq!(second, EventId(1));
    }

    #[test]
    fn every_mutation_is_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let users = dir.path().join("users.txt");
        let events = dir.path().join("events.txt");
        let mut repo = Repository::with_paths(&users, &events);
        repo.create_event("Meetup", "d", date(2025, 1, 1)).unwrap();
        repo.register_user("Alice", "a@x.com").unwrap();
        repo.join_event("a@x.com", EventId(1)).unwrap();

        assert_eq!(std::fs::read_to_string(&users).unwrap(), "1|Alice|a@x.com|User|1\n");
        assert_eq!(std::fs::read_to_string(&events).unwrap(), "1|Meetup|d|2025-01-01\n");

        repo.delete_event(EventId(1)).unwrap();
        assert_eq!(std::fs::read_to_string(&events).unwrap(), "");
    }

    #[test]
    fn unreadable_path_surfaces_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be read as a records file
        let err = Repository::load(dir.path(), dir.path().join("events.txt")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
