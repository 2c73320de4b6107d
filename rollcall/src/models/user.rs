use std::fmt::Display;

use super::{EventId, UserId};

/// Role given to every account created through registration.
pub const DEFAULT_ROLE: &str = "User";

/// Emails compare case-insensitively, with full Unicode case folding.
pub fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    /// Events the user registered for, in registration order. Never holds duplicates.
    pub event_history: Vec<EventId>,
}
impl User {
    pub fn new(id: UserId, name: &str, email: &str) -> Self {
        Self {
            id,
            name: String::from(name),
            email: String::from(email),
            role: String::from(DEFAULT_ROLE),
            event_history: Vec::new(),
        }
    }
    pub fn has_registered(&self, event: EventId) -> bool {
        self.event_history.contains(&event)
    }
    /// Appends `event` to the history, returns `false` if it was already there.
    pub fn register(&mut self, event: EventId) -> bool {
        if self.has_registered(event) {
            return false;
        }
        self.event_history.push(event);
        true
    }
    /// Removes `event` from the history, returns `false` if it was not there.
    pub fn withdraw(&mut self, event: EventId) -> bool {
        let before = self.event_history.len();
        self.event_history.retain(|e| *e != event);
        self.event_history.len() != before
    }
}
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for User {}

impl Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} <{}> ({}, {} event(s))",
            self.id,
            self.name,
            self.email,
            self.role,
            self.event_history.len()
        )
    }
}

/// The single privileged account. It never touches the users file, it only
/// exists so that admin login has something to compare against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub id: UserId,
    pub name: String,
    pub email: String,
}
impl Admin {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: UserId(0),
            name: String::from(name),
            email: String::from(email),
        }
    }
    pub fn matches(&self, email: &str) -> bool {
        same_email(&self.email, email.trim())
    }
}

impl Display for Admin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}> (Admin)", self.name, self.email)
    }
}

/// Whoever is logged into the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Person {
    User(User),
    Admin(Admin),
}
impl Person {
    pub fn id(&self) -> UserId {
        match self {
            Person::User(u) => u.id,
            Person::Admin(a) => a.id,
        }
    }
    pub fn name(&self) -> &str {
        match self {
            Person::User(u) => &u.name,
            Person::Admin(a) => &a.name,
        }
    }
    pub fn email(&self) -> &str {
        match self {
            Person::User(u) => &u.email,
            Person::Admin(a) => &a.email,
        }
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Person::User(u) => u.fmt(f),
            Person::Admin(a) => a.fmt(f),
        }
    }
}
