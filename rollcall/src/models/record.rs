//! Line format shared by the users and events files.
//!
//! Every record is one line of `|` separated fields. Nothing is escaped, so a
//! `|` (or a `,` inside a user's history) typed into a free text field will
//! make that record unreadable on the next load.

use chrono::NaiveDate;

use super::{event::EventBuilder, Event, EventId, User, UserId};

pub const FIELD_SEPARATOR: char = '|';
pub const HISTORY_SEPARATOR: char = ',';

const USER_FIELDS: usize = 5;
const EVENT_FIELDS: usize = 4;

/// `id|name|email|role|1,2,3`
pub fn encode_user(user: &User) -> String {
    let history = user
        .event_history
        .iter()
        .map(EventId::to_string)
        .collect::<Vec<_>>()
        .join(&HISTORY_SEPARATOR.to_string());
    [
        user.id.to_string(),
        user.name.clone(),
        user.email.clone(),
        user.role.clone(),
        history,
    ]
    .join(&FIELD_SEPARATOR.to_string())
}

/// `id|title|description|YYYY-MM-DD`
pub fn encode_event(event: &Event) -> String {
    [
        event.id.to_string(),
        event.title.clone(),
        event.description.clone(),
        event.date.to_string(),
    ]
    .join(&FIELD_SEPARATOR.to_string())
}

pub fn decode_user(line: &str) -> Option<User> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != USER_FIELDS {
        return None;
    }
    let id: UserId = fields[0].parse().ok()?;
    let mut user = User::new(id, fields[1], fields[2]);
    user.role = String::from(fields[3]);
    for entry in fields[4].split(HISTORY_SEPARATOR) {
        if entry.trim().is_empty() {
            continue;
        }
        user.register(entry.parse().ok()?);
    }
    Some(user)
}

pub fn decode_event(line: &str) -> Option<Event> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != EVENT_FIELDS {
        return None;
    }
    let id: EventId = fields[0].parse().ok()?;
    let date: NaiveDate = fields[3].trim().parse().ok()?;
    Some(
        EventBuilder::new(id, fields[1], date)
            .description(fields[2])
            .build(),
    )
}
