use std::fmt::Display;

use chrono::NaiveDate;

use super::EventId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
}
impl Event {
    /// Case-insensitive substring match on the title.
    pub fn title_contains(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(&term.to_lowercase())
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} on {}", self.id, self.title, self.date)?;
        if !self.description.is_empty() {
            write!(f, ": {}", self.description)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct EventBuilder {
    id: EventId,
    title: String,
    description: String,
    date: NaiveDate,
}
impl EventBuilder {
    pub fn new(id: EventId, title: &str, date: NaiveDate) -> Self {
        Self {
            id,
            title: String::from(title),
            date,
            ..Self::default()
        }
    }
    pub fn description(mut self, desc: &str) -> Self {
        self.description = String::from(desc);
        self
    }
    pub fn build(self) -> Event {
        Event {
            id: self.id,
            title: self.title,
            description: self.description,
            date: self.date,
        }
    }
}
