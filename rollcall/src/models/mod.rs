pub mod event;
mod id;
pub mod record;
mod repository;
mod user;

pub use self::event::Event;
pub use self::id::{EventId, UserId};
pub use self::repository::{HistoryEntry, Registration, Repository, Withdrawal};
pub use self::user::{same_email, Admin, Person, User, DEFAULT_ROLE};
