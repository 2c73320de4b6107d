use std::io;

use thiserror::Error;

use crate::models::EventId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ron::error::SpannedError),
    #[error("No user found with email {0}")]
    UserNotFound(String),
    #[error("No event found with id {0}")]
    EventNotFound(EventId),
    #[error("A user with email {0} is already registered")]
    EmailTaken(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
