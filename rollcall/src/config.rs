//! Startup configuration.
//!
//! Everything has a default, so a missing config file is not an error.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::Result, models::Admin};

pub const CONFIG_FILE: &str = "rollcall.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub users_file: PathBuf,
    pub events_file: PathBuf,
    pub admin_name: String,
    pub admin_email: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            users_file: PathBuf::from("users.txt"),
            events_file: PathBuf::from("events.txt"),
            admin_name: String::from("Administrator"),
            admin_email: String::from("admin@rollcall.local"),
        }
    }
}

impl Config {
    pub fn load<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let file = match File::open(path.as_ref()) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.as_ref().display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config = ron::de::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn admin(&self) -> Admin {
        Admin::new(&self.admin_name, &self.admin_email)
    }
}
