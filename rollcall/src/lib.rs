//! Rollcall keeps track of events and of the users who signed up for them.
//!
//! Everything lives in memory while the program runs and is mirrored to two
//! plain text files, one record per line. The files are rewritten from scratch
//! after every change, there is no journal and no locking, so a single process
//! is expected to own them.
//!
//! [`Repository`] holds the users and events and is the only thing that reads
//! or writes the files. Check [`models::record`] for the exact line layout.
//!
//! [`Shell`] is the numbered-menu front end used by the `rollcall` binary. It
//! is generic over its input and output so it can be driven by anything that
//! implements [`BufRead`] and [`Write`].
//!
//! [`Repository`]: crate::models::Repository
//! [`Shell`]: crate::shell::Shell
//! [`BufRead`]: std::io::BufRead
//! [`Write`]: std::io::Write

pub mod config;
pub mod error;
/// Users, events and the repository that stores them.
pub mod models;
pub mod shell;

pub use self::config::Config;
pub use self::error::{Error, Result};
