use std::io::{self, Write};

use super::render::header;

/// A fixed list of numbered options. Option `n` is picked by typing `n`.
pub trait Menu: Sized + Copy + 'static {
    const TITLE: &'static str;
    const OPTIONS: &'static [Self];

    fn label(self) -> &'static str;

    fn parse(input: &str) -> Option<Self> {
        let n: usize = input.trim().parse().ok()?;
        Self::OPTIONS.get(n.checked_sub(1)?).copied()
    }

    fn render<W: Write>(out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", header(Self::TITLE))?;
        for (i, option) in Self::OPTIONS.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, option.label())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    RegisterUser,
    UserLogin,
    AdminLogin,
    Exit,
}
impl Menu for MainChoice {
    const TITLE: &'static str = "Event Registration";
    const OPTIONS: &'static [Self] = &[
        Self::RegisterUser,
        Self::UserLogin,
        Self::AdminLogin,
        Self::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::RegisterUser => "Register user",
            Self::UserLogin => "User login",
            Self::AdminLogin => "Admin login",
            Self::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserChoice {
    ViewEvents,
    SearchEvents,
    JoinEvent,
    LeaveEvent,
    MyEvents,
    Logout,
}
impl Menu for UserChoice {
    const TITLE: &'static str = "User Menu";
    const OPTIONS: &'static [Self] = &[
        Self::ViewEvents,
        Self::SearchEvents,
        Self::JoinEvent,
        Self::LeaveEvent,
        Self::MyEvents,
        Self::Logout,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::ViewEvents => "View all events",
            Self::SearchEvents => "Search events",
            Self::JoinEvent => "Register for an event",
            Self::LeaveEvent => "Leave an event",
            Self::MyEvents => "My events",
            Self::Logout => "Logout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminChoice {
    CreateEvent,
    DeleteEvent,
    ViewEvents,
    ViewUsers,
    SearchUsers,
    SearchEvents,
    Logout,
}
impl Menu for AdminChoice {
    const TITLE: &'static str = "Admin Menu";
    const OPTIONS: &'static [Self] = &[
        Self::CreateEvent,
        Self::DeleteEvent,
        Self::ViewEvents,
        Self::ViewUsers,
        Self::SearchUsers,
        Self::SearchEvents,
        Self::Logout,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::CreateEvent => "Create event",
            Self::DeleteEvent => "Delete event",
            Self::ViewEvents => "View all events",
            Self::ViewUsers => "View all users",
            Self::SearchUsers => "Search users",
            Self::SearchEvents => "Search events",
            Self::Logout => "Logout",
        }
    }
}
