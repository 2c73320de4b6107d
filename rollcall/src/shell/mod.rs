//! The interactive front end.
//!
//! One blocking loop: print a menu, read a line, run the matching repository
//! operation, repeat. Reaching the end of input behaves like choosing Exit.

mod menu;
mod render;

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;

pub use self::menu::{AdminChoice, MainChoice, Menu, UserChoice};
use crate::{
    error::Error,
    models::{Admin, EventId, Person, Registration, Repository, Withdrawal},
};

enum State {
    Main,
    LoggedIn(Person),
    Exit,
}

pub struct Shell<'a, R, W> {
    repo: &'a mut Repository,
    admin: &'a Admin,
    input: R,
    out: W,
}
impl<'a, R, W> Shell<'a, R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(repo: &'a mut Repository, admin: &'a Admin, input: R, out: W) -> Self {
        Self {
            repo,
            admin,
            input,
            out,
        }
    }

    pub fn run(mut self) -> io::Result<()> {
        let mut state = State::Main;
        loop {
            state = match state {
                State::Main => self.main_menu()?,
                State::LoggedIn(person @ Person::User(_)) => self.user_menu(person)?,
                State::LoggedIn(person @ Person::Admin(_)) => self.admin_menu(person)?,
                State::Exit => break,
            };
        }
        writeln!(self.out, "Goodbye!")?;
        self.out.flush()
    }

    fn main_menu(&mut self) -> io::Result<State> {
        MainChoice::render(&mut self.out)?;
        let Some(line) = self.prompt("Choose an option: ")? else {
            return Ok(State::Exit);
        };
        let Some(choice) = MainChoice::parse(&line) else {
            return self.invalid_choice(State::Main);
        };
        match choice {
            MainChoice::RegisterUser => {
                let Some(name) = self.prompt("Name: ")? else {
                    return Ok(State::Exit);
                };
                let Some(email) = self.prompt("Email: ")? else {
                    return Ok(State::Exit);
                };
                match self.repo.register_user(&name, &email) {
                    Ok(id) => writeln!(self.out, "Registered {} with id {id}.", name.trim())?,
                    Err(e) => report(&mut self.out, e)?,
                }
            }
            MainChoice::UserLogin => {
                let Some(email) = self.prompt("Email: ")? else {
                    return Ok(State::Exit);
                };
                match self.repo.find_user_by_email(&email) {
                    Some(user) => {
                        let user = user.clone();
                        writeln!(self.out, "Welcome, {}!", user.name)?;
                        return Ok(State::LoggedIn(Person::User(user)));
                    }
                    None => writeln!(self.out, "No user found with that email.")?,
                }
            }
            MainChoice::AdminLogin => {
                let Some(email) = self.prompt("Admin email: ")? else {
                    return Ok(State::Exit);
                };
                if self.admin.matches(&email) {
                    writeln!(self.out, "Welcome, {}!", self.admin.name)?;
                    return Ok(State::LoggedIn(Person::Admin(self.admin.clone())));
                }
                tracing::warn!("rejected admin login");
                writeln!(self.out, "Invalid admin credentials.")?;
            }
            MainChoice::Exit => return Ok(State::Exit),
        }
        Ok(State::Main)
    }

    fn user_menu(&mut self, person: Person) -> io::Result<State> {
        UserChoice::render(&mut self.out)?;
        let Some(line) = self.prompt("Choose an option: ")? else {
            return Ok(State::Exit);
        };
        let Some(choice) = UserChoice::parse(&line) else {
            return self.invalid_choice(State::LoggedIn(person));
        };
        match choice {
            UserChoice::ViewEvents => render::events(&mut self.out, "All Events", self.repo.events())?,
            UserChoice::SearchEvents => {
                let Some(term) = self.prompt("Search term: ")? else {
                    return Ok(State::Exit);
                };
                render::events(&mut self.out, "Search Results", self.repo.search_events(term.trim()))?;
            }
            UserChoice::JoinEvent => {
                let Some(id) = self.prompt_event_id()? else {
                    return Ok(State::LoggedIn(person));
                };
                match self.repo.join_event(person.email(), id) {
                    Ok(Registration::Joined) => writeln!(self.out, "You are now registered for event {id}.")?,
                    Ok(Registration::AlreadyRegistered) => {
                        writeln!(self.out, "You are already registered for this event.")?
                    }
                    Err(e) => report(&mut self.out, e)?,
                }
            }
            UserChoice::LeaveEvent => {
                let Some(id) = self.prompt_event_id()? else {
                    return Ok(State::LoggedIn(person));
                };
                match self.repo.leave_event(person.email(), id) {
                    Ok(Withdrawal::Left) => writeln!(self.out, "You have left event {id}.")?,
                    Ok(Withdrawal::NotRegistered) => {
                        writeln!(self.out, "You are not registered for event {id}.")?
                    }
                    Err(e) => report(&mut self.out, e)?,
                }
            }
            UserChoice::MyEvents => match self.repo.event_history(person.email()) {
                Ok(entries) => render::history(&mut self.out, &entries)?,
                Err(e) => report(&mut self.out, e)?,
            },
            UserChoice::Logout => {
                writeln!(self.out, "Logged out.")?;
                return Ok(State::Main);
            }
        }
        Ok(State::LoggedIn(person))
    }

    fn admin_menu(&mut self, person: Person) -> io::Result<State> {
        AdminChoice::render(&mut self.out)?;
        let Some(line) = self.prompt("Choose an option: ")? else {
            return Ok(State::Exit);
        };
        let Some(choice) = AdminChoice::parse(&line) else {
            return self.invalid_choice(State::LoggedIn(person));
        };
        match choice {
            AdminChoice::CreateEvent => {
                let Some(title) = self.prompt("Title: ")? else {
                    return Ok(State::Exit);
                };
                let Some(description) = self.prompt("Description: ")? else {
                    return Ok(State::Exit);
                };
                let Some(date) = self.prompt("Date (YYYY-MM-DD): ")? else {
                    return Ok(State::Exit);
                };
                let Ok(date) = date.trim().parse::<NaiveDate>() else {
                    writeln!(self.out, "Invalid date. Use YYYY-MM-DD.")?;
                    return Ok(State::LoggedIn(person));
                };
                match self.repo.create_event(&title, &description, date) {
                    Ok(id) => writeln!(self.out, "Event created with id {id}.")?,
                    Err(e) => report(&mut self.out, e)?,
                }
            }
            AdminChoice::DeleteEvent => {
                let Some(id) = self.prompt_event_id()? else {
                    return Ok(State::LoggedIn(person));
                };
                match self.repo.delete_event(id) {
                    Ok(ev) => writeln!(self.out, "Deleted event {id}: {}.", ev.title)?,
                    Err(e) => report(&mut self.out, e)?,
                }
            }
            AdminChoice::ViewEvents => render::events(&mut self.out, "All Events", self.repo.events())?,
            AdminChoice::ViewUsers => render::users(&mut self.out, "All Users", self.repo.users())?,
            AdminChoice::SearchUsers => {
                let Some(term) = self.prompt("Search term: ")? else {
                    return Ok(State::Exit);
                };
                render::users(&mut self.out, "Search Results", self.repo.search_users(term.trim()))?;
            }
            AdminChoice::SearchEvents => {
                let Some(term) = self.prompt("Search term: ")? else {
                    return Ok(State::Exit);
                };
                render::events(&mut self.out, "Search Results", self.repo.search_events(term.trim()))?;
            }
            AdminChoice::Logout => {
                writeln!(self.out, "Logged out.")?;
                return Ok(State::Main);
            }
        }
        Ok(State::LoggedIn(person))
    }

    /// `None` on end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// `None` when the id could not be read. The reason has already been printed,
    /// except at end of input, which the next menu prompt picks up.
    fn prompt_event_id(&mut self) -> io::Result<Option<EventId>> {
        let Some(raw) = self.prompt("Event id: ")? else {
            return Ok(None);
        };
        match raw.parse() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.out, "Invalid event id.")?;
                Ok(None)
            }
        }
    }

    fn invalid_choice(&mut self, stay: State) -> io::Result<State> {
        writeln!(self.out, "Invalid choice.")?;
        match self.prompt("Press Enter to continue...")? {
            Some(_) => Ok(stay),
            None => Ok(State::Exit),
        }
    }
}

fn report<W: Write>(out: &mut W, err: Error) -> io::Result<()> {
    match err {
        Error::Io(e) => {
            tracing::error!(error = %e, "failed to save repository");
            writeln!(out, "Could not save changes: {e}")
        }
        other => writeln!(out, "{other}."),
    }
}
