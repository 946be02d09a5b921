//! Line-oriented front end
//!
//! One command per line. Parsing is kept apart from execution so the
//! grammar can be tested without a session.

use chrono::NaiveDate;
use hostel_core::{
    ComplaintCategory, ComplaintDraft, LeaveDraft, Priority, RequestDraft, RequestRepository,
    RequestStatus, Role,
};

use crate::state::AppState;
use crate::viewmodel::{self, Notice};
use crate::views;

pub const HELP: &str = "\
Commands:
  login <email> <password> [role]      sign in (role: student|warden|admin, default student)
  admin-login <email> <password>       sign in through the admin panel
  logout                               sign out
  whoami                               show the signed-in identity
  go <path>                            open a screen, e.g. go /complaints
  back                                 go to the previous screen
  complain <category> <priority> <title> | <description>
  leave <start YYYY-MM-DD> <end YYYY-MM-DD> <reason>
  mark                                 mark today's attendance (on /attendance)
  start <id> [note]                    complaint: pending -> in-progress
  resolve <id> [note]                  complaint: in-progress -> resolved
  approve <id> [note]                  leave: pending -> approved
  reject <id> [note]                   leave: pending -> rejected
  mine                                 list my requests
  list <status>                        list requests with a status
  stats                                request counts per status
  search <query>                       search residents
  export                               dump all requests as JSON
  help                                 this text
  quit                                 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String, role: Role },
    AdminLogin { email: String, password: String },
    Logout,
    WhoAmI,
    Go(String),
    Back,
    Complain { category: ComplaintCategory, priority: Priority, title: String, description: String },
    Leave { start: NaiveDate, end: NaiveDate, reason: String },
    Mark,
    Review { id: String, status: RequestStatus, note: Option<String> },
    Mine,
    List(RequestStatus),
    Stats,
    Search(String),
    Export,
    Help,
    Quit,
    Empty,
}

/// What the front end should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

fn rest(words: &[&str]) -> String {
    words.join(" ")
}

fn optional_note(words: &[&str]) -> Option<String> {
    let note = rest(words);
    if note.trim().is_empty() {
        None
    } else {
        Some(note)
    }
}

fn date(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| format!("Invalid date: {text}"))
}

/// Parse one input line
pub fn parse(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((head, args)) = words.split_first() else {
        return Ok(Command::Empty);
    };

    let command = match (head.to_ascii_lowercase().as_str(), args) {
        ("login", [email, password]) => Command::Login {
            email: email.to_string(),
            password: password.to_string(),
            role: Role::Student,
        },
        ("login", [email, password, role]) => Command::Login {
            email: email.to_string(),
            password: password.to_string(),
            role: role.parse().map_err(|e: hostel_core::UnknownRole| e.to_string())?,
        },
        ("admin-login", [email, password]) => Command::AdminLogin {
            email: email.to_string(),
            password: password.to_string(),
        },
        ("logout", []) => Command::Logout,
        ("whoami", []) => Command::WhoAmI,
        ("go", [path]) => Command::Go(path.to_string()),
        ("back", []) => Command::Back,
        ("complain", [category, priority, tail @ ..]) => {
            let text = rest(tail);
            let (title, description) = match text.split_once('|') {
                Some((title, description)) => (title.trim(), description.trim()),
                None => (text.trim(), ""),
            };
            Command::Complain {
                category: category.parse()?,
                priority: priority.parse()?,
                title: title.to_string(),
                description: description.to_string(),
            }
        }
        ("leave", [start, end, tail @ ..]) => Command::Leave {
            start: date(start)?,
            end: date(end)?,
            reason: rest(tail),
        },
        ("mark", []) => Command::Mark,
        ("start", [id, note @ ..]) => review(id, RequestStatus::InProgress, note),
        ("resolve", [id, note @ ..]) => review(id, RequestStatus::Resolved, note),
        ("approve", [id, note @ ..]) => review(id, RequestStatus::Approved, note),
        ("reject", [id, note @ ..]) => review(id, RequestStatus::Rejected, note),
        ("mine", []) => Command::Mine,
        ("list", [status]) => Command::List(status.parse()?),
        ("stats", []) => Command::Stats,
        ("search", tail) => Command::Search(rest(tail)),
        ("export", []) => Command::Export,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        (other, _) => return Err(format!("Unknown or malformed command: {other} (try `help`)")),
    };
    Ok(command)
}

fn review(id: &str, status: RequestStatus, note: &[&str]) -> Command {
    Command::Review {
        id: id.to_string(),
        status,
        note: optional_note(note),
    }
}

/// Run one command against the application state
pub fn execute(state: &mut AppState, command: Command) -> Outcome {
    let notice = match command {
        Command::Empty => return Outcome::Continue(String::new()),
        Command::Quit => return Outcome::Quit,
        Command::Help => Notice::Info(HELP.to_string()),
        Command::Login { email, password, role } => {
            let notice = viewmodel::handle_login(state, &email, &password, role);
            with_screen(state, notice)
        }
        Command::AdminLogin { email, password } => {
            let notice = viewmodel::handle_admin_login(state, &email, &password);
            with_screen(state, notice)
        }
        Command::Logout => {
            let notice = viewmodel::handle_logout(state);
            with_screen(state, notice)
        }
        Command::WhoAmI => match state.session.current_session() {
            Some(session) => {
                let identity = &session.identity;
                Notice::Info(format!(
                    "{} <{}> as {}{}, signed in at {}",
                    identity.name,
                    identity.email,
                    identity.role,
                    identity
                        .room_number
                        .as_ref()
                        .map(|r| format!(", room {r}"))
                        .unwrap_or_default(),
                    session.signed_in_at.format("%H:%M")
                ))
            }
            None => Notice::Info("Not signed in".into()),
        },
        Command::Go(path) => viewmodel::handle_go(state, &path),
        Command::Back => viewmodel::handle_back(state),
        Command::Complain { category, priority, title, description } => viewmodel::handle_submit(
            state,
            RequestDraft::Complaint(ComplaintDraft { category, title, description, priority }),
        ),
        Command::Leave { start, end, reason } => viewmodel::handle_submit(
            state,
            RequestDraft::Leave(LeaveDraft { start_date: start, end_date: end, reason }),
        ),
        Command::Mark => viewmodel::handle_mark_attendance(state),
        Command::Review { id, status, note } => {
            viewmodel::handle_review(state, &id, status, note.as_deref())
        }
        Command::Mine => {
            let lines: Vec<String> = state
                .my_records()
                .iter()
                .map(|r| format!("{}  {:<11} {}", viewmodel::short_id(&r.id), r.status.as_str(), r.summary()))
                .collect();
            Notice::Info(if lines.is_empty() { "No requests".into() } else { lines.join("\n") })
        }
        Command::List(status) => {
            let lines: Vec<String> = state
                .requests
                .list_by_status(status)
                .iter()
                .map(|r| format!("{}  {} by {}", viewmodel::short_id(&r.id), r.summary(), r.owner_name))
                .collect();
            Notice::Info(format!("{} {status}\n{}", lines.len(), lines.join("\n")))
        }
        Command::Stats => {
            let counts = state.requests.count_by_status();
            let lines: Vec<String> = RequestStatus::all()
                .iter()
                .map(|s| format!("{:<11} {}", s.as_str(), counts.get(*s)))
                .collect();
            Notice::Info(lines.join("\n"))
        }
        Command::Search(query) => Notice::Info(views::students(state, &query)),
        Command::Export => match state.export_json() {
            Ok(json) => Notice::Info(json),
            Err(e) => Notice::Error(e.to_string()),
        },
    };
    if notice.is_error() {
        tracing::debug!(%notice, "Command failed");
    }
    Outcome::Continue(notice.to_string())
}

/// Append the current screen after an action that navigates
fn with_screen(state: &AppState, notice: Notice) -> Notice {
    let screen = match state.current_route() {
        Some(route) => views::render(state, route),
        None => return notice,
    };
    Notice::Info(format!("{notice}\n{screen}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostel_core::HostelConfig;

    #[test]
    fn test_parse_login() {
        assert_eq!(
            parse("login student@hostel.com 1234").unwrap(),
            Command::Login {
                email: "student@hostel.com".into(),
                password: "1234".into(),
                role: Role::Student
            }
        );
        assert!(matches!(
            parse("LOGIN a b warden").unwrap(),
            Command::Login { role: Role::Warden, .. }
        ));
        assert!(parse("login a b janitor").is_err());
    }

    #[test]
    fn test_parse_complaint() {
        let cmd = parse("complain electrical high Fan broken | Stopped working").unwrap();
        assert_eq!(
            cmd,
            Command::Complain {
                category: ComplaintCategory::Electrical,
                priority: Priority::High,
                title: "Fan broken".into(),
                description: "Stopped working".into(),
            }
        );
    }

    #[test]
    fn test_parse_leave_and_review() {
        assert!(matches!(
            parse("leave 2024-06-01 2024-06-03 going home").unwrap(),
            Command::Leave { ref reason, .. } if reason == "going home"
        ));
        assert!(parse("leave 01/06/2024 2024-06-03 x").is_err());
        assert_eq!(
            parse("approve ab12cd34").unwrap(),
            Command::Review {
                id: "ab12cd34".into(),
                status: RequestStatus::Approved,
                note: None
            }
        );
        assert!(matches!(
            parse("resolve ab12 fixed the fan").unwrap(),
            Command::Review { note: Some(ref n), .. } if n == "fixed the fan"
        ));
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse("   ").unwrap(), Command::Empty);
        assert_eq!(parse("list in-progress").unwrap(), Command::List(RequestStatus::InProgress));
        assert!(parse("dance").is_err());
        assert!(parse("go").is_err());
    }

    #[test]
    fn test_scenario_student_then_reviewer() {
        let mut state = AppState::new(&HostelConfig::default()).unwrap();

        let run = |state: &mut AppState, line: &str| match execute(state, parse(line).unwrap()) {
            Outcome::Continue(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        };

        let out = run(&mut state, "login student@hostel.com 1234 student");
        assert!(out.contains("Welcome, XYZ"));
        let out = run(&mut state, "complain electrical medium Fan broken | Ceiling fan is dead");
        assert!(out.starts_with("[ok]"), "{out}");
        assert!(run(&mut state, "mine").contains("Fan broken"));

        // Students never reach review screens
        run(&mut state, "go /admin/complaints");
        assert!(run(&mut state, "start 0000").starts_with("[error]"));

        run(&mut state, "logout");
        run(&mut state, "admin-login admin@hostel.com 1234");
        let screen = run(&mut state, "go /admin/complaints");
        assert!(screen.contains("Fan broken"));

        let fan = state
            .requests
            .list_by_status(RequestStatus::Pending)
            .into_iter()
            .find(|r| r.summary().contains("Fan broken"))
            .unwrap();
        let id = viewmodel::short_id(&fan.id);

        assert!(run(&mut state, &format!("resolve {id}")).starts_with("[error]"));
        assert!(run(&mut state, &format!("start {id} electrician booked")).starts_with("[ok]"));
        assert!(run(&mut state, &format!("resolve {id}")).starts_with("[ok]"));
        assert_eq!(state.requests.find(fan.id).unwrap().status, RequestStatus::Resolved);
    }

    #[test]
    fn test_mark_attendance_command() {
        let mut state = AppState::new(&HostelConfig::default()).unwrap();
        let mut run = |line: &str| match execute(&mut state, parse(line).unwrap()) {
            Outcome::Continue(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        };

        run("login student@hostel.com 1234");
        assert!(run("whoami").contains("XYZ <student@hostel.com> as student, room A-101"));
        assert!(run("mark").starts_with("[error]"));
        run("go /attendance");
        assert!(run("mark").starts_with("[ok] Attendance marked"));
        assert_eq!(run("mark"), "Already marked for today");
        assert!(run("go /attendance").contains("Marked present today"));
    }

    #[test]
    fn test_quit() {
        let mut state = AppState::new(&HostelConfig::default()).unwrap();
        assert_eq!(execute(&mut state, Command::Quit), Outcome::Quit);
    }
}
