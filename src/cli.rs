use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use visitlog::policy::Violation;
use visitlog::view::humanize;
use visitlog::{Dashboard, TimeFormat, TrackerError, VisitId, VisitTracker};

const HELP: &str = "\
Commands:
  in <name>        - check a user in
  out <id>         - check out by id
  out #<n>         - check out the n-th active user
  search <query>   - filter history by name (case-insensitive)
  search           - clear the filter
  show             - redraw the dashboard
  help             - show commands
  exit             - quit";

/// One parsed line of REPL input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CheckIn(String),
    CheckOut(Target),
    Search(String),
    Show,
    Help,
    Exit,
    Unknown(String),
}

/// Who to check out
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Id(VisitId),
    /// 1-based position in the active list
    Position(usize),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "in" | "checkin" | "check-in" => Command::CheckIn(rest.to_string()),
            "out" | "checkout" | "check-out" => Command::CheckOut(Target::parse(rest)),
            "search" | "find" | "/" => Command::Search(rest.to_string()),
            "show" | "ls" | "" => Command::Show,
            "help" | "?" => Command::Help,
            "exit" | "quit" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

impl Target {
    fn parse(arg: &str) -> Self {
        match arg.strip_prefix('#').map(str::parse::<usize>) {
            Some(Ok(position)) => Target::Position(position),
            _ => Target::Id(VisitId::new(arg)),
        }
    }
}

pub struct Session {
    pub tracker: VisitTracker,
    pub query: String,
    pub format: TimeFormat,
}

/// What the REPL should do after a command
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Print the message (if any) and redraw the dashboard
    Redraw(Option<String>),
    /// Print the message only
    Say(String),
    Quit,
}

impl Session {
    pub fn new(tracker: VisitTracker, format: TimeFormat) -> Self {
        Self {
            tracker,
            query: String::new(),
            format,
        }
    }

    pub fn render(&self) -> String {
        Dashboard::from_tracker(&self.tracker, &self.query, &self.format).to_string()
    }

    pub fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::CheckIn(name) => match self.tracker.try_check_in(&name) {
                Ok(user) => {
                    Outcome::Redraw(Some(format!("Checked in {} [{}]", user.name, user.id)))
                }
                // Blank names are ignored without comment
                Err(TrackerError::Rejected { violations })
                    if violations == [Violation::EmptyName] =>
                {
                    Outcome::Redraw(None)
                }
                Err(e) => Outcome::Say(e.to_string()),
            },
            Command::CheckOut(target) => {
                let Some(id) = self.resolve(&target) else {
                    return Outcome::Redraw(None);
                };
                match self.tracker.check_out(&id) {
                    Some(entry) => Outcome::Redraw(Some(format!(
                        "Checked out {} after {}",
                        entry.user_name,
                        humanize(entry.duration())
                    ))),
                    None => Outcome::Redraw(None),
                }
            }
            Command::Search(query) => {
                self.query = query;
                Outcome::Redraw(None)
            }
            Command::Show => Outcome::Redraw(None),
            Command::Help => Outcome::Say(HELP.to_string()),
            Command::Exit => Outcome::Quit,
            Command::Unknown(word) => Outcome::Say(format!("Unknown command '{word}', try 'help'")),
        }
    }

    fn resolve(&self, target: &Target) -> Option<VisitId> {
        match target {
            Target::Id(id) => Some(id.clone()),
            Target::Position(n) => n
                .checked_sub(1)
                .and_then(|index| self.tracker.active().get(index))
                .map(|user| user.id.clone()),
        }
    }
}

pub fn run_repl(mut session: Session) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("visitlog - type help for commands, exit to quit\n");
    println!("{}", session.render());

    loop {
        match rl.readline("visits> ") {
            Ok(line) => {
                let line = line.trim();
                if !line.is_empty() {
                    rl.add_history_entry(line)?;
                }

                match session.execute(Command::parse(line)) {
                    Outcome::Quit => break,
                    Outcome::Say(message) => println!("{message}"),
                    Outcome::Redraw(message) => {
                        if let Some(message) = message {
                            println!("{message}\n");
                        }
                        println!("{}", session.render());
                    }
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use visitlog::tracker::SequentialIds;
    use visitlog::TrackerBuilder;

    fn session(max_active: Option<usize>) -> Session {
        let mut builder = TrackerBuilder::new().ids(SequentialIds::default());
        if let Some(max) = max_active {
            builder = builder.max_active(max);
        }
        Session::new(builder.build().unwrap(), TimeFormat::default())
    }

    #[test]
    fn parse_recognises_commands() {
        assert_eq!(Command::parse("in  Alice Smith "), Command::CheckIn("Alice Smith".into()));
        assert_eq!(
            Command::parse("out v3"),
            Command::CheckOut(Target::Id(VisitId::new("v3")))
        );
        assert_eq!(Command::parse("OUT #2"), Command::CheckOut(Target::Position(2)));
        assert_eq!(Command::parse("search ali"), Command::Search("ali".into()));
        assert_eq!(Command::parse("search"), Command::Search(String::new()));
        assert_eq!(Command::parse(""), Command::Show);
        assert_eq!(Command::parse("quit"), Command::Exit);
        assert_eq!(Command::parse("dance"), Command::Unknown("dance".into()));
    }

    #[test]
    fn hash_without_number_is_an_id() {
        assert_eq!(
            Command::parse("out #x"),
            Command::CheckOut(Target::Id(VisitId::new("#x")))
        );
    }

    #[test]
    fn check_in_and_out_by_position() {
        let mut s = session(None);

        assert!(matches!(s.execute(Command::parse("in Alice")), Outcome::Redraw(Some(_))));
        assert!(matches!(s.execute(Command::parse("in Bob")), Outcome::Redraw(Some(_))));
        assert_eq!(s.tracker.active_count(), 2);

        s.execute(Command::parse("out #2"));
        assert_eq!(s.tracker.active_count(), 1);
        assert_eq!(s.tracker.history().entries()[0].user_name, "Bob");
    }

    #[test]
    fn blank_check_in_and_bad_position_change_nothing() {
        let mut s = session(None);

        assert_eq!(s.execute(Command::parse("in   ")), Outcome::Redraw(None));
        assert_eq!(s.execute(Command::parse("out #0")), Outcome::Redraw(None));
        assert_eq!(s.execute(Command::parse("out #5")), Outcome::Redraw(None));
        assert_eq!(s.execute(Command::parse("out nope")), Outcome::Redraw(None));
        assert_eq!(s.tracker.active_count(), 0);
        assert!(s.tracker.history().is_empty());
    }

    #[test]
    fn capacity_refusal_is_reported() {
        let mut s = session(Some(1));
        s.execute(Command::parse("in Alice"));

        match s.execute(Command::parse("in Bob")) {
            Outcome::Say(message) => assert!(message.contains("Active user limit (1) reached")),
            other => panic!("Expected refusal, got {other:?}"),
        }
        assert_eq!(s.tracker.active_count(), 1);
    }

    #[test]
    fn search_sets_live_filter() {
        let mut s = session(None);
        for name in ["Alice", "Bob"] {
            s.execute(Command::CheckIn(name.to_string()));
            s.execute(Command::parse("out #1"));
        }

        s.execute(Command::parse("search ALI"));
        assert_eq!(s.query, "ALI");
        let screen = s.render();
        assert!(screen.contains("Alice"));
        assert!(!screen.contains("Bob"));

        s.execute(Command::parse("search"));
        assert!(s.render().contains("Bob"));
    }
}
