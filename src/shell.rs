use std::{collections::VecDeque, path::PathBuf, str::FromStr};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::{debug, warn};

use crate::{
    error::Error,
    model::*,
    operation::Operation,
    print,
    session::{Action, Outcome, Session},
    shares::percentages_to_shares,
};

#[derive(Debug, Parser)]
#[command(multicall = true)]
struct Line {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Subcommand)]
enum ShellCommand {
    /// Write the ledger, to PATH or the file it came from
    Save { path: Option<PathBuf> },
    /// Replace the ledger with one read from PATH
    Load { path: PathBuf },
    /// List category ids and percentages
    List,
    /// Leave the shell
    Exit {
        #[arg(short, long)]
        force: bool,
    },
    #[command(flatten)]
    Operation(Operation),
}

/// Where the shell gets its input. `None` means the input is exhausted or
/// the user interrupted.
pub trait Prompt {
    fn ask(&mut self, question: &str) -> Result<Option<String>>;
}

impl Prompt for DefaultEditor {
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        match self.readline(question) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Canned answers, one per question.
#[derive(Debug, Default)]
pub struct Scripted {
    answers: VecDeque<String>,
}

impl Scripted {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Prompt for Scripted {
    fn ask(&mut self, _question: &str) -> Result<Option<String>> {
        Ok(self.answers.pop_front())
    }
}

#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Exit,
}

pub fn run(session: Session) -> Result<Session> {
    let mut editor = DefaultEditor::new()?;
    run_with(&mut editor, session)
}

/// Reads and executes lines until `exit` or the end of input.
pub fn run_with(prompt: &mut impl Prompt, mut session: Session) -> Result<Session> {
    println!("{}", print::table(session.ledger()));

    while let Some(line) = prompt.ask("budget> ")? {
        match execute_line(prompt, &mut session, &line) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(session),
            Err(e) => println!("{} {}", "error:".red(), e),
        }
    }

    if session.is_dirty() {
        warn!("input ended with unsaved changes");
        println!("{}", "Unsaved changes were discarded.".yellow());
    }

    Ok(session)
}

fn execute_line(prompt: &mut impl Prompt, session: &mut Session, line: &str) -> Result<Flow> {
    let words = shell_words::split(line)?;
    if words.is_empty() {
        return Ok(Flow::Continue);
    }

    let command = match Line::try_parse_from(words) {
        Ok(parsed) => parsed.command,
        Err(e) => {
            println!("{}", e);
            return Ok(Flow::Continue);
        }
    };

    debug!(?command, "shell");

    let action = match command {
        ShellCommand::Save { path } => Action::Save(path),
        ShellCommand::Load { path } => Action::Load(path),
        ShellCommand::List => {
            println!("{}", print::ids_and_names(session.ledger()));
            println!();
            println!("{}", print::names_and_percentages(session.ledger()));
            return Ok(Flow::Continue);
        }
        ShellCommand::Exit { force } => {
            return match session.execute(Action::Exit)? {
                Outcome::Exit { unsaved: true } if !force => confirm_exit(prompt),
                _ => Ok(Flow::Exit),
            };
        }
        ShellCommand::Operation(Operation::Shares { percentages }) if percentages.is_empty() => {
            prompt_for_shares(prompt, session)?;
            return Ok(Flow::Continue);
        }
        ShellCommand::Operation(operation) => operation.into_action(),
    };

    if let Some(text) = print::render(&session.execute(action)?) {
        println!("{}", text);
    }

    Ok(Flow::Continue)
}

fn confirm_exit(prompt: &mut impl Prompt) -> Result<Flow> {
    let answer = prompt.ask("You have unsaved changes, exit anyway? (y/n): ")?;
    match answer.as_deref().map(str::trim) {
        Some("y") | Some("Y") | None => Ok(Flow::Exit),
        _ => Ok(Flow::Continue),
    }
}

/// Asks for every category's percentage and starts over from the first one
/// until they add up to 100.
fn prompt_for_shares(prompt: &mut impl Prompt, session: &mut Session) -> Result<()> {
    if session.ledger().count() == 0 {
        println!("No categories except Total exist, cannot set percentages.");
        return Ok(());
    }

    let names = session
        .ledger()
        .categories()
        .iter()
        .map(|c| c.name().to_owned())
        .collect::<Vec<_>>();

    println!("{}", print::names_and_percentages(session.ledger()));

    loop {
        let mut percentages = Vec::with_capacity(names.len());
        for name in names.iter() {
            match ask_percentage(prompt, name)? {
                Some(percentage) => percentages.push(percentage),
                None => return Ok(()),
            }
        }

        match session.execute(Action::SetShares(percentages_to_shares(&percentages))) {
            Ok(_) => {
                println!("{}", print::names_and_percentages(session.ledger()));
                return Ok(());
            }
            Err(e @ Error::SharesDoNotSumToOne { .. }) => {
                println!("{} {}, please re-enter the values.", "error:".red(), e);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn ask_percentage(prompt: &mut impl Prompt, name: &str) -> Result<Option<BigDecimal>> {
    let question = format!("Percentage for {} (ex: 45.2): ", name);
    loop {
        let Some(answer) = prompt.ask(&question)? else {
            return Ok(None);
        };
        match BigDecimal::from_str(answer.trim()) {
            Ok(value) => return Ok(Some(value)),
            Err(_) => println!("{:?} is not a number.", answer.trim()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::ledger::DEFAULT_CAPACITY;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn shares(session: &Session) -> Vec<BigDecimal> {
        session
            .ledger()
            .categories()
            .iter()
            .map(|c| c.share().clone())
            .collect()
    }

    #[test]
    fn test_script_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("budget.txt");

        let mut prompt = Scripted::new([
            "add rent 500".to_owned(),
            "add fun".to_owned(),
            "shares 75 25".to_owned(),
            "income 100".to_owned(),
            "adjust 3 -5".to_owned(),
            format!("save {}", path.display()),
            "exit".to_owned(),
        ]);
        let session = run_with(&mut prompt, Session::new(DEFAULT_CAPACITY, None))?;

        assert!(!session.is_dirty());
        let saved = Session::open(&path, DEFAULT_CAPACITY)?;
        assert_eq!(saved.ledger().get(2).unwrap().balance(), &dec("575"));
        assert_eq!(saved.ledger().get(3).unwrap().balance(), &dec("20"));
        assert_eq!(saved.ledger().total().balance(), &dec("595"));

        Ok(())
    }

    #[test]
    fn test_errors_do_not_stop_the_shell() -> Result<()> {
        let mut prompt = Scripted::new([
            "remove 1",
            "remove 42",
            "adjust 9 10",
            "bogus",
            "add \"eating out\" 5",
            "add rent 5",
            "exit --force",
        ]);
        let session = run_with(&mut prompt, Session::new(DEFAULT_CAPACITY, None))?;

        assert_eq!(session.ledger().count(), 1);
        assert!(session.is_dirty());

        Ok(())
    }

    #[test]
    fn test_interactive_shares_retry_all_entries() -> Result<()> {
        let mut prompt = Scripted::new([
            "add needs",
            "add wants",
            "add savings",
            "shares",
            "50",
            "30",
            "30",
            "fifty",
            "50",
            "30",
            "20",
            "exit --force",
        ]);
        let session = run_with(&mut prompt, Session::new(DEFAULT_CAPACITY, None))?;

        assert_eq!(shares(&session), vec![dec("0.5"), dec("0.3"), dec("0.2")]);
        assert!(session.ledger().total().share().is_one());

        Ok(())
    }

    #[test]
    fn test_interactive_shares_without_categories() -> Result<()> {
        let mut prompt = Scripted::new(["shares", "exit"]);
        let session = run_with(&mut prompt, Session::new(DEFAULT_CAPACITY, None))?;

        assert!(!session.is_dirty());

        Ok(())
    }

    #[test]
    fn test_exit_asks_when_unsaved() -> Result<()> {
        let mut prompt = Scripted::new(["add rent", "exit", "n", "add fun", "exit", "y", "add never"]);
        let session = run_with(&mut prompt, Session::new(DEFAULT_CAPACITY, None))?;

        assert_eq!(session.ledger().count(), 2);

        Ok(())
    }

    #[test]
    fn test_end_of_input_exits() -> Result<()> {
        let mut prompt = Scripted::new(["add rent 1"]);
        let session = run_with(&mut prompt, Session::new(DEFAULT_CAPACITY, None))?;

        assert_eq!(session.ledger().count(), 1);
        assert!(session.is_dirty());

        Ok(())
    }

    #[test]
    fn test_load_replaces_ledger() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("budget.txt");
        let mut prompt = Scripted::new([
            "add rent 10".to_owned(),
            format!("save '{}'", path.display()),
            "remove 2".to_owned(),
            format!("load '{}'", path.display()),
            "exit".to_owned(),
        ]);
        let session = run_with(&mut prompt, Session::new(DEFAULT_CAPACITY, None))?;

        assert_eq!(session.ledger().count(), 1);
        assert_eq!(session.path(), Some(path.as_path()));

        Ok(())
    }
}
