//! Line-oriented host for a [`SurveyForm`].
//!
//! Each input line is one discrete UI event (pick a value, release a slider,
//! click remove, click submit). Events are handled one at a time on the
//! caller's task, so every transition completes before the next line is read.

use crate::core::form::{FormList, SurveyForm};
use crate::domain::catalog::{Catalog, Framework, Language};
use crate::domain::model::UNRATED;
use crate::domain::ports::SubmissionSink;
use crate::domain::rated_list::ScoreField;
use crate::utils::error::{FormError, Result};
use std::fmt::Write as _;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const HELP: &str = "\
Commands:
  email [address]                 set (or clear) the email
  age <years>                     set the age
  sex [text]                      set (or clear) sex/gender
  add <list> <code>               add a row, e.g. `add lang py`
  rename <list> <row> <code>      change the value of a row
  exp <list> <row> <0-100>        rate your experience
  rec <list> <row> <0-100>        rate how likely you are to recommend it
  remove <list> <code>            remove a row
  choices <list> [row]            values that can still be picked
  show                            print the current answers
  errors                          print validation errors
  submit                          validate and submit
  help | quit
<list> is `lang` or `fw`.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Languages,
    Frameworks,
}

impl FromStr for ListKind {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lang" | "language" | "languages" => Ok(ListKind::Languages),
            "fw" | "framework" | "frameworks" => Ok(ListKind::Frameworks),
            other => Err(FormError::CommandError {
                message: format!("unknown list '{}', expected `lang` or `fw`", other),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Email(Option<String>),
    Age(String),
    Sex(Option<String>),
    Add(ListKind, String),
    Rename(ListKind, usize, String),
    Score(ListKind, usize, ScoreField, i32),
    Remove(ListKind, String),
    Choices(ListKind, Option<usize>),
    Show,
    Errors,
    Submit,
    Help,
    Quit,
}

fn command_error(message: impl Into<String>) -> FormError {
    FormError::CommandError {
        message: message.into(),
    }
}

fn parse_number<T: FromStr>(what: &str, raw: Option<&str>) -> Result<T> {
    let raw = raw.ok_or_else(|| command_error(format!("missing {}", what)))?;
    raw.parse()
        .map_err(|_| command_error(format!("{} must be a whole number, got '{}'", what, raw)))
}

fn required<'a>(what: &str, raw: Option<&'a str>) -> Result<&'a str> {
    raw.ok_or_else(|| command_error(format!("missing {}", what)))
}

impl FromStr for Command {
    type Err = FormError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let rest_opt = (!rest.is_empty()).then(|| rest.to_string());
        let mut args = rest.split_whitespace();

        let command = match verb.to_ascii_lowercase().as_str() {
            "email" => Command::Email(rest_opt),
            "age" => Command::Age(rest.to_string()),
            "sex" => Command::Sex(rest_opt),
            "add" => Command::Add(
                required("list", args.next())?.parse()?,
                required("value", args.next())?.to_string(),
            ),
            "rename" => Command::Rename(
                required("list", args.next())?.parse()?,
                parse_number("row", args.next())?,
                required("value", args.next())?.to_string(),
            ),
            "exp" | "rec" => {
                let field = if verb.eq_ignore_ascii_case("exp") {
                    ScoreField::Experience
                } else {
                    ScoreField::Recommendation
                };
                Command::Score(
                    required("list", args.next())?.parse()?,
                    parse_number("row", args.next())?,
                    field,
                    parse_number("score", args.next())?,
                )
            }
            "remove" | "rm" => Command::Remove(
                required("list", args.next())?.parse()?,
                required("value", args.next())?.to_string(),
            ),
            "choices" => Command::Choices(
                required("list", args.next())?.parse()?,
                match args.next() {
                    Some(raw) => Some(parse_number("row", Some(raw))?),
                    None => None,
                },
            ),
            "show" => Command::Show,
            "errors" => Command::Errors,
            "submit" => Command::Submit,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(command_error(format!("'{}'", other))),
        };

        Ok(command)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub commands: usize,
    pub rejected: usize,
    pub submissions: usize,
}

fn resolve<V: Catalog>(raw: &str) -> Result<V> {
    V::parse(raw).ok_or_else(|| {
        let codes: Vec<&str> = V::ALL.iter().map(|v| v.code()).collect();
        command_error(format!(
            "unknown {} '{}', expected one of: {}",
            V::NOUN,
            raw,
            codes.join(", ")
        ))
    })
}

fn score_text(score: i32) -> String {
    if score == UNRATED {
        "-".to_string()
    } else {
        score.to_string()
    }
}

fn render_list<V: FormList, S: SubmissionSink>(form: &SurveyForm<S>, out: &mut String) {
    let list = form.list::<V>();
    if list.is_empty() {
        let _ = writeln!(out, "{}: (none)", V::FIELD);
        return;
    }
    let _ = writeln!(out, "{}:", V::FIELD);
    for (index, entry) in list.entries().iter().enumerate() {
        let _ = write!(
            out,
            "  [{}] {:<12} experience={:<4} recommendation={}",
            index,
            entry.value.label(),
            score_text(entry.experience),
            score_text(entry.recommendation)
        );
        if let Some(message) = form.row_error::<V>(index) {
            let _ = write!(out, "  ! {}", message);
        }
        out.push('\n');
    }
}

pub fn render_record<S: SubmissionSink>(form: &SurveyForm<S>) -> String {
    let record = form.record();
    let questions = form.schema().questions();
    let errors = form.errors();
    let mut out = String::new();

    let field_error = |name: &str| {
        errors
            .and_then(|r| r.field(name))
            .map(|m| format!("  ! {}", m))
            .unwrap_or_default()
    };

    let email = if record.email.is_empty() {
        "(blank)"
    } else {
        record.email.as_str()
    };
    let _ = writeln!(out, "email: {}{}", email, field_error("email"));
    let _ = writeln!(out, "age: {}{}", record.age, field_error("age"));
    if questions.sex {
        let _ = writeln!(out, "sex: {}", record.sex.as_deref().unwrap_or("-"));
    }
    if questions.languages {
        render_list::<Language, S>(form, &mut out);
    }
    if questions.frameworks {
        render_list::<Framework, S>(form, &mut out);
    }
    out
}

fn render_choices<V: FormList, S: SubmissionSink>(
    form: &SurveyForm<S>,
    row: Option<usize>,
) -> Result<String> {
    let list = form.list::<V>();
    let items: Vec<String> = match row {
        None => list
            .available_for_add()
            .into_iter()
            .map(|v| format!("{} ({})", v.label(), v.code()))
            .collect(),
        Some(index) => list
            .available_for_rename(index)?
            .into_iter()
            .map(|c| {
                let mark = if c.selected { "*" } else { " " };
                format!("{}{} ({})", mark, c.label(), c.value.code())
            })
            .collect(),
    };

    if items.is_empty() {
        Ok(format!("No {} left to select.", V::NOUN))
    } else {
        Ok(items.join("\n"))
    }
}

fn apply_list_command<V: FormList, S: SubmissionSink>(
    form: &mut SurveyForm<S>,
    command: Command,
) -> Result<String> {
    match command {
        Command::Add(_, raw) => {
            let value = resolve::<V>(&raw)?;
            form.edit_list::<V, _>(|list| list.add_entry(value))?;
            Ok(format!("Added {}.", value.label()))
        }
        Command::Rename(_, index, raw) => {
            let value = resolve::<V>(&raw)?;
            form.edit_list::<V, _>(|list| list.change_entry_value(index, value))?;
            Ok(format!("Row {} is now {}.", index, value.label()))
        }
        Command::Score(_, index, field, score) => {
            form.edit_list::<V, _>(|list| list.set_score(index, field, score))?;
            Ok(format!("Row {} {} set to {}.", index, field.name(), score))
        }
        Command::Remove(_, raw) => {
            let value = resolve::<V>(&raw)?;
            if form.edit_list::<V, _>(|list| Ok(list.remove_entry(value)))? {
                Ok(format!("Removed {}.", value.label()))
            } else {
                Ok(format!("{} was not selected.", value.label()))
            }
        }
        Command::Choices(_, row) => render_choices::<V, S>(form, row),
        other => Err(command_error(format!("{:?} is not a list command", other))),
    }
}

fn list_kind(command: &Command) -> Option<ListKind> {
    match command {
        Command::Add(kind, _)
        | Command::Rename(kind, _, _)
        | Command::Score(kind, _, _, _)
        | Command::Remove(kind, _)
        | Command::Choices(kind, _) => Some(*kind),
        _ => None,
    }
}

/// Applies one command and returns the text to show the user.
pub fn apply_command<S: SubmissionSink>(
    form: &mut SurveyForm<S>,
    command: Command,
) -> Result<String> {
    let questions = form.schema().questions();

    if let Some(kind) = list_kind(&command) {
        return match kind {
            ListKind::Languages if questions.languages => {
                apply_list_command::<Language, S>(form, command)
            }
            ListKind::Frameworks if questions.frameworks => {
                apply_list_command::<Framework, S>(form, command)
            }
            _ => Err(command_error(format!("{:?} are not part of this survey", kind))),
        };
    }

    match command {
        Command::Email(email) => {
            form.set_email(email.unwrap_or_default());
            Ok("Email updated.".to_string())
        }
        Command::Age(age) => {
            form.set_age(age);
            Ok("Age updated.".to_string())
        }
        Command::Sex(_) if !questions.sex => Err(command_error("sex is not part of this survey")),
        Command::Sex(sex) => {
            form.set_sex(sex);
            Ok("Sex updated.".to_string())
        }
        Command::Show => Ok(render_record(form)),
        Command::Errors => Ok(match form.errors() {
            Some(report) => report.to_string(),
            None if form.is_submitted() => "No errors.".to_string(),
            None => "Errors are shown after the first submit.".to_string(),
        }),
        Command::Submit => {
            form.submit()?;
            Ok("Submitted.".to_string())
        }
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => Ok(String::new()),
        other => Err(command_error(format!("{:?}", other))),
    }
}

/// Reads commands line by line until `quit` or end of input.
pub async fn run_session<S, R, W>(
    form: &mut SurveyForm<S>,
    input: R,
    output: &mut W,
) -> Result<SessionSummary>
where
    S: SubmissionSink,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = SessionSummary::default();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        summary.commands += 1;

        let reply = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Submit) => {
                // sink 可能直接寫 stdout，先把前面的回覆送出去
                output.flush().await?;
                match apply_command(form, Command::Submit) {
                    Ok(reply) => {
                        summary.submissions += 1;
                        Ok(reply)
                    }
                    Err(e) => Err(e),
                }
            }
            Ok(command) => apply_command(form, command),
            Err(e) => Err(e),
        };

        let text = match reply {
            Ok(text) => text,
            Err(e) => {
                summary.rejected += 1;
                tracing::debug!("Command '{}' rejected: {}", line, e);
                format!("❌ {}\n💡 {}", e.user_friendly_message(), e.recovery_suggestion())
            }
        };

        if !text.is_empty() {
            output.write_all(text.as_bytes()).await?;
            if !text.ends_with('\n') {
                output.write_all(b"\n").await?;
            }
        }
    }

    output.flush().await?;
    tracing::info!(
        "Session finished: {} command(s), {} rejected, {} submission(s)",
        summary.commands,
        summary.rejected,
        summary.submissions
    );
    Ok(summary)
}
