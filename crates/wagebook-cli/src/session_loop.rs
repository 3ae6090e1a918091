//! Interactive session: a line-driven front end for the session state machine.
//!
//! Each line is one event. It runs to completion before the next line is
//! read. Advice requests run in the background and their outcome is printed
//! before the next prompt.

use std::io::{BufRead, Write};
use std::sync::mpsc;

use anyhow::Result;
use chrono::Datelike;

use wagebook_advice::{AdviceError, AdviceOutcome, AdviceRequest};
use wagebook_core::{Currency, DateKey, KeyValueStore, Ledger, Mode, MonthCursor, Screen};

use crate::advice::Advisor;
use crate::render;

const HELP: &str = "\
commands:
  show                 redraw the current screen
  next | prev          move the calendar one month
  month YYYY-MM        jump to a month
  open DATE|DAY        edit a day (YYYY-MM-DD, or a day number in the shown month)
  rate VALUE           set the hourly rate (editor or quick calculator)
  hours VALUE          set the hours worked (editor or quick calculator)
  save                 store the day being edited
  back                 leave the editor without saving
  log | quick | mode   switch between the calendar and the quick calculator
  currency CODE        TWD, USD, JPY or EUR
  advice               ask for AI advice on the quick calculation
  clear                delete every saved record (asks first)
  help                 this text
  quit                 leave";

pub fn run<S, R, W>(ledger: &mut Ledger<S>, advisor: &Advisor, mut input: R, mut out: W) -> Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    let (done_tx, done_rx) = mpsc::channel::<AdviceOutcome>();
    writeln!(out, "wagebook session. Type `help` for commands.")?;
    write!(out, "{}", screen_text(ledger))?;

    loop {
        while let Ok(outcome) = done_rx.try_recv() {
            writeln!(out, "AI advice:\n{}", outcome.text())?;
        }
        write!(out, "{}> ", prompt_label(ledger.screen()))?;
        out.flush()?;

        let Some(line) = read_line(&mut input)? else {
            break;
        };
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let arg = parts.collect::<Vec<_>>().join(" ");

        match command {
            "quit" | "exit" => break,
            "help" | "?" => writeln!(out, "{HELP}")?,
            "show" => write!(out, "{}", screen_text(ledger))?,
            "next" => {
                ledger.shift_month(1);
                write!(out, "{}", screen_text(ledger))?;
            }
            "prev" => {
                ledger.shift_month(-1);
                write!(out, "{}", screen_text(ledger))?;
            }
            "month" => match arg.parse::<MonthCursor>() {
                Ok(cursor) => {
                    ledger.show_month(cursor);
                    write!(out, "{}", screen_text(ledger))?;
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            "open" => match open_target(ledger, &arg) {
                Some(date) => match ledger.select_date(date) {
                    Ok(()) => write!(out, "{}", screen_text(ledger))?,
                    Err(e) => writeln!(out, "{e}")?,
                },
                None => writeln!(out, "usage: open YYYY-MM-DD | open DAY")?,
            },
            "rate" | "hours" => {
                let result = match (ledger.screen(), command) {
                    (Screen::Editor(_), "rate") => ledger.edit_rate(&arg),
                    (Screen::Editor(_), _) => ledger.edit_hours(&arg),
                    (Screen::QuickCalculator, "rate") => {
                        ledger.set_quick_rate(&arg);
                        Ok(())
                    }
                    (Screen::QuickCalculator, _) => {
                        ledger.set_quick_hours(&arg);
                        Ok(())
                    }
                    (Screen::Calendar, _) => {
                        writeln!(out, "open a day or switch to the quick calculator first")?;
                        continue;
                    }
                };
                match result {
                    Ok(()) => write!(out, "{}", screen_text(ledger))?,
                    Err(e) => writeln!(out, "{e}")?,
                }
            }
            "save" => match ledger.save() {
                Ok((date, record)) => {
                    writeln!(out, "saved {}", render::record_line(&date, &record, ledger.currency()))?;
                    write!(out, "{}", screen_text(ledger))?;
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            "back" => match ledger.back() {
                Ok(()) => write!(out, "{}", screen_text(ledger))?,
                Err(e) => writeln!(out, "{e}")?,
            },
            "log" | "quick" | "mode" => {
                let result = match command {
                    "log" => ledger.set_mode(Mode::Log),
                    "quick" => ledger.set_mode(Mode::Quick),
                    _ => ledger.toggle_mode().map(|_| ()),
                };
                match result {
                    Ok(()) => write!(out, "{}", screen_text(ledger))?,
                    Err(e) => writeln!(out, "{e}")?,
                }
            }
            "currency" => match arg.parse::<Currency>() {
                Ok(currency) => {
                    ledger.set_currency(currency);
                    writeln!(out, "currency set to {currency}")?;
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            "advice" => {
                if ledger.screen() != Screen::QuickCalculator {
                    writeln!(out, "advice is available in the quick calculator")?;
                    continue;
                }
                let request = AdviceRequest::from_inputs(ledger.quick_inputs(), ledger.currency());
                match advisor.spawn(&request, done_tx.clone()) {
                    Ok(()) => writeln!(out, "asking for advice...")?,
                    Err(AdviceError::Busy) => writeln!(out, "still waiting for the previous answer")?,
                    Err(e) => writeln!(out, "{e}")?,
                }
            }
            "clear" => {
                write!(out, "Delete all saved records? This cannot be undone. [y/N] ")?;
                out.flush()?;
                let answer = read_line(&mut input)?.unwrap_or_default();
                if ledger.clear_all(is_yes(&answer)) {
                    writeln!(out, "All saved records cleared.")?;
                } else {
                    writeln!(out, "Nothing was deleted.")?;
                }
            }
            other => writeln!(out, "unknown command `{other}`; type `help`")?,
        }
    }

    if advisor.is_busy() {
        writeln!(out, "leaving with an advice request still pending")?;
    }
    Ok(())
}

/// Accepts `y` / `yes`, case-insensitively.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn open_target<S: KeyValueStore>(ledger: &Ledger<S>, arg: &str) -> Option<DateKey> {
    if let Ok(date) = arg.parse::<DateKey>() {
        return Some(date);
    }
    let day: u32 = arg.parse().ok()?;
    let cursor = ledger.cursor();
    DateKey::from_ymd(cursor.year(), cursor.month(), day).ok()
}

fn prompt_label(screen: Screen) -> String {
    match screen {
        Screen::Calendar => "log".to_string(),
        Screen::QuickCalculator => "quick".to_string(),
        Screen::Editor(date) => format!("{}/{:02}", date.month(), date.date().day()),
    }
}

fn screen_text<S: KeyValueStore>(ledger: &Ledger<S>) -> String {
    let currency = ledger.currency();
    match (ledger.screen(), ledger.session().editor()) {
        (Screen::Editor(_), Some(editor)) => render::editor_block(editor, currency),
        (Screen::QuickCalculator, _) => render::quick_block(&ledger.quick_inputs(), currency),
        _ => render::month_table(&ledger.month_view(), currency),
    }
}
