//! Line-oriented console front-end
//!
//! Prompts for an operand, an operator and a second operand, feeds them
//! through the shared input state machine, and prints the recorded
//! history on the way out. Invalid input re-prompts immediately;
//! evaluation failures are journaled and the loop carries on.

use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tally_engine::Operator;
use tally_session::{CalcSession, Display, InputEvent};
use tally_store::{CalculationStore, FailureJournal};

pub async fn run<S>(store: Arc<S>, journal: FailureJournal) -> Result<()>
where
    S: CalculationStore + 'static,
{
    let mut editor = DefaultEditor::new().context("Failed to initialize readline")?;
    let mut session = CalcSession::new(Arc::clone(&store), journal.clone());

    println!("{}", "*** Tally ***".bright_cyan().bold());

    let mut keep_going = ask_continue(&mut editor, "Run a calculation? y/n > ")?;
    while keep_going {
        let outcome = run_one(&mut editor, &mut session).await?;
        if !outcome {
            break;
        }
        keep_going = ask_continue(&mut editor, "Keep calculating? y/n > ")?;
    }

    // Dump the stored history on the way out
    match store.list_all().await {
        Ok(lines) if !lines.is_empty() => {
            println!("{}", "Recorded calculations:".bright_cyan());
            for line in lines {
                println!("{line}");
            }
        },
        Ok(_) => println!("Leaving tally..."),
        Err(err) => {
            journal.append(&err.to_string());
            eprintln!("{} could not read history: {}", "*ERROR*".red(), err);
        },
    }

    Ok(())
}

/// One prompt-evaluate-print round. Returns `false` when the user bailed
/// out mid-entry (Ctrl-C / Ctrl-D).
async fn run_one<S>(editor: &mut DefaultEditor, session: &mut CalcSession<S>) -> Result<bool>
where
    S: CalculationStore + 'static,
{
    let Some(first) = prompt_number(editor)? else {
        return Ok(false);
    };
    let Some(operator) = prompt_operator(editor)? else {
        return Ok(false);
    };
    let Some(second) = prompt_number(editor)? else {
        return Ok(false);
    };

    // The console is just another event source for the state machine
    for ch in first.chars() {
        session.step(InputEvent::Digit(ch)).await;
    }
    session.step(InputEvent::Operator(operator)).await;
    for ch in second.chars() {
        session.step(InputEvent::Digit(ch)).await;
    }
    session.step(InputEvent::Evaluate).await;

    match session.display() {
        Display::Result(evaluated) => {
            println!(
                "{} {} ({:.2})",
                "=".bright_green().bold(),
                evaluated.rendered,
                evaluated.value
            );
        },
        Display::Error => {
            println!("{} calculation failed (see the failure journal)", "*ERROR*".red());
        },
        Display::Idle => {},
    }

    Ok(true)
}

fn ask_continue(editor: &mut DefaultEditor, prompt: &str) -> Result<bool> {
    match editor.readline(prompt) {
        // Anything but an explicit yes means no
        Ok(line) => Ok(line.trim().eq_ignore_ascii_case("y")),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Prompt until the input parses as a number. `None` means the user
/// bailed out.
fn prompt_number(editor: &mut DefaultEditor) -> Result<Option<String>> {
    loop {
        match editor.readline("Enter a number > ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.parse::<f64>().is_ok() {
                    return Ok(Some(line));
                }
                println!("{} enter a valid number", "*ERROR*".red());
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(err.into()),
        }
    }
}

/// Prompt until the input is one of `+ - * /`. `None` means the user
/// bailed out.
fn prompt_operator(editor: &mut DefaultEditor) -> Result<Option<Operator>> {
    loop {
        match editor.readline("Enter an operator (+ - * /) > ") {
            Ok(line) => {
                if let Some(op) = Operator::parse(&line) {
                    return Ok(Some(op));
                }
                println!("{} enter a valid operator", "*ERROR*".red());
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(err.into()),
        }
    }
}
