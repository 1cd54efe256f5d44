use std::{
    env, fs,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use crossterm::{style::Stylize, tty::IsTty};
use lox::{Lox, Outcome};

// sysexits.h
const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_NOINPUT: u8 = 66;
const EX_SOFTWARE: u8 = 70;

fn main() -> ExitCode {
    lox::init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.as_slice() {
        [] => run_prompt(),
        [path] => return run_file(path),
        _ => {
            eprintln!("Usage: lox [script]");
            return ExitCode::from(EX_USAGE);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_file(path: &str) -> ExitCode {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(EX_NOINPUT);
        }
    };

    match Lox::new().run(&source) {
        Outcome::Completed => ExitCode::SUCCESS,
        Outcome::SyntaxErrors(errors) => {
            for error in errors {
                eprintln!("{error}");
            }
            ExitCode::from(EX_DATAERR)
        }
        Outcome::RuntimeError(error) => {
            eprintln!("{error}");
            ExitCode::from(EX_SOFTWARE)
        }
    }
}

fn read_source(path: &str) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read script '{path}'"))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// One scan-parse-evaluate cycle per line. Errors are reported and the session
// carries on with its variables intact.
fn run_prompt() -> Result<()> {
    let styled = io::stdout().is_tty();
    let mut lox = Lox::new();
    let mut stdin = io::stdin().lock();
    let mut line = String::new();

    loop {
        if styled {
            print!("{}", "> ".dark_grey());
        } else {
            print!("> ");
        }
        io::stdout().flush().context("Failed to flush prompt")?;

        line.clear();
        if stdin.read_line(&mut line).context("Failed to read input")? == 0 {
            // EOF
            println!();
            return Ok(());
        }

        // A bare expression echoes its value.
        if let Some(result) = lox.evaluate(&line) {
            match result {
                Ok(value) => println!("{value}"),
                Err(error) => report(&error.to_string()),
            }
            continue;
        }

        match lox.run(&line) {
            Outcome::Completed => {}
            Outcome::SyntaxErrors(errors) => {
                for error in errors {
                    report(&error.to_string());
                }
            }
            Outcome::RuntimeError(error) => report(&error.to_string()),
        }
    }
}

fn report(message: &str) {
    if io::stderr().is_tty() {
        eprintln!("{}", message.red());
    } else {
        eprintln!("{message}");
    }
}
