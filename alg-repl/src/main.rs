use alg_compute::{parse, Expr};
use alg_error::Error;
use ariadne::Source;
use log::{debug, LevelFilter};
use rustyline::{error::ReadlineError, DefaultEditor};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::{
    env,
    fs,
    io::{self, IsTerminal, Read},
    str::FromStr,
};

/// The environment variable holding the log level.
const LOG_ENV: &str = "ALG_LOG";

/// A line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command<'a> {
    /// `expr`: print the simplified expression.
    Simplify(&'a str),

    /// `d/dx expr`: print the simplified derivative of the expression with respect to `x`.
    Derivative { var: &'a str, expr: &'a str },
}

impl<'a> Command<'a> {
    /// Splits a `d/d<var>` prefix off the line, if there is one.
    fn derivative(line: &'a str) -> Option<Self> {
        let rest = line.strip_prefix("d/d")?;
        let var = rest.chars().next()?;
        let (var, expr) = rest.split_at(var.len_utf8());
        if !expr.starts_with(char::is_whitespace) {
            return None;
        }
        Some(Command::Derivative { var, expr: expr.trim_start() })
    }

    fn from_line(line: &'a str) -> Self {
        let line = line.trim();
        Self::derivative(line).unwrap_or(Command::Simplify(line))
    }

    /// Runs the command.
    fn run(self) -> Result<Expr, Error> {
        match self {
            Command::Simplify(expr) => Ok(parse(expr)?.simplify()),
            Command::Derivative { var, expr } => parse(expr)?.simplified_derivative(var),
        }
    }
}

/// Prints the error to stderr, as a report against the input it came from when it points into it.
fn report(err: &Error) {
    let Some(input) = err.input().filter(|_| !err.spans.is_empty()) else {
        eprintln!("{}", err);
        return;
    };

    // `ariadne` reports can only be written out, not displayed
    if let Err(io_err) = err.build_report("input").eprint(("input", Source::from(input))) {
        eprintln!("{}", io_err);
    }
}

/// Runs a single line, printing the result or the error.
fn execute(line: &str) {
    if line.trim().is_empty() {
        return;
    }

    let command = Command::from_line(line);
    debug!("running {:?}", command);
    match command.run() {
        Ok(result) => println!("{}", result),
        Err(err) => report(&err),
    }
}

/// Installs the terminal logger, at the level given by [`LOG_ENV`] (`warn` by default).
fn init_logger() {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|level| LevelFilter::from_str(&level).ok())
        .unwrap_or(LevelFilter::Warn);
    if let Err(err) = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("could not install logger: {}", err);
    }
}

fn main() {
    init_logger();

    let mut args = env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run every line of the file
        match fs::read_to_string(&filename) {
            Ok(input) => input.lines().for_each(execute),
            Err(err) => eprintln!("could not read `{}`: {}", filename, err),
        }
    } else if !io::stdin().is_terminal() {
        // run every line of stdin
        let mut input = String::new();
        match io::stdin().read_to_string(&mut input) {
            Ok(_) => input.lines().for_each(execute),
            Err(err) => eprintln!("could not read stdin: {}", err),
        }
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return;
            },
        };

        fn process_line(rl: &mut DefaultEditor) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            execute(&input);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
