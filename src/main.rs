use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

use clap::Parser;
use lazycalc::{
    error::SessionError,
    interpreter::session::{Command, Session},
};

/// lazycalc evaluates assignment statements lazily: a statement waits in a
/// queue until the variables it uses are defined.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The command script: `R` reads one statement, `C` runs one evaluation
    /// pass. Not needed with `--settle`.
    #[arg(required_unless_present = "settle")]
    commands: Option<String>,

    /// Reads statements from this file instead of standard input.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Prints a prompt before each statement is read.
    #[arg(short, long)]
    prompt: bool,

    /// Reads every statement, then runs passes until the queue is empty or
    /// no further progress is possible.
    #[arg(short, long)]
    settle: bool,
}

fn run(args: Args) -> Result<(), SessionError> {
    let input: Box<dyn BufRead> = match &args.file {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let output = io::stdout().lock();
    let mut session = Session::new(args.prompt);

    if args.settle {
        session.settle(input, output)
    } else {
        let commands = Command::parse_script(args.commands.as_deref().unwrap_or_default())?;
        session.run(&commands, input, output)
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
