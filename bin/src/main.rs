use std::{
    io::{stdin, stdout, BufRead, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;

use evaluator::{run_source, Options};
use parser::{ParserOptions, Precedence, TrailingTokens};
use scanner::{ControlCharacters, ScannerOptions};

/// Evaluates arithmetic expressions with exact rational results.
#[derive(clap::Parser)]
struct Args {
    /// Expression to evaluate. Starts an interactive prompt when omitted.
    expression: Option<String>,

    /// Evaluate every non-empty line of a file.
    #[arg(short, long, conflicts_with = "expression")]
    file: Option<PathBuf>,

    /// Parse the right operand of `+`/`-` as a full `*`/`/` chain.
    #[arg(long)]
    conventional: bool,

    /// Reject tokens left over after the expression.
    #[arg(long)]
    strict: bool,

    /// Maximum nesting of parentheses and unary operators.
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Stop reading an expression at a control character instead of failing.
    #[arg(long)]
    truncate_control: bool,
}

impl Args {
    fn options(&self) -> Options {
        Options {
            scanner: ScannerOptions {
                control_characters: if self.truncate_control {
                    ControlCharacters::Truncate
                } else {
                    ControlCharacters::Reject
                },
            },
            parser: ParserOptions {
                precedence: if self.conventional {
                    Precedence::Conventional
                } else {
                    Precedence::Compatible
                },
                trailing: if self.strict { TrailingTokens::Reject } else { TrailingTokens::Ignore },
                max_depth: self.max_depth,
            },
        }
    }
}

fn run_file(path: &Path, options: &Options) -> anyhow::Result<ExitCode> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;

    let mut exit_code = ExitCode::SUCCESS;
    for (i, line) in source.lines().enumerate().filter(|(_, line)| !line.trim().is_empty()) {
        match run_source(line, options) {
            Ok(value) => println!("{}", value),
            Err(e) => {
                eprintln!("error (l. {}): {}", i + 1, e);
                exit_code = ExitCode::FAILURE;
            }
        }
    }
    Ok(exit_code)
}

fn run_prompt(options: &Options) -> anyhow::Result<()> {
    let mut stdin = stdin().lock();
    loop {
        print!("> ");
        stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            return Ok(());
        }

        match line.trim() {
            "" => continue,
            "exit" | "quit" => return Ok(()),
            _ => (),
        }

        match run_source(&line, options) {
            Ok(value) => println!("{}", value),
            Err(e) => println!("error: {}", e),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let options = args.options();
    log::debug!("{:?}", options);

    match (&args.expression, &args.file) {
        (Some(expression), _) => {
            println!("{}", run_source(expression, &options)?);
            Ok(ExitCode::SUCCESS)
        }
        (None, Some(file)) => run_file(file, &options),
        (None, None) => run_prompt(&options).map(|()| ExitCode::SUCCESS),
    }
}
