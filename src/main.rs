use anyhow::{Context, Result};
use clap::Parser;
use lox::{printer, Diagnostics};
use rustyline::{config::Config, error::ReadlineError, Editor};
use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

/// Exit status for command line usage errors and for scripts that failed to
/// scan or parse.
const EX_USAGE: i32 = 64;

#[derive(Parser)]
#[clap(version = "0.1", about = "Scan and parse Lox expressions")]
struct Opts {
    #[clap(help = "Script to run; starts a prompt when omitted")]
    scripts: Vec<PathBuf>,
    #[clap(short = 'a', long = "ast", help = "Show the parsed AST")]
    ast: bool,
    #[clap(short = 't', long = "tokens", help = "Show the scanned tokens")]
    tokens: bool,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    match opts.scripts.as_slice() {
        [] => run_prompt(&opts),
        [script] => {
            let diagnostics = run_file(script, &opts)?;
            if diagnostics.had_error() {
                process::exit(EX_USAGE);
            }
            Ok(())
        }
        _ => {
            eprintln!("Usage: lox [script]");
            process::exit(EX_USAGE);
        }
    }
}

fn run_file(path: &Path, opts: &Opts) -> Result<Diagnostics> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("could not read script {}", path.display()))?;
    let mut diagnostics = Diagnostics::new();
    run(&source, opts, &mut diagnostics);
    Ok(diagnostics)
}

fn run_prompt(opts: &Opts) -> Result<()> {
    let mut rl = Editor::<()>::with_config(Config::builder().auto_add_history(true).build());
    let mut diagnostics = Diagnostics::new();
    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(e) => return Err(e).context("could not read from prompt"),
        };
        if line.trim() == ".exit" {
            break;
        }
        run(&line, opts, &mut diagnostics);
        diagnostics.clear();
    }
    Ok(())
}

fn run(source: &str, opts: &Opts, diagnostics: &mut Diagnostics) {
    let tokens = lox::scan(source, diagnostics);
    if opts.tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }

    let expression = lox::parse(&tokens, diagnostics);
    for diagnostic in diagnostics.iter() {
        eprintln!("{}", diagnostic);
    }
    if diagnostics.had_error() {
        return;
    }

    if let Some(expression) = expression {
        if opts.ast {
            println!("{:#?}", expression);
        }
        println!("{}", printer::print(&expression));
    }
}
