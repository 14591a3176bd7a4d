// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{fs::read_to_string, path::{Path, PathBuf}, process::exit};

use anyhow::Context;

use jaolang_interpreter::{
    ErrorPrinter,
    Interpreter,
    Lexer,
    ParseTree,
    Parser,
    SourceCode,
    StdConsole,
};

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The script to run.
    script: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        use clap::Parser;
        Self::parse()
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let (source_code, tree) = parse(&args.script)?;

    let mut interpreter = Interpreter::new(StdConsole);
    if let Err(error) = interpreter.execute_tree(&tree) {
        log::debug!("Run aborted by {}", error.name());

        ErrorPrinter::new(&source_code, error.range(), &error)
            .hint(error.hint())
            .print();
        exit(1);
    }

    Ok(())
}

fn parse(path: &Path) -> anyhow::Result<(SourceCode, ParseTree)> {
    let contents = read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    let source_code = SourceCode::new(path, contents);

    let (tokens, errors) = Lexer::new(&source_code).collect_all();
    for error in &errors {
        ErrorPrinter::new(&source_code, error.location.as_zero_range(), error).print();
    }

    match Parser::new(&tokens).parse_tree() {
        Ok(tree) if errors.is_empty() => Ok((source_code, tree)),

        Ok(..) => exit(1),

        Err(error) => {
            let range = error
                .range()
                .or_else(|| tokens.last().map(|token| token.range()))
                .unwrap_or_default();

            ErrorPrinter::new(&source_code, range, &error).print();
            exit(1);
        }
    }
}
