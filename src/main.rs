use std::{env, io::IsTerminal, process::ExitCode, rc::Rc, time::Instant};

use aster::{errors::errors::Reporter, lexer::lexer::tokenize, load_file, parser::parser::parse};
use log::{debug, log_enabled, Level};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("error: expected exactly one source file");
        return ExitCode::FAILURE;
    }

    let reporter = Reporter::new(std::io::stderr().is_terminal());

    let file = match load_file(&args[1], &reporter) {
        Ok(file) => Rc::new(file),
        Err(_) => return ExitCode::FAILURE,
    };

    let start = Instant::now();
    let tokens = match tokenize(Rc::clone(&file), reporter) {
        Ok(tokens) => tokens,
        Err(_) => return ExitCode::FAILURE,
    };
    debug!("tokenized {} tokens in {:?}", tokens.len(), start.elapsed());
    if log_enabled!(Level::Debug) {
        for token in &tokens {
            token.debug();
        }
    }

    let parse_start = Instant::now();
    let ast = match parse(tokens, Rc::clone(&file), reporter) {
        Ok(ast) => ast,
        Err(_) => return ExitCode::FAILURE,
    };
    debug!("parsed in {:?}", parse_start.elapsed());

    ast.print();
    ExitCode::SUCCESS
}
