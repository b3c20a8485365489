//! `trs` command-line front end: read a file or an inline expression,
//! evaluate it, print the canonical result. A thin wrapper over `trsc`'s
//! façade — this is not where the workspace's engineering investment
//! lives (spec.md §6 ADDED).

use std::path::Path;

fn main() {
    trsc::init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: trs eval <expression>");
                std::process::exit(1);
            }
            run_source(&args[2]);
        }
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: trs run <file>");
                std::process::exit(1);
            }
            run_file(&args[2]);
        }
        "help" | "--help" | "-h" => print_usage(),
        other if Path::new(other).exists() => run_file(other),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            std::process::exit(1);
        }
    }
}

fn run_source(source: &str) {
    let evaluator = trsc::Evaluator::new();
    match evaluator.eval_str(source) {
        Ok(result) => println!("{}", result.display(evaluator.context().interner())),
        Err(e) => {
            eprintln!("parse error: {e}");
            std::process::exit(1);
        }
    }
}

fn run_file(path: &str) {
    match std::fs::read_to_string(path) {
        Ok(source) => run_source(&source),
        Err(e) => {
            eprintln!("could not read {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("trs — a symbolic term-rewriting evaluator");
    println!();
    println!("Usage: trs <command> [args]");
    println!();
    println!("Commands:");
    println!("  eval <expr>   Evaluate an inline expression and print the result");
    println!("  run <file>    Evaluate the expression in <file>");
    println!("  help          Show this help message");
}
