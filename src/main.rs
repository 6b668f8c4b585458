// Command line front end for sparsemat
//
// Any of the two input paths or the operation left off the command line is
// asked for on stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Error};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use env_logger::Env;

use sparsemat::{default_output_path, run_files, BoundsPolicy, EngineConfig, Operation};

fn cli() -> Command {
    Command::new("sparsemat")
        .version(sparsemat::VERSION)
        .about("Add, subtract or multiply sparse matrices stored as coordinate text files")
        .arg(
            Arg::new("A")
                .help("First matrix file")
                .index(1)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("B")
                .help("Second matrix file")
                .index(2)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("OPERATION")
                .help("add, subtract or multiply (or 1, 2, 3)")
                .short('p')
                .long("op")
                .value_parser(|s: &str| s.parse::<Operation>()),
        )
        .arg(
            Arg::new("OUTPUT")
                .help("Result file [default: <dir of A>/output/<operation>.txt]")
                .short('o')
                .long("output")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("LENIENT")
                .help("Drop out-of-range entries instead of failing")
                .long("lenient")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("PARALLEL")
                .help("Multiply rows on a thread pool")
                .long("parallel")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("THREADS")
                .help("Threads for --parallel [default: all cores]")
                .short('t')
                .long("threads")
                .default_value("0")
                .value_parser(value_parser!(usize)),
        )
}

fn prompt(stdin: &mut impl BufRead, message: &str) -> Result<String, Error> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    stdin.read_line(&mut line).context("reading stdin")?;
    Ok(line.trim().to_string())
}

fn run(matches: &ArgMatches) -> Result<PathBuf, Error> {
    let mut stdin = io::stdin().lock();

    let a_path = match matches.get_one::<PathBuf>("A") {
        Some(path) => path.clone(),
        None => PathBuf::from(prompt(&mut stdin, "Enter first matrix file path: ")?),
    };
    let b_path = match matches.get_one::<PathBuf>("B") {
        Some(path) => path.clone(),
        None => PathBuf::from(prompt(&mut stdin, "Enter second matrix file path: ")?),
    };
    let op = match matches.get_one::<Operation>("OPERATION") {
        Some(op) => *op,
        None => prompt(
            &mut stdin,
            "Select operation (1=Addition, 2=Subtraction, 3=Multiplication): ",
        )?
        .parse()?,
    };
    let out_path = matches
        .get_one::<PathBuf>("OUTPUT")
        .cloned()
        .unwrap_or_else(|| default_output_path(&a_path, op));

    let mut config = EngineConfig::default();
    if matches.get_flag("LENIENT") {
        config = config.with_bounds_policy(BoundsPolicy::Discard);
    }
    if matches.get_flag("PARALLEL") {
        let threads: usize = *matches.get_one::<usize>("THREADS").unwrap_or(&0);
        config = config.with_parallel_multiply(threads);
    }

    run_files(op, &a_path, &b_path, &out_path, &config)
        .with_context(|| format!("{} of {} and {} failed", op, a_path.display(), b_path.display()))?;
    Ok(out_path)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();
    match run(&matches) {
        Ok(out_path) => {
            println!("Result saved to {}", out_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
