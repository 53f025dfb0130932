use clap::{App, Arg};
use dpllsat::formula::Formula;
use dpllsat::report::{write_dimacs, write_report};
use dpllsat::*;
use log::info;
use std::io::{self, IsTerminal, Write};

fn main() {
    env_logger::init();

    let matches = App::new("dpllsat")
        .about("Decides satisfiability of CNF formulas with the DPLL procedure")
        .arg(
            Arg::with_name("INPUT")
                .help("input file; clauses are read from stdin when omitted")
                .index(1),
        )
        .arg(
            Arg::with_name("dimacs")
                .long("dimacs")
                .help("read DIMACS CNF and print the result in SAT competition format"),
        )
        .arg(
            Arg::with_name("branching")
                .long("branching")
                .takes_value(true)
                .possible_values(&["first", "most"])
                .default_value("first")
                .help("branch on the first open variable, or the one with most open occurrences"),
        )
        .arg(
            Arg::with_name("complete")
                .long("complete")
                .help("assign false to variables the formula does not depend on"),
        )
        .get_matches();

    let format = if matches.is_present("dimacs") {
        InputFormat::Dimacs
    } else {
        InputFormat::Text
    };

    let f = if let Some(path) = matches.value_of("INPUT") {
        parse_file(path, format)
    } else {
        if format == InputFormat::Text && io::stdin().is_terminal() {
            print_usage();
        }
        parse(io::stdin(), format)
    };

    let f = match f {
        Ok(f) => f,
        Err(e) => {
            eprintln!("parse error: {}", e);
            std::process::exit(-1);
        }
    };

    let config = SolverConfig {
        branching: match matches.value_of("branching") {
            Some("most") => Branching::MostOccurrences,
            _ => Branching::FirstOccurrence,
        },
    };
    info!(
        "solving {} clauses over {} variables with {:?}",
        f.num_clauses(),
        f.variables().len(),
        config.branching
    );

    let mut solver = Solver::with_config(&f, config);
    let mut result = solver.solve();
    if matches.is_present("complete") {
        if let SatResult::Satisfiable(model) = &result {
            result = SatResult::Satisfiable(model.completed(&f));
        }
    }

    if let Err(e) = print_result(&f, &result, format) {
        eprintln!("error writing result: {}", e);
        std::process::exit(-1);
    }

    let exit_code = match result {
        SatResult::Satisfiable(_) => 0,
        SatResult::Unsatisfiable => 1,
    };
    std::process::exit(exit_code);
}

fn print_usage() {
    println!("Type in your formula, one clause per line.");
    println!();
    println!("  A B C       is equivalent to (A | B | C)");
    println!("  A -B        is equivalent to (A | !B)");
    println!("  An empty line ends the input.");
    println!();
}

fn print_result(f: &Formula, result: &SatResult, format: InputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        InputFormat::Dimacs => write_dimacs(&mut out, f, result),
        InputFormat::Text => {
            if !f.is_empty() {
                writeln!(out, "Formula: {}", f)?;
                writeln!(out)?;
            }
            write_report(&mut out, f, result)
        }
    }
}
