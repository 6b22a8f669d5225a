use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use geopingu::{Formula, FormulaError, FormulaSnapshot, Literal};
use log::{info, LevelFilter};
use serde::Serialize;

mod repl;

#[derive(Debug, Parser)]
#[command(
    name = "geopingu",
    version,
    about = "Evaluate geocache coordinate formulas",
    long_about = "geopingu fills in the bracketed expressions of a geocache coordinate\n\
        template once every variable has a value.\n\n\
        EXAMPLES:\n\
        \n  geopingu vars 'N48 4[B+D].[F/C]'                   List the variables\n\
        \n  geopingu eval 'N48 43.333 E008 52.[A+145]' -s A=235  Evaluate a formula\n\
        \n  geopingu restore snapshot.json                      Evaluate a saved formula\n\
        \n  geopingu repl                                       Start an interactive session"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate a template with the given variable values
    Eval(EvalArgs),

    /// List the variables of a template in the order they appear
    Vars {
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },

    /// Load a saved formula snapshot and evaluate it
    #[command(long_about = "Load a formula snapshot (JSON, as written by the repl's :save)\n\
        from a file, or from stdin when FILE is '-', and evaluate it.")]
    Restore {
        #[arg(value_name = "FILE")]
        snapshot: PathBuf,

        /// Print the result as a JSON report
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive session
    #[command(long_about = "Start an interactive session for solving one formula at a time.\n\n\
        Commands:\n\
        \n  :formula <template>   Start a new formula\n\
        \n  NAME=VALUE            Set a variable\n\
        \n  :help                 Show all commands\n\
        \n  :quit                 Exit (also :q, :exit)")]
    Repl,
}

#[derive(Debug, Args, Clone)]
struct EvalArgs {
    /// Coordinate template, e.g. 'N48 4[B+D].[F/C]'
    #[arg(value_name = "TEMPLATE")]
    template: String,

    /// Variable value (repeatable)
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE", value_parser = parse_binding)]
    bindings: Vec<(String, Literal)>,

    /// Print the result as a JSON report
    #[arg(long)]
    json: bool,
}

/// Machine readable outcome of `eval` and `restore`.
#[derive(Debug, Serialize)]
struct EvalReport<'a> {
    template: &'a str,
    variables: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Split `NAME=VALUE` into a variable name and the value as typed by a user.
pub(crate) fn parse_binding(input: &str) -> Result<(String, Literal), String> {
    let (name, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{input}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in '{input}'"));
    }
    Ok((name.to_string(), Literal::from_input(value.trim())))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn bind_all(formula: &mut Formula, bindings: &[(String, Literal)]) -> Result<(), FormulaError> {
    for (name, value) in bindings {
        formula.set_variable(name, value.clone())?;
    }
    Ok(())
}

fn report(formula: &Formula, json: bool) -> i32 {
    let outcome = formula.evaluate();
    let rc = if outcome.is_ok() { 0 } else { 1 };

    if json {
        let (result, error) = match outcome {
            Ok(result) => (Some(result), None),
            Err(e) => (None, Some(e.to_string())),
        };
        let report = EvalReport {
            template: formula.raw_text(),
            variables: formula.variables(),
            result,
            error,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: failed to serialize report: {e}");
                return 2;
            }
        }
        return rc;
    }

    match outcome {
        Ok(result) => println!("{result}"),
        Err(e) => eprintln!("error: {e}"),
    }
    rc
}

fn run_eval(args: &EvalArgs) -> i32 {
    let mut formula = match Formula::new(args.template.as_str()) {
        Ok(formula) => formula,
        Err(e) => {
            eprintln!("error: {}", FormulaError::from(e));
            return 1;
        }
    };
    if let Err(e) = bind_all(&mut formula, &args.bindings) {
        eprintln!("error: {e}");
        return 1;
    }
    report(&formula, args.json)
}

fn run_vars(template: &str) -> i32 {
    match Formula::new(template) {
        Ok(formula) => {
            for name in formula.variables() {
                println!("{name}");
            }
            0
        }
        Err(e) => {
            eprintln!("error: {}", FormulaError::from(e));
            1
        }
    }
}

fn read_snapshot(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path)
    }
}

fn run_restore(path: &Path, json: bool) -> i32 {
    let text = match read_snapshot(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: failed to read '{}': {e}", path.display());
            return 2;
        }
    };
    let snapshot = match FormulaSnapshot::from_json(&text) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("error: '{}' is not a formula snapshot: {e}", path.display());
            return 2;
        }
    };
    match Formula::restore(&snapshot) {
        Ok(formula) => {
            info!("restored formula {:?}", formula.raw_text());
            report(&formula, json)
        }
        Err(e) => {
            eprintln!("error: {}", FormulaError::from(e));
            1
        }
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Eval(args) => run_eval(&args),
        Command::Vars { template } => run_vars(&template),
        Command::Restore { snapshot, json } => run_restore(&snapshot, json),
        Command::Repl => repl::run_repl(),
    }
}

fn main() {
    std::process::exit(run_cli());
}
