use geopingu::{Formula, FormulaError, FormulaSnapshot};

use crate::parse_binding;

const HELP: &[&str] = &[
    "commands:",
    "  :formula <template>   start a new formula",
    "  NAME=VALUE            set a variable",
    "  :vars                 list variables and their values",
    "  :eval                 evaluate the current formula",
    "  :save                 print the formula as a snapshot",
    "  :load <file>          load a snapshot from a file",
    "  :help                 show this help",
    "  :quit                 exit (also :q, :exit)",
];

/// One interactive conversation: at most one formula is active at a time.
#[derive(Debug, Default)]
pub(crate) struct ReplSession {
    formula: Option<Formula>,
}

impl ReplSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn prompt(&self) -> &'static str {
        if self.formula.is_some() {
            "formula> "
        } else {
            "geopingu> "
        }
    }

    /// Handle one input line and return the lines to print and whether to exit.
    pub(crate) fn handle_line(&mut self, line: &str) -> (Vec<String>, bool) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return (Vec::new(), false);
        }
        if trimmed.starts_with(':') {
            return self.handle_command(trimmed);
        }
        if trimmed.contains('=') {
            return (self.bind(trimmed), false);
        }
        (
            vec![format!(
                "error: expected NAME=VALUE or a command, got '{trimmed}' (try :help)"
            )],
            false,
        )
    }

    fn handle_command(&mut self, trimmed: &str) -> (Vec<String>, bool) {
        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (trimmed, ""),
        };

        let out = match command {
            ":q" | ":quit" | ":exit" => return (Vec::new(), true),
            ":help" => HELP.iter().map(|line| line.to_string()).collect(),
            ":formula" => self.start(rest),
            ":vars" => self.vars(),
            ":eval" => self.eval(),
            ":save" => self.save(),
            ":load" => self.load(rest),
            _ => vec![format!("error: unknown command '{command}'")],
        };
        (out, false)
    }

    fn start(&mut self, template: &str) -> Vec<String> {
        if template.is_empty() {
            return vec!["error: usage: :formula <template>".to_string()];
        }
        match Formula::new(template) {
            Ok(formula) => {
                let out = Self::describe(&formula);
                self.formula = Some(formula);
                out
            }
            Err(e) => vec![format!("error: {}", FormulaError::from(e))],
        }
    }

    fn describe(formula: &Formula) -> Vec<String> {
        let variables = formula.variables();
        if variables.is_empty() {
            return match formula.evaluate() {
                Ok(result) => vec![format!("no variables, result: {result}")],
                Err(e) => vec![format!("error: {e}")],
            };
        }
        vec![format!("variables: {}", variables.join(", "))]
    }

    fn active(&mut self) -> Result<&mut Formula, Vec<String>> {
        self.formula.as_mut().ok_or_else(|| {
            vec!["error: no formula, start one with :formula <template>".to_string()]
        })
    }

    fn bind(&mut self, input: &str) -> Vec<String> {
        let (name, value) = match parse_binding(input) {
            Ok(binding) => binding,
            Err(e) => return vec![format!("error: {e}")],
        };
        let formula = match self.active() {
            Ok(formula) => formula,
            Err(out) => return out,
        };
        if let Err(e) = formula.set_variable(&name, value) {
            return vec![format!("error: {e}")];
        }
        if formula.all_variables_set() {
            return match formula.evaluate() {
                Ok(result) => vec![format!("result: {result}")],
                Err(e) => vec![format!("error: {e}")],
            };
        }
        vec![format!(
            "still missing: {}",
            formula.unbound_variables().join(", ")
        )]
    }

    fn vars(&mut self) -> Vec<String> {
        let formula = match self.active() {
            Ok(formula) => formula,
            Err(out) => return out,
        };
        let mut out = Vec::new();
        for name in formula.variables() {
            let value = formula
                .get_variable(name)
                .ok()
                .and_then(|variable| variable.value().map(ToString::to_string));
            out.push(match value {
                Some(value) => format!("{name} = {value}"),
                None => format!("{name} = ?"),
            });
        }
        if out.is_empty() {
            out.push("(no variables)".to_string());
        }
        out
    }

    fn eval(&mut self) -> Vec<String> {
        match self.active() {
            Ok(formula) => match formula.evaluate() {
                Ok(result) => vec![result],
                Err(e) => vec![format!("error: {e}")],
            },
            Err(out) => out,
        }
    }

    fn save(&mut self) -> Vec<String> {
        let formula = match self.active() {
            Ok(formula) => formula,
            Err(out) => return out,
        };
        match formula.snapshot().to_json() {
            Ok(json) => vec![json],
            Err(e) => vec![format!("error: failed to serialize snapshot: {e}")],
        }
    }

    fn load(&mut self, path: &str) -> Vec<String> {
        if path.is_empty() {
            return vec!["error: usage: :load <file>".to_string()];
        }
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => return vec![format!("error: failed to read '{path}': {e}")],
        };
        let snapshot = match FormulaSnapshot::from_json(&text) {
            Ok(snapshot) => snapshot,
            Err(e) => return vec![format!("error: '{path}' is not a formula snapshot: {e}")],
        };
        match Formula::restore(&snapshot) {
            Ok(formula) => {
                let mut out = vec![format!("loaded {}", formula.raw_text())];
                if !formula.all_variables_set() {
                    out.extend(Self::describe(&formula));
                }
                self.formula = Some(formula);
                out
            }
            Err(e) => vec![format!("error: {}", FormulaError::from(e))],
        }
    }
}

pub(crate) fn run_repl() -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize repl: {e}");
            return 2;
        }
    };

    let mut session = ReplSession::new();
    loop {
        match rl.readline(session.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let (out, exit) = session.handle_line(&line);
                for l in out {
                    println!("{l}");
                }
                if exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: repl failed: {e}");
                return 2;
            }
        }
    }
}
