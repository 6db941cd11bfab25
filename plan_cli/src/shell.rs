//! Line-based interactive shell over a [`PlanBook`].
//!
//! Three screens mirror the app's navigation: the plan list, one plan's
//! exercises, and one exercise's log. Each has a "new" form.

use chrono::Local;
use plan_core::{
    Config, DisplayConfig, EntryForm, Error, Exercise, ExerciseForm, ExerciseId, Plan, PlanBook,
    PlanId, Result,
};
use std::io::{BufRead, Write};

const RULE: &str = "─────────────────────────────────────────";

/// Typed alone at any form prompt, discards the form
const CANCEL: &str = ".";

/// Where the user currently is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Plans,
    Plan(PlanId),
    Exercise(PlanId, ExerciseId),
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    New,
    Open(usize),
    Delete(Vec<usize>),
    Back,
    Help,
    Quit,
}

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or("").to_lowercase();
    let args: Vec<&str> = words.collect();

    let positions = |args: &[&str]| -> std::result::Result<Vec<usize>, String> {
        if args.is_empty() {
            return Err(format!("'{}' needs a position", verb));
        }
        args.iter()
            .map(|a| {
                a.parse::<usize>()
                    .ok()
                    .filter(|n| *n >= 1)
                    .ok_or_else(|| format!("Not a position: {}", a))
            })
            .collect()
    };

    match verb.as_str() {
        "" | "list" | "ls" => Ok(Command::List),
        "new" | "add" => Ok(Command::New),
        "open" => {
            let mut found = positions(&args)?;
            if found.len() != 1 {
                return Err("'open' takes exactly one position".into());
            }
            Ok(Command::Open(found.remove(0)))
        }
        "delete" | "rm" => Ok(Command::Delete(positions(&args)?)),
        "back" => Ok(Command::Back),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("Unknown command: {}", other)),
    }
}

pub struct Shell<R, W> {
    book: PlanBook,
    config: Config,
    screen: Screen,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Fails on a config that could not be rendered with
    pub fn new(config: Config, input: R, output: W) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            book: PlanBook::new(),
            config,
            screen: Screen::Plans,
            input,
            output,
        })
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self) -> Result<()> {
        self.render()?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(self.output, "Error: {}", message)?;
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }
            self.dispatch(command)?;
        }

        tracing::debug!("Shell finished with {} plan(s)", self.book.len());
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<()> {
        match (command, self.screen) {
            (Command::List, _) => self.render(),
            (Command::Help, _) => self.help(),
            (Command::Quit, _) => Ok(()),

            (Command::New, Screen::Plans) => self.new_plan(),
            (Command::New, Screen::Plan(plan)) => self.new_exercise(plan),
            (Command::New, Screen::Exercise(plan, exercise)) => self.new_entry(plan, exercise),

            (Command::Open(n), Screen::Plans) => {
                match self.book.list_plans().get(n - 1).map(|p| p.id()) {
                    Some(plan_id) => {
                        self.screen = Screen::Plan(plan_id);
                        self.render()
                    }
                    None => self.no_such_position("plan", n),
                }
            }
            (Command::Open(n), Screen::Plan(plan_id)) => {
                let exercise_id = self
                    .book
                    .plan(plan_id)?
                    .exercises()
                    .get(n - 1)
                    .map(|e| e.id());
                match exercise_id {
                    Some(exercise_id) => {
                        self.screen = Screen::Exercise(plan_id, exercise_id);
                        self.render()
                    }
                    None => self.no_such_position("exercise", n),
                }
            }

            (Command::Delete(positions), Screen::Plans) => {
                let zero_based: Vec<usize> = positions.iter().map(|n| n - 1).collect();
                let removed = self.book.delete_plans(&zero_based);
                writeln!(self.output, "✓ Deleted {} plan(s)", removed.len())?;
                self.render()
            }

            (Command::Back, Screen::Plan(_)) => {
                self.screen = Screen::Plans;
                self.render()
            }
            (Command::Back, Screen::Exercise(plan, _)) => {
                self.screen = Screen::Plan(plan);
                self.render()
            }

            (command, _) => {
                writeln!(self.output, "Error: '{}' is not available here", verb_of(&command))?;
                Ok(())
            }
        }
    }

    fn no_such_position(&mut self, what: &str, n: usize) -> Result<()> {
        writeln!(self.output, "Error: No {} at position {}", what, n)?;
        Ok(())
    }

    // ========================================================================
    // Forms
    // ========================================================================

    fn new_plan(&mut self) -> Result<()> {
        writeln!(self.output, "New training plan")?;
        let Some(name) = self.prompt("Plan name")? else {
            return Ok(());
        };

        self.book.create_plan(name);
        writeln!(self.output, "✓ Plan created")?;
        self.render()
    }

    fn new_exercise(&mut self, plan: PlanId) -> Result<()> {
        writeln!(self.output, "New exercise")?;
        let weight_label = format!("Weight ({})", self.config.display.weight_unit);
        let Some([name, sets, reps, weight]) =
            self.read_form(["Exercise name", "Sets", "Reps", weight_label.as_str()])?
        else {
            return Ok(());
        };
        let form = ExerciseForm {
            name,
            sets,
            reps,
            weight,
        };

        match self.book.add_exercise(plan, &form, &self.config.input) {
            Ok(_) => {
                writeln!(self.output, "✓ Exercise added")?;
                self.render()
            }
            Err(e) => self.not_saved(e),
        }
    }

    fn new_entry(&mut self, plan: PlanId, exercise: ExerciseId) -> Result<()> {
        writeln!(self.output, "New entry")?;
        let weight_label = format!("Weight ({})", self.config.display.weight_unit);
        let Some([set_number, weight, reps]) = self.read_form(["Set", weight_label.as_str(), "Reps"])?
        else {
            return Ok(());
        };
        let form = EntryForm {
            set_number,
            weight,
            reps,
        };

        match self.book.add_entry(plan, exercise, &form, &self.config.input) {
            Ok(_) => {
                writeln!(self.output, "✓ Entry logged")?;
                self.render()
            }
            Err(e) => self.not_saved(e),
        }
    }

    /// Prompt for each field in turn. `.` or end of input cancels the form.
    fn read_form<const N: usize>(&mut self, labels: [&str; N]) -> Result<Option<[String; N]>> {
        let mut values: [String; N] = std::array::from_fn(|_| String::new());
        for (value, label) in values.iter_mut().zip(labels) {
            match self.prompt(label)? {
                Some(line) => *value = line,
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    /// Report a rejected form; only validation failures are recoverable here
    fn not_saved(&mut self, error: Error) -> Result<()> {
        match error {
            Error::Validation(reason) => {
                writeln!(self.output, "Not saved: {}", reason)?;
                Ok(())
            }
            other => Err(other),
        }
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;
        match self.read_line()? {
            Some(line) if line.trim() == CANCEL => {
                writeln!(self.output, "Cancelled")?;
                Ok(None)
            }
            line => Ok(line),
        }
    }

    /// Read one line; invalid UTF-8 is replaced rather than ending the session
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&bytes);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    // ========================================================================
    // Screens
    // ========================================================================

    fn render(&mut self) -> Result<()> {
        match self.screen {
            Screen::Plans => render_plans(&mut self.output, &self.book),
            Screen::Plan(plan_id) => {
                let plan = self.book.plan(plan_id)?;
                render_plan(&mut self.output, plan, &self.config.display)
            }
            Screen::Exercise(plan_id, exercise_id) => {
                let exercise = self
                    .book
                    .plan(plan_id)?
                    .exercise(exercise_id)
                    .ok_or(Error::ExerciseNotFound(exercise_id))?;
                render_exercise(&mut self.output, exercise, &self.config.display)
            }
        }
    }

    fn help(&mut self) -> Result<()> {
        writeln!(self.output, "{}", RULE)?;
        let commands: &[(&str, &str)] = match self.screen {
            Screen::Plans => &[
                ("new", "create a training plan"),
                ("open <n>", "show plan n"),
                ("delete <n>...", "delete plans by position"),
            ],
            Screen::Plan(_) => &[
                ("new", "add an exercise"),
                ("open <n>", "show the log of exercise n"),
                ("back", "return to the plan list"),
            ],
            Screen::Exercise(..) => &[
                ("new", "log an entry"),
                ("back", "return to the plan"),
            ],
        };
        for (usage, what) in commands {
            writeln!(self.output, "  {:<14} {}", usage, what)?;
        }
        writeln!(self.output, "  {:<14} {}", "list", "redraw this screen")?;
        writeln!(self.output, "  {:<14} {}", CANCEL, "at any form prompt, cancel the form")?;
        writeln!(self.output, "  {:<14} {}", "quit", "exit (all data is discarded)")?;
        Ok(())
    }
}

fn verb_of(command: &Command) -> &'static str {
    match command {
        Command::List => "list",
        Command::New => "new",
        Command::Open(_) => "open",
        Command::Delete(_) => "delete",
        Command::Back => "back",
        Command::Help => "help",
        Command::Quit => "quit",
    }
}

fn render_plans(out: &mut impl Write, book: &PlanBook) -> Result<()> {
    writeln!(out, "\nTraining Plans")?;
    writeln!(out, "{}", RULE)?;
    if book.is_empty() {
        writeln!(out, "No training plans yet. Create a new plan.")?;
    }
    for (index, plan) in book.list_plans().iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, plan.name())?;
    }
    writeln!(out)?;
    Ok(())
}

fn render_plan(out: &mut impl Write, plan: &Plan, display: &DisplayConfig) -> Result<()> {
    writeln!(out, "\n{}", plan.name())?;
    writeln!(out, "{}", RULE)?;
    if plan.exercises().is_empty() {
        writeln!(out, "No exercises yet.")?;
    }
    for (index, exercise) in plan.exercises().iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, exercise.name())?;
        writeln!(
            out,
            "     Sets: {}, Reps: {}, Weight: {}",
            exercise.planned_sets(),
            exercise.planned_reps(),
            display.format_weight(exercise.planned_weight())
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn render_exercise(out: &mut impl Write, exercise: &Exercise, display: &DisplayConfig) -> Result<()> {
    writeln!(out, "\n{}", exercise.name())?;
    writeln!(out, "{}", RULE)?;
    if exercise.entries().is_empty() {
        writeln!(out, "No entries yet.")?;
    }
    for entry in exercise.entries() {
        writeln!(
            out,
            "  Set: {} - Weight: {} - Reps: {}    {}",
            entry.set_number(),
            display.format_weight(entry.weight()),
            entry.reps(),
            entry
                .logged_at()
                .with_timezone(&Local)
                .format(&display.date_format)
        )?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> (String, PlanBook) {
        let mut output = Vec::new();
        let book = {
            let mut shell = Shell::new(Config::default(), Cursor::new(script), &mut output).unwrap();
            shell.run().unwrap();
            shell.book
        };
        (String::from_utf8(output).unwrap(), book)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("open 2"), Ok(Command::Open(2)));
        assert_eq!(parse_command("delete 1 3"), Ok(Command::Delete(vec![1, 3])));
        assert_eq!(parse_command("  "), Ok(Command::List));
        assert_eq!(parse_command("QUIT"), Ok(Command::Quit));
        assert!(parse_command("open").is_err());
        assert!(parse_command("open 0").is_err());
        assert!(parse_command("open 1 2").is_err());
        assert!(parse_command("delete x").is_err());
        assert!(parse_command("jump").is_err());
    }

    #[test]
    fn test_empty_state_is_rendered() {
        let (output, book) = run_script("quit\n");
        assert!(output.contains("No training plans yet. Create a new plan."));
        assert!(book.is_empty());
    }

    #[test]
    fn test_full_workflow() {
        let script = "new\nPush Day\nopen 1\nnew\nBench Press\n3\n10\n42.5\nopen 1\nnew\n1\n20\n8\n";
        let (output, book) = run_script(script);

        assert!(output.contains("1. Push Day"));
        assert!(output.contains("Sets: 3, Reps: 10, Weight: 42.50 kg"));
        assert!(output.contains("Set: 1 - Weight: 20.00 kg - Reps: 8"));

        let plan = &book.list_plans()[0];
        let exercise = &plan.exercises()[0];
        assert_eq!(exercise.entries().len(), 1);
    }

    #[test]
    fn test_invalid_exercise_is_reported_not_saved() {
        let script = "new\nLegs\nopen 1\nnew\nSquat\nabc\n10\n60\n";
        let (output, book) = run_script(script);

        assert!(output.contains("Not saved: sets must be a whole number"));
        assert!(book.list_plans()[0].exercises().is_empty());
    }

    #[test]
    fn test_delete_plans_by_position() {
        let script = "new\nA\nnew\nB\nnew\nC\ndelete 2\n";
        let (output, book) = run_script(script);

        assert!(output.contains("✓ Deleted 1 plan(s)"));
        let names: Vec<_> = book.list_plans().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_bad_position_keeps_running() {
        let script = "open 4\nnew\nA\n";
        let (output, book) = run_script(script);

        assert!(output.contains("Error: No plan at position 4"));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_command_not_available_on_screen() {
        let (output, _) = run_script("back\n");
        assert!(output.contains("Error: 'back' is not available here"));
    }

    #[test]
    fn test_back_navigation() {
        let script = "new\nA\nopen 1\nnew\nRow\n3\n8\n30\nopen 1\nback\nback\ndelete 1\n";
        let (_, book) = run_script(script);
        assert!(book.is_empty());
    }

    #[test]
    fn test_form_cancelled_by_end_of_input() {
        let script = "new\nA\nopen 1\nnew\nRow\n3\n";
        let (_, book) = run_script(script);
        assert!(book.list_plans()[0].exercises().is_empty());
    }

    #[test]
    fn test_cancel_plan_form() {
        let (output, book) = run_script("new\n.\nlist\n");
        assert!(output.contains("Cancelled"));
        assert!(book.is_empty());
    }

    #[test]
    fn test_cancel_exercise_form() {
        let script = "new\nLegs\nopen 1\nnew\nSquat\n5\n.\nlist\n";
        let (output, book) = run_script(script);
        assert!(output.contains("Cancelled"));
        assert!(!output.contains("Not saved"));
        assert!(book.list_plans()[0].exercises().is_empty());
    }

    #[test]
    fn test_cancel_entry_form() {
        let script = "new\nLegs\nopen 1\nnew\nSquat\n5\n5\n80\nopen 1\nnew\n .\nlist\n";
        let (output, book) = run_script(script);
        assert!(output.contains("Cancelled"));
        assert!(book.list_plans()[0].exercises()[0].entries().is_empty());
    }

    #[test]
    fn test_invalid_utf8_does_not_end_session() {
        let mut script: Vec<u8> = b"new\nA\n".to_vec();
        script.extend_from_slice(&[0xff, 0xfe, b'\n']);
        script.extend_from_slice(b"new\nB\n");

        let mut output = Vec::new();
        let book = {
            let mut shell = Shell::new(Config::default(), Cursor::new(script), &mut output).unwrap();
            shell.run().unwrap();
            shell.book
        };
        let names: Vec<_> = book.list_plans().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(String::from_utf8_lossy(&output).contains("Error: Unknown command"));
    }

    #[test]
    fn test_unrenderable_date_format_rejected() {
        let mut config = Config::default();
        config.display.date_format = "%Q".into();
        let result = Shell::new(config, Cursor::new(""), Vec::new());
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
