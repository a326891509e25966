use clap::Parser;
use quad::{Machine, MachineError, Quadruple, StepBudget, TableLoader, TableRegistry};
use std::io::{self, Read, Write};
use std::path::Path;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  quad-cli programs/successor.quad -i 3
  quad-cli --program eraser -i 4 -s 2
  cat table.quad | quad-cli -i 3")]
struct Cli {
    /// Path to a quadruple table file. Can also pipe table content via stdin.
    table: Option<String>,

    /// Run a built-in table by name instead of a file (see --list)
    #[clap(short, long, conflicts_with = "table")]
    program: Option<String>,

    /// List the built-in tables and exit
    #[clap(long)]
    list: bool,

    /// Input values, laid out on the tape as blank-separated unary blocks
    #[clap(short, long, num_args = 0..)]
    input: Vec<usize>,

    /// Steps to execute before pausing; a negative value runs until halt
    #[clap(short, long, default_value_t = -1, allow_negative_numbers = true)]
    steps: i64,

    /// Print the machine after each step
    #[clap(short = 'd', long)]
    debug: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for name in TableRegistry::names() {
            println!("{}", name);
        }
        return;
    }

    // Load the table up front so failures are reported before any output.
    let quadruples = match load_table(&cli) {
        Ok(quadruples) => quadruples,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut machine = Machine::new();
    machine.load_quadruples(quadruples);
    machine.load_values(&cli.input);

    let mut budget = to_budget(cli.steps);

    loop {
        if cli.debug {
            run_stepwise(&mut machine, budget);
        } else {
            machine.run_for(budget);
        }

        // Prompting for more steps only makes sense on a terminal; with a
        // piped stdin the paused state is printed below and we stop.
        if machine.halted() || atty::isnt(atty::Stream::Stdin) {
            break;
        }

        println!("{}", machine);
        budget = match prompt_for_steps() {
            Ok(budget) => budget,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        };
    }

    println!("{}", machine);
}

/// Loads the rule table from a built-in name, a file path, or piped stdin,
/// in that order of preference.
fn load_table(cli: &Cli) -> Result<Vec<Quadruple>, MachineError> {
    if let Some(name) = &cli.program {
        TableRegistry::get(name)
    } else if let Some(path) = &cli.table {
        TableLoader::load_table(Path::new(path))
    } else if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| MachineError::FileError(format!("Failed to read from stdin: {}", e)))?;
        TableLoader::load_table_from_string(&buffer)
    } else {
        Err(MachineError::InvalidInput(
            "no table given: pass a file path, --program, or pipe a table via stdin".to_string(),
        ))
    }
}

/// Maps the CLI step count onto a budget: negative means run until halt.
fn to_budget(steps: i64) -> StepBudget {
    if steps < 0 {
        StepBudget::Unbounded
    } else {
        StepBudget::Bounded(steps as usize)
    }
}

/// Executes steps one at a time, printing the machine after each.
fn run_stepwise(machine: &mut Machine, budget: StepBudget) {
    let mut executed = 0;
    while !machine.halted() && budget.allows(executed) {
        machine.execute_step();
        executed += 1;
        println!("{}\n", machine);
    }
}

/// Prompts for the next step budget. A non-numeric answer is a validation
/// error, not a retry.
fn prompt_for_steps() -> Result<StepBudget, MachineError> {
    print!("Number of steps to complete (-1 for no step limit): ");
    io::stdout()
        .flush()
        .map_err(|e| MachineError::InvalidInput(format!("Failed to flush prompt: {}", e)))?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| MachineError::InvalidInput(format!("Failed to read step count: {}", e)))?;

    let steps = line.trim().parse::<i64>().map_err(|_| {
        MachineError::InvalidInput(format!("step count must be an integer, got '{}'", line.trim()))
    })?;

    Ok(to_budget(steps))
}
