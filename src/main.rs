//! # sudoku-solver
//!
//! `sudoku-solver` is a command-line brute-force Sudoku solver. It reads a
//! 9x9 puzzle (81 whitespace-separated digits in row-major order, `0` for a
//! blank cell), runs an exhaustive backtracking search, and prints the
//! solved grid or reports that no solution exists.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a puzzle file
//! sudoku_solver puzzle.sudoku
//!
//! # Same, with an explicit subcommand
//! sudoku_solver file --path puzzle.sudoku
//!
//! # Solve a puzzle given inline as 81 digits
//! sudoku_solver text --input "530070000600195000098000060800060003400803001700020006060000280000419005000080079"
//!
//! # Solve every .sudoku file under a directory tree
//! sudoku_solver dir --path puzzles/
//!
//! # Generate shell completion scripts
//! sudoku_solver completions bash
//! ```
//!
//! ### Common options
//!
//! - `-d, --debug`: verbose output while solving (default: `false`).
//! - `-v, --verify`: check the produced grid against the Sudoku rules and
//!   the original clues (default: `true`).
//! - `-s, --stats`: print timing, search, and memory statistics
//!   (default: `true`).
//! - `-p, --print-clue`: print the clue grid before solving
//!   (default: `false`).

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sudoku_solver::sudoku::grid::{BLANK, CELL_COUNT, Grid};
use sudoku_solver::sudoku::parser::{parse_puzzle_file, parse_puzzle_text};
use sudoku_solver::sudoku::solver::{SearchStats, Solver};
use tikv_jemalloc_ctl::{epoch, stats};

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// usage numbers in the statistics report.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku_solver", version, about = "A brute-force backtracking Sudoku solver")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a puzzle file (81 whitespace-separated digits, 0 for blank).
    File {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle provided inline as text.
    Text {
        /// The puzzle as 81 digits in row-major order (`0` or `.` for a
        /// blank cell); whitespace is ignored.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sudoku` file under a directory tree.
    Dir {
        /// Path to the directory to scan.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the
    /// solving process.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Enable verification of the result: the produced grid must satisfy
    /// the Sudoku rules and keep every original clue.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Enable printing of timing, search, and memory statistics after
    /// solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Print the clue grid before solving.
    #[arg(short, long, default_value_t = false)]
    print_clue: bool,
}

/// Main entry point of the solver.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    let cli = Cli::parse();

    // Handle the case where a path is provided globally without a
    // subcommand. This defaults to solving a puzzle file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            exit_on_error(solve_file(&path, &cli.common));
            return;
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => exit_on_error(solve_file(&path, &common)),
        Some(Commands::Text { input, common }) => exit_on_error(solve_text(&input, &common)),
        Some(Commands::Dir { path, common }) => exit_on_error(solve_dir(&path, &common)),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

/// Prints the error and exits with a non-zero status when `result` is `Err`.
fn exit_on_error(result: Result<(), String>) {
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Parses a puzzle file and solves it.
fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Puzzle file does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    let time = Instant::now();
    let clue =
        parse_puzzle_file(path).map_err(|e| format!("Error parsing {}: {e}", path.display()))?;
    let parse_time = time.elapsed();

    solve_and_report(clue, common, Some(path), parse_time);
    Ok(())
}

/// Parses an inline puzzle and solves it.
fn solve_text(input: &str, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let clue = parse_puzzle_text(input).map_err(|e| format!("Error parsing puzzle: {e}"))?;
    let parse_time = time.elapsed();

    solve_and_report(clue, common, None, parse_time);
    Ok(())
}

/// Solves a directory of puzzle files.
///
/// Walks the directory tree and solves every file with a `.sudoku`
/// extension, reporting each result in turn.
fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }

        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        solve_file(file_path, common)?;
    }

    Ok(())
}

/// Runs the search on a parsed clue grid and reports the outcome, including
/// verification and statistics when enabled.
fn solve_and_report(clue: Grid, common: &CommonOptions, label: Option<&Path>, parse_time: Duration) {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    if common.print_clue || common.debug {
        println!("Clue:\n{clue}");
    }

    if common.debug {
        println!("Givens: {}", clue.len());
        println!("Blanks: {}", CELL_COUNT - clue.len());
    }

    epoch::advance().unwrap();

    let time = Instant::now();
    let mut solver = Solver::new(clue);
    let solved = solver.solve();
    let elapsed = time.elapsed();

    if common.debug {
        println!("Solved: {solved}");
        println!("Time: {elapsed:?}");
    }

    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_solution(&solver, solved);
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &clue,
            solver.stats(),
            allocated_mib,
            resident_mib,
        );
    }

    if solved {
        println!("Solution:\n{}", solver.solution());
        println!("SOLVED");
    } else {
        println!("No solution is possible.");
        println!("NO SOLUTION");
    }
}

/// Verifies a found solution: it must be a complete, rule-satisfying grid
/// that preserves every original clue.
///
/// Prints whether the verification was successful. If verification fails,
/// it panics.
fn verify_solution(solver: &Solver, solved: bool) {
    if solved {
        let clue = solver.clue();
        let solution = solver.solution();
        let givens_kept = clue.rows().zip(solution.rows()).all(|(clues, solved)| {
            clues
                .iter()
                .zip(solved)
                .all(|(&given, &cell)| given == BLANK || given == cell)
        });
        let ok = solution.is_solved() && givens_kept;
        println!("Verified: {ok:?}");
        assert!(ok, "Solution failed verification!");
    } else {
        println!("Nothing to verify: no solution was found.");
    }
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    clue: &Grid,
    s: SearchStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Givens", clue.len());
    stat_line("Blanks", CELL_COUNT - clue.len());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Placements", s.placements, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
