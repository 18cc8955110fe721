//! evalcrit - gallery evaluation criteria CLI
//!
//! ## Commands
//!
//! - `validate`: Check a criteria file and print it
//! - `instructions`: Print answer instructions for a criteria file
//! - `format-answer`: Render a criterion answer
//! - `screen`: Parse raw answers and check them against hard criteria
//! - `edit`: Author criteria from a script of form events

mod load;
mod session;

use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use evalcrit_core::{
    format_criterion_answer, format_hard_criterion, screen_answers, CriteriaEditor,
    CriterionAnswer, EditorConfig,
};
use tracing::{info, Level};

use crate::load::{load_criteria, load_raw_answers};
use crate::session::{run_session, write_rows};

#[derive(Parser)]
#[command(name = "evalcrit")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluation criteria for marketplace galleries", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a criteria file (JSON, or TOML by extension) and print it
    Validate {
        /// Criteria file
        file: PathBuf,
    },

    /// Print the answer instructions for a criteria file
    Instructions {
        /// Criteria file
        file: PathBuf,
    },

    /// Render a criterion answer given as JSON, e.g. '{"Float": 2.5}'
    FormatAnswer {
        /// Answer JSON
        answer: String,
    },

    /// Parse raw answers and check them against the hard criteria
    Screen {
        /// Criteria file
        #[arg(short, long)]
        criteria: PathBuf,

        /// JSON array of raw answer strings, one per criterion
        #[arg(short, long)]
        answers: PathBuf,
    },

    /// Author criteria from form events (see `session` docs for the syntax)
    Edit {
        /// Existing criteria to reopen (default: one empty Yes/No row)
        #[arg(long)]
        from: Option<PathBuf>,

        /// Script of form events (default: stdin)
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Write the submitted criteria here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Separator between row errors (overrides EVALCRIT_ERROR_SEPARATOR)
        #[arg(long)]
        error_separator: Option<String>,

        /// Refuse to submit criteria with an empty question
        #[arg(long)]
        reject_empty_questions: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    evalcrit_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Instructions { file } => cmd_instructions(&file),
        Commands::FormatAnswer { answer } => cmd_format_answer(&answer),
        Commands::Screen { criteria, answers } => cmd_screen(&criteria, &answers),
        Commands::Edit {
            from,
            script,
            output,
            error_separator,
            reject_empty_questions,
        } => {
            let mut config = EditorConfig::from_env();
            if let Some(separator) = error_separator {
                config = config.with_error_separator(separator);
            }
            if reject_empty_questions {
                config = config.with_reject_empty_questions(true);
            }
            cmd_edit(from.as_deref(), script.as_deref(), output.as_deref(), config)
        }
    }
}

fn cmd_validate(file: &Path) -> Result<()> {
    let criteria = load_criteria(file)?;
    for (index, criterion) in criteria.iter().enumerate() {
        println!(
            "{}. [{}] {} -> {}",
            index,
            criterion.criterion_type,
            criterion.question,
            format_hard_criterion(criterion.hard_criterion.as_ref())
        );
    }
    println!("digest: {}", criteria.digest()?);
    info!(criteria = criteria.len(), "criteria valid");
    Ok(())
}

fn cmd_instructions(file: &Path) -> Result<()> {
    let criteria = load_criteria(file)?;
    print!("{}", criteria.answer_instructions());
    Ok(())
}

fn cmd_format_answer(answer: &str) -> Result<()> {
    let answer: CriterionAnswer =
        serde_json::from_str(answer).context("Answer is not a valid criterion answer JSON")?;
    println!("{}", format_criterion_answer(&answer));
    Ok(())
}

fn cmd_screen(criteria_path: &Path, answers_path: &Path) -> Result<()> {
    let criteria = load_criteria(criteria_path)?;
    let raw = load_raw_answers(answers_path)?;
    let answers = criteria
        .parse_answers(&raw)
        .context("Unable to parse answers into evaluation criteria")?;
    let verdict = screen_answers(&criteria, &answers)?;

    for (index, (criterion, answer)) in criteria.iter().zip(&answers).enumerate() {
        println!(
            "{}. {}: {}",
            index,
            criterion.question,
            format_criterion_answer(answer)
        );
    }

    if verdict.passed() {
        println!("PASS: all hard criteria satisfied");
    } else {
        println!("FAIL: {} hard criteria not satisfied", verdict.violations.len());
        for violation in &verdict.violations {
            println!(
                "  {}. {}: {}",
                violation.index, violation.question, violation.reason
            );
        }
    }
    info!(passed = verdict.passed(), "answers screened");
    Ok(())
}

fn cmd_edit(
    from: Option<&Path>,
    script: Option<&Path>,
    output: Option<&Path>,
    config: EditorConfig,
) -> Result<()> {
    let mut editor = match from {
        Some(path) => CriteriaEditor::from_criteria(load_criteria(path)?, config)
            .with_context(|| format!("Failed to reopen criteria from {:?}", path))?,
        None => CriteriaEditor::new(config),
    };

    let mut stdout = std::io::stdout().lock();
    match script {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open edit script: {:?}", path))?;
            run_session(&mut editor, BufReader::new(file), &mut stdout)?;
        }
        None => run_session(&mut editor, std::io::stdin().lock(), &mut stdout)?,
    }

    if let Some(error) = editor.aggregate_error() {
        write_rows(&editor, &mut stdout)?;
        anyhow::bail!("Criteria are not valid: {}", error);
    }

    let submitted = editor.submit().context("Failed to submit criteria")?;
    let json = serde_json::to_string_pretty(&submitted)?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write criteria to {:?}", path))?;
            writeln!(stdout, "Wrote criteria {} to {:?}", submitted.criteria_digest, path)?;
        }
        None => writeln!(stdout, "{json}")?,
    }
    info!(
        submission_id = %submitted.submission_id,
        criteria = submitted.evaluation_criteria.len(),
        "criteria submitted"
    );
    Ok(())
}
