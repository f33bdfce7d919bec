// archdecide CLI - architecture decision wizard, scoring and reports

mod exit_codes;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use archdecide_cli::input::{load_answers, InputError};
use archdecide_cli::interactive::{self, SessionEnd};
use archdecide_config::{ConfigError, Settings};
use archdecide_engine::answers::{Requirement, TextField};
use archdecide_engine::recommend::score_with;
use archdecide_engine::{
    rebalance, recommend_with, AnswersPatch, Architecture, BusinessGoal, BusinessWeights,
    EngineError, Scores, WizardAnswers, WizardState,
};
use archdecide_report::{Report, ReportError, ReportFormat};

// Re-export exit codes from registry (single source of truth)
use exit_codes::{
    EXIT_CONFIG, EXIT_ERROR, EXIT_INVALID_ANSWERS, EXIT_IO, EXIT_NAVIGATION_BLOCKED, EXIT_PARSE,
    EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "archdecide")]
#[command(about = "Microservices or monolith: score a project questionnaire and export the recommendation")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Settings file (default: <config dir>/archdecide/settings.toml)
    #[arg(long, global = true, env = "ARCHDECIDE_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log more on stderr (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an answer set and print the recommended architecture
    #[command(after_help = "\
Starts from the default answers, then applies --answers, then the flags.

Examples:
  archdecide recommend
  archdecide recommend --scalability 90 --flexibility 70
  archdecide recommend --answers project.json --json
  cat project.json | archdecide recommend --answers -")]
    Recommend {
        #[command(flatten)]
        answers: AnswerFlags,

        /// Print a single JSON object on stdout
        #[arg(long)]
        json: bool,
    },

    /// Move one business-goal slider and show how the other two follow
    #[command(after_help = "\
Examples:
  archdecide rebalance --goal time-to-market --value 50
  archdecide rebalance --goal flexibility --value 10 --time-to-market 10 --cost 60 --flexibility 30")]
    Rebalance {
        /// Goal being dragged
        #[arg(long, value_enum)]
        goal: GoalArg,

        /// New value for the dragged goal
        #[arg(long, value_name = "0-100", value_parser = percent())]
        value: u8,

        /// Starting time-to-market weight (default 33)
        #[arg(long, value_name = "0-100", value_parser = percent())]
        time_to_market: Option<u8>,

        /// Starting cost weight (default 33)
        #[arg(long, value_name = "0-100", value_parser = percent())]
        cost: Option<u8>,

        /// Starting flexibility weight (default 34)
        #[arg(long, value_name = "0-100", value_parser = percent())]
        flexibility: Option<u8>,

        /// Print a single JSON object on stdout
        #[arg(long)]
        json: bool,
    },

    /// Build the full recommendation report
    #[command(after_help = "\
Without -o the report goes to the file named in settings (report.output),
with its extension following the format.

Examples:
  archdecide report --answers project.json
  archdecide report --answers project.toml --format json -o report.json
  archdecide report --scalability 80 -o -")]
    Report {
        #[command(flatten)]
        answers: AnswerFlags,

        /// markdown or json (default: from -o extension, then settings)
        #[arg(long, value_parser = parse_report_format)]
        format: Option<ReportFormat>,

        /// Output file, or - for stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Walk through the questionnaire interactively
    #[command(after_help = "\
Press Enter to keep the value shown in brackets.
Type :back to return to the previous step, :quit to stop.")]
    Wizard,

    /// Print the default answer set
    Defaults {
        /// Print a single JSON object on stdout
        #[arg(long)]
        json: bool,
    },

    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the settings file location
    Path,
    /// Print the effective settings as TOML
    Show,
    /// Write a commented settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Default)]
struct AnswerFlags {
    /// Answers file (.json or .toml; - reads JSON from stdin)
    #[arg(long, value_name = "FILE")]
    answers: Option<PathBuf>,

    /// Scalability needs
    #[arg(long, value_name = "0-100", value_parser = percent())]
    scalability: Option<u8>,

    /// Performance requirements
    #[arg(long, value_name = "0-100", value_parser = percent())]
    performance: Option<u8>,

    /// Team expertise level
    #[arg(long, value_name = "0-100", value_parser = percent())]
    expertise: Option<u8>,

    /// Time-to-market weight
    #[arg(long, value_name = "0-100", value_parser = percent())]
    time_to_market: Option<u8>,

    /// Cost-efficiency weight
    #[arg(long, value_name = "0-100", value_parser = percent())]
    cost: Option<u8>,

    /// Flexibility weight
    #[arg(long, value_name = "0-100", value_parser = percent())]
    flexibility: Option<u8>,
}

impl AnswerFlags {
    fn to_patch(&self) -> AnswersPatch {
        AnswersPatch {
            scalability: self.scalability,
            performance: self.performance,
            expertise_level: self.expertise,
            time_to_market: self.time_to_market,
            cost: self.cost,
            flexibility: self.flexibility,
            ..AnswersPatch::default()
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GoalArg {
    TimeToMarket,
    Cost,
    Flexibility,
}

impl From<GoalArg> for BusinessGoal {
    fn from(arg: GoalArg) -> Self {
        match arg {
            GoalArg::TimeToMarket => BusinessGoal::TimeToMarket,
            GoalArg::Cost => BusinessGoal::Cost,
            GoalArg::Flexibility => BusinessGoal::Flexibility,
        }
    }
}

fn percent() -> clap::builder::RangedI64ValueParser<u8> {
    clap::value_parser!(u8).range(0..=100)
}

fn parse_report_format(s: &str) -> Result<ReportFormat, String> {
    s.parse()
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  archdecide-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  archdecide-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Settings are read before logging exists; report a bad file once the
    // subscriber is installed.
    let (settings, settings_err) = match Settings::try_load(cli.config.as_deref()) {
        Ok(found) => (found.unwrap_or_default(), None),
        Err(e) => (Settings::default(), Some(e)),
    };
    init_logging(cli.verbose, &settings.log.level);

    let is_config_command = matches!(cli.command, Some(Commands::Config { .. }));
    if let (Some(e), false) = (&settings_err, is_config_command) {
        log::warn!("{e}; using default settings");
    }

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: archdecide <command> [options]");
            eprintln!("       archdecide --help for more information");
            Ok(())
        }
        Some(Commands::Recommend { answers, json }) => cmd_recommend(&settings, &answers, json),
        Some(Commands::Rebalance { goal, value, time_to_market, cost, flexibility, json }) => {
            cmd_rebalance(goal.into(), value, time_to_market, cost, flexibility, json)
        }
        Some(Commands::Report { answers, format, output }) => {
            cmd_report(&settings, &answers, format, output)
        }
        Some(Commands::Wizard) => cmd_wizard(&settings),
        Some(Commands::Defaults { json }) => cmd_defaults(json),
        Some(Commands::Config { command }) => {
            cmd_config(command, cli.config.as_deref(), &settings, settings_err)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// `--verbose` wins, then `RUST_LOG`, then `log.level` from settings.
fn init_logging(verbose: u8, configured: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // try_init also routes `log` records from the library crates.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_IO, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<InputError> for CliError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::Read { .. } => Self::io(err.to_string()),
            InputError::Parse { .. } => Self::new(EXIT_PARSE, err.to_string()).with_hint(
                "answer files use camelCase keys such as projectName, expertiseLevel, timeToMarket",
            ),
        }
    }
}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::OutOfRange { .. } => Self::new(EXIT_INVALID_ANSWERS, err.to_string())
                .with_hint("percentages must be whole numbers from 0 to 100"),
            EngineError::InvalidWeights(_) => Self::new(EXIT_CONFIG, err.to_string()),
        }
    }
}

impl From<ReportError> for CliError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Io { .. } => Self::io(err.to_string()),
            ReportError::Serialize(_) => Self::new(EXIT_ERROR, err.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::new(EXIT_CONFIG, err.to_string())
            .with_hint("run `archdecide config path` to locate the settings file")
    }
}

// ============================================================================
// Output helpers
// ============================================================================

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::new(EXIT_ERROR, format!("cannot serialize output: {e}")))?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", json).map_err(|e| CliError::io(e.to_string()))
}

fn print_text(text: &str) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(text.as_bytes())
        .map_err(|e| CliError::io(e.to_string()))
}

/// Defaults, then the answers file, then flag overrides.
fn collect_answers(flags: &AnswerFlags) -> Result<WizardAnswers, CliError> {
    let from_file = match &flags.answers {
        Some(path) => load_answers(path)?,
        None => AnswersPatch::new(),
    };
    let state = WizardState::new();
    state.try_set_data(from_file.merge(flags.to_patch()))?;
    Ok(state.get_data())
}

// ============================================================================
// recommend
// ============================================================================

#[derive(Serialize)]
struct RecommendOutput {
    recommended: Architecture,
    confidence: u8,
    scores: Scores,
    top_priority: BusinessGoal,
}

fn cmd_recommend(settings: &Settings, flags: &AnswerFlags, json: bool) -> Result<(), CliError> {
    let answers = collect_answers(flags)?;
    let weights = settings.scoring_weights();
    let result = recommend_with(&weights, &answers);
    let scores = score_with(&weights, &answers);

    if json {
        return print_json(&RecommendOutput {
            recommended: result.recommended,
            confidence: result.confidence,
            scores,
            top_priority: answers.business_weights().top_priority(),
        });
    }

    print_text(&format!(
        "{} ({}% confidence)\nscores: microservices {:.3}, monolith {:.3}\n",
        result.recommended.label(),
        result.confidence,
        scores.microservices,
        scores.monolith
    ))
}

// ============================================================================
// rebalance
// ============================================================================

#[derive(Serialize)]
struct RebalanceOutput {
    goal: BusinessGoal,
    value: u8,
    before: BusinessWeights,
    after: BusinessWeights,
}

fn cmd_rebalance(
    goal: BusinessGoal,
    value: u8,
    time_to_market: Option<u8>,
    cost: Option<u8>,
    flexibility: Option<u8>,
    json: bool,
) -> Result<(), CliError> {
    let defaults = BusinessWeights::default();
    let before = BusinessWeights::new(
        time_to_market.unwrap_or(defaults.time_to_market),
        cost.unwrap_or(defaults.cost),
        flexibility.unwrap_or(defaults.flexibility),
    );
    if !before.is_balanced() {
        log::info!("starting weights total {}%, rebalancing anyway", before.total());
    }
    let after = rebalance(before, goal, value)?;

    if json {
        return print_json(&RebalanceOutput { goal, value, before, after });
    }

    let mut text = String::new();
    for g in BusinessGoal::ALL {
        text.push_str(&format!(
            "{:<28}{:>3}% -> {:>3}%\n",
            g.label(),
            before.get(g),
            after.get(g)
        ));
    }
    print_text(&text)
}

// ============================================================================
// report
// ============================================================================

fn cmd_report(
    settings: &Settings,
    flags: &AnswerFlags,
    format: Option<ReportFormat>,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let answers = collect_answers(flags)?;
    let report = Report::build_with(&settings.scoring_weights(), &answers);

    let format = format
        .or_else(|| output.as_deref().and_then(ReportFormat::from_path))
        .unwrap_or(settings.report.format);

    if output.as_deref() == Some(Path::new("-")) {
        return print_text(&report.render(format)?);
    }

    let path = output.unwrap_or_else(|| settings.report.output.with_extension(format.extension()));
    report.write_to(&path, format)?;
    tracing::debug!(path = %path.display(), %format, "report written");
    eprintln!("Wrote {} report to {}", format, path.display());
    Ok(())
}

// ============================================================================
// wizard
// ============================================================================

fn cmd_wizard(settings: &Settings) -> Result<(), CliError> {
    let state = WizardState::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let end = interactive::run(&state, &settings.scoring_weights(), &mut input, &mut out)
        .map_err(|e| CliError::io(e.to_string()))?;

    match end {
        SessionEnd::EndOfInput { step, blocked: Some(err) } => Err(CliError::new(
            EXIT_NAVIGATION_BLOCKED,
            format!("input ended on {step}: {err}"),
        )
        .with_hint("answer every Project Overview field; goal weights must total 100%")),
        SessionEnd::EndOfInput { step, blocked: None } => {
            tracing::debug!(%step, "wizard input ended");
            Ok(())
        }
        SessionEnd::Quit => Ok(()),
    }
}

// ============================================================================
// defaults
// ============================================================================

fn cmd_defaults(json: bool) -> Result<(), CliError> {
    let answers = WizardAnswers::default();
    if json {
        return print_json(&answers);
    }

    let mut text = String::new();
    for field in TextField::ALL {
        text.push_str(&format!("{:<28}(empty)\n", field.label()));
    }
    for field in Requirement::ALL {
        text.push_str(&format!("{:<28}{:>3}\n", field.label(), answers.requirement(field)));
    }
    let weights = answers.business_weights();
    for goal in BusinessGoal::ALL {
        text.push_str(&format!("{:<28}{:>3}%\n", goal.label(), weights.get(goal)));
    }
    print_text(&text)
}

// ============================================================================
// config
// ============================================================================

fn cmd_config(
    command: ConfigCommands,
    explicit: Option<&Path>,
    settings: &Settings,
    load_error: Option<ConfigError>,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => print_text(&format!("{}\n", Settings::config_path_display(explicit))),
        ConfigCommands::Show => {
            if let Some(e) = load_error {
                return Err(e.into());
            }
            print_text(&settings.to_toml()?)
        }
        ConfigCommands::Init { force } => {
            let path = Settings::resolve_path(explicit);
            if path.exists() && !force {
                return Err(CliError::new(
                    EXIT_USAGE,
                    format!("{} already exists", path.display()),
                )
                .with_hint("pass --force to overwrite it"));
            }
            Settings::write_default_file(&path)?;
            eprintln!("Wrote {}", path.display());
            Ok(())
        }
    }
}
