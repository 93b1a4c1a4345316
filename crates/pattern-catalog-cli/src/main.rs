// crates/pattern-catalog-cli/src/main.rs
// ============================================================================
// Module: Pattern Catalog CLI Entry Point
// Description: Command dispatcher for listing, verifying, and running patterns.
// Purpose: Provide a localized CLI over the built-in pattern registry.
// Dependencies: clap, pattern-catalog-config, pattern-catalog-core,
//               pattern-catalog-patterns, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The `pattern-catalog` binary builds the built-in registry from the loaded
//! configuration and dispatches one subcommand against it. All user-facing
//! strings are routed through the i18n catalog. Script files are untrusted
//! input and are read under a size limit.
//!
//! Exit codes: 0 on success, 1 when a check or script fails, 2 for lookup,
//! usage, config, or input errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use pattern_catalog_cli::i18n::Locale;
use pattern_catalog_cli::i18n::set_locale;
use pattern_catalog_cli::report;
use pattern_catalog_cli::t;
use pattern_catalog_config::CatalogConfig;
use pattern_catalog_config::OutputFormat;
use pattern_catalog_core::AuditSink;
use pattern_catalog_core::ExampleRunner;
use pattern_catalog_core::FileAuditSink;
use pattern_catalog_core::NoopAuditSink;
use pattern_catalog_core::PatternCategory;
use pattern_catalog_core::Registry;
use pattern_catalog_core::RunError;
use pattern_catalog_core::RunnerLimits;
use pattern_catalog_core::Script;
use pattern_catalog_core::StderrAuditSink;
use pattern_catalog_core::Verifier;
use pattern_catalog_patterns::BuiltinOptions;
use pattern_catalog_patterns::builtin_registry;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "PATTERN_CATALOG_LANG";
/// Exit code for failed checks or scripts.
const EXIT_FAILED: u8 = 1;
/// Exit code for lookup, usage, config, or input errors.
const EXIT_USAGE: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "pattern-catalog", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `PATTERN_CATALOG_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Config file (overrides `PATTERN_CATALOG_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List pattern categories with their entry counts.
    Categories,
    /// List entry names registered for a category.
    List {
        /// Category label, for example `singleton` or `abstract-factory`.
        category: String,
    },
    /// Verify one entry, or every entry of a category, against its contract.
    Verify(VerifyCommand),
    /// Run a JSON script against a fresh instance of an entry.
    Run(RunCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `verify`.
#[derive(Args, Debug)]
struct VerifyCommand {
    /// Category label.
    category: String,
    /// Entry name; every entry of the category when omitted.
    name: Option<String>,
    /// Report format (defaults to `output.format` from config).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Category label.
    category: String,
    /// Entry name.
    name: String,
    /// Script file: `{"steps": [{"operation": "...", "args": [...]}]}`.
    script: PathBuf,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate the config file.
    Validate,
}

/// Report format flag.
#[derive(ValueEnum, Debug, Clone, Copy)]
enum FormatArg {
    /// Human-readable text.
    Text,
    /// JSON report array.
    Json,
    /// Markdown table.
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
            FormatArg::Markdown => Self::Markdown,
        }
    }
}

/// Locale flag.
#[derive(ValueEnum, Debug, Clone, Copy)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error carrying a localized message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

/// Failure while reading a bounded input file.
#[derive(Debug)]
enum ReadLimitError {
    /// The file could not be opened or read.
    Io(std::io::Error),
    /// The file exceeds the limit.
    TooLarge {
        /// Observed size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Parses arguments and dispatches the selected command.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        write_stdout_line(&t!("main.version", version = env!("CARGO_PKG_VERSION")))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let config = CatalogConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;

    match command {
        Commands::Config {
            command: ConfigCommand::Validate,
        } => command_config_validate(),
        Commands::Categories => command_categories(&config),
        Commands::List {
            category,
        } => command_list(&config, &category),
        Commands::Verify(command) => command_verify(&config, &command),
        Commands::Run(command) => command_run(&config, &command),
    }
}

/// Prints CLI help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Reports a loaded and validated config.
fn command_config_validate() -> CliResult<ExitCode> {
    write_stdout_line(&t!("config.validate.ok")).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints every category label with its entry count.
fn command_categories(config: &CatalogConfig) -> CliResult<ExitCode> {
    let registry = registry(config)?;
    for category in PatternCategory::ALL {
        let count = registry.list(category).count();
        write_stdout_line(&t!("categories.row", category = category, count = count))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints the entry names of one category.
fn command_list(config: &CatalogConfig, category: &str) -> CliResult<ExitCode> {
    let category = parse_category(category)?;
    let registry = registry(config)?;
    let names: Vec<&str> = registry.list(category).collect();
    if names.is_empty() {
        write_stdout_line(&t!("list.empty", category = category))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    for name in names {
        write_stdout_line(name).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Verifies one entry or a whole category.
fn command_verify(config: &CatalogConfig, command: &VerifyCommand) -> CliResult<ExitCode> {
    let category = parse_category(&command.category)?;
    let registry = registry(config)?;
    let audit = audit_sink(config)?;
    let verifier = Verifier::new(&registry).with_audit(audit.as_ref());
    let reports = match &command.name {
        Some(name) => vec![
            verifier
                .verify(category, name)
                .map_err(|err| CliError::new(t!("verify.not_found", error = err)))?,
        ],
        None => verifier.verify_all(category),
    };
    let format = command.format.map_or(config.output.format, OutputFormat::from);
    let rendered = report::render(&reports, format)
        .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    if reports.iter().all(pattern_catalog_core::VerificationReport::passed) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_FAILED))
    }
}

/// Runs a script file against an entry.
fn command_run(config: &CatalogConfig, command: &RunCommand) -> CliResult<ExitCode> {
    let category = parse_category(&command.category)?;
    let script = read_script(&command.script, config.runner.max_script_bytes)?;
    let registry = registry(config)?;
    let audit = audit_sink(config)?;
    let runner = ExampleRunner::new(&registry)
        .with_limits(RunnerLimits {
            max_steps: config.runner.max_script_steps,
        })
        .with_audit(audit.as_ref());
    match runner.run(category, &command.name, &script) {
        Ok(outputs) => {
            write_json(&Value::Array(outputs))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            match &failure.error {
                RunError::Lookup(error) => {
                    return Err(CliError::new(t!("run.lookup_failed", error = error)));
                }
                RunError::ScriptTooLong { .. } => {
                    return Err(CliError::new(t!("run.script.rejected", error = failure.error)));
                }
                _ => {}
            }
            write_json(&Value::Array(failure.outputs))?;
            write_stderr_line(&t!("run.failed", error = failure.error))
                .map_err(|err| CliError::new(output_error("stderr", &err)))?;
            Ok(ExitCode::from(EXIT_FAILED))
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the built-in registry using the configured pool bound.
fn registry(config: &CatalogConfig) -> CliResult<Registry> {
    builtin_registry(&BuiltinOptions {
        pool_max_size: config.pool.max_size,
    })
    .map_err(|err| CliError::new(t!("registry.build_failed", error = err)))
}

/// Audit sink selected by the `[audit]` section.
fn audit_sink(config: &CatalogConfig) -> CliResult<Box<dyn AuditSink>> {
    if !config.audit.enabled {
        return Ok(Box::new(NoopAuditSink));
    }
    match &config.audit.path {
        Some(path) => {
            let sink = FileAuditSink::new(path).map_err(|err| {
                CliError::new(t!("audit.open_failed", path = path.display(), error = err))
            })?;
            Ok(Box::new(sink))
        }
        None => Ok(Box::new(StderrAuditSink)),
    }
}

/// Parses a category label.
fn parse_category(label: &str) -> CliResult<PatternCategory> {
    label.parse::<PatternCategory>().map_err(|err| CliError::new(t!("category.invalid", error = err)))
}

/// Reads and parses a script file under `max_bytes`.
fn read_script(path: &Path, max_bytes: u64) -> CliResult<Script> {
    let kind = t!("input.kind.script");
    let bytes = read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(error) => {
            CliError::new(t!("input.read_failed", kind = kind, path = path.display(), error = error))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    Script::from_json_slice(&bytes)
        .map_err(|err| CliError::new(t!("run.script.parse_failed", path = path.display(), error = err)))
}

/// Reads a file, refusing anything larger than `max_bytes`.
fn read_bytes_with_limit(path: &Path, max_bytes: u64) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let size = file.metadata().map_err(ReadLimitError::Io)?.len();
    if size > max_bytes {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }
    let mut bytes = Vec::new();
    file.take(max_bytes.saturating_add(1)).read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
    if actual > max_bytes {
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a pretty-printed JSON value to stdout.
fn write_json(value: &Value) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = if stream == "stderr" { t!("output.stream.stderr") } else { t!("output.stream.stdout") };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns the usage exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(EXIT_USAGE)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::expect_used, reason = "Test setup failures should abort the test.")]
mod tests {
    use std::io::Write;

    use super::ReadLimitError;
    use super::read_bytes_with_limit;
    use super::resolve_locale;
    use pattern_catalog_cli::i18n::Locale;

    #[test]
    fn env_locale_is_used_without_a_flag() {
        assert_eq!(resolve_locale(None, Some("ca")).ok(), Some(Locale::Ca));
        assert!(resolve_locale(None, Some("xx")).is_err(), "unknown locale accepted");
        assert_eq!(resolve_locale(None, None).ok(), Some(Locale::En));
    }

    #[test]
    fn oversized_inputs_are_refused() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(&[b' '; 64]).expect("write");
        assert!(matches!(
            read_bytes_with_limit(file.path(), 16),
            Err(ReadLimitError::TooLarge {
                size: 64,
                limit: 16
            })
        ));
        assert_eq!(read_bytes_with_limit(file.path(), 64).map(|bytes| bytes.len()).ok(), Some(64));
    }
}
