//! Command-line entry point: translation lookups, path localization and site checks.

use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use architect_docs_i18n::check::check;
use architect_docs_i18n::config::{
    ConfigError,
    ConfigManager,
    FileMatcher,
    MatcherError,
};
use architect_docs_i18n::content::{
    ContentSet,
    load_collections,
};
use architect_docs_i18n::i18n::{
    LoadError,
    TranslationTree,
    Translator,
    load_translations,
};
use architect_docs_i18n::version::{
    get_doc_slug,
    get_version_from_slug,
};
use architect_docs_i18n::{
    Lang,
    PathLocalizer,
};
use clap::{
    Parser,
    Subcommand,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "ARCHITECT_DOCS_LOG";

#[derive(Parser, Debug)]
#[command(name = "architect-docs-i18n", version, about)]
struct Cli {
    /// Site workspace holding `.architect-docs.json`, `locales/` and the content directory
    #[arg(long, global = true, value_name = "DIR")]
    workspace: Option<PathBuf>,

    /// Settings file to use instead of the workspace's `.architect-docs.json`
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate a dot-path key
    T {
        key: String,
        #[arg(long, default_value_t = Lang::DEFAULT)]
        lang: Lang,
    },

    /// Print a list of strings, one per line
    TArray {
        key: String,
        #[arg(long, default_value_t = Lang::DEFAULT)]
        lang: Lang,
    },

    /// Detect the language of a URL or path
    Lang { url: String },

    /// Localize a path into a language
    Localize {
        path: String,
        #[arg(long)]
        lang: Lang,
    },

    /// Path of the same page in another language
    Alternate {
        url: String,
        #[arg(long)]
        lang: Lang,
    },

    /// Print the latest version, or the version and doc slug of a content slug
    Version { slug: Option<String> },

    /// Check translations and content for inconsistencies
    Check,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("No latest version configured")]
    NoLatestVersion,
}

/// Loaded settings and, with a workspace, its file matcher.
struct Site {
    config: ConfigManager,
    matcher: Option<FileMatcher>,
}

impl Site {
    fn load(workspace: Option<&Path>, config_file: Option<&Path>) -> Result<Self, CliError> {
        let mut config = ConfigManager::new();
        let root = workspace.map(Path::to_path_buf);
        match config_file {
            Some(file) => config.load_file(file, root)?,
            None => config.load_settings(root)?,
        }

        let matcher = config
            .workspace_root()
            .map(|root| FileMatcher::new(root.clone(), config.get_settings()))
            .transpose()?;

        Ok(Self { config, matcher })
    }

    /// The workspace's translations, or `None` to use the embedded table.
    fn translations(&self) -> Result<Option<TranslationTree>, CliError> {
        let Some(matcher) = &self.matcher else {
            return Ok(None);
        };
        match load_translations(matcher) {
            Ok(tree) => Ok(Some(tree)),
            Err(LoadError::MissingFallback) => {
                tracing::warn!(
                    "No '{}' translations in {:?}, using the embedded table",
                    Lang::FALLBACK,
                    matcher.workspace_root()
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn content(&self) -> ContentSet {
        self.matcher.as_ref().map(load_collections).unwrap_or_default()
    }

    fn localizer(&self) -> PathLocalizer {
        PathLocalizer::from_settings(self.config.get_settings())
    }
}

fn init_logging(log_file: Option<&Path>) -> WorkerGuard {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let (writer, guard) = match log_file {
        Some(path) => {
            let directory = path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name().unwrap_or(path.as_os_str());
            tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name))
        }
        None => tracing_appender::non_blocking(io::stderr()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .init();

    guard
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let site = Site::load(cli.workspace.as_deref(), cli.config.as_deref())?;
    let mut out = io::stdout().lock();

    match cli.command {
        Command::T { key, lang } => {
            let owned = site.translations()?;
            let translator = Translator::new(owned.as_ref().unwrap_or_else(|| TranslationTree::builtin()));
            writeln!(out, "{}", translator.t(&key, lang))?;
        }
        Command::TArray { key, lang } => {
            let owned = site.translations()?;
            let translator = Translator::new(owned.as_ref().unwrap_or_else(|| TranslationTree::builtin()));
            for item in translator.t_array(&key, lang) {
                writeln!(out, "{item}")?;
            }
        }
        Command::Lang { url } => {
            writeln!(out, "{}", site.localizer().detect_language(&url))?;
        }
        Command::Localize { path, lang } => {
            writeln!(out, "{}", site.localizer().localize(&path, lang))?;
        }
        Command::Alternate { url, lang } => {
            writeln!(out, "{}", site.localizer().alternate(&url, lang))?;
        }
        Command::Version { slug: None } => {
            let versions = site.config.get_settings().versions();
            let latest = versions.latest().ok_or(CliError::NoLatestVersion)?;
            writeln!(out, "{}\t{}", latest.id, latest.label)?;
        }
        Command::Version { slug: Some(slug) } => {
            writeln!(out, "version: {}", get_version_from_slug(&slug).unwrap_or("-"))?;
            writeln!(out, "slug: {}", get_doc_slug(&slug))?;
        }
        Command::Check => {
            let owned = site.translations()?;
            let tree = owned.as_ref().unwrap_or_else(|| TranslationTree::builtin());
            let content = site.content();
            let report = check(tree, &content, site.config.get_settings());

            for finding in &report.findings {
                writeln!(out, "{finding}")?;
            }
            writeln!(
                out,
                "{} entries, {} errors, {} warnings",
                content.entries.len(),
                report.errors().count(),
                report.warnings().count()
            )?;
            if report.has_errors() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_file.as_deref());

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            let _ = writeln!(io::stderr(), "error: {e}");
            ExitCode::FAILURE
        }
    }
}
