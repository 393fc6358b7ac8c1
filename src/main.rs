mod terminal;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use linepad_config::Config;
use linepad_editor::{
    EditingSession, FileService, Outcome, ProjectTreeState, RecordingSurface, SessionContext,
    SessionSettings, SystemClock, DEFAULT_VIEWPORT_HEIGHT,
};
use linepad_file_service::LocalFileService;
use linepad_keyboard::parse_key_script;
use linepad_logger::LogLevel;
use linepad_theme::ThemeSet;

/// Modal code editor with syntax highlighting
#[derive(Parser, Debug)]
#[command(name = "linepad", version, about)]
struct Cli {
    /// File to edit
    file: PathBuf,

    /// Replay a key script instead of reading the terminal, e.g. "ihi<Esc>:w<CR>"
    #[arg(long)]
    keys: Option<String>,

    /// Theme to use instead of the configured one
    #[arg(long)]
    theme: Option<String>,

    /// Print the final lines, mode and cursor
    #[arg(long)]
    dump: bool,
}

/// Collaborators shared by the scripted and interactive drivers.
pub struct Workspace {
    pub config: Config,
    pub path: PathBuf,
    pub files: LocalFileService,
    pub tree: ProjectTreeState,
    pub theme: ThemeSet,
}

impl Workspace {
    fn new(config: Config, path: PathBuf, theme_name: Option<&str>) -> Self {
        let theme_name = theme_name.unwrap_or(&config.general.theme).to_string();
        let theme = ThemeSet::by_name(&theme_name, Config::themes_dir().ok().as_deref());

        let files = LocalFileService::new();
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let entries = files.read_folder(&root, 0).unwrap_or_else(|err| {
            log::warn!("Could not list {}: {:#}", root.display(), err);
            Vec::new()
        });
        let tree = ProjectTreeState::new(root, entries);

        Self {
            config,
            path,
            files,
            tree,
            theme,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, load_error) = config_or_default(Config::load());
    init_logging(&config);
    if let Some(message) = load_error {
        log::warn!("{}", message);
        eprintln!("{}", message);
    }

    let path = std::fs::canonicalize(&cli.file)
        .with_context(|| format!("Cannot open {}", cli.file.display()))?;
    let mut workspace = Workspace::new(config, path, cli.theme.as_deref());

    match cli.keys {
        Some(script) => replay(&mut workspace, &script, cli.dump),
        None => terminal::run(&mut workspace),
    }
}

/// The loaded config, or the defaults plus a message saying why.
fn config_or_default(loaded: Result<Config>) -> (Config, Option<String>) {
    match loaded {
        Ok(config) => (config, None),
        Err(err) => (
            Config::default(),
            Some(format!("Using default config: {:#}", err)),
        ),
    }
}

fn init_logging(config: &Config) {
    let Ok(log_path) = config.log_file_path() else {
        return;
    };
    let level = config
        .logging
        .min_level
        .parse::<LogLevel>()
        .unwrap_or(LogLevel::Info);
    linepad_logger::init(log_path, config.logging.max_entries, level);
}

/// Feed a key script to a session painted on a recording surface.
fn replay(workspace: &mut Workspace, script: &str, dump: bool) -> Result<()> {
    let settings = SessionSettings::from_config(&workspace.config, DEFAULT_VIEWPORT_HEIGHT);
    let mut surface = RecordingSurface::new();
    let mut session = EditingSession::open(
        &workspace.path,
        settings,
        &mut workspace.files,
        &workspace.theme,
        &mut surface,
    )?;
    let clock = SystemClock;

    for input in parse_key_script(script) {
        let mut ctx = SessionContext {
            files: &mut workspace.files,
            tree: &mut workspace.tree,
            theme: &workspace.theme,
            surface: &mut surface,
            clock: &clock,
        };
        match session.handle_key(input, &mut ctx) {
            Ok(Outcome::Closed) => break,
            Ok(Outcome::Continue) => {}
            Err(err) => {
                eprintln!("Error: {}", err);
                ctx.surface.report_error(&err.to_string());
            }
        }
        session.settle_scroll(&mut surface);
    }

    if dump {
        print_session(&session);
    }
    Ok(())
}

fn print_session(session: &EditingSession) {
    for line in session.buffer().lines() {
        println!("{}", line);
    }
    println!(
        "-- {} -- {}:{}",
        session.mode(),
        session.cursor().row() + 1,
        session.cursor().column() + 1
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broken_config_falls_back_with_message() {
        let loaded = Config::validate_content("[editor]\ntab_size = \"four\"\n");
        let (config, message) = config_or_default(loaded);
        assert_eq!(config, Config::default());
        let message = message.unwrap();
        assert!(message.starts_with("Using default config: Invalid config"));
    }

    #[test]
    fn test_loaded_config_is_kept() {
        let loaded = Config::validate_content("[editor]\ntab_size = 2\n");
        let (config, message) = config_or_default(loaded);
        assert_eq!(config.editor.tab_size, 2);
        assert!(message.is_none());
    }
}
