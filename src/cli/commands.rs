//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, FetchOutcome, ReferralSession, ViewEvent};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::explore::{self, StepResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::ContainerSize;
use crate::infrastructure::{InfraError, ServiceContainer};
use crate::util::path::expand_path;

/// Placeholder user id for file sources, which ignore it.
const FILE_USER: &str = "file";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { search, expand_all }) => cmd_tree(cli, search.as_deref(), *expand_all),
        Some(Commands::Search { term }) => cmd_search(cli, term),
        Some(Commands::Show { name }) => cmd_show(cli, name),
        Some(Commands::Layout {
            width,
            height,
            zoom_in,
            zoom_out,
            search,
            expand_all,
        }) => cmd_layout(
            cli,
            LayoutArgs {
                width: *width,
                height: *height,
                zoom_in: *zoom_in,
                zoom_out: *zoom_out,
                search: search.as_deref(),
                expand_all: *expand_all,
            },
        ),
        Some(Commands::Explore) => cmd_explore(cli),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| InfraError::io("print help", e))?;
            Ok(())
        }
    }
}

/// Settings with command-line overrides applied.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let config_path = cli.config.as_deref().map(expand_path);
    let mut settings = Settings::load(config_path.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        settings.api.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(user) = &cli.user {
        settings.api.user_id = Some(user.clone());
    }
    Ok(settings)
}

struct Connection {
    container: ServiceContainer,
    user_id: String,
}

impl Connection {
    fn open(cli: &Cli) -> CliResult<Self> {
        let settings = load_settings(cli)?;
        let file = cli.file.as_deref().map(expand_path);
        let user_id = match (&settings.api.user_id, &file) {
            (Some(user), _) => user.clone(),
            (None, Some(_)) => FILE_USER.to_string(),
            (None, None) => {
                return Err(CliError::InvalidArgs(
                    "no user: pass --user, set api.user_id, or read from --file".into(),
                ))
            }
        };
        let container = ServiceContainer::new(settings, file)?;
        Ok(Self { container, user_id })
    }

    /// Fresh session with the tree loaded; a failed fetch is an error here.
    fn load(&self) -> CliResult<ReferralSession> {
        let mut session = self.container.session()?;
        match self.container.referrals.refresh(&mut session, &self.user_id) {
            FetchOutcome::Failed | FetchOutcome::Stale => Err(CliError::Unavailable(
                session.error().unwrap_or("referral fetch failed").to_string(),
            )),
            FetchOutcome::Installed | FetchOutcome::Cleared => Ok(session),
        }
    }
}

fn apply(session: &mut ReferralSession, event: ViewEvent) -> CliResult<()> {
    session.apply(event).map_err(ApplicationError::from)?;
    Ok(())
}

fn print_tree(conn: &Connection, session: &ReferralSession) {
    match session.tree() {
        Some(tree) => output::info(&conn.container.renderer().outline(
            tree,
            session.selection(),
            session.expansion(),
            true,
        )),
        None => output::warning("no referral tree for this user"),
    }
}

#[instrument(skip(cli))]
fn cmd_tree(cli: &Cli, search: Option<&str>, expand_all: bool) -> CliResult<()> {
    let conn = Connection::open(cli)?;
    let mut session = conn.load()?;
    if let Some(term) = search {
        apply(&mut session, ViewEvent::Search(term.to_string()))?;
        if session.highlight_path().is_empty() && !term.trim().is_empty() {
            output::warning(&format!("no referral matches '{}'", term));
        }
    }
    if expand_all {
        session.expand_all();
    }
    print_tree(&conn, &session);
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_search(cli: &Cli, term: &str) -> CliResult<()> {
    let conn = Connection::open(cli)?;
    let mut session = conn.load()?;
    apply(&mut session, ViewEvent::Search(term.to_string()))?;
    let path = session.highlight_path();
    match session.tree() {
        Some(tree) if !path.is_empty() => {
            output::breadcrumb(&tree.names(path));
            Ok(())
        }
        _ => Err(CliError::NotFound(term.to_string())),
    }
}

#[instrument(skip(cli))]
fn cmd_show(cli: &Cli, name: &str) -> CliResult<()> {
    let conn = Connection::open(cli)?;
    let mut session = conn.load()?;
    let id = explore::resolve(&session, name).ok_or_else(|| CliError::NotFound(name.to_string()))?;
    apply(&mut session, ViewEvent::Activate(id))?;
    let details = session
        .details()
        .ok_or_else(|| CliError::NotFound(name.to_string()))?;
    output::details(&details);
    Ok(())
}

#[derive(Debug)]
struct LayoutArgs<'a> {
    width: Option<f64>,
    height: Option<f64>,
    zoom_in: u32,
    zoom_out: u32,
    search: Option<&'a str>,
    expand_all: bool,
}

#[instrument(skip(cli))]
fn cmd_layout(cli: &Cli, args: LayoutArgs<'_>) -> CliResult<()> {
    let conn = Connection::open(cli)?;
    let mut session = conn.load()?;

    if args.width.is_some() || args.height.is_some() {
        let current = session.viewport().container_size();
        let size = ContainerSize::new(
            args.width.unwrap_or(current.width()),
            args.height.unwrap_or(current.height()),
        )
        .map_err(ApplicationError::from)?;
        apply(&mut session, ViewEvent::Resize(size))?;
    }
    for _ in 0..args.zoom_in {
        apply(&mut session, ViewEvent::ZoomIn)?;
    }
    for _ in 0..args.zoom_out {
        apply(&mut session, ViewEvent::ZoomOut)?;
    }
    if let Some(term) = args.search {
        apply(&mut session, ViewEvent::Search(term.to_string()))?;
    }
    if args.expand_all {
        session.expand_all();
    }

    let Some(tree) = session.tree() else {
        output::warning("no referral tree for this user");
        return Ok(());
    };
    let scene = conn.container.renderer().render(
        tree,
        session.viewport(),
        session.selection(),
        session.expansion(),
    );
    debug!("scene with {} nodes", scene.nodes.len());
    let json = serde_json::to_string_pretty(&scene).map_err(|e| InfraError::encode("scene", e))?;
    output::info(&json);
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_explore(cli: &Cli) -> CliResult<()> {
    let conn = Connection::open(cli)?;
    let mut session = conn.container.session()?;
    let outcome = conn.container.referrals.refresh(&mut session, &conn.user_id);
    report_refresh(&session, outcome);
    print_tree(&conn, &session);
    output::prompt("refnet>");

    let stdin = io::stdin();
    explore::run(stdin.lock(), &mut session, |session, result| {
        let keep_going = match result {
            Ok(StepResult::Quit) => false,
            Ok(StepResult::Refresh) => {
                let outcome = conn.container.referrals.refresh(session, &conn.user_id);
                report_refresh(session, outcome);
                print_tree(&conn, session);
                true
            }
            Ok(StepResult::Print(text)) => {
                output::info(&text);
                true
            }
            Ok(StepResult::Continue) => {
                print_tree(&conn, session);
                output::status(&explore::status_line(session));
                if let Some(details) = session.details() {
                    output::details(&details);
                }
                true
            }
            Err(message) => {
                output::error(&message);
                true
            }
        };
        if keep_going {
            output::prompt("refnet>");
        }
        Ok(keep_going)
    })
}

fn report_refresh(session: &ReferralSession, outcome: FetchOutcome) {
    match outcome {
        FetchOutcome::Installed => {
            if let Some(tree) = session.tree() {
                output::success(&format!("loaded {} referrals", tree.len()));
            }
        }
        FetchOutcome::Cleared => output::warning("no referral tree for this user"),
        FetchOutcome::Failed => {
            output::error(session.error().unwrap_or("referral fetch failed"))
        }
        FetchOutcome::Stale => debug!("stale refresh ignored"),
    }
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let describe = |path: &std::path::Path| {
                let state = if path.exists() { "exists" } else { "not found" };
                format!("{} ({})", path.display(), state)
            };
            match global_config_path() {
                Some(path) => output::field("Global", &describe(&path)),
                None => output::field("Global", "unavailable"),
            }
            let local = cli
                .config
                .as_deref()
                .map(expand_path)
                .unwrap_or_else(|| local_config_path(std::path::Path::new(".")));
            output::field("Local", &describe(&local));
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::InvalidArgs("cannot determine global config directory".into())
                })?
            } else {
                local_config_path(std::path::Path::new("."))
            };
            if path.exists() {
                return Err(CliError::InvalidArgs(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}
