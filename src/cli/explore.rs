//! Line-driven explorer: every input line becomes one session event.

use std::io::BufRead;

use itertools::Itertools;

use crate::application::{ReferralSession, ViewEvent};
use crate::cli::error::CliResult;
use crate::domain::{search, ContainerSize, NodeId};

/// One parsed explorer command.
#[derive(Debug, Clone, PartialEq)]
pub enum ExploreCommand {
    Search(String),
    ZoomIn,
    ZoomOut,
    ResetZoom,
    Resize { width: f64, height: f64 },
    Select(String),
    Close,
    Toggle(String),
    ExpandAll,
    Refresh,
    Show,
    Status,
    Dismiss,
    Help,
    Quit,
}

pub const HELP: &str = "\
search [term]        highlight path to first match (no term clears)
zoom in|out|reset    change zoom
resize <w> <h>       report new container size
select <name>        open details of first match
close                close details
toggle <name>        expand/collapse first match
expand               expand all nodes
refresh              fetch the tree again
show                 print the tree
status               print view state
dismiss              clear the error indicator
quit                 leave";

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<ExploreCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let require = |what: &str| {
        if rest.is_empty() {
            Err(format!("{} needs a name", what))
        } else {
            Ok(rest.to_string())
        }
    };

    match verb {
        "search" | "/" => Ok(ExploreCommand::Search(rest.to_string())),
        "zoom" => match rest {
            "in" | "+" => Ok(ExploreCommand::ZoomIn),
            "out" | "-" => Ok(ExploreCommand::ZoomOut),
            "reset" | "0" => Ok(ExploreCommand::ResetZoom),
            other => Err(format!("unknown zoom direction: '{}'", other)),
        },
        "resize" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            match parts.as_slice() {
                [w, h] => {
                    let width = w.parse().map_err(|_| format!("invalid width: {}", w))?;
                    let height = h.parse().map_err(|_| format!("invalid height: {}", h))?;
                    Ok(ExploreCommand::Resize { width, height })
                }
                _ => Err("usage: resize <width> <height>".to_string()),
            }
        }
        "select" => require("select").map(ExploreCommand::Select),
        "close" => Ok(ExploreCommand::Close),
        "toggle" => require("toggle").map(ExploreCommand::Toggle),
        "expand" => Ok(ExploreCommand::ExpandAll),
        "refresh" => Ok(ExploreCommand::Refresh),
        "show" | "" => Ok(ExploreCommand::Show),
        "status" => Ok(ExploreCommand::Status),
        "dismiss" => Ok(ExploreCommand::Dismiss),
        "help" | "?" => Ok(ExploreCommand::Help),
        "quit" | "exit" | "q" => Ok(ExploreCommand::Quit),
        other => Err(format!("unknown command: '{}' (try 'help')", other)),
    }
}

/// Node addressed by a name fragment: the last node of its search path.
pub fn resolve(session: &ReferralSession, name: &str) -> Option<NodeId> {
    search(session.tree(), name).last().copied()
}

/// One-line summary of the view state.
pub fn status_line(session: &ReferralSession) -> String {
    let anchor = session.viewport().translate_anchor();
    let size = session.viewport().container_size();
    let highlight = session
        .tree()
        .map(|tree| tree.names(session.highlight_path()).iter().join(" > "))
        .unwrap_or_default();
    let selected = session.details().map(|d| d.name).unwrap_or_default();
    format!(
        "zoom {:.1} | container {}x{} | anchor ({}, {}) | highlight [{}] | selected [{}]{}",
        session.viewport().zoom_factor(),
        size.width(),
        size.height(),
        anchor.x,
        anchor.y,
        highlight,
        selected,
        session
            .error()
            .map(|e| format!(" | error: {}", e))
            .unwrap_or_default()
    )
}

/// What the caller should do after [`step`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    Continue,
    Refresh,
    Print(String),
    Quit,
}

/// Apply one command to the session; rendering and fetching are left to the caller.
pub fn step(session: &mut ReferralSession, command: ExploreCommand) -> CliResult<StepResult> {
    let event = match command {
        ExploreCommand::Search(term) => ViewEvent::Search(term),
        ExploreCommand::ZoomIn => ViewEvent::ZoomIn,
        ExploreCommand::ZoomOut => ViewEvent::ZoomOut,
        ExploreCommand::ResetZoom => ViewEvent::ResetZoom,
        ExploreCommand::Resize { width, height } => {
            match ContainerSize::new(width, height) {
                Ok(size) => ViewEvent::Resize(size),
                Err(e) => return Ok(StepResult::Print(e.to_string())),
            }
        }
        ExploreCommand::Select(name) => match resolve(session, &name) {
            Some(id) => ViewEvent::Activate(id),
            None => return Ok(StepResult::Print(format!("no referral matches '{}'", name))),
        },
        ExploreCommand::Toggle(name) => match resolve(session, &name) {
            Some(id) => ViewEvent::Toggle(id),
            None => return Ok(StepResult::Print(format!("no referral matches '{}'", name))),
        },
        ExploreCommand::Close => ViewEvent::CloseDetails,
        ExploreCommand::Dismiss => ViewEvent::DismissError,
        ExploreCommand::ExpandAll => {
            session.expand_all();
            return Ok(StepResult::Continue);
        }
        ExploreCommand::Refresh => return Ok(StepResult::Refresh),
        ExploreCommand::Show => return Ok(StepResult::Continue),
        ExploreCommand::Status => return Ok(StepResult::Print(status_line(session))),
        ExploreCommand::Help => return Ok(StepResult::Print(HELP.to_string())),
        ExploreCommand::Quit => return Ok(StepResult::Quit),
    };
    session
        .apply(event)
        .map_err(crate::application::ApplicationError::from)?;
    Ok(StepResult::Continue)
}

/// Read commands until EOF or `quit`, calling `on_step` after each one.
pub fn run<R, F>(input: R, session: &mut ReferralSession, mut on_step: F) -> CliResult<()>
where
    R: BufRead,
    F: FnMut(&mut ReferralSession, Result<StepResult, String>) -> CliResult<bool>,
{
    for line in input.lines() {
        let line = line.map_err(|e| crate::infrastructure::InfraError::io("read stdin", e))?;
        let result = match parse_command(&line) {
            Ok(command) => step(session, command).map_err(|e| e.to_string()),
            Err(message) => Err(message),
        };
        if !on_step(session, result)? {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("search bo", ExploreCommand::Search("bo".into()))]
    #[case("search", ExploreCommand::Search(String::new()))]
    #[case("zoom in", ExploreCommand::ZoomIn)]
    #[case("zoom -", ExploreCommand::ZoomOut)]
    #[case("zoom reset", ExploreCommand::ResetZoom)]
    #[case("resize 800 400", ExploreCommand::Resize { width: 800.0, height: 400.0 })]
    #[case("select  Bob Smith ", ExploreCommand::Select("Bob Smith".into()))]
    #[case("", ExploreCommand::Show)]
    #[case("q", ExploreCommand::Quit)]
    fn given_valid_line_when_parsing_then_returns_command(
        #[case] line: &str,
        #[case] expected: ExploreCommand,
    ) {
        assert_eq!(parse_command(line), Ok(expected));
    }

    #[rstest]
    #[case("zoom sideways")]
    #[case("resize 800")]
    #[case("resize wide 400")]
    #[case("select")]
    #[case("fly")]
    fn given_invalid_line_when_parsing_then_returns_message(#[case] line: &str) {
        assert!(parse_command(line).is_err());
    }
}
