//! Referral view session: the single owner of the canonical tree and its view state.
//!
//! Every mutation arrives as a discrete event on one thread, so no locking is
//! needed. Fetches are stamped with a [`FetchTicket`]; only the most recently
//! issued ticket may install a tree.

use tracing::{debug, info, instrument, warn};

use crate::application::error::ApplicationResult;
use crate::domain::{
    search, transform, ContainerSize, DomainError, DomainResult, ExpansionState, NodeDetails,
    NodeId, RawReferralRecord, ReferralTree, SelectionController, ViewportConfig,
    ViewportController,
};

/// Message shown by the host when a fetch did not produce a tree.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch referral data.";

/// Default depth below which nodes start collapsed.
pub const DEFAULT_INITIAL_DEPTH: usize = 2;

/// Stamp of an outstanding referral fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// What a completed fetch did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A new tree replaced the previous one
    Installed,
    /// The service reported no tree; the session now has none
    Cleared,
    /// Fetch or transform failed; the error indicator is raised
    Failed,
    /// A newer fetch was issued meanwhile; the result was dropped
    Stale,
}

/// Inbound UI events.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Search(String),
    ZoomIn,
    ZoomOut,
    ResetZoom,
    Resize(ContainerSize),
    /// Node click/tap: opens the detail view
    Activate(NodeId),
    CloseDetails,
    Toggle(NodeId),
    DismissError,
}

#[derive(Debug)]
pub struct ReferralSession {
    tree: Option<ReferralTree>,
    viewport: ViewportController,
    selection: SelectionController,
    expansion: ExpansionState,
    initial_depth: usize,
    search_term: String,
    issued: u64,
    outstanding: Option<FetchTicket>,
    error: Option<String>,
}

impl Default for ReferralSession {
    fn default() -> Self {
        Self::new(ViewportConfig::default(), DEFAULT_INITIAL_DEPTH)
    }
}

impl ReferralSession {
    pub fn new(viewport: ViewportConfig, initial_depth: usize) -> Self {
        Self {
            tree: None,
            viewport: ViewportController::new(viewport),
            selection: SelectionController::new(),
            expansion: ExpansionState::default(),
            initial_depth,
            search_term: String::new(),
            issued: 0,
            outstanding: None,
            error: None,
        }
    }

    pub fn tree(&self) -> Option<&ReferralTree> {
        self.tree.as_ref()
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn highlight_path(&self) -> &[NodeId] {
        self.selection.highlight_path()
    }

    pub fn is_loading(&self) -> bool {
        self.outstanding.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Detail card of the selected node, if any.
    pub fn details(&self) -> Option<NodeDetails> {
        self.selection.details(self.tree.as_ref()?)
    }

    /// Issue a new ticket; any earlier outstanding ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        let ticket = FetchTicket(self.issued);
        if let Some(previous) = self.outstanding.replace(ticket) {
            debug!("fetch {:?} superseded by {:?}", previous, ticket);
        }
        ticket
    }

    /// Apply a fetch result if `ticket` is still the latest one.
    #[instrument(level = "debug", skip(self, result))]
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: ApplicationResult<Option<RawReferralRecord>>,
    ) -> FetchOutcome {
        if self.outstanding != Some(ticket) {
            warn!("dropping stale referral response {:?}", ticket);
            return FetchOutcome::Stale;
        }
        self.outstanding = None;

        let tree = match result.and_then(|raw| Ok(transform(raw.as_ref())?)) {
            Ok(tree) => tree,
            Err(e) => {
                warn!("referral fetch failed: {}", e);
                self.error = Some(FETCH_FAILED_MESSAGE.to_string());
                return FetchOutcome::Failed;
            }
        };

        let outcome = if tree.is_some() {
            FetchOutcome::Installed
        } else {
            FetchOutcome::Cleared
        };
        self.install(tree);
        outcome
    }

    /// Replace the tree and rebuild the state keyed on it.
    fn install(&mut self, tree: Option<ReferralTree>) {
        self.expansion = match &tree {
            Some(tree) => ExpansionState::new(tree, self.initial_depth),
            None => ExpansionState::default(),
        };
        if let Some(tree) = &tree {
            info!("installed referral tree: {} nodes", tree.len());
        }
        self.tree = tree;
        self.error = None;
        self.selection.reset();
        let term = std::mem::take(&mut self.search_term);
        self.run_search(&term);
    }

    fn run_search(&mut self, term: &str) {
        self.search_term = term.to_string();
        let path = search(self.tree.as_ref(), term);
        self.expansion.reveal(&path);
        self.selection.set_highlight_path(self.tree.as_ref(), path);
    }

    /// Expand every node; not bound to a UI event.
    pub fn expand_all(&mut self) {
        self.expansion.expand_all();
    }

    fn known(&self, id: NodeId) -> DomainResult<NodeId> {
        match &self.tree {
            Some(tree) if tree.contains(id) => Ok(id),
            _ => Err(DomainError::UnknownNode(id)),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, event: ViewEvent) -> DomainResult<()> {
        match event {
            ViewEvent::Search(term) => self.run_search(&term),
            ViewEvent::ZoomIn => self.viewport.zoom_in(),
            ViewEvent::ZoomOut => self.viewport.zoom_out(),
            ViewEvent::ResetZoom => self.viewport.reset_zoom(),
            ViewEvent::Resize(size) => self.viewport.on_container_resize(size),
            ViewEvent::Activate(id) => {
                let id = self.known(id)?;
                self.selection.select_node(id);
            }
            ViewEvent::CloseDetails => self.selection.clear_selection(),
            ViewEvent::Toggle(id) => {
                let id = self.known(id)?;
                self.expansion.toggle(id);
            }
            ViewEvent::DismissError => self.error = None,
        }
        Ok(())
    }
}
