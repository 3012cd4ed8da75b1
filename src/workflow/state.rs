use serde::{Deserialize, Serialize};

use crate::{
    error::WorkflowError,
    models::{Catalog, RecommendationResult, Title},
};

use super::filter::filter_suggestions;

/// What the search box shows after a suggestion is chosen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelectionTextPolicy {
    /// Empty the search box
    #[default]
    Clear,
    /// Put the chosen title in the search box
    Repopulate,
}

/// Per-view tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowPolicy {
    pub max_suggestions: usize,
    pub selection_text: SelectionTextPolicy,
}

impl Default for WorkflowPolicy {
    fn default() -> Self {
        Self {
            max_suggestions: 8,
            selection_text: SelectionTextPolicy::Clear,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading,
    Loaded,
    Failed,
}

/// Lifecycle of the recommendation fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Loading,
    Success(RecommendationResult),
    Error(WorkflowError),
}

/// Tag carried by an in-flight recommendation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub title: Title,
    pub seq: u64,
}

/// Inputs to the workflow
#[derive(Debug, Clone)]
pub enum Event {
    Mounted,
    CatalogLoaded(Result<Vec<Title>, WorkflowError>),
    SearchChanged(String),
    SuggestionChosen(Title),
    SearchCleared,
    SuggestionsDismissed,
    /// Selection carried by the results route rather than picked from suggestions
    Navigated(Title),
    RecommendRequested,
    RecommendationsResolved {
        ticket: FetchTicket,
        outcome: Result<RecommendationResult, WorkflowError>,
    },
}

/// Side effects the owner of the state must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadCatalog,
    FetchRecommendations(FetchTicket),
}

/// All state of a single page view
#[derive(Debug, Clone)]
pub struct WorkflowState {
    policy: WorkflowPolicy,
    catalog: Catalog,
    catalog_status: CatalogStatus,
    catalog_requested: bool,
    catalog_error: Option<WorkflowError>,
    search_text: String,
    suggestions_open: bool,
    selected: Option<Title>,
    request: RequestState,
    in_flight: Option<FetchTicket>,
    next_seq: u64,
    interacted: bool,
}

impl WorkflowState {
    pub fn new(policy: WorkflowPolicy) -> Self {
        Self {
            policy,
            catalog: Catalog::default(),
            catalog_status: CatalogStatus::Loading,
            catalog_requested: false,
            catalog_error: None,
            search_text: String::new(),
            suggestions_open: false,
            selected: None,
            request: RequestState::Idle,
            in_flight: None,
            next_seq: 0,
            interacted: false,
        }
    }

    pub fn policy(&self) -> WorkflowPolicy {
        self.policy
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_status(&self) -> &CatalogStatus {
        &self.catalog_status
    }

    pub fn catalog_error(&self) -> Option<&WorkflowError> {
        self.catalog_error.as_ref()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn selected(&self) -> Option<&Title> {
        self.selected.as_ref()
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn in_flight(&self) -> Option<&FetchTicket> {
        self.in_flight.as_ref()
    }

    pub fn has_interacted(&self) -> bool {
        self.interacted
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.request, RequestState::Loading)
    }

    /// Suggestions derived from the current catalog and search text
    pub fn suggestions(&self) -> Vec<&Title> {
        filter_suggestions(
            self.catalog.titles(),
            &self.search_text,
            self.policy.max_suggestions,
        )
    }

    /// Whether the suggestion panel is shown
    pub fn suggestions_open(&self) -> bool {
        self.suggestions_open && !self.search_text.is_empty()
    }

    /// Whether `title` is one of the suggestions currently on screen
    pub fn is_offered(&self, title: &Title) -> bool {
        self.suggestions_open() && self.suggestions().contains(&title)
    }

    /// Applies one event, returning the side effect it requires, if any.
    pub fn apply(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Mounted => self.on_mounted(),
            Event::CatalogLoaded(outcome) => {
                self.on_catalog_loaded(outcome);
                None
            }
            Event::SearchChanged(text) => {
                self.on_search_changed(text);
                None
            }
            Event::SuggestionChosen(title) => {
                self.on_suggestion_chosen(title);
                None
            }
            Event::SearchCleared => {
                self.reset_interaction();
                None
            }
            Event::SuggestionsDismissed => {
                self.suggestions_open = false;
                None
            }
            Event::Navigated(title) => {
                self.select(title);
                None
            }
            Event::RecommendRequested => self.on_recommend_requested(),
            Event::RecommendationsResolved { ticket, outcome } => {
                self.on_recommendations_resolved(ticket, outcome);
                None
            }
        }
    }

    fn on_mounted(&mut self) -> Option<Command> {
        if self.catalog_requested {
            tracing::debug!("Catalog already requested for this view");
            return None;
        }
        self.catalog_requested = true;
        Some(Command::LoadCatalog)
    }

    fn on_catalog_loaded(&mut self, outcome: Result<Vec<Title>, WorkflowError>) {
        if self.catalog_status != CatalogStatus::Loading {
            tracing::debug!("Ignoring repeated catalog completion");
            return;
        }

        match outcome {
            Ok(titles) => {
                self.catalog = Catalog::new(titles);
                self.catalog_status = CatalogStatus::Loaded;
                tracing::debug!(titles = self.catalog.len(), "Catalog ready for search");
            }
            Err(error) => {
                self.catalog = Catalog::default();
                self.catalog_status = CatalogStatus::Failed;
                self.catalog_error = Some(error);
            }
        }
    }

    fn on_search_changed(&mut self, text: String) {
        if self.catalog_status == CatalogStatus::Loading {
            tracing::debug!("Search input is disabled while the catalog loads");
            return;
        }
        self.suggestions_open = !text.is_empty();
        self.search_text = text;
        self.interacted = true;
    }

    fn on_suggestion_chosen(&mut self, title: Title) {
        if !self.is_offered(&title) {
            tracing::debug!(title = %title, "Ignoring choice that is not a current suggestion");
            return;
        }

        self.search_text = match self.policy.selection_text {
            SelectionTextPolicy::Clear => String::new(),
            SelectionTextPolicy::Repopulate => title.to_string(),
        };
        self.select(title);
    }

    fn select(&mut self, title: Title) {
        self.selected = Some(title);
        self.suggestions_open = false;
        self.request = RequestState::Idle;
        self.in_flight = None;
        self.interacted = true;
    }

    fn reset_interaction(&mut self) {
        self.search_text.clear();
        self.suggestions_open = false;
        self.selected = None;
        self.request = RequestState::Idle;
        self.in_flight = None;
        self.catalog_error = None;
        self.interacted = false;
    }

    fn on_recommend_requested(&mut self) -> Option<Command> {
        if self.is_loading() {
            tracing::debug!("Recommendation trigger is disabled while loading");
            return None;
        }

        let Some(title) = self.selected.clone() else {
            self.request = RequestState::Error(WorkflowError::NoSelection);
            self.interacted = true;
            return None;
        };

        self.next_seq += 1;
        let ticket = FetchTicket {
            title,
            seq: self.next_seq,
        };
        self.request = RequestState::Loading;
        self.in_flight = Some(ticket.clone());
        self.interacted = true;
        Some(Command::FetchRecommendations(ticket))
    }

    fn on_recommendations_resolved(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<RecommendationResult, WorkflowError>,
    ) {
        let current = self.in_flight.as_ref() == Some(&ticket)
            && self.selected.as_ref() == Some(&ticket.title);
        if !current {
            tracing::debug!(
                title = %ticket.title,
                seq = ticket.seq,
                "Discarding stale recommendation result"
            );
            return;
        }

        self.in_flight = None;
        self.request = match outcome {
            Ok(result) => RequestState::Success(result),
            Err(error) => RequestState::Error(error),
        };
    }
}
