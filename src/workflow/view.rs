use serde::Serialize;

use super::state::{CatalogStatus, RequestState, WorkflowState};

pub const PLACEHOLDER_POSTER: &str = "/placeholder.svg";
pub const FALLBACK_POSTER: &str = "/placeholder.svg?height=300&width=200";

const LOADING_CATALOG_PLACEHOLDER: &str = "Loading movies...";
const SEARCH_PLACEHOLDER: &str = "Search for a movie...";
const LOADING_MESSAGE: &str = "Finding perfect recommendations...";
const EMPTY_MESSAGE: &str = "No recommendations found";
const IDLE_PROMPT: &str = "Choose a movie you love to discover your next favorite";

/// Everything a page needs to draw one frame
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageView {
    pub search: SearchControl,
    pub selected: Option<String>,
    pub trigger_enabled: bool,
    pub banner: Option<String>,
    pub panel: Panel,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchControl {
    pub disabled: bool,
    pub placeholder: String,
    pub text: String,
    pub suggestions: Option<SuggestionPanel>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SuggestionPanel {
    pub items: Vec<String>,
}

impl SuggestionPanel {
    /// Drives the "No movies found" row
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The single result area below the search control
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Panel {
    Loading { message: String },
    Error { message: String },
    Populated { cards: Vec<Card> },
    Empty { message: String },
    Idle { prompt: String },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub poster: String,
    /// Image to swap in when `poster` fails to load
    pub fallback: String,
}

/// Projects workflow state onto the page.
pub fn project(state: &WorkflowState) -> PageView {
    let catalog_loading = *state.catalog_status() == CatalogStatus::Loading;

    let suggestions = state.suggestions_open().then(|| SuggestionPanel {
        items: state
            .suggestions()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
    });

    PageView {
        search: SearchControl {
            disabled: catalog_loading,
            placeholder: if catalog_loading {
                LOADING_CATALOG_PLACEHOLDER
            } else {
                SEARCH_PLACEHOLDER
            }
            .to_string(),
            text: state.search_text().to_string(),
            suggestions,
        },
        selected: state.selected().map(ToString::to_string),
        trigger_enabled: !state.is_loading(),
        banner: state.catalog_error().map(ToString::to_string),
        panel: project_panel(state),
    }
}

fn project_panel(state: &WorkflowState) -> Panel {
    match state.request() {
        RequestState::Loading => Panel::Loading {
            message: LOADING_MESSAGE.to_string(),
        },
        RequestState::Error(error) => Panel::Error {
            message: error.to_string(),
        },
        RequestState::Success(result) if result.is_empty() => Panel::Empty {
            message: EMPTY_MESSAGE.to_string(),
        },
        RequestState::Success(result) => Panel::Populated {
            cards: result
                .items()
                .iter()
                .map(|item| Card {
                    title: item.title.to_string(),
                    poster: if item.poster.trim().is_empty() {
                        PLACEHOLDER_POSTER.to_string()
                    } else {
                        item.poster.clone()
                    },
                    fallback: FALLBACK_POSTER.to_string(),
                })
                .collect(),
        },
        RequestState::Idle => Panel::Idle {
            prompt: match state.selected() {
                Some(title) if state.has_interacted() => {
                    format!("Get recommendations for {title}")
                }
                _ => IDLE_PROMPT.to_string(),
            },
        },
    }
}
