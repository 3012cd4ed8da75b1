//! Search-select-fetch-render workflow of a single page view.
//!
//! `state` holds the reducer, `filter` and `view` are pure derivations of
//! that state, `pointer` scopes document-level listeners and `controller`
//! drives it all against a [`RecommendationBackend`](crate::services::RecommendationBackend).

pub mod controller;
pub mod filter;
pub mod pointer;
pub mod state;
pub mod view;

pub use controller::WorkflowController;
pub use filter::filter_suggestions;
pub use pointer::{PointerDown, PointerHub, Subscription, SEARCH_CONTROL_ID};
pub use state::{
    CatalogStatus, Command, Event, FetchTicket, RequestState, SelectionTextPolicy,
    WorkflowPolicy, WorkflowState,
};
pub use view::{project, Card, PageView, Panel, SearchControl, SuggestionPanel};
