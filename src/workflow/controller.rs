use std::sync::Arc;

use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    error::WorkflowError,
    models::{RecommendationResult, Title},
    services::RecommendationBackend,
};

use super::{
    pointer::{dismiss_on_outside_pointer, PointerDown, PointerHub, Subscription},
    state::{Command, Event, FetchTicket, WorkflowPolicy, WorkflowState},
    view::{project, PageView},
};

/// One page view of the search-select-fetch-render workflow
///
/// Events are applied one at a time under a single lock. Network calls run
/// in spawned tasks and re-enter through the same lock when they resolve,
/// so the caller never waits on the backend unless it awaits the returned
/// handle.
#[derive(Clone)]
pub struct WorkflowController {
    inner: Arc<Mutex<ControllerInner>>,
    backend: Arc<dyn RecommendationBackend>,
}

struct ControllerInner {
    state: WorkflowState,
    pointer: PointerHub,
    dismiss_listener: Option<Subscription>,
    torn_down: bool,
}

impl ControllerInner {
    /// Keeps the outside-pointer listener registered exactly while the
    /// suggestion panel is open.
    fn sync_dismiss_listener(&mut self) {
        match (self.state.suggestions_open(), self.dismiss_listener.is_some()) {
            (true, false) => {
                self.dismiss_listener = Some(self.pointer.subscribe(dismiss_on_outside_pointer));
            }
            (false, true) => self.dismiss_listener = None,
            _ => {}
        }
    }
}

impl WorkflowController {
    pub fn new(backend: Arc<dyn RecommendationBackend>, policy: WorkflowPolicy) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ControllerInner {
                state: WorkflowState::new(policy),
                pointer: PointerHub::new(),
                dismiss_listener: None,
                torn_down: false,
            })),
            backend,
        }
    }

    /// Starts the one catalog load of this view
    pub async fn mount(&self) -> Option<JoinHandle<()>> {
        self.dispatch(Event::Mounted).await
    }

    pub async fn set_search(&self, text: impl Into<String>) {
        self.dispatch(Event::SearchChanged(text.into())).await;
    }

    /// Chooses a suggestion; returns whether it was accepted
    ///
    /// A title that is not on screen right now is rejected, including one
    /// that is already the selection.
    pub async fn choose(&self, title: Title) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.torn_down {
            return false;
        }
        let accepted = inner.state.is_offered(&title);
        inner.state.apply(Event::SuggestionChosen(title));
        inner.sync_dismiss_listener();
        accepted
    }

    pub async fn clear_search(&self) {
        self.dispatch(Event::SearchCleared).await;
    }

    /// Enters a selection carried by the results route
    pub async fn navigate_to(&self, title: Title) {
        self.dispatch(Event::Navigated(title)).await;
    }

    /// Presses the "get recommendations" trigger
    pub async fn request_recommendations(&self) -> Option<JoinHandle<()>> {
        self.dispatch(Event::RecommendRequested).await
    }

    pub async fn pointer_down(&self, pointer: &PointerDown) {
        let events = {
            let inner = self.inner.lock().await;
            if inner.torn_down {
                return;
            }
            inner.pointer.dispatch(pointer)
        };

        for event in events {
            self.dispatch(event).await;
        }
    }

    /// Discards the view: later events and pending continuations are no-ops
    pub async fn teardown(&self) {
        let mut inner = self.inner.lock().await;
        inner.torn_down = true;
        inner.dismiss_listener = None;
        tracing::debug!("View torn down");
    }

    pub async fn is_torn_down(&self) -> bool {
        self.inner.lock().await.torn_down
    }

    pub async fn view(&self) -> PageView {
        project(&self.inner.lock().await.state)
    }

    /// Number of live document-level pointer listeners
    pub async fn pointer_listeners(&self) -> usize {
        self.inner.lock().await.pointer.listener_count()
    }

    async fn dispatch(&self, event: Event) -> Option<JoinHandle<()>> {
        let command = {
            let mut inner = self.inner.lock().await;
            if inner.torn_down {
                tracing::debug!(?event, "Ignoring event for torn down view");
                return None;
            }
            let command = inner.state.apply(event);
            inner.sync_dismiss_listener();
            command
        };

        command.map(|command| self.spawn(command))
    }

    /// Applies a network continuation; these never produce further commands.
    async fn resolve(&self, event: Event) {
        let mut inner = self.inner.lock().await;
        if inner.torn_down {
            tracing::debug!("Suppressing continuation for torn down view");
            return;
        }
        inner.state.apply(event);
        inner.sync_dismiss_listener();
    }

    fn spawn(&self, command: Command) -> JoinHandle<()> {
        let controller = self.clone();
        match command {
            Command::LoadCatalog => tokio::spawn(async move {
                let outcome = controller.load_catalog().await;
                controller.resolve(Event::CatalogLoaded(outcome)).await;
            }),
            Command::FetchRecommendations(ticket) => tokio::spawn(async move {
                let outcome = controller.fetch_recommendations(&ticket).await;
                controller
                    .resolve(Event::RecommendationsResolved { ticket, outcome })
                    .await;
            }),
        }
    }

    async fn load_catalog(&self) -> Result<Vec<Title>, WorkflowError> {
        match self.backend.fetch_catalog().await {
            Ok(titles) => {
                tracing::info!(titles = titles.len(), backend = self.backend.name(), "Catalog loaded");
                Ok(titles)
            }
            Err(e) => {
                tracing::warn!(error = %e, backend = self.backend.name(), "Catalog load failed");
                Err(WorkflowError::CatalogLoad)
            }
        }
    }

    async fn fetch_recommendations(
        &self,
        ticket: &FetchTicket,
    ) -> Result<RecommendationResult, WorkflowError> {
        let response = self
            .backend
            .fetch_recommendations(&ticket.title)
            .await
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    title = %ticket.title,
                    seq = ticket.seq,
                    "Recommendation fetch failed"
                );
                WorkflowError::RecommendationFetch
            })?;

        RecommendationResult::try_from(response)
    }
}
