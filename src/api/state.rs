use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::{sync::RwLock, task::JoinHandle};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    services::RecommendationBackend,
    workflow::{WorkflowController, WorkflowPolicy},
};

/// A registered page view and the last time a request reached it
#[derive(Clone)]
pub struct ViewSession {
    pub controller: WorkflowController,
    pub last_touched: Instant,
}

impl ViewSession {
    fn new(controller: WorkflowController) -> Self {
        Self {
            controller,
            last_touched: Instant::now(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn RecommendationBackend>,
    pub policy: WorkflowPolicy,
    pub views: Arc<RwLock<HashMap<Uuid, ViewSession>>>,
}

impl AppState {
    pub fn new(backend: Arc<dyn RecommendationBackend>, policy: WorkflowPolicy) -> Self {
        Self {
            backend,
            policy,
            views: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a fresh, unregistered page view
    pub fn new_view(&self) -> WorkflowController {
        WorkflowController::new(self.backend.clone(), self.policy)
    }

    /// Creates a page view and registers it as a session
    pub async fn open_view(&self) -> (Uuid, WorkflowController) {
        let id = Uuid::new_v4();
        let controller = self.new_view();
        self.views
            .write()
            .await
            .insert(id, ViewSession::new(controller.clone()));
        (id, controller)
    }

    /// Looks a session up and marks it as active
    pub async fn view(&self, id: Uuid) -> AppResult<WorkflowController> {
        let mut views = self.views.write().await;
        let session = views
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("View {} not found", id)))?;
        session.last_touched = Instant::now();
        Ok(session.controller.clone())
    }

    /// Unregisters a session and tears its view down
    pub async fn close_view(&self, id: Uuid) -> AppResult<()> {
        let session = self
            .views
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("View {} not found", id)))?;
        session.controller.teardown().await;
        Ok(())
    }

    pub async fn open_views(&self) -> usize {
        self.views.read().await.len()
    }

    /// Tears down every session untouched for at least `max_idle`.
    ///
    /// Returns the number of evicted sessions.
    pub async fn sweep_idle(&self, max_idle: Duration) -> usize {
        let expired: Vec<(Uuid, WorkflowController)> = {
            let mut views = self.views.write().await;
            let ids: Vec<Uuid> = views
                .iter()
                .filter(|(_, session)| session.last_touched.elapsed() >= max_idle)
                .map(|(id, _)| *id)
                .collect();
            ids.into_iter()
                .filter_map(|id| views.remove(&id).map(|session| (id, session.controller)))
                .collect()
        };

        for (id, controller) in &expired {
            controller.teardown().await;
            tracing::info!(view_id = %id, "Idle view expired");
        }
        expired.len()
    }

    /// Runs `sweep_idle` periodically for the lifetime of the server
    pub fn spawn_view_sweeper(&self, max_idle: Duration) -> JoinHandle<()> {
        let state = self.clone();
        let period = (max_idle / 2).max(Duration::from_millis(10));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let evicted = state.sweep_idle(max_idle).await;
                if evicted > 0 {
                    let open_views = state.open_views().await;
                    tracing::debug!(
                        evicted,
                        open_views,
                        "Swept idle views"
                    );
                }
            }
        })
    }
}
