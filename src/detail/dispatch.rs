use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::{JoinError, JoinHandle},
};
use tokio_util::sync::CancellationToken;

use crate::types::MovieDetail;

use super::MovieDetailView;

/// Background tasks that are cancelled together.
pub struct TaskGroup {
    runtime: Handle,
    token: CancellationToken,
}

impl TaskGroup {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            token: CancellationToken::new(),
        }
    }

    /// Spawns `task` on the background runtime.
    ///
    /// The task is dropped at its next await point once either the returned
    /// handle or the whole group is cancelled.
    pub fn submit<F>(&self, task: F) -> TaskHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.token.child_token();
        let cancelled = token.clone();
        let join = self.runtime.spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = task => {}
            }
        });
        TaskHandle { token, join }
    }

    pub fn cancel_all(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

/// Handle to a task submitted to a [`TaskGroup`].
///
/// Awaiting the handle waits for the task to finish or be cancelled.
#[derive(Debug)]
pub struct TaskHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl TaskHandle {
    /// Cancels this task only; the rest of its group keeps running.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Future for TaskHandle {
    type Output = Result<(), JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.join).poll(cx)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ViewUpdate {
    ShowProgress,
    HideProgress,
    Error(String),
    Detail(MovieDetail),
    FavoriteIcon(bool),
}

struct Delivery {
    token: CancellationToken,
    update: ViewUpdate,
}

/// Posts view updates to the [`UiLoop`] of one attachment.
#[derive(Clone)]
pub(crate) struct UiSender {
    token: CancellationToken,
    tx: UnboundedSender<Delivery>,
}

impl UiSender {
    pub(crate) fn post(&self, update: ViewUpdate) {
        if self.token.is_cancelled() {
            return;
        }
        // receiver gone means the host stopped draining; nothing to deliver to
        let _ = self.tx.send(Delivery {
            token: self.token.clone(),
            update,
        });
    }
}

/// The UI context: owns the view and applies updates in posting order.
///
/// The host drains it from whichever task plays the UI role, either with
/// [`UiLoop::run_pending`] or [`UiLoop::run_until`]. Updates whose attachment
/// was detached are discarded instead of applied.
pub struct UiLoop<V> {
    view: V,
    rx: UnboundedReceiver<Delivery>,
}

pub(crate) fn ui_channel<V: MovieDetailView>(
    view: V,
    token: CancellationToken,
) -> (UiSender, UiLoop<V>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (UiSender { token, tx }, UiLoop { view, rx })
}

impl<V: MovieDetailView> UiLoop<V> {
    /// Applies every queued update without waiting; returns how many reached
    /// the view.
    pub fn run_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(delivery) = self.rx.try_recv() {
            if self.apply(delivery) {
                applied += 1;
            }
        }
        applied
    }

    /// Applies updates as they arrive until `task` completes, then drains
    /// whatever the task posted last.
    ///
    /// Takes the handle by value or as `&mut TaskHandle`, the latter so the
    /// host can still cancel it once this future is dropped.
    pub async fn run_until<F>(&mut self, mut task: F) -> Result<(), JoinError>
    where
        F: Future<Output = Result<(), JoinError>> + Unpin,
    {
        let result = loop {
            tokio::select! {
                Some(delivery) = self.rx.recv() => {
                    self.apply(delivery);
                }
                res = &mut task => break res,
            }
        };
        self.run_pending();
        result
    }

    /// Applies updates until every sender is gone, i.e. the presenter was
    /// detached and all of its tasks finished.
    pub async fn run(mut self) -> V {
        while let Some(delivery) = self.rx.recv().await {
            self.apply(delivery);
        }
        self.view
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    fn apply(&mut self, delivery: Delivery) -> bool {
        if delivery.token.is_cancelled() {
            return false;
        }

        match delivery.update {
            ViewUpdate::ShowProgress => self.view.show_progress(),
            ViewUpdate::HideProgress => self.view.hide_progress(),
            ViewUpdate::Error(message) => self.view.show_error(&message),
            ViewUpdate::Detail(detail) => self.view.show_detail(&detail),
            ViewUpdate::FavoriteIcon(is_favorite) => self.view.update_favorite_icon(is_favorite),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingView {
        calls: usize,
    }

    impl MovieDetailView for CountingView {
        fn show_progress(&mut self) {
            self.calls += 1;
        }
        fn hide_progress(&mut self) {
            self.calls += 1;
        }
        fn show_error(&mut self, _message: &str) {
            self.calls += 1;
        }
        fn show_detail(&mut self, _detail: &MovieDetail) {
            self.calls += 1;
        }
        fn update_favorite_icon(&mut self, _is_favorite: bool) {
            self.calls += 1;
        }
    }

    #[tokio::test]
    async fn queued_updates_are_dropped_once_cancelled() {
        let token = CancellationToken::new();
        let (sender, mut ui) = ui_channel(CountingView::default(), token.clone());

        sender.post(ViewUpdate::ShowProgress);
        sender.post(ViewUpdate::HideProgress);
        token.cancel();
        sender.post(ViewUpdate::FavoriteIcon(true));

        assert_eq!(ui.run_pending(), 0);
        assert_eq!(ui.view().calls, 0);
    }

    #[tokio::test]
    async fn cancelled_task_resolves_without_running_to_completion() {
        let group = TaskGroup::new(Handle::current());
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = group.submit(async move {
            let _ = rx.await;
            panic!("task should have been cancelled");
        });

        group.cancel_all();
        assert!(handle.is_cancelled());
        assert!(handle.await.is_ok());
        drop(tx);
    }

    #[tokio::test]
    async fn cancelling_one_handle_leaves_its_siblings_running() {
        let group = TaskGroup::new(Handle::current());
        let (tx, rx) = tokio::sync::oneshot::channel::<u32>();
        let stalled = group.submit(std::future::pending());
        let sibling = group.submit(async move {
            let _ = tx.send(7);
        });

        stalled.cancel();
        assert!(stalled.is_cancelled());
        assert!(stalled.await.is_ok());

        assert!(sibling.await.is_ok());
        assert_eq!(rx.await.unwrap(), 7);
        assert!(!group.is_cancelled());
    }
}
