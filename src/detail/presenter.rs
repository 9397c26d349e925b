use std::{
    fmt, mem,
    sync::{Arc, Mutex},
};

use tokio::{runtime::Handle, sync::oneshot, task::JoinHandle};

use crate::{
    data::{LocalStore, RemoteSource},
    types::MovieDetail,
};

use super::{
    MovieDetailView, TaskGroup, TaskHandle, UiLoop,
    dispatch::{UiSender, ViewUpdate, ui_channel},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterError {
    NotAttached,
    AlreadyAttached,
    Detached,
}

impl fmt::Display for PresenterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresenterError::NotAttached => write!(f, "no view is attached"),
            PresenterError::AlreadyAttached => write!(f, "a view is already attached"),
            PresenterError::Detached => write!(f, "presenter was detached"),
        }
    }
}

impl std::error::Error for PresenterError {}

struct Attachment {
    tasks: TaskGroup,
    ui: UiSender,
}

enum Lifecycle {
    Idle,
    Attached(Attachment),
    Detached,
}

/// Drives a [`MovieDetailView`]: cache-then-network detail lookup and the
/// favorite toggle.
///
/// Lifecycle is one-way: `attach` once, `detach` once. Detaching cancels
/// every operation still in flight and discards updates they already posted
/// but the view has not seen yet.
pub struct MovieDetailPresenter<L, R> {
    local: Arc<L>,
    remote: Arc<R>,
    runtime: Handle,
    state: Lifecycle,
    cache_writes: PendingWrites,
}

impl<L, R> MovieDetailPresenter<L, R>
where
    L: LocalStore + 'static,
    R: RemoteSource + 'static,
{
    /// `runtime` is where store and network I/O runs.
    pub fn new(local: Arc<L>, remote: Arc<R>, runtime: Handle) -> Self {
        Self {
            local,
            remote,
            runtime,
            state: Lifecycle::Idle,
            cache_writes: PendingWrites::default(),
        }
    }

    /// Attaches `view` and returns the UI loop that owns it.
    pub fn attach<V: MovieDetailView>(&mut self, view: V) -> Result<UiLoop<V>, PresenterError> {
        match self.state {
            Lifecycle::Idle => {}
            Lifecycle::Attached(_) => return Err(PresenterError::AlreadyAttached),
            Lifecycle::Detached => return Err(PresenterError::Detached),
        }

        let tasks = TaskGroup::new(self.runtime.clone());
        let (ui, ui_loop) = ui_channel(view, tasks.token());
        self.state = Lifecycle::Attached(Attachment { tasks, ui });
        Ok(ui_loop)
    }

    /// Cancels all in-flight operations. Pending cache writes are left alone.
    pub fn detach(&mut self) {
        if let Lifecycle::Attached(attachment) = mem::replace(&mut self.state, Lifecycle::Detached)
        {
            attachment.tasks.cancel_all();
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, Lifecycle::Attached(_))
    }

    /// Shows the detail of `movie_id`, from the local store when cached and
    /// from the remote source otherwise.
    ///
    /// A remote hit is written back to the local store before the view sees
    /// the detail. The write runs as its own task, so a detach while it is in
    /// progress still lets it land. Its failure never reaches the view; the
    /// next lookup simply misses the cache again.
    pub fn set_movie_detail(&self, movie_id: u32) -> Result<TaskHandle, PresenterError> {
        let attachment = self.attachment()?;
        let ui = attachment.ui.clone();
        let local = Arc::clone(&self.local);
        let remote = Arc::clone(&self.remote);
        let cache = self.cache_writer();

        ui.post(ViewUpdate::ShowProgress);
        Ok(attachment.tasks.submit(async move {
            match local.fetch_movie_detail(movie_id).await {
                Ok(Some(detail)) => {
                    ui.post(ViewUpdate::Detail(detail));
                    ui.post(ViewUpdate::HideProgress);
                }
                Ok(None) => match remote.fetch_movie_detail(movie_id).await {
                    Ok(response) => {
                        let detail = MovieDetail::from(response);
                        cache.write(detail.clone()).await;
                        ui.post(ViewUpdate::Detail(detail));
                        ui.post(ViewUpdate::HideProgress);
                    }
                    Err(e) => {
                        ui.post(ViewUpdate::Error(e.to_string()));
                        ui.post(ViewUpdate::HideProgress);
                    }
                },
                Err(e) => {
                    ui.post(ViewUpdate::Error(e.to_string()));
                    ui.post(ViewUpdate::HideProgress);
                }
            }
        }))
    }

    /// Stores the negation of `is_favorite` and tells the view the new state.
    pub fn favorite_button_clicked(
        &self,
        is_favorite: bool,
        movie_id: u32,
    ) -> Result<TaskHandle, PresenterError> {
        let attachment = self.attachment()?;
        let ui = attachment.ui.clone();
        let local = Arc::clone(&self.local);

        Ok(attachment.tasks.submit(async move {
            match local.update_favorite(movie_id, !is_favorite).await {
                Ok(()) => ui.post(ViewUpdate::FavoriteIcon(!is_favorite)),
                Err(e) => ui.post(ViewUpdate::Error(e.to_string())),
            }
        }))
    }

    /// Waits for the background cache writes started so far.
    pub async fn flush(&self) {
        for write in self.cache_writes.take() {
            let _ = write.await;
        }
    }

    fn attachment(&self) -> Result<&Attachment, PresenterError> {
        match &self.state {
            Lifecycle::Attached(attachment) => Ok(attachment),
            Lifecycle::Idle => Err(PresenterError::NotAttached),
            Lifecycle::Detached => Err(PresenterError::Detached),
        }
    }

    fn cache_writer(&self) -> CacheWriter<L> {
        CacheWriter {
            local: Arc::clone(&self.local),
            runtime: self.runtime.clone(),
            pending: self.cache_writes.clone(),
        }
    }
}

/// Writes into the local store whose outcome is never reported.
///
/// Spawned outside the attachment's task group: cancelling the operation only
/// stops the wait, the record still lands in the cache.
struct CacheWriter<L> {
    local: Arc<L>,
    runtime: Handle,
    pending: PendingWrites,
}

impl<L: LocalStore + 'static> CacheWriter<L> {
    async fn write(&self, detail: MovieDetail) {
        let local = Arc::clone(&self.local);
        let movie_id = detail.id;
        let (done_tx, done_rx) = oneshot::channel();
        let handle = self.runtime.spawn(async move {
            if let Err(e) = local.add_movie_detail(detail).await {
                log::debug!("dropping cache write for movie {}: {}", movie_id, e);
            }
            let _ = done_tx.send(());
        });
        self.pending.push(handle);
        let _ = done_rx.await;
    }
}

#[derive(Clone, Default)]
struct PendingWrites(Arc<Mutex<Vec<JoinHandle<()>>>>);

impl PendingWrites {
    fn push(&self, handle: JoinHandle<()>) {
        let mut writes = match self.0.lock() {
            Ok(writes) => writes,
            Err(poisoned) => poisoned.into_inner(),
        };
        writes.retain(|w| !w.is_finished());
        writes.push(handle);
    }

    fn take(&self) -> Vec<JoinHandle<()>> {
        match self.0.lock() {
            Ok(mut writes) => mem::take(&mut *writes),
            Err(poisoned) => mem::take(&mut *poisoned.into_inner()),
        }
    }
}
