//! # Movie Detail Flow
//!
//! Presenter for a single movie's detail screen. The presenter never touches
//! a view directly; it posts updates to a [`UiLoop`] that owns the view and
//! is drained by whichever task plays the UI role.
//!
//! ```text
//!  host (UI context)           background runtime
//!  ─────────────────           ──────────────────
//!  attach(view) ──► UiLoop
//!  set_movie_detail(id) ──────► local.fetch_movie_detail(id)
//!                                 ├─ hit  ─────────────────────┐
//!                                 └─ miss ► remote.fetch(id)   │
//!                                             ├─ ok ► cache write (detached)
//!                                             └─ err ──────────┤
//!  UiLoop::run_until(task) ◄──── posted ViewUpdates ◄──────────┘
//!  detach() ── cancels tasks, drops undelivered updates
//! ```
//!
//! I/O is submitted to a [`TaskGroup`] bound to the attachment; every
//! submission returns a [`TaskHandle`]. Updates carry the attachment's
//! cancellation token and are checked against it right before they reach the
//! view, so nothing arrives after [`MovieDetailPresenter::detach`].

mod dispatch;
mod presenter;
mod view;

pub use dispatch::{TaskGroup, TaskHandle, UiLoop};
pub use presenter::{MovieDetailPresenter, PresenterError};
pub use view::MovieDetailView;
