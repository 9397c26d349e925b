use std::sync::Arc;

use tokio::runtime::Handle;

use crate::{
    cli::view::TerminalView,
    config, error,
    detail::{MovieDetailPresenter, MovieDetailView, UiLoop},
    info,
    management::MovieDetailManager,
    tmdb::TmdbClient,
    warning,
};

type Presenter = MovieDetailPresenter<MovieDetailManager, TmdbClient>;

/// Shows the detail of a movie, from the local cache or from TMDB.
///
/// A movie fetched from TMDB is cached before the command exits, so the next
/// call for the same id works offline.
///
/// # Example Usage
///
/// ```bash
/// moviecli detail 550
/// moviecli detail 550 --open
/// ```
pub async fn detail(movie_id: u32, open: bool) {
    let (mut presenter, mut ui) = attach();

    show_detail(&presenter, &mut ui, movie_id).await;
    presenter.detach();
    presenter.flush().await;

    let view = ui.into_view();
    if let Some(e) = view.error() {
        error!("Cannot show movie {}. Err: {}", movie_id, e);
    }

    if open {
        open_in_browser(movie_id);
    }
}

/// Toggles the favorite flag of a movie.
///
/// The detail is shown first, which also caches the movie when it was not
/// cached yet; the toggle then flips the stored flag.
pub async fn favorite(movie_id: u32) {
    let (mut presenter, mut ui) = attach();

    show_detail(&presenter, &mut ui, movie_id).await;
    presenter.flush().await;

    let current = match ui.view().detail() {
        Some(detail) => detail.favorite,
        None => {
            presenter.detach();
            error!("Movie {} could not be loaded.", movie_id);
        }
    };

    match presenter.favorite_button_clicked(current, movie_id) {
        Ok(task) => {
            if let Err(e) = ui.run_until(task).await {
                warning!("Favorite update was interrupted. Err: {}", e);
            }
        }
        Err(e) => warning!("Cannot update favorite. Err: {}", e),
    }
    presenter.detach();

    if let Some(e) = ui.view().error() {
        error!("Cannot update favorite for movie {}. Err: {}", movie_id, e);
    }
}

fn attach() -> (Presenter, UiLoop<TerminalView>) {
    let mut presenter = MovieDetailPresenter::new(
        Arc::new(MovieDetailManager::from_env()),
        Arc::new(TmdbClient::from_env()),
        Handle::current(),
    );

    match presenter.attach(TerminalView::new(config::tmdb_image_url())) {
        Ok(ui) => (presenter, ui),
        Err(e) => error!("Cannot attach terminal view. Err: {}", e),
    }
}

/// Runs the lookup on the terminal. Ctrl-C cancels it and leaves the view
/// with an error, so callers stop as they would on a failed lookup.
async fn show_detail(presenter: &Presenter, ui: &mut UiLoop<TerminalView>, movie_id: u32) {
    let mut task = match presenter.set_movie_detail(movie_id) {
        Ok(task) => task,
        Err(e) => {
            warning!("Cannot load movie {}. Err: {}", movie_id, e);
            return;
        }
    };

    let interrupted = tokio::select! {
        res = ui.run_until(&mut task) => {
            if let Err(e) = res {
                warning!("Loading movie {} was interrupted. Err: {}", movie_id, e);
            }
            false
        }
        _ = tokio::signal::ctrl_c() => true,
    };

    if interrupted {
        task.cancel();
        let _ = (&mut task).await;
        ui.run_pending();
        ui.view_mut().hide_progress();
        ui.view_mut().show_error("cancelled");
    }
}

fn open_in_browser(movie_id: u32) {
    let url = format!("{}/movie/{}", config::TMDB_WEB_URL, movie_id);
    if webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        );
    } else {
        info!("Opened {}", url);
    }
}
