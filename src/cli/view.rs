use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{detail::MovieDetailView, success, types::MovieDetail, utils, warning};

pub(crate) fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Renders the detail screen on the terminal.
///
/// Progress is an indicatif spinner, the detail a two-column table and
/// errors a warning line. The last detail, error and favorite state are
/// kept so commands can act on them once the UI loop is done.
pub struct TerminalView {
    image_base: String,
    spinner: Option<ProgressBar>,
    detail: Option<MovieDetail>,
    error: Option<String>,
}

impl TerminalView {
    pub fn new(image_base: String) -> Self {
        Self {
            image_base,
            spinner: None,
            detail: None,
            error: None,
        }
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl MovieDetailView for TerminalView {
    fn show_progress(&mut self) {
        if self.spinner.is_none() {
            self.spinner = Some(spinner("Fetching movie detail..."));
        }
    }

    fn hide_progress(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn show_error(&mut self, message: &str) {
        if let Some(pb) = &self.spinner {
            pb.suspend(|| warning!("{}", message));
        } else {
            warning!("{}", message);
        }
        self.error = Some(message.to_string());
    }

    fn show_detail(&mut self, detail: &MovieDetail) {
        let table = Table::new(utils::detail_table_rows(detail, &self.image_base));
        match &self.spinner {
            Some(pb) => pb.suspend(|| println!("{}", table)),
            None => println!("{}", table),
        }
        self.detail = Some(detail.clone());
    }

    fn update_favorite_icon(&mut self, is_favorite: bool) {
        if let Some(detail) = self.detail.as_mut() {
            detail.favorite = is_favorite;
        }

        let title = self
            .detail
            .as_ref()
            .map(|d| d.title.clone())
            .unwrap_or_else(|| "Movie".to_string());
        if is_favorite {
            success!("{} added to favorites.", title);
        } else {
            success!("{} removed from favorites.", title);
        }
    }
}
