use crate::types::MovieDetail;

/// Callbacks the detail presenter drives.
///
/// Implementations are owned by a [`super::UiLoop`] and only ever called from
/// the context that drains it, so they need neither `Send` nor interior
/// locking.
pub trait MovieDetailView {
    fn show_progress(&mut self);

    fn hide_progress(&mut self);

    fn show_error(&mut self, message: &str);

    fn show_detail(&mut self, detail: &MovieDetail);

    fn update_favorite_icon(&mut self, is_favorite: bool);
}
