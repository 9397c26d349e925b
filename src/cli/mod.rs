//! # CLI Module
//!
//! User-facing commands of `moviecli`. Each command wires the library layers
//! together and handles output:
//!
//! ```text
//! CLI Layer (commands, TerminalView)
//!     ↓
//! Detail Flow (presenter, UI loop)
//!     ↓
//! Management Layer (local cache)  +  TMDB Layer (remote API)
//! ```
//!
//! ## Commands
//!
//! - [`detail`] - Shows a movie through the detail presenter, cache first
//! - [`favorite`] - Toggles the favorite flag of a movie
//! - [`favorites`] - Lists cached favorites
//! - [`movies`] - Prints a page of the top rated or popular list
//!
//! ## Usage Patterns
//!
//! ```bash
//! moviecli top-rated --page 2     # browse
//! moviecli detail 550             # fetch once, cached afterwards
//! moviecli favorite 550           # toggle favorite
//! moviecli favorites --search club
//! ```

mod detail;
mod favorites;
mod movies;
mod view;

pub use detail::detail;
pub use detail::favorite;
pub use favorites::favorites;
pub use movies::movies;
pub use view::TerminalView;
