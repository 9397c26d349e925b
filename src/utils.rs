use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};

use crate::types::{DetailTableRow, MovieDetail, MovieSummary, MovieTableRow};

/// Year part of a TMDB `YYYY-MM-DD` date, or `-` when it cannot be parsed.
pub fn release_year(release_date: &str) -> String {
    match NaiveDate::parse_from_str(release_date, "%Y-%m-%d") {
        Ok(date) => date.year().to_string(),
        Err(_) => "-".to_string(),
    }
}

/// Joins the image base URL with a poster path such as `/abc.jpg`.
pub fn poster_url(image_base: &str, poster_path: Option<&str>) -> Option<String> {
    let path = poster_path.filter(|p| !p.trim().is_empty())?;
    Some(format!(
        "{}/{}",
        image_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

pub fn format_vote_average(vote_average: f64) -> String {
    format!("{:.1}", vote_average)
}

/// Cuts `text` to at most `max_chars` characters, ending in `...` when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

pub fn movie_table_rows(movies: &[MovieSummary], favorite_ids: &[u32]) -> Vec<MovieTableRow> {
    movies
        .iter()
        .map(|m| MovieTableRow {
            id: m.id,
            title: truncate(m.title.as_deref().unwrap_or("<untitled>"), 48),
            year: release_year(m.release_date.as_deref().unwrap_or_default()),
            rating: m
                .vote_average
                .map(format_vote_average)
                .unwrap_or_else(|| "-".to_string()),
            favorite: if m.favorite || favorite_ids.contains(&m.id) {
                "*".to_string()
            } else {
                String::new()
            },
        })
        .collect()
}

pub fn favorite_table_rows(favorites: &[MovieDetail]) -> Vec<MovieTableRow> {
    let mut rows: Vec<MovieTableRow> = favorites
        .iter()
        .map(|d| MovieTableRow {
            id: d.id,
            title: truncate(&d.title, 48),
            year: release_year(&d.release_date),
            rating: format_vote_average(d.vote_average),
            favorite: "*".to_string(),
        })
        .collect();
    sort_movie_table_rows(&mut rows);
    rows
}

/// Rating descending, then title ascending.
pub fn sort_movie_table_rows(rows: &mut Vec<MovieTableRow>) {
    rows.sort_by(|a, b| {
        let ra = a.rating.parse::<f64>().unwrap_or(-1.0);
        let rb = b.rating.parse::<f64>().unwrap_or(-1.0);
        match rb.partial_cmp(&ra).unwrap_or(Ordering::Equal) {
            Ordering::Equal => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            other => other,
        }
    });
}

pub fn detail_table_rows(detail: &MovieDetail, image_base: &str) -> Vec<DetailTableRow> {
    let row = |field: &str, value: String| DetailTableRow {
        field: field.to_string(),
        value,
    };

    vec![
        row("id", detail.id.to_string()),
        row("title", detail.title.clone()),
        row("released", detail.release_date.clone()),
        row("rating", format_vote_average(detail.vote_average)),
        row(
            "poster",
            poster_url(image_base, detail.poster_path.as_deref()).unwrap_or_default(),
        ),
        row("favorite", if detail.favorite { "yes" } else { "no" }.to_string()),
        row("overview", truncate(&detail.overview, 400)),
    ]
}
