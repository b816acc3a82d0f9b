//! Terminal rendering of the recommendation screen.
//!
//! The result area is a fixed grid of five side-by-side slots. Each slot
//! shows the title and, only when one was resolved, the poster URL.

use colored::Colorize;
use data_loader::DataLoadError;
use recommender::{MovieRecommendation, PosterNotice, RECOMMENDATION_COUNT};

pub const APP_TITLE: &str = "Movie Recommender System";
pub const SELECT_LABEL: &str = "Select a movie you like";
pub const TRIGGER_LABEL: &str = "Recommend Movies";

pub const MISSING_ARTIFACTS_MESSAGE: &str =
    "Model files not found. Please generate the movie table and similarity matrix first.";
pub const CORRUPT_ARTIFACTS_MESSAGE: &str =
    "Could not load model files. They may be corrupted.";

/// Startup message for an artifact load failure
pub fn artifact_error_message(error: &DataLoadError) -> &'static str {
    if error.is_missing() {
        MISSING_ARTIFACTS_MESSAGE
    } else {
        CORRUPT_ARTIFACTS_MESSAGE
    }
}

/// Default width of one result slot, in characters
pub const DEFAULT_COLUMN_WIDTH: usize = 24;

const COLUMN_SEPARATOR: &str = " | ";

/// Page header
pub fn render_header() -> String {
    format!("{}\n", APP_TITLE.bold().blue())
}

/// One notice line for a failed poster fetch
pub fn render_notice(notice: &PosterNotice) -> String {
    format!(
        "{} {}",
        "✗".red(),
        format!("Error fetching poster for {}: {}", notice.title, notice.error).red()
    )
}

/// Lay out recommendations in five fixed columns.
///
/// Slots past the end of `recommendations` stay blank; anything past the
/// fifth recommendation is not shown.
pub fn render_grid(recommendations: &[MovieRecommendation], column_width: usize) -> String {
    let width = column_width.max(4);

    let slots: Vec<Vec<String>> = (0..RECOMMENDATION_COUNT)
        .map(|i| match recommendations.get(i) {
            Some(rec) => slot_lines(i + 1, rec, width),
            None => Vec::new(),
        })
        .collect();

    let height = slots.iter().map(Vec::len).max().unwrap_or(0);
    let mut out = String::new();

    for line in 0..height {
        let mut cells: Vec<String> = slots
            .iter()
            .map(|slot| {
                let cell = slot.get(line).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = width)
            })
            .collect();
        while cells.last().is_some_and(|cell| cell.trim().is_empty()) {
            cells.pop();
        }
        out.push_str(cells.join(COLUMN_SEPARATOR).trim_end());
        out.push('\n');
    }

    out
}

fn slot_lines(rank: usize, rec: &MovieRecommendation, width: usize) -> Vec<String> {
    let mut lines = vec![format!("#{}", rank)];
    lines.extend(wrap(&rec.title, width));
    if let Some(url) = &rec.poster_url {
        lines.push(String::new());
        lines.extend(wrap(url, width));
    }
    lines
}

/// Greedy word wrap; words longer than `width` (URLs) are split by chars.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
