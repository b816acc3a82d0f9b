//! Interactive recommendation session.
//!
//! The screen has two states. `Idle` shows the selector; pressing the
//! trigger (an empty line) runs the lookup and poster fetches and moves to
//! `ResultsShown`, which lasts until the selection changes or the next
//! trigger replaces it.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use recommender::{RecommendationOrchestrator, RecommendationSet};
use tracing::debug;

use crate::display::{self, DEFAULT_COLUMN_WIDTH, SELECT_LABEL, TRIGGER_LABEL};
use crate::selector::{resolve_selection, search_titles};

const SEARCH_RESULT_LIMIT: usize = 20;

/// What the screen currently shows below the selector
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    ResultsShown(RecommendationSet),
}

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Trigger,
    Quit,
    List,
    Find(String),
    Select(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        "" => Command::Trigger,
        "quit" | "exit" | "/quit" => Command::Quit,
        "/list" => Command::List,
        _ => match line.strip_prefix("/find") {
            Some(query) => Command::Find(query.trim().to_string()),
            None => Command::Select(line.to_string()),
        },
    }
}

pub struct Session {
    orchestrator: RecommendationOrchestrator,
    /// Current selector position; starts on the first option
    selected: usize,
    state: ViewState,
    column_width: usize,
}

impl Session {
    pub fn new(orchestrator: RecommendationOrchestrator) -> Self {
        Self {
            orchestrator,
            selected: 0,
            state: ViewState::Idle,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }

    pub fn with_column_width(mut self, width: usize) -> Self {
        self.column_width = width;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Title the selector currently points at
    pub fn selected_title(&self) -> &str {
        self.orchestrator
            .data_index()
            .movie_at(self.selected)
            .map(|m| m.title.as_str())
            .unwrap_or("")
    }

    /// Move the selector; any shown results are cleared
    pub fn select(&mut self, input: &str) -> bool {
        match resolve_selection(self.orchestrator.data_index(), input) {
            Some(position) => {
                self.selected = position;
                self.state = ViewState::Idle;
                true
            }
            None => false,
        }
    }

    /// Press the trigger for the current selection
    pub async fn trigger(&mut self) -> Result<RecommendationSet> {
        let title = self.selected_title().to_string();
        let set = self
            .orchestrator
            .recommend(&title)
            .await
            .with_context(|| format!("Failed to recommend movies for '{}'", title))?;

        self.state = ViewState::ResultsShown(set.clone());
        Ok(set)
    }

    /// Read commands from `input` until quit or EOF, rendering to `output`
    pub async fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        write!(output, "{}", display::render_header())?;
        writeln!(
            output,
            "Type a title or option number to select, press Enter to {}, \
             /find <text> to search, /list for all options, quit to exit.",
            TRIGGER_LABEL.bold()
        )?;
        self.prompt(output)?;

        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            let command = parse_command(&line);
            debug!("Session command: {:?}", command);

            match command {
                Command::Quit => break,
                Command::Trigger => {
                    let set = self.trigger().await?;
                    for notice in &set.notices {
                        writeln!(output, "{}", display::render_notice(notice))?;
                    }
                    write!(output, "{}", display::render_grid(&set.recommendations, self.column_width))?;
                }
                Command::List => {
                    for (i, title) in self.orchestrator.data_index().titles().enumerate() {
                        writeln!(output, "{:>5}. {}", i + 1, title)?;
                    }
                }
                Command::Find(query) => {
                    let matches =
                        search_titles(self.orchestrator.data_index(), &query, SEARCH_RESULT_LIMIT);
                    if matches.is_empty() {
                        writeln!(output, "No titles match '{}'", query)?;
                    }
                    for (position, title) in matches {
                        writeln!(output, "{:>5}. {}", position + 1, title)?;
                    }
                }
                Command::Select(choice) => {
                    if !self.select(&choice) {
                        writeln!(
                            output,
                            "{}",
                            format!("'{}' is not one of the options", choice).yellow()
                        )?;
                    }
                }
            }

            self.prompt(output)?;
        }

        Ok(())
    }

    fn prompt<W: Write>(&self, output: &mut W) -> Result<()> {
        write!(output, "{} [{}]: ", SELECT_LABEL, self.selected_title().green())?;
        output.flush()?;
        Ok(())
    }
}
