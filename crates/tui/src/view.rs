//! Detail view for a single match.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::{debug, error, info};
use wvw_core::{models::MatchDetail, worlds, Team, TeamValues};

/// What the view currently has to show.
#[derive(Debug)]
pub enum ViewState {
    /// No data yet.
    Loading,
    /// Detail received.
    Loaded(Box<MatchDetail>),
}

/// Match detail panel.
///
/// A view fetches once when mounted. Success moves it from `Loading` to
/// `Loaded`; a failure is logged and leaves it `Loading`. Once loaded it never
/// goes back.
#[derive(Debug)]
pub struct MatchView {
    match_id: String,
    generation: u64,
    mounted: bool,
    state: ViewState,
}

impl MatchView {
    pub fn new(match_id: impl Into<String>, generation: u64) -> Self {
        Self {
            match_id: match_id.into(),
            generation,
            mounted: false,
            state: ViewState::Loading,
        }
    }

    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    /// Mount counter used to drop results addressed to a replaced view.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ViewState::Loaded(_))
    }

    /// Claim the single fetch of this view. Returns `false` if already mounted.
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        true
    }

    /// Apply the fetch result. Returns `true` when the state changed.
    pub fn on_fetch_complete(&mut self, result: wvw_core::Result<MatchDetail>) -> bool {
        let loaded = self.is_loaded();
        match result {
            Ok(detail) if !loaded => {
                info!(match_id = %detail.id, "match detail loaded");
                self.state = ViewState::Loaded(Box::new(detail));
                true
            }
            Ok(_) => {
                debug!(match_id = %self.match_id, "ignoring late match detail");
                false
            }
            Err(err) => {
                error!(%err, match_id = %self.match_id, "Error fetching data");
                false
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Match {}", self.match_id));
        let lines = match self.state() {
            ViewState::Loading => vec![Line::from("Loading...")],
            ViewState::Loaded(detail) => detail_lines(detail),
        };
        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

/// Foreground colour for a team.
pub fn team_color(team: Team) -> Color {
    match team {
        Team::Red => Color::Red,
        Team::Blue => Color::Blue,
        Team::Green => Color::Green,
        Team::Neutral => Color::DarkGray,
    }
}

fn detail_lines(detail: &MatchDetail) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled(
        format!("Match ID: {}", detail.id),
        bold,
    ))];

    for (team, id) in detail.worlds.iter() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} World ID: ", team.label()),
                bold.fg(team_color(team)),
            ),
            Span::raw(format!("{id} ({})", worlds::display_name(*id))),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("Start Time: ", bold),
        Span::raw(format_time(&detail.start_time)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("End Time: ", bold),
        Span::raw(format_time(&detail.end_time)),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{:<16}{:>12}{:>12}{:>12}", "", "Red", "Blue", "Green"),
        bold,
    )));
    lines.push(stat_line("Victory points", &detail.victory_points));
    lines.push(stat_line("Score", &detail.scores));
    lines.push(stat_line("Kills", &detail.kills));
    lines.push(stat_line("Deaths", &detail.deaths));

    if let Some(skirmish) = detail.current_skirmish() {
        lines.push(stat_line(
            &format!("Skirmish {}", skirmish.id),
            &skirmish.scores,
        ));
    }

    lines.push(Line::from(""));
    let leader = match detail.victory_points.leader() {
        Some(team) => Span::styled(
            format!("{} leads", team.label()),
            bold.fg(team_color(team)),
        ),
        None => Span::raw("Tied for first"),
    };
    lines.push(Line::from(leader));

    lines
}

fn stat_line(label: &str, values: &TeamValues<u64>) -> Line<'static> {
    Line::from(format!(
        "{:<16}{:>12}{:>12}{:>12}",
        label, values.red, values.blue, values.green
    ))
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M UTC").to_string()
}
