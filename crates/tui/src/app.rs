use std::{io, sync::Arc, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{error, info};
use wvw_core::{
    generate_match_snapshots, models::MatchDetail, MatchSnapshot, MatchSource, Team,
};

use crate::view::{team_color, MatchView};

const TICK_RATE: Duration = Duration::from_millis(250);

enum AppEvent {
    Input(Event),
    Tick,
    DetailLoaded {
        generation: u64,
        result: wvw_core::Result<MatchDetail>,
    },
    SnapshotsLoaded(wvw_core::Result<Vec<MatchSnapshot>>),
}

#[derive(Debug)]
enum MatchList {
    Loading,
    Loaded(Vec<MatchSnapshot>),
    Failed,
}

/// Top-level application state for the WvW viewer.
pub struct WvwApp<S> {
    source: Arc<S>,
    view: MatchView,
    matches: MatchList,
    cursor: usize,
    status: String,
    should_quit: bool,
    next_generation: u64,
    event_tx: Option<mpsc::Sender<AppEvent>>,
}

impl<S> WvwApp<S>
where
    S: MatchSource + Send + Sync + 'static,
{
    pub fn new(source: Arc<S>, initial_match_id: impl Into<String>) -> Self {
        Self {
            source,
            view: MatchView::new(initial_match_id, 0),
            matches: MatchList::Loading,
            cursor: 0,
            status: "Ready".to_string(),
            should_quit: false,
            next_generation: 1,
            event_tx: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        self.event_tx = Some(event_tx);
        self.start();

        let result = self.event_loop(&mut terminal, &mut event_rx).await;
        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        result
    }

    async fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        event_rx: &mut mpsc::Receiver<AppEvent>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }
            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) || self.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Kick off the match list and the initial detail view.
    fn start(&mut self) {
        self.load_match_list();
        let match_id = self.view.match_id().to_string();
        self.mount_view(match_id);
    }

    fn load_match_list(&mut self) {
        let Some(tx) = self.event_tx.clone() else {
            return;
        };
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            let result = generate_match_snapshots(source.as_ref()).await;
            let _ = tx.send(AppEvent::SnapshotsLoaded(result)).await;
        });
    }

    /// Replace the detail view with a fresh one and issue its single fetch.
    fn mount_view(&mut self, match_id: String) {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.view = MatchView::new(match_id.clone(), generation);
        if !self.view.mount() {
            return;
        }
        let Some(tx) = self.event_tx.clone() else {
            return;
        };
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            let result = source.match_detail(&match_id).await;
            let _ = tx
                .send(AppEvent::DetailLoaded { generation, result })
                .await;
        });
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(Event::Key(key))) => {
                self.handle_key(key);
                true
            }
            Some(AppEvent::Input(_)) | Some(AppEvent::Tick) => true,
            Some(AppEvent::DetailLoaded { generation, result }) => {
                self.handle_detail_loaded(generation, result);
                true
            }
            Some(AppEvent::SnapshotsLoaded(result)) => {
                self.handle_snapshots_loaded(result);
                true
            }
            None => false,
        }
    }

    fn handle_detail_loaded(&mut self, generation: u64, result: wvw_core::Result<MatchDetail>) {
        if generation != self.view.generation() {
            info!(generation, "discarding detail for a replaced view");
            return;
        }
        let message = result.as_ref().err().map(|err| format!("Fetch failed: {err}"));
        if self.view.on_fetch_complete(result) {
            self.status = format!("Loaded match {}", self.view.match_id());
        } else if let Some(message) = message {
            self.status = message;
        }
    }

    fn handle_snapshots_loaded(&mut self, result: wvw_core::Result<Vec<MatchSnapshot>>) {
        match result {
            Ok(snapshots) => {
                info!(total = snapshots.len(), "match list loaded");
                self.cursor = snapshots
                    .iter()
                    .position(|snapshot| snapshot.match_id() == self.view.match_id())
                    .unwrap_or(0);
                self.status = format!("Loaded {} matches", snapshots.len());
                self.matches = MatchList::Loaded(snapshots);
            }
            Err(err) => {
                error!(%err, "match list failed");
                self.status = format!("Match list failed: {err}");
                self.matches = MatchList::Failed;
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Enter => {
                if let Some(match_id) = self.selected().map(|s| s.match_id().to_string()) {
                    self.status = format!("Loading match {match_id}");
                    self.mount_view(match_id);
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = match &self.matches {
            MatchList::Loaded(snapshots) if !snapshots.is_empty() => snapshots.len(),
            _ => return,
        };
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, len as isize - 1) as usize;
    }

    fn selected(&self) -> Option<&MatchSnapshot> {
        match &self.matches {
            MatchList::Loaded(snapshots) => snapshots.get(self.cursor),
            _ => None,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(frame.size());

        let title = Paragraph::new(Line::from(Span::styled(
            "Guild Wars 2 · World vs World",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);

        self.render_match_list(frame, body[0]);
        self.view.render(frame, body[1]);
        self.render_status(frame, chunks[2]);
    }

    fn render_match_list(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Matches");
        let snapshots = match &self.matches {
            MatchList::Loaded(snapshots) => snapshots,
            MatchList::Loading => {
                frame.render_widget(Paragraph::new("Loading...").block(block), area);
                return;
            }
            MatchList::Failed => {
                frame.render_widget(Paragraph::new("Match list unavailable").block(block), area);
                return;
            }
        };

        let items: Vec<ListItem> = snapshots.iter().map(snapshot_item).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        let mut state = ListState::default();
        state.select(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let help = "↑/↓ select  Enter open  q quit";
        let paragraph = Paragraph::new(vec![Line::from(self.status.clone()), Line::from(help)])
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn snapshot_item(snapshot: &MatchSnapshot) -> ListItem<'static> {
    let mut lines = vec![Line::from(Span::styled(
        snapshot.match_id().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for team in Team::COMPETING {
        let name = match (snapshot.world_name(team), snapshot.world_id(team)) {
            (Some(name), _) => name.to_string(),
            (None, Some(id)) => format!("Unknown world ({id})"),
            (None, None) => "?".to_string(),
        };
        lines.push(Line::from(Span::styled(
            format!("  {name}"),
            Style::default().fg(team_color(team)),
        )));
    }
    ListItem::new(lines)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::tests::sample_detail;
    use chrono::{TimeZone, Utc};
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wvw_core::{models::MatchOverview, Error, TeamValues, WorldId};

    #[derive(Default)]
    struct FakeSource {
        detail_calls: AtomicUsize,
    }

    impl MatchSource for FakeSource {
        async fn list_active_match_ids(&self) -> wvw_core::Result<Vec<String>> {
            Ok(vec!["1-1".to_string(), "2-1".to_string()])
        }

        async fn match_overview(&self, match_id: &str) -> wvw_core::Result<MatchOverview> {
            let worlds = if match_id == "1-1" {
                TeamValues {
                    red: WorldId(1001),
                    blue: WorldId(1002),
                    green: WorldId(1003),
                }
            } else {
                TeamValues {
                    red: WorldId(2104),
                    blue: WorldId(2301),
                    green: WorldId(2003),
                }
            };
            Ok(MatchOverview {
                id: match_id.to_string(),
                worlds,
                all_worlds: worlds.map(|id| vec![*id]),
                start_time: Utc.with_ymd_and_hms(2024, 3, 8, 18, 0, 0).unwrap(),
                end_time: Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap(),
            })
        }

        async fn match_detail(&self, match_id: &str) -> wvw_core::Result<MatchDetail> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            Ok(sample_detail(match_id))
        }
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn app_with_channel() -> (WvwApp<FakeSource>, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let mut app = WvwApp::new(Arc::new(FakeSource::default()), "2-1");
        app.event_tx = Some(tx);
        (app, rx)
    }

    async fn pump(app: &mut WvwApp<FakeSource>, rx: &mut mpsc::Receiver<AppEvent>, count: usize) {
        for _ in 0..count {
            let event = rx.recv().await;
            assert!(app.process_app_event(event));
        }
    }

    #[tokio::test]
    async fn startup_fetches_list_and_initial_detail_once() {
        let (mut app, mut rx) = app_with_channel();
        app.start();
        pump(&mut app, &mut rx, 2).await;

        assert!(app.view.is_loaded());
        assert_eq!(app.view.match_id(), "2-1");
        assert_eq!(app.source.detail_calls.load(Ordering::SeqCst), 1);
        match &app.matches {
            MatchList::Loaded(snapshots) => assert_eq!(snapshots.len(), 2),
            other => panic!("unexpected match list state {other:?}"),
        }
        assert_eq!(app.cursor, 1);
    }

    #[tokio::test]
    async fn selecting_a_match_mounts_a_new_view() {
        let (mut app, mut rx) = app_with_channel();
        app.start();
        pump(&mut app, &mut rx, 2).await;
        let first_generation = app.view.generation();

        assert!(app.process_app_event(Some(key(KeyCode::Up))));
        assert_eq!(app.cursor, 0);
        assert!(app.process_app_event(Some(key(KeyCode::Enter))));
        assert_eq!(app.view.match_id(), "1-1");
        assert!(!app.view.is_loaded());
        assert!(app.view.generation() > first_generation);

        pump(&mut app, &mut rx, 1).await;
        assert!(app.view.is_loaded());
        assert_eq!(app.source.detail_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn stale_results_are_discarded() {
        let (mut app, _rx) = app_with_channel();
        app.mount_view("1-1".to_string());
        let current = app.view.generation();

        app.handle_detail_loaded(current - 1, Ok(sample_detail("old")));
        assert!(!app.view.is_loaded());

        app.handle_detail_loaded(current, Ok(sample_detail("1-1")));
        assert!(app.view.is_loaded());
    }

    #[tokio::test]
    async fn failed_fetch_stays_loading_and_reports() {
        let (mut app, _rx) = app_with_channel();
        app.mount_view("2-1".to_string());
        let generation = app.view.generation();
        app.handle_detail_loaded(
            generation,
            Err(Error::Status {
                url: "http://fake/v2/wvw/matches/2-1".to_string(),
                status: 502,
            }),
        );
        assert!(!app.view.is_loaded());
        assert!(app.status.contains("502"));
    }

    #[test]
    fn cursor_is_clamped() {
        let mut app = WvwApp::new(Arc::new(FakeSource::default()), "2-1");
        app.move_cursor(1);
        assert_eq!(app.cursor, 0);

        let snapshot = |id: &str| {
            MatchSnapshot::new(
                id,
                TeamValues {
                    red: WorldId(1001),
                    blue: WorldId(1002),
                    green: WorldId(1003),
                },
            )
        };
        app.handle_snapshots_loaded(Ok(vec![snapshot("1-1"), snapshot("1-2")]));
        app.move_cursor(5);
        assert_eq!(app.cursor, 1);
        app.move_cursor(-5);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn quit_keys_stop_the_app() {
        let mut app = WvwApp::new(Arc::new(FakeSource::default()), "2-1");
        app.process_app_event(Some(key(KeyCode::Char('q'))));
        assert!(app.should_quit);
    }

    #[test]
    fn draws_list_and_detail_panels() {
        let mut app = WvwApp::new(Arc::new(FakeSource::default()), "2-1");
        app.handle_snapshots_loaded(Ok(vec![MatchSnapshot::new(
            "1-1",
            TeamValues {
                red: WorldId(1001),
                blue: WorldId(1019),
                green: WorldId(1008),
            },
        )]));

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|frame| app.draw(frame)).expect("draw");
        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Anvil Rock"));
        assert!(screen.contains("Blackgate"));
        assert!(screen.contains("Jade Quarry"));
        assert!(screen.contains("Loading..."));
    }
}
