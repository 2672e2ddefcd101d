//! TUI module - Terminal front end for logging workouts with ratatui

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};
use std::io::{Stdout, stdout};
use tracing::debug;

use crate::config::Config;
use crate::error::TrackerError;
use crate::exercise::Exercise;
use crate::export;
use crate::log::WorkoutLog;
use crate::stats;
use crate::workout::Workout;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const FIELD_LABELS: [&str; 5] = ["Name", "Reps", "Sets", "Weight (kg)", "Seconds"];
const REPS: usize = 1;
const SETS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Browse,
    /// Typing the name of a new workout
    NewWorkout(String),
    /// Filling in the exercise form
    NewExercise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Raw text of the exercise form, one entry per field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseForm {
    pub fields: [String; 5],
    pub focus: usize,
}

impl ExerciseForm {
    fn input(&mut self, c: char) {
        // Reps and sets only take digits
        if matches!(self.focus, REPS | SETS) && !c.is_ascii_digit() {
            return;
        }
        self.fields[self.focus].push(c);
    }

    fn backspace(&mut self) {
        self.fields[self.focus].pop();
    }

    fn next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    fn prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    fn parse(&self) -> Result<Exercise, TrackerError> {
        let [name, reps, sets, weight, secs] = &self.fields;
        Ok(Exercise::parse(name, reps, sets, weight, secs)?)
    }
}

/// App state for TUI
pub struct App {
    log: WorkoutLog,
    config: Config,
    selected: usize,
    mode: Mode,
    form: ExerciseForm,
    message: Option<(Severity, String)>,
    show_stats: bool,
    should_quit: bool,
}

impl App {
    /// Start a session: the log gets the default workout and a welcome note.
    pub fn new(mut log: WorkoutLog, config: Config) -> Self {
        match Workout::new(&config.default_workout) {
            Ok(workout) => {
                log.log(workout);
            }
            Err(e) => debug!(error = %e, "no default workout"),
        }
        Self {
            log,
            config,
            selected: 0,
            mode: Mode::Browse,
            form: ExerciseForm::default(),
            message: Some((
                Severity::Info,
                "Welcome to the Fitness Tracker App!".to_string(),
            )),
            show_stats: false,
            should_quit: false,
        }
    }

    pub fn log(&self) -> &WorkoutLog {
        &self.log
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn form(&self) -> &ExerciseForm {
        &self.form
    }

    pub fn message(&self) -> Option<&(Severity, String)> {
        self.message.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn selected_workout(&self) -> Option<&str> {
        self.log.names().get(self.selected).copied()
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;
        with_restore(|| self.event_loop(&mut terminal), restore_terminal)
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key.code);
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match &mut self.mode {
            Mode::Browse => self.handle_browse_key(code),
            Mode::NewWorkout(name) => match code {
                KeyCode::Char(c) => name.push(c),
                KeyCode::Backspace => {
                    name.pop();
                }
                KeyCode::Enter => {
                    let name = std::mem::take(name);
                    self.mode = Mode::Browse;
                    self.add_workout(&name);
                }
                KeyCode::Esc => self.mode = Mode::Browse,
                _ => {}
            },
            Mode::NewExercise => match code {
                KeyCode::Char(c) => self.form.input(c),
                KeyCode::Backspace => self.form.backspace(),
                KeyCode::Tab | KeyCode::Down => self.form.next(),
                KeyCode::BackTab | KeyCode::Up => self.form.prev(),
                KeyCode::Enter => self.add_exercise(),
                KeyCode::Esc => self.mode = Mode::Browse,
                _ => {}
            },
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.log.count() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('w') => self.mode = Mode::NewWorkout(String::new()),
            KeyCode::Char('a') => self.mode = Mode::NewExercise,
            KeyCode::Char('c') => self.clear(),
            KeyCode::Char('s') => self.show_stats = !self.show_stats,
            KeyCode::Char('x') => self.export(),
            KeyCode::Char('v') => self.save_session(),
            _ => {}
        }
    }

    fn add_workout(&mut self, name: &str) {
        let workout = match Workout::new(name) {
            Ok(workout) => workout,
            Err(e) => return self.error(format!("Failed to add workout: {}", e)),
        };
        let name = workout.name().to_string();
        if !self.log.log(workout) {
            self.info(format!("Workout '{}' is already logged.", name));
        } else {
            self.info(format!("Workout '{}' added.", name));
        }
        if let Some(index) = self.log.names().iter().position(|n| *n == name) {
            self.selected = index;
        }
    }

    fn add_exercise(&mut self) {
        let result = self.form.parse().and_then(|exercise| {
            let workout = self
                .log
                .names()
                .get(self.selected)
                .map(|name| name.to_string())
                .ok_or_else(|| TrackerError::NotFound("(none selected)".to_string()))?;
            self.log.add_exercise(&workout, exercise)
        });
        match result {
            Ok(()) => {
                self.mode = Mode::Browse;
                self.info("Exercise added successfully.".to_string());
            }
            Err(e) => self.error(format!("Failed to add exercise: {}", e)),
        }
    }

    fn export(&mut self) {
        match export::export_text(&self.log, &self.config.export_path) {
            Ok(path) => self.info(format!("Data exported successfully to {}", path.display())),
            Err(e) => self.error(format!("Failed to export data: {}", e)),
        }
    }

    fn save_session(&mut self) {
        match export::export_json(&self.log, &self.config.session_path) {
            Ok(()) => self.info(format!(
                "Session saved to {}",
                self.config.session_path.display()
            )),
            Err(e) => self.error(format!("Failed to save session: {}", e)),
        }
    }

    /// Reset the exercise form and the message line
    fn clear(&mut self) {
        self.form = ExerciseForm::default();
        self.message = None;
    }

    fn info(&mut self, text: String) {
        self.message = Some((Severity::Info, text));
    }

    fn error(&mut self, text: String) {
        debug!(message = %text, "input rejected");
        self.message = Some((Severity::Error, text));
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let header = Paragraph::new("fitlog - Fitness Tracker")
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);

        // Workout table
        let rows: Vec<Row> = self
            .log
            .logged_workouts()
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let row = Row::new(vec![
                    Cell::from(w.name().to_string()),
                    Cell::from(w.exercises().len().to_string()),
                    Cell::from(w.duration_minutes().to_string()),
                    Cell::from(format!("{:.2}", w.volume())),
                ]);
                if i == self.selected {
                    row.style(Style::default().fg(Color::Black).bg(Color::Cyan))
                } else {
                    row
                }
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(10),
                Constraint::Length(5),
                Constraint::Length(12),
            ],
        )
        .header(
            Row::new(vec!["Workout", "Exercises", "Min", "Volume (kg)"])
                .style(Style::default().bold()),
        )
        .block(Block::default().borders(Borders::ALL).title("Workouts"));
        frame.render_widget(table, body[0]);

        // Details or statistics
        let (title, text) = if self.show_stats {
            ("Statistics", stats::report(&self.log))
        } else {
            let text = self
                .selected_workout()
                .and_then(|name| self.log.find_by_name(name).ok())
                .map(|w| {
                    w.exercises()
                        .iter()
                        .map(|e| format!("- {}", e.describe()))
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .unwrap_or_default();
            ("Exercises", text)
        };
        let details = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(details, body[1]);

        // Footer
        let footer = match &self.message {
            Some((Severity::Error, text)) => {
                Paragraph::new(text.as_str()).style(Style::default().fg(Color::Red))
            }
            Some((Severity::Info, text)) => {
                Paragraph::new(text.as_str()).style(Style::default().fg(Color::Green))
            }
            None => Paragraph::new(
                "q: quit | w: workout | a: exercise | c: clear | s: stats | x: export | v: save",
            )
            .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(
            footer.block(Block::default().borders(Borders::ALL)),
            chunks[2],
        );

        match &self.mode {
            Mode::Browse => {}
            Mode::NewWorkout(name) => {
                let popup = centered(area, 50, 3);
                frame.render_widget(Clear, popup);
                frame.render_widget(
                    Paragraph::new(name.as_str())
                        .block(Block::default().borders(Borders::ALL).title("Workout name")),
                    popup,
                );
            }
            Mode::NewExercise => {
                let popup = centered(area, 50, FIELD_LABELS.len() as u16 + 2);
                let lines: Vec<Line> = FIELD_LABELS
                    .iter()
                    .zip(&self.form.fields)
                    .enumerate()
                    .map(|(i, (label, value))| {
                        let line = Line::from(format!("{:12} {}", label, value));
                        if i == self.form.focus {
                            line.style(Style::default().fg(Color::Yellow).bold())
                        } else {
                            line
                        }
                    })
                    .collect();
                let title = format!(
                    "Add exercise to {}",
                    self.selected_workout().unwrap_or("-")
                );
                frame.render_widget(Clear, popup);
                frame.render_widget(
                    Paragraph::new(lines)
                        .block(Block::default().borders(Borders::ALL).title(title)),
                    popup,
                );
            }
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Run `body`, then `restore` whatever the outcome. The body's error wins.
fn with_restore<T>(
    body: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn app() -> App {
        App::new(WorkoutLog::new(), Config::default())
    }

    fn message_starts_with(app: &App, severity: Severity, prefix: &str) -> bool {
        matches!(app.message(), Some((s, m)) if *s == severity && m.starts_with(prefix))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    fn fill_form(app: &mut App, fields: [&str; 5]) {
        app.handle_key(KeyCode::Char('a'));
        for field in fields {
            type_text(app, field);
            app.handle_key(KeyCode::Tab);
        }
        app.handle_key(KeyCode::Enter);
    }

    #[test]
    fn test_session_starts_with_default_workout() {
        let app = app();
        assert_eq!(app.log().names(), vec!["Daily Workout"]);
        assert_eq!(app.selected_workout(), Some("Daily Workout"));
        assert_eq!(
            app.message().map(|(_, m)| m.as_str()),
            Some("Welcome to the Fitness Tracker App!")
        );
    }

    #[test]
    fn test_add_workout_selects_it() {
        let mut app = app();
        app.handle_key(KeyCode::Char('w'));
        type_text(&mut app, "  Leg Day ");
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.mode(), &Mode::Browse);
        assert_eq!(app.log().names(), vec!["Daily Workout", "Leg Day"]);
        assert_eq!(app.selected_workout(), Some("Leg Day"));
    }

    #[test]
    fn test_add_blank_workout_reports_error() {
        let mut app = app();
        app.handle_key(KeyCode::Char('w'));
        type_text(&mut app, "   ");
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.log().count(), 1);
        assert_eq!(
            app.message(),
            Some(&(
                Severity::Error,
                "Failed to add workout: Workout name cannot be blank.".to_string()
            ))
        );
    }

    #[test]
    fn test_add_existing_workout_keeps_original() {
        let mut app = app();
        fill_form(&mut app, ["Bench", "10", "3", "50", "60"]);

        app.handle_key(KeyCode::Char('w'));
        type_text(&mut app, "Daily Workout");
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.log().count(), 1);
        assert_eq!(app.log().logged_workouts()[0].exercises().len(), 1);
    }

    #[test]
    fn test_add_exercise_to_selected_workout() {
        let mut app = app();
        app.handle_key(KeyCode::Char('w'));
        type_text(&mut app, "Push");
        app.handle_key(KeyCode::Enter);

        fill_form(&mut app, ["Bench", "10", "3", "50", "0"]);

        assert_eq!(app.mode(), &Mode::Browse);
        let push = app.log().find_by_name("Push").unwrap();
        assert_eq!(push.exercises()[0].volume(), 1500.0);
        assert!(app.log().find_by_name("Daily Workout").unwrap().exercises().is_empty());
        assert_eq!(
            app.message(),
            Some(&(Severity::Info, "Exercise added successfully.".to_string()))
        );
    }

    #[test]
    fn test_reps_and_sets_accept_digits_only() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "1x0-");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "3.5");
        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "2.5");

        assert_eq!(app.form().fields[REPS], "10");
        assert_eq!(app.form().fields[SETS], "35");
        assert_eq!(app.form().fields[3], "2.5");
    }

    #[test]
    fn test_invalid_exercise_stays_in_form() {
        let mut app = app();
        fill_form(&mut app, ["Bench", "10", "", "heavy", "0"]);

        assert_eq!(app.mode(), &Mode::NewExercise);
        assert!(app.log().logged_workouts()[0].exercises().is_empty());
        assert_eq!(
            app.message(),
            Some(&(Severity::Error, "Failed to add exercise: Sets cannot be blank.".to_string()))
        );
    }

    #[test]
    fn test_form_focus_wraps() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.form().focus, 4);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.form().focus, 0);
    }

    #[test]
    fn test_clear_resets_form_and_message() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        type_text(&mut app, "Squat");
        app.handle_key(KeyCode::Esc);
        app.handle_key(KeyCode::Char('c'));

        assert_eq!(app.form(), &ExerciseForm::default());
        assert!(app.message().is_none());
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app();
        app.handle_key(KeyCode::Up);
        assert_eq!(app.selected_workout(), Some("Daily Workout"));
        app.handle_key(KeyCode::Down);
        assert_eq!(app.selected_workout(), Some("Daily Workout"));
    }

    #[test]
    fn test_export_writes_configured_file() {
        let dir = tempdir().unwrap();
        let config = Config {
            export_path: dir.path().join("out.txt"),
            ..Config::default()
        };
        let mut app = App::new(WorkoutLog::new(), config);
        app.handle_key(KeyCode::Char('x'));

        let contents = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
        assert_eq!(contents, "Daily Workout (0 exercises, 0 min)\n");
        assert!(message_starts_with(&app, Severity::Info, "Data exported successfully"));
    }

    #[test]
    fn test_export_failure_is_reported() {
        let dir = tempdir().unwrap();
        let config = Config {
            export_path: dir.path().join("missing").join("out.txt"),
            ..Config::default()
        };
        let mut app = App::new(WorkoutLog::new(), config);
        app.handle_key(KeyCode::Char('x'));

        assert!(message_starts_with(&app, Severity::Error, "Failed to export data"));
        assert_eq!(app.log().count(), 1);
    }

    #[test]
    fn test_saved_session_loads_back() {
        let dir = tempdir().unwrap();
        let config = Config {
            session_path: dir.path().join("session.json"),
            ..Config::default()
        };
        let mut app = App::new(WorkoutLog::new(), config);
        fill_form(&mut app, ["Bench", "10", "3", "50", "60"]);
        app.handle_key(KeyCode::Char('v'));

        assert!(message_starts_with(&app, Severity::Info, "Session saved"));
        let loaded = export::load_json(&dir.path().join("session.json")).unwrap();
        assert_eq!(&loaded, app.log());
    }

    #[test]
    fn test_save_session_failure_is_reported() {
        let dir = tempdir().unwrap();
        let config = Config {
            session_path: dir.path().join("missing").join("session.json"),
            ..Config::default()
        };
        let mut app = App::new(WorkoutLog::new(), config);
        app.handle_key(KeyCode::Char('v'));

        assert!(message_starts_with(&app, Severity::Error, "Failed to save session"));
    }

    #[test]
    fn test_session_resumes_from_loaded_log() {
        let mut log = WorkoutLog::new();
        log.log(Workout::new("Push").unwrap());
        let app = App::new(log, Config::default());

        assert_eq!(app.log().names(), vec!["Push", "Daily Workout"]);
        assert_eq!(app.selected_workout(), Some("Push"));
    }

    #[test]
    fn test_terminal_restored_when_loop_fails() {
        let mut restored = false;
        let result: Result<()> = with_restore(
            || Err(anyhow::anyhow!("draw failed")),
            || {
                restored = true;
                Ok(())
            },
        );
        assert!(restored);
        assert_eq!(result.unwrap_err().to_string(), "draw failed");
    }

    #[test]
    fn test_restore_error_reported_after_clean_loop() {
        let result = with_restore(|| Ok(7), || Err(anyhow::anyhow!("restore failed")));
        assert_eq!(result.unwrap_err().to_string(), "restore failed");
        assert_eq!(with_restore(|| Ok(7), || Ok(())).unwrap(), 7);
    }

    #[test]
    fn test_render_empty_workout_volume_is_positive_zero() {
        let app = app();
        let backend = ratatui::backend::TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Daily Workout"));
        assert!(screen.contains("0.00"));
        assert!(!screen.contains("-0.00"));
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
