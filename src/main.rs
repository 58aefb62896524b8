mod app;
mod event;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use rust_i18n::t;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, prelude::*};

use cuecard::config::Config;
use cuecard::repository::WordRepository;
use cuecard::repository::embedded::EmbeddedRepository;
use cuecard::session::Session;
use cuecard::session::command::SessionCommand;
use cuecard::settings::Role;
use cuecard::store::json_store::JsonStore;
use cuecard::store::{KeyValueStore, MemoryStore};

use app::App;
use event::{AppEvent, EventHandler};
use ui::components::category_list::CategoryList;
use ui::components::simple_words::SimpleWords;
use ui::components::timer_display::TimerDisplay;
use ui::components::word_card::WordCard;
use ui::layout::{AppLayout, pack_hint_lines};
use ui::theme::Theme;

rust_i18n::i18n!("locales", fallback = "en");

#[derive(Parser)]
#[command(name = "cuecard", version, about = "Word-guessing party game helper for the terminal")]
struct Cli {
    #[arg(short, long, help = "Language to show target words in")]
    language: Option<String>,

    #[arg(short, long, value_enum, help = "Play as narrator or guesser")]
    role: Option<Role>,

    #[arg(short, long, help = "Round length in minutes; turns the timer on")]
    minutes: Option<u32>,

    #[arg(long, help = "Directory for settings, solved words and the log")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Forget every solved word before starting")]
    reset_solved: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    // Leave an editable config behind on first run
    let first_run = if Config::config_path().exists() {
        Ok(())
    } else {
        config.save()
    };
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = Some(dir);
    }
    let data_dir = config.data_dir();

    if let Err(err) = init_logging(&data_dir, &config.log_filter) {
        eprintln!("cuecard: logging disabled: {err:#}");
    }
    info!(data_dir = %data_dir.display(), languages = ?config.languages, "starting");
    if let Err(err) = first_run {
        warn!(error = %err, "could not write default config");
    }

    let store: Rc<dyn KeyValueStore> = match JsonStore::with_base_dir(data_dir) {
        Ok(store) => Rc::new(store),
        Err(err) => {
            warn!(error = %err, "data directory unavailable, progress will not be saved");
            Rc::new(MemoryStore::new())
        }
    };

    let mut session = Session::new(word_repository(&config), store, config.languages.clone());
    apply_cli(&mut session, &cli);

    let theme = Theme::load(&config.theme).unwrap_or_default();
    let theme: &'static Theme = Box::leak(Box::new(theme));
    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let mut app = App::new(session, theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(tick_rate);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn init_logging(data_dir: &Path, default_filter: &str) -> Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("creating {}", data_dir.display()))?;
    let log_path = data_dir.join("cuecard.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening {}", log_path.display()))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

#[cfg(feature = "network")]
fn word_repository(config: &Config) -> Box<dyn WordRepository> {
    if let Some(ref url) = config.words_url {
        match cuecard::repository::remote::RemoteRepository::new(url) {
            Ok(repo) => {
                info!(%url, "using remote word lists");
                return Box::new(repo);
            }
            Err(err) => warn!(%url, error = %err, "remote word lists unavailable"),
        }
    }
    Box::new(EmbeddedRepository::new())
}

#[cfg(not(feature = "network"))]
fn word_repository(config: &Config) -> Box<dyn WordRepository> {
    if config.words_url.is_some() {
        warn!("words_url is set but this build has no network support");
    }
    Box::new(EmbeddedRepository::new())
}

fn apply_cli(session: &mut Session, cli: &Cli) {
    if let Some(ref language) = cli.language {
        if !session.set_language(language) {
            warn!(%language, "unknown language on the command line");
        }
    }
    if let Some(role) = cli.role {
        session.set_role(role);
    }
    if let Some(minutes) = cli.minutes {
        if session.set_timer_minutes(minutes) {
            session.set_timer_enabled(true);
        } else {
            warn!(minutes, "timer length out of range");
        }
    }
    if cli.reset_solved {
        session.undo_all();
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick(now) => app.tick(now),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    let minutes = app.session.settings().timer_minutes;
    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('g') => SessionCommand::ToggleRole,
        KeyCode::Char('L') => SessionCommand::CycleLanguage,
        KeyCode::Char('b') => SessionCommand::ToggleSecondLanguage,
        KeyCode::Char('B') => SessionCommand::CycleSecondLanguage,
        // Everything below is narrator-only
        _ if !app.screen.role.is_narrator() => return,
        KeyCode::Char('n') | KeyCode::Enter => SessionCommand::NewWord,
        KeyCode::Left | KeyCode::Char('h') => SessionCommand::PrevWord,
        KeyCode::Right | KeyCode::Char('l') => SessionCommand::NextWord,
        KeyCode::Char('s') => SessionCommand::MarkSolved,
        KeyCode::Char('u') => SessionCommand::UndoLast,
        KeyCode::Char('U') => SessionCommand::UndoAll,
        KeyCode::Char('t') => SessionCommand::StartTimer,
        KeyCode::Char(' ') => SessionCommand::PauseTimer,
        KeyCode::Char('r') => SessionCommand::ResetTimer,
        KeyCode::Char('T') => SessionCommand::ToggleTimerEnabled,
        KeyCode::Char('+') | KeyCode::Char('=') => SessionCommand::SetTimerMinutes(minutes + 1),
        KeyCode::Char('-') => SessionCommand::SetTimerMinutes(minutes.saturating_sub(1)),
        KeyCode::Char(ch @ '1'..='9') => {
            let n = ch as usize - '0' as usize;
            let Some(category) = app.category_at(n) else {
                return;
            };
            SessionCommand::ToggleCategory(category)
        }
        _ => return,
    };
    app.dispatch(command);
}

fn footer_hints(narrator: bool) -> Vec<String> {
    let mut hints = Vec::new();
    if narrator {
        hints.extend([
            t!("hint.new").to_string(),
            t!("hint.nav").to_string(),
            t!("hint.solved").to_string(),
            t!("hint.undo").to_string(),
            t!("hint.timer").to_string(),
            t!("hint.timer_settings").to_string(),
            t!("hint.categories").to_string(),
        ]);
    }
    hints.push(t!("hint.language").to_string());
    hints.push(t!("hint.role").to_string());
    hints.push(t!("hint.quit").to_string());
    hints
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let screen = &app.screen;
    let narrator = screen.role.is_narrator();

    let hints = footer_hints(narrator);
    let hint_refs: Vec<&str> = hints.iter().map(String::as_str).collect();
    let hint_lines = pack_hint_lines(&hint_refs, area.width as usize);
    let layout = AppLayout::new(
        area,
        narrator,
        screen.counts.len() as u16,
        hint_lines.len().max(1) as u16,
    );

    frame.render_widget(Block::default().style(Style::default().bg(colors.bg())), area);
    render_header(frame, app, layout.header);

    if let Some(panels) = layout.narrator {
        let category_label = screen.word.as_ref().and_then(|word| {
            screen
                .counts
                .iter()
                .find(|count| count.category.id == word.category)
                .map(|count| count.category.label.as_str())
        });
        let card = WordCard::new(screen.word.as_ref(), category_label, app.theme);
        frame.render_widget(&card, panels.word);

        let settings = app.session.settings();
        let timer = TimerDisplay {
            clock: &screen.timer,
            enabled: settings.timer_enabled,
            minutes: settings.timer_minutes,
            theme: app.theme,
        };
        frame.render_widget(&timer, panels.timer);

        let categories = CategoryList {
            counts: &screen.counts,
            totals: screen.totals,
            theme: app.theme,
        };
        frame.render_widget(&categories, panels.categories);
    }

    let simple = SimpleWords {
        groups: &screen.groups,
        theme: app.theme,
    };
    frame.render_widget(&simple, layout.simple_words);

    if let Some(ref notice) = screen.notice {
        let notice = Paragraph::new(Line::from(Span::styled(
            format!("  {}", notice.message()),
            Style::default()
                .fg(colors.warning())
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(notice, layout.notice);
    }

    let footer_lines: Vec<Line> = hint_lines
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.muted()))))
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let settings = app.session.settings();
    let history = app.session.history();

    let role = match settings.role {
        Role::Narrator => t!("role.narrator"),
        Role::Guesser => t!("role.guesser"),
    };
    let languages = if settings.second_language_enabled {
        format!("{} → {}", settings.language, settings.second_language)
    } else {
        settings.language.clone()
    };

    let mut info = format!(" {languages}");
    if settings.role.is_narrator() {
        if let Some(position) = history.position() {
            let progress = t!(
                "header.history",
                position = position,
                total = history.len()
            );
            info.push_str(&format!("  |  {progress}"));
        }
        let solved = t!("header.solved", count = app.session.solved().len());
        info.push_str(&format!("  |  {solved}"));
    }

    let header = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!(" cuecard · {role} "),
                Style::default()
                    .fg(colors.header_fg())
                    .bg(colors.header_bg())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                info,
                Style::default()
                    .fg(colors.accent())
                    .bg(colors.header_bg()),
            ),
        ]),
    ])
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}
