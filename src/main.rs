mod app;
mod events;
mod services;
mod tui;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;

use edgescroll::{Clock, Config, Direction, EffectRunner, Msg, SystemClock, log};

use app::App;
use events::Action;
use services::{Page, PageService};

/// Trigger overrides given on the command line
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    direction: Option<Direction>,
    offset: Option<u32>,
    timeout_ms: Option<u64>,
}

fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--top" => cli.direction = Some(Direction::Top),
            "--bottom" => cli.direction = Some(Direction::Bottom),
            flag @ ("--offset" | "-o" | "--timeout-ms" | "-t") => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Warning: {} requires a value", flag);
                    i += 1;
                    continue;
                };
                let parsed = match flag {
                    "--offset" | "-o" => value.parse().map(|n| cli.offset = Some(n)).is_ok(),
                    _ => value.parse().map(|n| cli.timeout_ms = Some(n)).is_ok(),
                };
                if !parsed {
                    eprintln!("Warning: invalid value '{}' for {}", value, flag);
                }
                i += 1;
            }
            other => eprintln!("Warning: ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    cli
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging and panic hook
    if let Ok(log_path) = log::init() {
        log::log(&format!("Log file: {}", log_path.display()));
        log::install_panic_hook();
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args);

    // Precedence: CLI > env var > config file > default
    let config = Config::load()
        .with_env()
        .with_overrides(cli.direction, cli.offset, cli.timeout_ms);
    log::log(&format!("Config: {:?}", config));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // Clock reads and timeouts come back on this channel
    let (runner, mut trigger_rx) = EffectRunner::channel(SystemClock, 32);

    let (page_tx, mut page_rx) = mpsc::channel::<Page>(8);
    let pages = PageService::new(&app.config.demo, page_tx);

    let mut event_stream = EventStream::new();
    let mut tick: usize = 0;

    sync_viewport(terminal, app)?;

    // Initial fetch on mount
    let request = app.initial_request();
    pages.fetch(request);

    loop {
        terminal.draw(|frame| tui::ui::render(frame, app, tick))?;

        if app.should_quit {
            break;
        }

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        let action = events::handle_event(&event, app.viewport);
                        if action == Action::Resized {
                            sync_viewport(terminal, app)?;
                        }
                        apply_action(app, action);
                        if action.is_scroll() {
                            let msg = app.report_scroll();
                            dispatch(app, &runner, &pages, msg);
                        }
                    }
                    Some(Err(e)) => log::log(&format!("Terminal event error: {}", e)),
                    None => break,
                }
            }

            Some(msg) = trigger_rx.recv() => {
                dispatch(app, &runner, &pages, msg);
            }

            Some(page) = page_rx.recv() => {
                // New content changes the geometry, so report it like a scroll
                if app.apply_page(page) {
                    let msg = app.report_scroll();
                    dispatch(app, &runner, &pages, msg);
                }
            }

            // Keep the spinner moving
            _ = tokio::time::sleep(Duration::from_millis(80)) => {
                tick = tick.wrapping_add(1);
            }
        }
    }

    Ok(())
}

/// Run a trigger message through the app and start any fetches it requests.
fn dispatch<C: Clock>(app: &mut App, runner: &EffectRunner<C>, pages: &PageService, msg: Msg) {
    for request in runner.run(app.handle_trigger(msg)) {
        log::log_event(&format!("load more: page {} from {}", request.page, request.direction));
        pages.fetch(request);
    }
}

fn apply_action(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::ScrollUp(n) => app.scroll_by(-(n as isize)),
        Action::ScrollDown(n) => app.scroll_by(n as isize),
        Action::ScrollToTop => app.scroll_to_top(),
        Action::ScrollToBottom => app.scroll_to_bottom(),
        Action::Resized | Action::None => {}
    }
}

fn sync_viewport<B: Backend>(terminal: &Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let size = terminal.size()?;
    app.set_viewport(tui::ui::list_rows(size.height));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let cli = parse_args(&args(&["--top", "--offset", "5", "-t", "900"]));
        assert_eq!(
            cli,
            CliArgs {
                direction: Some(Direction::Top),
                offset: Some(5),
                timeout_ms: Some(900),
            }
        );
    }

    #[test]
    fn test_parse_args_ignores_bad_values() {
        let cli = parse_args(&args(&["--offset", "far", "--bottom", "--timeout-ms"]));
        assert_eq!(
            cli,
            CliArgs {
                direction: Some(Direction::Bottom),
                offset: None,
                timeout_ms: None,
            }
        );
    }

    #[test]
    fn test_apply_action_scrolls_within_bounds() {
        let mut app = App::new(Config::default());
        app.items = (0..30).map(|n| n.to_string()).collect();
        app.set_viewport(10);

        apply_action(&mut app, Action::ScrollDown(25));
        assert_eq!(app.scroll, 20);
        apply_action(&mut app, Action::ScrollUp(3));
        assert_eq!(app.scroll, 17);
        apply_action(&mut app, Action::ScrollToTop);
        assert_eq!(app.scroll, 0);
        apply_action(&mut app, Action::Quit);
        assert!(app.should_quit);
    }
}
