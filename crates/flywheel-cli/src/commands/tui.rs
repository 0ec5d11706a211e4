use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use flywheel_core::AppConfig;
use flywheel_tui::{
    event::{AppEvent, EventHandler},
    input::{self, Action},
    widgets::{PickerWidget, StatusBarWidget},
    App,
};

pub async fn run(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle("Flywheel")
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create event handler with animation FPS support
    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.wheel.animation_fps);

    let mut app = App::new(config);

    // Track if we need high frame rate for smooth scrolling
    // This is checked at the END of each iteration to determine NEXT iteration's tick rate
    let mut needs_fast_update = false;

    // Main loop
    loop {
        // Advance wheel animations and drain committed dates
        app.on_tick(Instant::now());

        // Draw UI
        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: picker + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            PickerWidget::render(frame, main_layout[0], &mut app);
            StatusBarWidget::render(frame, main_layout[1], &app);
        })?;

        // Use fast polling during animations, normal polling otherwise
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        let now = Instant::now();
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => match input::handle_key_event(key) {
                    Action::Quit => app.should_quit = true,
                    Action::FocusNext => app.focus_next(),
                    Action::FocusPrev => app.focus_prev(),
                    Action::StepUp => app.step_focused(-1, now),
                    Action::StepDown => app.step_focused(1, now),
                    Action::ToggleCyclic => app.toggle_cyclic(),
                    Action::CycleMode => app.cycle_mode(),
                    Action::SetToday => app.set_today(now),
                    _ => {}
                },
                AppEvent::Mouse(mouse) => match input::handle_mouse_event(mouse) {
                    Action::PointerDown { x, y } => app.pointer_down(x, y, now),
                    Action::PointerMove { x, y } => app.pointer_move(x, y, now),
                    Action::PointerUp { x, y } => app.pointer_up(x, y, now),
                    Action::NudgeAt { x, y, steps } => app.nudge_at(x, y, steps, now),
                    _ => {}
                },
                AppEvent::Resize(_, _) => {
                    // Next draw picks up the new size
                }
                AppEvent::Tick => {
                    // Animations were already advanced before the draw
                }
            }
        }

        needs_fast_update = app.needs_animation();

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
