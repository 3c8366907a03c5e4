use glium::glutin::dpi::PhysicalSize;
use glium::glutin::event::{Event, StartCause, WindowEvent};
use glium::glutin::event_loop::{ControlFlow, EventLoop};
use glium::glutin::window::WindowBuilder;
use glium::glutin::ContextBuilder;
use lazy_static::lazy_static;
use send_wrapper::SendWrapper;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::Args;
use crate::game::{time_seed, Game, GameState, Outcome};
use crate::input::Input;
use crate::layout::Layout;
use crate::render::{self, Atlas};

lazy_static! {
    static ref EVENT_LOOP: SendWrapper<RefCell<Option<EventLoop<()>>>> =
        SendWrapper::new(RefCell::new(Some(EventLoop::new())));
    /// Window and GL context.
    pub static ref DISPLAY: SendWrapper<glium::Display> = SendWrapper::new({
        let wb = WindowBuilder::new()
            .with_title(crate::TITLE.to_owned())
            .with_resizable(false);
        let cb = ContextBuilder::new().with_vsync(true);
        glium::Display::new(wb, cb, EVENT_LOOP.borrow().as_ref().unwrap())
            .expect("Failed to initialize display")
    });
}

/// Returns the window title showing the mine counter and any end-of-game hint.
fn window_title(game: &Game) -> String {
    let counter = format!("{} - mines left: {}", crate::TITLE, game.mines_left());
    match (game.state(), game.outcome()) {
        (GameState::Infinite, Some(Outcome::Won)) => {
            format!("{} - you won! press R to restart", counter)
        }
        (GameState::Infinite, Some(Outcome::Lost)) => {
            format!("{} - boom! press R to restart", counter)
        }
        _ => counter,
    }
}

/// Opens the window and runs the game until the window is closed.
pub fn show_gui(args: &Args, mut game: Game) -> ! {
    let display = &**DISPLAY;
    let layout = Layout::default();

    let (width, height) = layout.window_size(&game.config());
    display
        .gl_window()
        .window()
        .set_inner_size(PhysicalSize::new(width, height));

    let atlas = match Atlas::load(display, &args.atlas) {
        Ok(atlas) => atlas,
        Err(e) => {
            log::error!("Failed to create texture atlas: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize runtime data.
    let mut input = Input::default();
    let mut events_buffer = VecDeque::new();
    let mut title = String::new();

    // Main loop.
    let mut next_frame_time = Instant::now();
    let ev_loop = EVENT_LOOP.borrow_mut().take().unwrap();
    ev_loop.run(move |event, _ev_loop, control_flow| {
        // Handle events.
        let now = Instant::now();
        let mut do_frame = false;
        match event.to_static() {
            Some(Event::NewEvents(cause)) => match cause {
                StartCause::ResumeTimeReached { .. } => do_frame = true,
                StartCause::Init => {
                    next_frame_time = now;
                    do_frame = true;
                }
                _ => (),
            },

            // The program is about to exit.
            Some(Event::LoopDestroyed) => (),

            // Queue the event to be handled next time we render
            // everything.
            Some(ev) => events_buffer.push_back(ev),

            // Ignore this event.
            None => (),
        }

        if do_frame && next_frame_time <= now {
            let frame_duration = Duration::from_secs_f64(1.0 / 60.0);

            next_frame_time = now + frame_duration;
            if next_frame_time < Instant::now() {
                // Skip a frame (or several).
                next_frame_time = Instant::now() + frame_duration;
            }
            *control_flow = ControlFlow::WaitUntil(next_frame_time);

            for ev in events_buffer.drain(..) {
                if let Event::WindowEvent { event, .. } = ev {
                    match event {
                        // Handle window close event.
                        WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                        _ => input.handle_event(&event),
                    }
                }
            }

            // Apply input, then advance the game.
            for action in input.take_actions(layout, time_seed) {
                if let Err(e) = game.apply(action) {
                    log::error!("Failed to apply {:?}: {}", action, e);
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }
            game.update();

            let new_title = window_title(&game);
            if new_title != title {
                display.gl_window().window().set_title(&new_title);
                title = new_title;
            }

            // Draw everything.
            let mut target = display.draw();
            if let Err(e) = render::draw_game(&mut target, &game, &atlas, layout) {
                log::error!("{}", e);
            }
            target.finish().expect("Failed to swap buffers");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::game::{Board, CellPos};

    #[test]
    fn test_window_title() {
        let config = BoardConfig::new(2, 2, 1).unwrap();
        let board = Board::from_mines(2, 2, &[CellPos(0, 0)]).unwrap();
        let mut game = Game::with_board(config, board);
        assert_eq!(window_title(&game), "minesweeper - mines left: 1");

        game.toggle_flag(CellPos(1, 1));
        game.toggle_flag(CellPos(1, 0));
        assert_eq!(window_title(&game), "minesweeper - mines left: -1");

        game.reveal(CellPos(0, 0));
        game.update();
        assert_eq!(
            window_title(&game),
            "minesweeper - mines left: -1 - boom! press R to restart"
        );
    }
}
