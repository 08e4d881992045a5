//! Terminal Pong (default binary).
//!
//! Left paddle: W/S. Right paddle: Up/Down. Quit: Q or Ctrl+C.

use anyhow::Result;
use tracing::{info, warn};

use tui_arcade::engine::{EngineConfig, EngineEvent, EngineEventKind, GameEngine};
use tui_arcade::input::InputManager;
use tui_arcade::pong::{self, Pong};
use tui_arcade::telemetry::init_telemetry;
use tui_arcade::term::{terminal_size, FrameSink, Renderer, TerminalSink};

struct App {
    pong: Pong,
    renderer: Renderer,
    input: InputManager,
    sink: TerminalSink,
    fps: u32,
}

fn main() -> Result<()> {
    init_telemetry()?;
    let config = EngineConfig::from_env();
    let (width, height) = config.grid_size(terminal_size());

    let mut input = InputManager::new().with_hold_window(config.hold_window());
    pong::bind_keys(&mut input);

    let mut app = App {
        pong: Pong::new(width, height),
        renderer: Renderer::new(width, height),
        input,
        sink: TerminalSink::new(),
        fps: 0,
    };

    info!(width, height, tick_rate_hz = config.tick_rate_hz, "starting pong");
    let result = app.sink.enter().and_then(|()| run(&config, &mut app));
    info!(left = app.pong.score.0, right = app.pong.score.1, "pong finished");

    // Always try to restore terminal state.
    app.input.destroy();
    if let Err(err) = app.sink.exit() {
        warn!(error = %err, "failed to restore terminal");
    }
    result
}

fn run(config: &EngineConfig, app: &mut App) -> Result<()> {
    let mut engine: GameEngine<App> = GameEngine::from_config(config);
    let stop = engine.stop_handle();

    let quit = stop.clone();
    app.input.on(pong::QUIT_GAME, move |_| quit.request_stop());

    engine.on(EngineEventKind::FixedUpdate, |app: &mut App, event| {
        if let EngineEvent::FixedUpdate { frame_ms } = *event {
            app.pong.fixed_update(&app.input, frame_ms)?;
        }
        Ok(())
    });

    engine.on(EngineEventKind::Render, |app: &mut App, event| {
        if let EngineEvent::Render { interpolation } = *event {
            app.pong.draw(&mut app.renderer, interpolation, app.fps);
            if let Some(frame) = app.renderer.flip() {
                app.sink.present(&frame)?;
            }
        }
        Ok(())
    });

    engine.on(EngineEventKind::FpsUpdate, |app: &mut App, event| {
        if let EngineEvent::FpsUpdate { fps } = *event {
            app.fps = fps;
        }
        Ok(())
    });

    engine.run(app, |app, budget| {
        app.input.wait(budget)?;
        if app.input.quit_requested() {
            stop.request_stop();
        }
        Ok(())
    })
}
