use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

mod app;
mod config;
mod editor;
mod error;
mod input;
mod library;
mod logging;
mod prompter;
mod render;
mod settings;
mod store;
mod theme;

use app::{App, Completion, Route};
use config::ConfigEngine;
use prompter::{IntervalFrames, TerminalFullscreen};
use render::Renderer;
use store::{FileBackend, Store};
use theme::Theme;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load config before anything touches the terminal
    let mut engine = ConfigEngine::new();
    let config_error = engine.load_default().err();
    let config = engine.config();

    let data_dir = config.resolve_data_dir();
    if let Some(dir) = &data_dir {
        // Without a log file the app still runs, just silently
        if let Ok(path) = logging::init(&config.log_level, dir) {
            info!(log = %path.display(), "cue starting");
        }
    }
    let store = match &data_dir {
        Some(dir) => Store::new(FileBackend::new(dir.clone())),
        None => Store::in_memory(),
    };

    // Set up terminal
    Renderer::setup()?;
    let result = run(store, config.defaults.clone(), config.frame_rate, config_error).await;

    // Cleanup, even when the loop failed
    Renderer::teardown()?;

    if let Err(e) = &result {
        error!(error = %e, "terminal error");
    }
    result
}

async fn run(
    store: Store,
    defaults: settings::Settings,
    frame_rate: u32,
    config_error: Option<error::Error>,
) -> std::io::Result<()> {
    let mut renderer = Renderer::new(Theme::default())?;
    let size = (renderer.width, renderer.height);

    let fullscreen = TerminalFullscreen::detect(size);
    let mut app = App::new(store, defaults, Box::new(fullscreen), size);
    if let Some(e) = config_error {
        warn!(error = %e, "using built-in defaults");
        app.set_message(e.to_string());
    }

    let mut frames = IntervalFrames::new(frame_rate);
    let (tx, mut completions) = mpsc::unbounded_channel::<Completion>();

    // Initial render
    renderer.render(&app)?;

    // Event stream for async key reading
    let mut event_stream = EventStream::new();

    // Main loop
    while app.running {
        let deadline = app.controls_deadline();
        let wake = deadline
            .map(tokio::time::Instant::from_std)
            .unwrap_or_else(|| tokio::time::Instant::now() + Duration::from_secs(3600));

        tokio::select! {
            maybe_event = event_stream.next() => match maybe_event {
                Some(Ok(event)) => {
                    if let Event::Resize(width, height) = event {
                        renderer.resize(width, height);
                    }
                    input::handle_event(&mut app, &mut frames, event, Instant::now());
                }
                Some(Err(e)) => return Err(e),
                None => app.quit(),
            },
            Some(id) = frames.next_frame(), if frames.is_armed() => {
                app.on_frame(id, &mut frames, Instant::now());
            }
            _ = tokio::time::sleep_until(wake), if deadline.is_some() => {
                app.tick(Instant::now());
            }
            Some(completion) = completions.recv() => {
                app.complete(completion);
            }
        }

        for effect in app.take_effects() {
            app::spawn(effect, app.session(), tx.clone());
        }

        if let Route::Editor(editor) = &mut app.route {
            editor.adjust_scroll(renderer.text_height());
        }
        renderer.render(&app)?;
    }

    info!("cue exiting");
    Ok(())
}
