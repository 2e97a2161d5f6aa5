mod config;
mod controller;
mod logging;
mod media;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{mpsc, watch, Mutex};

use config::{CliArgs, PlayerConfig};
use controller::PlayerController;
use media::{AmbientFrame, AmbientVideo, MediaBinding, RodioAudio};
use model::PlayerModel;
use view::{PlayerView, ViewState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::from_env()?;
    if args.help {
        print!("{}", config::HELP);
        return Ok(());
    }

    let mut player_config = PlayerConfig::load(&args.config)?;
    player_config.apply_args(&args);

    let _log_guard = match logging::init_logging(&player_config.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!(config = ?player_config, "=== Nightcore Player Starting ===");

    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let audio = RodioAudio::open()?;
    let video = AmbientVideo::new();
    let ambient = video.subscribe();

    let binding = MediaBinding::new(
        Box::new(audio),
        Box::new(video),
        player_config.video_assets(),
        event_tx,
    );

    let model = Arc::new(Mutex::new(PlayerModel::new()));
    let media = Arc::new(Mutex::new(binding));
    let controller = PlayerController::new(model.clone(), media.clone());
    controller.start_media_event_listener(event_rx);

    if !args.files.is_empty() {
        controller.add_tracks(args.files.clone()).await;
    }

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, media, ambient, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Nightcore Player shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<PlayerModel>>,
    media: Arc<Mutex<MediaBinding>>,
    ambient: watch::Receiver<AmbientFrame>,
    controller: PlayerController,
) -> io::Result<()> {
    loop {
        let (playback, ui_state, error, should_quit) = {
            let mut model_guard = model.lock().await;
            model_guard.auto_clear_expired_error();

            (
                model_guard.get_playback_info(),
                model_guard.get_ui_state(),
                model_guard.error().map(str::to_string),
                model_guard.should_quit(),
            )
        };

        if should_quit {
            break;
        }

        let load_state = media.lock().await.load_state();
        let ambient_frame = AmbientFrame::clone(&ambient.borrow());

        terminal.draw(|f| {
            PlayerView::render(
                f,
                &ViewState {
                    playback: &playback,
                    ui_state: &ui_state,
                    ambient: &ambient_frame,
                    load_state,
                    error: error.as_deref(),
                },
            );
        })?;

        // Short poll keeps the vibe window animating smoothly
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                controller.handle_key_event(key).await;
            }
        }
    }

    Ok(())
}
