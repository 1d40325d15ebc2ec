mod app;
mod commands;
mod config;
mod render;
mod runner;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use odd_scoring_common::games::odd_scoring::GameMode;
use odd_scoring_common::id_generator::generate_nickname;
use odd_scoring_common::logger::{self, LogLevel};
use odd_scoring_common::protocol::NoTransport;
use odd_scoring_common::session::{ControllerSettings, SessionController, TokioBotScheduler};
use odd_scoring_common::{log, log_warn};

use app::ClientApp;
use commands::Command;
use config::{get_config_manager, Config};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Bot,
    Local,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Bot => GameMode::VsBot,
            ModeArg::Local => GameMode::VsLocalPlayer,
        }
    }
}

#[derive(Parser)]
#[command(name = "odd_scoring_client")]
struct Args {
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    #[arg(long)]
    board_size: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    config: Option<String>,
    /// Resume the session stored at the configured snapshot path.
    #[arg(long)]
    load_snapshot: bool,
    #[arg(long)]
    verbose: bool,
}

/// Fills in a generated nickname on first run and keeps it for next time.
fn ensure_nickname(config: &mut Config, config_path: Option<&str>) -> String {
    if let Some(nickname) = &config.nickname {
        return nickname.clone();
    }

    let nickname = generate_nickname();
    config.nickname = Some(nickname.clone());
    if let Err(e) = get_config_manager(config_path).set_config(config) {
        log_warn!("Failed to store generated nickname: {}", e);
    }
    nickname
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = get_config_manager(args.config.as_deref()).get_config()?;

    let prefix = if config.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    let level = if args.verbose { LogLevel::Debug } else { LogLevel::Info };
    logger::init_logger(prefix, level);

    let nickname = ensure_nickname(&mut config, args.config.as_deref());
    let settings = ControllerSettings {
        nickname,
        bot_delay: Duration::from_millis(config.bot_delay_ms),
        seed: args.seed,
    };

    let (scheduler, bot_rx) = TokioBotScheduler::new();
    let controller = SessionController::new(settings, NoTransport, scheduler);
    let mut app = ClientApp::new(controller, PathBuf::from(&config.snapshot_path), config.default_mode);
    log!("Playing as {} (seed {})", app.controller().nickname(), app.controller().seed());

    if args.load_snapshot {
        if let (_, Some(feedback)) = app.handle_command(Command::Load) {
            println!("{}", feedback);
        }
    } else {
        let mode = args.mode.map_or(config.default_mode, GameMode::from);
        app.start(mode, args.board_size)?;
    }

    runner::run(app, bot_rx).await
}
