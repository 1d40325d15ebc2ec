use std::path::PathBuf;

use chrono::Local;
use odd_scoring_common::games::odd_scoring::GameMode;
use odd_scoring_common::persistence::{load_snapshot_file, save_snapshot_file};
use odd_scoring_common::protocol::NoTransport;
use odd_scoring_common::session::{BotScheduler, BotTurnDue, RenderState, SessionController};
use odd_scoring_common::{log, log_warn};
use ringbuffer::{AllocRingBuffer, RingBuffer};

use crate::commands::{Command, HELP_TEXT};

pub const EVENT_LOG_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal front end over a local session: turns commands into controller
/// intents and keeps a short history of what happened.
pub struct ClientApp<S: BotScheduler> {
    controller: SessionController<NoTransport, S>,
    snapshot_path: PathBuf,
    event_log: AllocRingBuffer<String>,
    last_mode: GameMode,
}

impl<S: BotScheduler> ClientApp<S> {
    pub fn new(controller: SessionController<NoTransport, S>, snapshot_path: PathBuf, default_mode: GameMode) -> Self {
        Self {
            controller,
            snapshot_path,
            event_log: AllocRingBuffer::new(EVENT_LOG_SIZE),
            last_mode: default_mode,
        }
    }

    pub fn controller(&self) -> &SessionController<NoTransport, S> {
        &self.controller
    }

    pub fn events(&self) -> Vec<String> {
        self.event_log.iter().cloned().collect()
    }

    fn record(&mut self, event: String) {
        let timestamp = Local::now().format("%H:%M:%S");
        self.event_log.enqueue(format!("[{}] {}", timestamp, event));
    }

    pub fn render_state(&self) -> RenderState {
        self.controller.current_render_state()
    }

    pub fn start(&mut self, mode: GameMode, board_size: Option<u32>) -> Result<(), String> {
        self.controller
            .start_session_with(mode, board_size)
            .map_err(|e| e.to_string())?;
        self.last_mode = mode;
        let size = self.render_state().board_size;
        self.record(format!("New {:?} game on {} cells", mode, size));
        Ok(())
    }

    /// Returns a message for the user when the command could not be carried out.
    pub fn handle_command(&mut self, command: Command) -> (Flow, Option<String>) {
        let feedback = match command {
            Command::Move(steps) => self.submit_move(steps),
            Command::New => {
                if self.render_state().mode.is_some() {
                    self.controller.reset_session();
                    self.record("Session restarted".to_string());
                    None
                } else {
                    self.start(self.last_mode, None).err()
                }
            }
            Command::Menu => {
                self.controller.return_to_menu();
                None
            }
            Command::Bot => self.start(GameMode::VsBot, None).err(),
            Command::Local => self.start(GameMode::VsLocalPlayer, None).err(),
            Command::Save => self.save(),
            Command::Load => self.load(),
            Command::Help => Some(HELP_TEXT.to_string()),
            Command::Quit => return (Flow::Quit, None),
        };
        (Flow::Continue, feedback)
    }

    fn submit_move(&mut self, steps: u32) -> Option<String> {
        let mover = self.render_state().current_label;
        match self.controller.submit_move(steps) {
            Ok(()) => {
                let mover = mover.map_or_else(|| "Player".to_string(), |label| label.to_string());
                self.record(format!("{} took {}", mover, steps));
                None
            }
            Err(e) => Some(e.to_string()),
        }
    }

    /// Returns whether the bot actually moved.
    pub fn on_bot_turn(&mut self, due: BotTurnDue) -> bool {
        let before = self.render_state().total_steps;
        if !self.controller.fire_bot_turn(due.epoch) {
            return false;
        }
        let steps = self.render_state().total_steps - before;
        self.record(format!("Computer took {}", steps));
        true
    }

    fn save(&mut self) -> Option<String> {
        let snapshot = self.controller.save_snapshot();
        match save_snapshot_file(&self.snapshot_path, &snapshot) {
            Ok(()) => {
                log!("Session saved to {}", self.snapshot_path.display());
                self.record("Session saved".to_string());
                None
            }
            Err(e) => Some(format!("Failed to save session: {}", e)),
        }
    }

    fn load(&mut self) -> Option<String> {
        match load_snapshot_file(&self.snapshot_path) {
            Ok(Some(snapshot)) => {
                if self.controller.load_snapshot(&snapshot) {
                    if let Some(mode) = self.render_state().mode {
                        self.last_mode = mode;
                    }
                    self.record("Session restored".to_string());
                    None
                } else {
                    Some("Saved session is unusable, back to the menu".to_string())
                }
            }
            Ok(None) => Some(format!("No saved session at {}", self.snapshot_path.display())),
            Err(e) => {
                log_warn!("Failed to read snapshot: {}", e);
                self.controller.return_to_menu();
                Some(format!("Failed to read saved session: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use odd_scoring_common::session::{ControllerSettings, SessionPhase, TokioBotScheduler};

    fn get_temp_file_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_odd_scoring_client_snapshot_{}.yaml", random_number));
        path
    }

    fn app(snapshot_path: PathBuf) -> (ClientApp<TokioBotScheduler>, tokio::sync::mpsc::UnboundedReceiver<BotTurnDue>) {
        let settings = ControllerSettings {
            nickname: "Test Tern".to_string(),
            bot_delay: Duration::from_millis(200),
            seed: Some(5),
        };
        let (scheduler, bot_rx) = TokioBotScheduler::new();
        let controller = SessionController::new(settings, NoTransport, scheduler);
        (ClientApp::new(controller, snapshot_path, GameMode::VsBot), bot_rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_bot_replies_after_delay() {
        let (mut app, mut bot_rx) = app(get_temp_file_path());
        app.start(GameMode::VsBot, Some(10)).unwrap();

        let (flow, feedback) = app.handle_command(Command::Move(3));
        assert_eq!(flow, Flow::Continue);
        assert!(feedback.is_none());

        let due = bot_rx.recv().await.unwrap();
        assert!(app.on_bot_turn(due));
        assert_eq!(app.render_state().position, 4);
        assert!(app.events().last().unwrap().ends_with("Computer took 2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_illegal_move_reports_error() {
        let (mut app, _bot_rx) = app(get_temp_file_path());
        app.start(GameMode::VsLocalPlayer, Some(8)).unwrap();

        let (_, feedback) = app.handle_command(Command::Move(5));
        assert!(feedback.unwrap().contains("Illegal move"));
        assert_eq!(app.render_state().position, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_then_load_restores_position() {
        let path = get_temp_file_path();
        let (mut app, _bot_rx) = app(path.clone());
        app.start(GameMode::VsLocalPlayer, Some(12)).unwrap();
        app.handle_command(Command::Move(2));
        assert!(app.handle_command(Command::Save).1.is_none());

        app.handle_command(Command::Menu);
        assert_eq!(app.render_state().phase, SessionPhase::Menu);

        assert!(app.handle_command(Command::Load).1.is_none());
        let state = app.render_state();
        assert_eq!((state.position, state.total_steps), (9, 2));
        assert_eq!(state.mode, Some(GameMode::VsLocalPlayer));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_without_file_reports_missing() {
        let (mut app, _bot_rx) = app(get_temp_file_path());
        let (_, feedback) = app.handle_command(Command::Load);
        assert!(feedback.unwrap().starts_with("No saved session"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_from_menu_uses_last_mode() {
        let (mut app, _bot_rx) = app(get_temp_file_path());
        app.handle_command(Command::Local);
        app.handle_command(Command::Menu);
        app.handle_command(Command::New);
        assert_eq!(app.render_state().mode, Some(GameMode::VsLocalPlayer));
        assert_eq!(app.handle_command(Command::Quit).0, Flow::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_log_keeps_recent_entries() {
        let (mut app, _bot_rx) = app(get_temp_file_path());
        for _ in 0..(EVENT_LOG_SIZE + 3) {
            app.handle_command(Command::Local);
        }
        assert_eq!(app.events().len(), EVENT_LOG_SIZE);
    }
}
