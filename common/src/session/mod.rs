mod bot_timer;
mod controller;
mod game_session;
mod mode;
mod render;
mod role;


pub use bot_timer::{BotScheduler, BotTurnDue, TokioBotScheduler};
pub use controller::{ControllerSettings, SessionController};
pub use game_session::Session;
pub use mode::{BotMode, LocalMode, ModeRules, ModeState, SideLabel, TurnAdvance};
pub use render::{LobbyView, RenderState, SessionPhase};
pub use role::NetworkRole;
