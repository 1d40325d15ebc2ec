use std::time::Duration;

use crate::error::SessionError;
use crate::games::SessionRng;
use crate::games::odd_scoring::{
    BOT_PLAYER, GameMode, GameStatus, MAX_STEPS, MoveOutcome, OddScoringGameState,
    OddScoringSettings, PlayerNumber, calculate_move, validate_board_size,
};
use crate::id_generator::generate_nickname;
use crate::lobby::Roster;
use crate::persistence::{SessionSnapshot, snapshot_from_yaml, snapshot_to_yaml};
use crate::protocol::{ProtocolMessage, SessionTransport, SyncState, decode_message};
use crate::{PeerId, log, log_debug, log_warn};
use super::bot_timer::BotScheduler;
use super::game_session::Session;
use super::mode::{ModeState, TurnAdvance};
use super::render::{LobbyView, RenderState, SessionPhase};
use super::role::NetworkRole;

pub const DEFAULT_BOT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub nickname: String,
    pub bot_delay: Duration,
    pub seed: Option<u64>,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            nickname: generate_nickname(),
            bot_delay: DEFAULT_BOT_DELAY,
            seed: None,
        }
    }
}

#[derive(Debug)]
struct LobbyState {
    role: NetworkRole,
    roster: Roster,
    board_size: Option<u32>,
}

#[derive(Debug)]
enum Phase {
    Menu,
    Lobby(LobbyState),
    InGame(Session),
}

/// Single owner of the session. Every entry point handles one event to
/// completion: a local intent, a transport callback, or a due bot turn.
pub struct SessionController<T: SessionTransport, S: BotScheduler> {
    phase: Phase,
    epoch: u64,
    nickname: String,
    bot_delay: Duration,
    rng: SessionRng,
    transport: T,
    scheduler: S,
}

impl<T: SessionTransport, S: BotScheduler> SessionController<T, S> {
    pub fn new(settings: ControllerSettings, transport: T, scheduler: S) -> Self {
        let rng = match settings.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };

        Self {
            phase: Phase::Menu,
            epoch: 0,
            nickname: settings.nickname,
            bot_delay: settings.bot_delay,
            rng,
            transport,
            scheduler,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            Phase::InGame(session) => Some(session),
            _ => None,
        }
    }

    pub fn network_role(&self) -> Option<&NetworkRole> {
        match &self.phase {
            Phase::Lobby(lobby) => Some(&lobby.role),
            Phase::InGame(session) => session.network_role(),
            Phase::Menu => None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.phase {
            Phase::Menu => SessionPhase::Menu,
            Phase::Lobby(_) => SessionPhase::Lobby,
            Phase::InGame(session) if session.game.is_terminal() => SessionPhase::GameOver,
            Phase::InGame(_) => SessionPhase::Active,
        }
    }

    /// Invalidates whatever the old session scheduled.
    fn teardown(&mut self) {
        self.epoch += 1;
        self.scheduler.cancel();
    }

    pub fn start_session(&mut self, mode: GameMode) -> Result<(), SessionError> {
        self.start_session_with(mode, None)
    }

    /// Starts a session with an explicit board size. For a networked mode
    /// the size is kept until the host starts the game.
    pub fn start_session_with(&mut self, mode: GameMode, board_size: Option<u32>) -> Result<(), SessionError> {
        if let Some(size) = board_size {
            validate_board_size(size)?;
        }
        self.teardown();

        match ModeState::local(mode) {
            Some(mode_state) => {
                let settings = OddScoringSettings::resolve(board_size, &mut self.rng)?;
                log!("Starting {:?} session on {} cells", mode, settings.board_size);
                self.phase = Phase::InGame(Session::new(mode_state, settings.board_size));
            }
            None => {
                log!("Hosting a networked session as {}", self.nickname);
                self.phase = Phase::Lobby(LobbyState {
                    role: NetworkRole::host(),
                    roster: Roster::new(),
                    board_size,
                });
            }
        }
        Ok(())
    }

    /// Enters the lobby of someone else's networked session.
    pub fn join_session(&mut self) {
        self.teardown();
        log!("Joining a networked session as {}", self.nickname);
        self.phase = Phase::Lobby(LobbyState {
            role: NetworkRole::guest(),
            roster: Roster::new(),
            board_size: None,
        });
    }

    pub fn start_networked_game(&mut self) -> Result<(), SessionError> {
        let Phase::Lobby(lobby) = &self.phase else {
            return Err(SessionError::NotInLobby);
        };
        if !lobby.role.is_host {
            return Err(SessionError::NotHost);
        }
        if !lobby.roster.can_start() {
            return Err(SessionError::LobbyNotReady {
                roster_size: lobby.roster.len(),
            });
        }

        let settings = OddScoringSettings::resolve(lobby.board_size, &mut self.rng)?;
        let mut role = lobby.role.clone();
        role.opponent = lobby.roster.opponent().cloned();
        role.game_started = true;
        let (host_player, guest_player) = (role.my_player, role.my_player.other());

        log!("Starting networked game on {} cells", settings.board_size);
        let session = Session::new(ModeState::Networked(role), settings.board_size);
        let current_player = session.game.current_player;
        self.phase = Phase::InGame(session);

        self.transport.send(ProtocolMessage::GameStart {
            board_size: settings.board_size,
            current_player,
            host_player,
            guest_player,
        });
        Ok(())
    }

    pub fn submit_move(&mut self, steps: u32) -> Result<(), SessionError> {
        let Phase::InGame(session) = &mut self.phase else {
            return Err(SessionError::NotYourTurn);
        };

        let current = session.game.current_player;
        let Some(mover) = session.rules().local_mover(current) else {
            return Err(SessionError::NotYourTurn);
        };

        let outcome = session.game.apply_move(mover, steps)?;
        log_debug!("Player {} moved {} steps", mover, steps);
        self.after_move(mover, steps, outcome);
        Ok(())
    }

    /// Handles a due bot reply. Returns whether a move was applied.
    pub fn fire_bot_turn(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch {
            log_debug!("Ignoring bot turn from epoch {}, current is {}", epoch, self.epoch);
            return false;
        }

        let Phase::InGame(session) = &mut self.phase else {
            return false;
        };
        if !session.bot_to_move() {
            return false;
        }

        let steps = calculate_move(session.game.board.position(), &mut self.rng);
        match session.game.apply_move(BOT_PLAYER, steps) {
            Ok(outcome) => {
                log_debug!("Bot moved {} steps", steps);
                self.after_move(BOT_PLAYER, steps, outcome);
                true
            }
            Err(e) => {
                log_warn!("Bot move of {} steps rejected: {}", steps, e);
                false
            }
        }
    }

    fn after_move(&mut self, mover: PlayerNumber, steps: u32, outcome: MoveOutcome) {
        let Phase::InGame(session) = &self.phase else {
            return;
        };

        let rules = session.rules();
        let new_position = session.game.board.position();
        let total_steps = session.game.board.total_steps();
        let announce = rules.announces_moves();

        let mut outgoing = Vec::new();
        if announce {
            outgoing.push(ProtocolMessage::Move {
                player: mover,
                steps,
                new_position,
                total_steps,
            });
        }

        let mut schedule_bot = false;
        match outcome {
            MoveOutcome::Finished { winner } => {
                log!("Game over after {} steps, {} wins", total_steps, rules.side_label(winner));
                if announce {
                    outgoing.push(ProtocolMessage::GameOver {
                        total_steps,
                        winner,
                        final_position: new_position,
                    });
                }
            }
            MoveOutcome::Continue { next_player } => {
                schedule_bot = rules.turn_advance(next_player) == TurnAdvance::ScheduleBot;
            }
        }

        for message in outgoing {
            self.transport.send(message);
        }
        if schedule_bot {
            self.scheduler.schedule(self.epoch, self.bot_delay);
        }
    }

    /// Starts over in the same local mode with a fresh board. Networked
    /// sessions cannot be restarted in place and go back to the menu.
    pub fn reset_session(&mut self) {
        let local_mode = match &self.phase {
            Phase::InGame(session) => Some(session.rules().game_mode()).filter(|m| *m != GameMode::Networked),
            _ => None,
        };

        match local_mode {
            Some(mode) => {
                if let Err(e) = self.start_session(mode) {
                    log_warn!("Failed to restart session: {}", e);
                    self.return_to_menu();
                }
            }
            None => self.return_to_menu(),
        }
    }

    pub fn return_to_menu(&mut self) {
        self.teardown();
        self.phase = Phase::Menu;
    }

    pub fn current_render_state(&self) -> RenderState {
        match &self.phase {
            Phase::Menu => RenderState::menu(),
            Phase::Lobby(lobby) => RenderState::lobby(LobbyView {
                is_host: lobby.role.is_host,
                roster_size: lobby.roster.len(),
                opponent_nick: lobby
                    .roster
                    .opponent()
                    .and_then(|peer| lobby.roster.nick_of(peer))
                    .map(str::to_string),
                can_start: lobby.role.is_host && lobby.roster.can_start(),
            }),
            Phase::InGame(session) => {
                let rules = session.rules();
                let game = &session.game;
                let terminal = game.is_terminal();
                let awaiting_local_input = !terminal && rules.local_mover(game.current_player).is_some();
                let winner = game.winner();

                RenderState {
                    phase: if terminal { SessionPhase::GameOver } else { SessionPhase::Active },
                    mode: Some(rules.game_mode()),
                    board_size: game.board.board_size(),
                    position: game.board.position(),
                    total_steps: game.board.total_steps(),
                    current_player: game.current_player,
                    terminal,
                    winner,
                    outcome: game.outcome(),
                    legal_moves: if awaiting_local_input { game.board.legal_moves() } else { Vec::new() },
                    awaiting_local_input,
                    current_label: Some(rules.side_label(game.current_player)),
                    winner_label: winner.map(|w| rules.side_label(w)),
                    lobby: None,
                }
            }
        }
    }

    // Transport callbacks.

    pub fn on_joined(&mut self) {
        match &self.phase {
            Phase::Lobby(lobby) if !lobby.role.is_host => {
                log!("Joined the shared session, announcing as {}", self.nickname);
                self.transport.send(ProtocolMessage::PlayerReady {
                    nick: self.nickname.clone(),
                });
            }
            _ => log_debug!("Ignoring joined event outside a guest lobby"),
        }
    }

    pub fn on_peer_joined(&mut self, peer: &PeerId) {
        match &mut self.phase {
            Phase::Menu => log_debug!("Ignoring {} joining while in menu", peer),
            Phase::Lobby(lobby) => {
                if lobby.roster.add_peer(peer.clone()) {
                    log!("{} joined the lobby", peer);
                    if !lobby.role.is_host && lobby.role.opponent.is_none() {
                        lobby.role.opponent = Some(peer.clone());
                    }
                } else if !lobby.roster.contains(peer) {
                    log_warn!("Lobby already has an opponent, ignoring {}", peer);
                }
            }
            Phase::InGame(_) => log_debug!("{} joined mid-game, waiting for PlayerReady", peer),
        }
    }

    pub fn on_peer_left(&mut self, peer: &PeerId) {
        match &mut self.phase {
            Phase::Menu => {}
            Phase::Lobby(lobby) => {
                if lobby.roster.remove_peer(peer) {
                    log!("{} left the lobby", peer);
                }
                if lobby.role.is_opponent(peer) {
                    lobby.role.opponent = None;
                }
            }
            Phase::InGame(session) => {
                let Some(role) = session.mode.network_role_mut() else {
                    return;
                };
                if !role.is_opponent(peer) {
                    log_debug!("Ignoring departure of non-participant {}", peer);
                    return;
                }
                role.opponent = None;
                if session.game.abort() {
                    log_warn!("Opponent {} left mid-game, session aborted", peer);
                }
            }
        }
    }

    /// Decodes a wire payload and applies it; undecodable payloads are dropped.
    pub fn on_raw_message(&mut self, peer: &PeerId, bytes: &[u8]) {
        match decode_message(bytes) {
            Ok(message) => self.on_message(peer, message),
            Err(e) => log_warn!("Ignoring malformed message from {}: {}", peer, e),
        }
    }

    pub fn on_message(&mut self, peer: &PeerId, message: ProtocolMessage) {
        log_debug!("Received {} from {}", message.kind(), peer);
        match message {
            ProtocolMessage::PlayerReady { nick } => self.handle_player_ready(peer, nick),
            ProtocolMessage::GameStart {
                board_size,
                current_player,
                host_player,
                guest_player,
            } => self.handle_game_start(peer, board_size, current_player, host_player, guest_player),
            ProtocolMessage::Move {
                player,
                steps,
                new_position,
                total_steps,
            } => self.handle_remote_move(peer, player, steps, new_position, total_steps),
            ProtocolMessage::GameOver {
                total_steps,
                winner,
                final_position,
            } => self.handle_remote_game_over(peer, total_steps, winner, final_position),
            ProtocolMessage::StateSync(sync) => self.handle_state_sync(peer, sync),
        }
    }

    fn handle_player_ready(&mut self, peer: &PeerId, nick: String) {
        match &mut self.phase {
            Phase::Menu => log_debug!("Ignoring PlayerReady from {} while in menu", peer),
            Phase::Lobby(lobby) => {
                let had_nick = lobby.roster.nick_of(peer).is_some();
                if !lobby.roster.set_nick(peer, nick.clone()) {
                    log_warn!("Lobby already has an opponent, ignoring PlayerReady from {}", peer);
                    return;
                }
                log!("{} is ready as {}", peer, nick);

                if !lobby.role.is_host {
                    if lobby.role.opponent.is_none() {
                        lobby.role.opponent = Some(peer.clone());
                    }
                    return;
                }
                if !had_nick {
                    self.transport.send(ProtocolMessage::PlayerReady {
                        nick: self.nickname.clone(),
                    });
                }
            }
            Phase::InGame(_) => self.offer_late_join(peer),
        }
    }

    /// A peer announced itself while the host's game is already running:
    /// hand it the full state instead of a fresh `GameStart`.
    fn offer_late_join(&mut self, peer: &PeerId) {
        let Phase::InGame(session) = &mut self.phase else {
            return;
        };
        let Some(role) = session.mode.network_role_mut() else {
            log_debug!("Ignoring PlayerReady from {} in a local session", peer);
            return;
        };
        if !role.is_host {
            log_debug!("Guest ignores PlayerReady from {} mid-game", peer);
            return;
        }
        if !role.accepts_from(peer) {
            log_warn!("Session already has an opponent, ignoring late joiner {}", peer);
            return;
        }

        role.opponent = Some(peer.clone());
        let sync = session.sync_state();
        log!("Sending session state to late joiner {}", peer);
        self.transport.send(ProtocolMessage::StateSync(sync));
    }

    fn handle_game_start(
        &mut self,
        peer: &PeerId,
        board_size: u32,
        current_player: PlayerNumber,
        host_player: PlayerNumber,
        guest_player: PlayerNumber,
    ) {
        let Phase::Lobby(lobby) = &self.phase else {
            log_warn!("Ignoring GameStart from {} outside the lobby", peer);
            return;
        };
        if lobby.role.is_host {
            log_warn!("Host ignores GameStart from {}", peer);
            return;
        }
        if !lobby.role.accepts_from(peer) {
            log_warn!("Ignoring GameStart from {}, not the session host", peer);
            return;
        }
        if let Err(e) = validate_board_size(board_size) {
            log_warn!("Ignoring GameStart from {}: {}", peer, e);
            return;
        }
        if host_player == guest_player {
            log_warn!("Ignoring GameStart from {}: both sides are player {}", peer, host_player);
            return;
        }

        let mut role = lobby.role.clone();
        role.my_player = guest_player;
        role.opponent = Some(peer.clone());
        role.game_started = true;

        log!("Game started by {} on {} cells", peer, board_size);
        self.phase = Phase::InGame(Session {
            mode: ModeState::Networked(role),
            game: OddScoringGameState::new(board_size, current_player),
        });
    }

    fn handle_remote_move(
        &mut self,
        peer: &PeerId,
        player: PlayerNumber,
        steps: u32,
        new_position: u32,
        total_steps: u32,
    ) {
        let Phase::InGame(session) = &mut self.phase else {
            log_warn!("Ignoring Move from {} with no game running", peer);
            return;
        };
        let Some(role) = session.network_role() else {
            log_warn!("Ignoring Move from {} in a local session", peer);
            return;
        };
        if !role.accepts_from(peer) {
            log_warn!("Ignoring Move from non-participant {}", peer);
            return;
        }
        if session.game.is_terminal() {
            log_warn!("Ignoring Move from {} after the game ended", peer);
            return;
        }

        let current = session.game.current_player;
        if player != current || player == role.my_player {
            log_warn!(
                "Turn mismatch in Move from {}: claims player {}, current {}, local player {}",
                peer, player, current, role.my_player
            );
            return;
        }

        // The peer's counters are adopted as-is; disagreement is only reported.
        let board = &session.game.board;
        let expected_position = board.position().checked_sub(steps);
        let expected_total = board.total_steps().checked_add(steps);
        if !(1..=MAX_STEPS).contains(&steps)
            || expected_position != Some(new_position)
            || expected_total != Some(total_steps)
        {
            log_warn!(
                "Possible desync with {}: {} steps from position {} (total {}) reported as position {} (total {})",
                peer, steps, board.position(), board.total_steps(), new_position, total_steps
            );
        }

        if let MoveOutcome::Finished { winner } = session.game.adopt_remote_move(new_position, total_steps) {
            log!("Game over after {} steps, {} wins", total_steps, session.rules().side_label(winner));
        }
    }

    fn handle_remote_game_over(
        &mut self,
        peer: &PeerId,
        total_steps: u32,
        winner: PlayerNumber,
        final_position: u32,
    ) {
        let Phase::InGame(session) = &mut self.phase else {
            log_warn!("Ignoring GameOver from {} with no game running", peer);
            return;
        };
        let Some(role) = session.network_role() else {
            log_warn!("Ignoring GameOver from {} in a local session", peer);
            return;
        };
        if !role.accepts_from(peer) {
            log_warn!("Ignoring GameOver from non-participant {}", peer);
            return;
        }
        if session.game.status == GameStatus::Aborted {
            log_debug!("Ignoring GameOver from {} for an aborted session", peer);
            return;
        }

        let parity_winner = PlayerNumber::winner_for_total(total_steps);
        if parity_winner != winner || final_position != 0 {
            log_warn!(
                "GameOver from {} names player {} at position {}, but {} steps favour player {}",
                peer, winner, final_position, total_steps, parity_winner
            );
        }

        if session.game.adopt_final(total_steps, final_position) {
            log!("Game over announced by {} after {} steps", peer, total_steps);
        }
    }

    fn handle_state_sync(&mut self, peer: &PeerId, sync: SyncState) {
        let accepted = match &self.phase {
            Phase::Lobby(lobby) => !lobby.role.is_host && lobby.role.accepts_from(peer),
            Phase::InGame(session) => session
                .network_role()
                .is_some_and(|role| !role.is_host && role.accepts_from(peer)),
            Phase::Menu => false,
        };
        if !accepted {
            log_warn!("Ignoring StateSync from {}", peer);
            return;
        }
        self.set_state_from_sync(&sync, Some(peer.clone()));
    }

    pub fn get_state_for_sync(&self) -> SyncState {
        match &self.phase {
            Phase::InGame(session) => session.sync_state(),
            _ => SyncState {
                in_progress: false,
                board_size: 0,
                position: 0,
                total_steps: 0,
                current_player: PlayerNumber::One,
                terminal: false,
            },
        }
    }

    /// Mirrors a host's state as its guest. Returns false, leaving the
    /// current state alone, when the snapshot is unusable.
    pub fn set_state_from_sync(&mut self, sync: &SyncState, host: Option<PeerId>) -> bool {
        if sync.in_progress {
            if let Err(e) = validate_board_size(sync.board_size) {
                log_warn!("Rejecting sync state: {}", e);
                return false;
            }
            if sync.position >= sync.board_size {
                log_warn!("Rejecting sync state: position {} on {} cells", sync.position, sync.board_size);
                return false;
            }
            // Terminal away from cell 0 is an aborted game; the reverse never happens.
            if sync.position == 0 && !sync.terminal {
                log_warn!("Rejecting sync state: position 0 must be terminal");
                return false;
            }
        }

        self.teardown();
        let mut role = NetworkRole::guest();
        role.opponent = host.clone();

        if !sync.in_progress {
            let mut roster = Roster::new();
            if let Some(host) = host {
                roster.add_peer(host);
            }
            self.phase = Phase::Lobby(LobbyState {
                role,
                roster,
                board_size: None,
            });
            return true;
        }

        role.game_started = true;
        let status = match (sync.terminal, sync.position) {
            (false, _) => GameStatus::InProgress,
            (true, 0) => GameStatus::Finished,
            (true, _) => GameStatus::Aborted,
        };

        log!(
            "Joined game in progress: {} cells, position {}, {} steps taken",
            sync.board_size, sync.position, sync.total_steps
        );
        self.phase = Phase::InGame(Session {
            mode: ModeState::Networked(role),
            game: OddScoringGameState::restore(
                sync.board_size,
                sync.position,
                sync.total_steps,
                sync.current_player,
                status,
            ),
        });
        true
    }

    // Persistence boundary.

    pub fn save_snapshot(&self) -> SessionSnapshot {
        match &self.phase {
            Phase::Menu => SessionSnapshot::minimal(),
            Phase::Lobby(lobby) => SessionSnapshot {
                mode: GameMode::Networked,
                is_host: lobby.role.is_host,
                my_player_number: lobby.role.my_player.as_u32(),
                ..SessionSnapshot::minimal()
            },
            Phase::InGame(session) => SessionSnapshot::from_session(session),
        }
    }

    pub fn save_snapshot_yaml(&self) -> String {
        snapshot_to_yaml(&self.save_snapshot())
    }

    /// Restores a saved session. Anything unusable lands on the menu and
    /// reports false; a snapshot with no game in progress is a successful
    /// restore of the menu.
    pub fn load_snapshot(&mut self, snapshot: &SessionSnapshot) -> bool {
        self.teardown();
        self.phase = Phase::Menu;

        if !snapshot.in_progress {
            log_debug!("Snapshot has no game in progress");
            return true;
        }

        let session = match snapshot.to_session() {
            Ok(session) => session,
            Err(e) => {
                log_warn!("Snapshot rejected, returning to menu: {}", e);
                return false;
            }
        };

        log!(
            "Restored {:?} session at position {} after {} steps",
            snapshot.mode, snapshot.position, snapshot.total_steps
        );
        let bot_to_move = session.bot_to_move();
        self.phase = Phase::InGame(session);
        if bot_to_move {
            self.scheduler.schedule(self.epoch, self.bot_delay);
        }
        true
    }

    pub fn load_snapshot_yaml(&mut self, text: &str) -> bool {
        match snapshot_from_yaml(text) {
            Ok(snapshot) => self.load_snapshot(&snapshot),
            Err(e) => {
                log_warn!("Unreadable snapshot, returning to menu: {}", e);
                self.return_to_menu();
                false
            }
        }
    }
}
