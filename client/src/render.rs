use odd_scoring_common::games::odd_scoring::{GameMode, Outcome};
use odd_scoring_common::session::{RenderState, SessionPhase};

fn mode_name(mode: Option<GameMode>) -> &'static str {
    match mode {
        Some(GameMode::VsBot) => "vs computer",
        Some(GameMode::VsLocalPlayer) => "two players",
        Some(GameMode::Networked) => "networked",
        None => "no game",
    }
}

/// One row of cells, the walker marked with `@` and the goal cell with `|`.
pub fn render_board(board_size: u32, position: u32) -> String {
    (0..board_size)
        .map(|cell| match cell {
            c if c == position => "[@]",
            0 => "[|]",
            _ => "[ ]",
        })
        .collect()
}

pub fn render_state(state: &RenderState) -> String {
    match state.phase {
        SessionPhase::Menu => "Menu: type bot or local to start, load to resume, help for commands".to_string(),
        SessionPhase::Lobby => {
            let waiting = state.lobby.as_ref().map_or(0, |lobby| lobby.roster_size);
            format!("Lobby: {} opponent(s) connected", waiting)
        }
        SessionPhase::Active | SessionPhase::GameOver => render_game(state),
    }
}

fn render_game(state: &RenderState) -> String {
    let mut lines = vec![
        format!(
            "Board of {} ({}), position {}, {} steps taken",
            state.board_size,
            mode_name(state.mode),
            state.position,
            state.total_steps
        ),
        render_board(state.board_size, state.position),
    ];

    let current = state
        .current_label
        .map_or_else(|| state.current_player.to_string(), |label| label.to_string());

    match state.outcome {
        Outcome::InProgress if state.awaiting_local_input => {
            let moves: Vec<String> = state.legal_moves.iter().map(u32::to_string).collect();
            lines.push(format!("{} to move, choose {}", current, moves.join(" / ")));
        }
        Outcome::InProgress => lines.push(format!("Waiting for {}...", current)),
        Outcome::Won(winner) => {
            let winner = state
                .winner_label
                .map_or_else(|| winner.to_string(), |label| label.to_string());
            let parity = if state.total_steps % 2 == 0 { "even" } else { "odd" };
            lines.push(format!(
                "Game over: {} total steps is {}, {} wins. Type new to play again",
                state.total_steps, parity, winner
            ));
        }
        Outcome::Aborted => lines.push("Game aborted. Type new to play again".to_string()),
    }

    lines.join("\n")
}
