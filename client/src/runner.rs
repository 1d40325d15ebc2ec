use odd_scoring_common::session::{BotScheduler, BotTurnDue};
use odd_scoring_common::{log, log_debug};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::app::{ClientApp, Flow};
use crate::commands::Command;
use crate::render::render_state;

fn print_screen<S: BotScheduler>(app: &ClientApp<S>) {
    println!();
    println!("{}", render_state(&app.render_state()));
    for event in app.events().iter().rev().take(3).rev() {
        println!("  {}", event);
    }
}

/// Single event loop: stdin commands and due bot turns are handled one at a
/// time against the same session.
pub async fn run<S: BotScheduler>(
    mut app: ClientApp<S>,
    mut bot_rx: mpsc::UnboundedReceiver<BotTurnDue>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_screen(&app);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    log_debug!("stdin closed");
                    break;
                };
                match line.parse::<Command>() {
                    Ok(command) => {
                        let (flow, feedback) = app.handle_command(command);
                        if flow == Flow::Quit {
                            break;
                        }
                        if let Some(feedback) = feedback {
                            println!("{}", feedback);
                        }
                    }
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                }
                print_screen(&app);
            }
            Some(due) = bot_rx.recv() => {
                if app.on_bot_turn(due) {
                    print_screen(&app);
                }
            }
        }
    }

    log!("Goodbye");
    Ok(())
}
