use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(u32),
    New,
    Menu,
    Bot,
    Local,
    Save,
    Load,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim().to_ascii_lowercase();
        if let Ok(steps) = input.parse::<u32>() {
            return Ok(Command::Move(steps));
        }

        match input.as_str() {
            "new" | "n" => Ok(Command::New),
            "menu" | "m" => Ok(Command::Menu),
            "bot" => Ok(Command::Bot),
            "local" => Ok(Command::Local),
            "save" => Ok(Command::Save),
            "load" => Ok(Command::Load),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            "" => Err("Empty command".to_string()),
            other => Err(format!("Unknown command '{}', type help for the list", other)),
        }
    }
}

pub const HELP_TEXT: &str = "\
How to play:
  The walker starts on the rightmost cell. Players take turns moving it
  1, 2 or 3 cells left; the game ends when it reaches cell 0.

Winning:
  Count the steps taken by both players. An even total goes to player 1
  (you, against the computer); an odd total goes to player 2.
  Every move changes the parity, so plan for the final total.

Commands:
  1, 2, 3   take that many steps toward cell 0
  new       restart in the current mode
  menu      leave the current game
  bot       start a game against the computer
  local     start a game for two players on this terminal
  save      write the session to the snapshot file
  load      restore the session from the snapshot file
  help      show this list
  quit      exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_are_moves() {
        assert_eq!("2".parse::<Command>(), Ok(Command::Move(2)));
        assert_eq!(" 3 \n".parse::<Command>(), Ok(Command::Move(3)));
        assert_eq!("7".parse::<Command>(), Ok(Command::Move(7)));
    }

    #[test]
    fn test_words_and_aliases() {
        assert_eq!("NEW".parse::<Command>(), Ok(Command::New));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("local".parse::<Command>(), Ok(Command::Local));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
    }

    #[test]
    fn test_help_explains_parity_rule() {
        assert!(HELP_TEXT.contains("even total goes to player 1"));
        assert!(HELP_TEXT.contains("odd total goes to player 2"));
        assert!(HELP_TEXT.contains("quit"));
    }

    #[test]
    fn test_unknown_input_is_error() {
        assert!("jump".parse::<Command>().is_err());
        assert!("   ".parse::<Command>().is_err());
        assert!("-1".parse::<Command>().is_err());
    }
}
