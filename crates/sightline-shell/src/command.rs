//! Shell command parsing.

use crate::error::ShellError;

/// A display option flipped by `toggle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Shade squares by central importance.
    Central,
    /// Shade squares by the side to move's control.
    Attacking,
    /// Shade squares by the waiting player's control.
    Defending,
    /// Weight control by piece expendability instead of counting attackers.
    ReverseWeights,
    /// Render the board from black's side.
    Flip,
    /// Suppress all shading output.
    Shading,
}

/// A parsed shell command.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// `move <san>` -- record a move at the cursor.
    Move(String),
    /// `prev` -- step back one ply (arrow left).
    Prev,
    /// `next` -- step forward along the continuation (arrow right).
    Next,
    /// `up` -- cycle to the previous alternative (arrow up).
    PrevAlternative,
    /// `down` -- cycle to the next alternative (arrow down).
    NextAlternative,
    /// `sheet` -- print the move sheet, alternatives in parentheses.
    Sheet,
    /// `mainline` -- print the main-line tokens.
    MainLine,
    /// `board` -- print the current position.
    Board,
    /// `fen` -- print the current position's FEN.
    Fen,
    /// `shading` -- print the composed square shading as hex colors.
    Shading,
    /// `toggle <option>` -- flip a display option.
    Toggle(Toggle),
    /// `new` -- start over from the initial position.
    New,
    /// `help` -- list the commands.
    Help,
    /// `quit` -- leave the shell.
    Quit,
    /// Unrecognized input (reported, then ignored).
    Unknown(String),
}

/// Parse a single line of input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, ShellError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(Command::Unknown(String::new()));
    }

    match tokens[0] {
        "move" => match tokens.get(1) {
            Some(san) => Ok(Command::Move(san.to_string())),
            None => Err(ShellError::MissingArgument {
                command: "move",
                argument: "san",
            }),
        },
        "prev" => Ok(Command::Prev),
        "next" => Ok(Command::Next),
        "up" => Ok(Command::PrevAlternative),
        "down" => Ok(Command::NextAlternative),
        "sheet" => Ok(Command::Sheet),
        "mainline" => Ok(Command::MainLine),
        "board" => Ok(Command::Board),
        "fen" => Ok(Command::Fen),
        "shading" => Ok(Command::Shading),
        "toggle" => parse_toggle(tokens.get(1).copied()),
        "new" => Ok(Command::New),
        "help" => Ok(Command::Help),
        "quit" => Ok(Command::Quit),
        other => Ok(Command::Unknown(other.to_string())),
    }
}

fn parse_toggle(name: Option<&str>) -> Result<Command, ShellError> {
    let name = name.ok_or(ShellError::MissingArgument {
        command: "toggle",
        argument: "option",
    })?;
    let toggle = match name {
        "central" => Toggle::Central,
        "attacking" => Toggle::Attacking,
        "defending" => Toggle::Defending,
        "reverse" => Toggle::ReverseWeights,
        "flip" => Toggle::Flip,
        "shading" => Toggle::Shading,
        other => {
            return Err(ShellError::UnknownToggle {
                name: other.to_string(),
            });
        }
    };
    Ok(Command::Toggle(toggle))
}
