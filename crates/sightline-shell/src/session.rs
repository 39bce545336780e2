//! Interactive analysis session: one tree, display options, a command loop.

use std::io::{self, BufRead};

use tracing::{debug, info, warn};

use sightline_control::{
    BoardShading, ControlOptions, attacking_control, central_importance, defending_control,
};
use sightline_core::{File, Rank, Square};
use sightline_tree::{GameTree, NodeId};

use crate::command::{Command, Toggle, parse_command};
use crate::error::ShellError;

const HELP: &str = "\
move <san>       record a move at the cursor
prev / next      step through the current line
up / down        cycle alternatives at this branch point
sheet            move sheet, alternatives in parentheses, cursor bracketed
mainline         main-line moves
board            current position
fen              current position as FEN
shading          per-square shading as hex colors
toggle <option>  central | attacking | defending | reverse | flip | shading
new              start over from the initial position
quit             leave the shell";

/// Display options mirrored from the analysis panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayOptions {
    pub central: bool,
    pub attacking: bool,
    pub defending: bool,
    pub reverse_weights: bool,
    pub flipped: bool,
    pub hide_shading: bool,
}

/// What a handled command asks the loop to do next.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep going; print the text if non-empty.
    Continue(String),
    /// Leave the loop.
    Quit,
}

/// An interactive session over a single game tree.
///
/// Every state-changing command works on a [`duplicate`] of the session tree
/// and commits it only on success, so a rejected move or a boundary hit
/// leaves the session exactly as it was.
///
/// [`duplicate`]: GameTree::duplicate
pub struct Session {
    tree: GameTree,
    options: DisplayOptions,
}

impl Session {
    /// A session at the starting position with all shading off.
    pub fn new() -> Session {
        Session {
            tree: GameTree::new(),
            options: DisplayOptions::default(),
        }
    }

    /// Run the command loop, reading stdin until `quit` or input closes.
    pub fn run(&mut self) -> Result<(), ShellError> {
        println!("sightline -- type \"help\" for commands");
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match parse_command(trimmed) {
                Ok(command) => match self.handle(command) {
                    Outcome::Quit => break,
                    Outcome::Continue(output) => {
                        if !output.is_empty() {
                            println!("{output}");
                        }
                    }
                },
                Err(error) => {
                    warn!(error = %error, "bad command");
                    println!("error: {error}");
                }
            }
        }
        info!("session over");
        Ok(())
    }

    /// Apply one command to the session.
    pub fn handle(&mut self, command: Command) -> Outcome {
        match command {
            Command::Move(san) => {
                let mut next = self.tree.duplicate();
                match next.add_move(&san) {
                    Ok(()) => {
                        self.tree = next;
                        Outcome::Continue(self.status())
                    }
                    Err(error) => {
                        // Illegal entries are dropped quietly, like the
                        // original input box.
                        debug!(error = %error, "rejected move");
                        Outcome::Continue(String::new())
                    }
                }
            }
            Command::Prev => self.navigate(GameTree::go_to_previous),
            Command::Next => self.navigate(GameTree::go_to_next),
            Command::PrevAlternative => self.navigate(GameTree::go_to_previous_alternative),
            Command::NextAlternative => self.navigate(GameTree::go_to_next_alternative),
            Command::Sheet => Outcome::Continue(self.render_sheet()),
            Command::MainLine => {
                Outcome::Continue(self.tree.main_line().collect::<Vec<_>>().join(" "))
            }
            Command::Board => Outcome::Continue(self.render_board()),
            Command::Fen => Outcome::Continue(self.tree.position().fen()),
            Command::Shading => Outcome::Continue(self.render_shading()),
            Command::Toggle(toggle) => Outcome::Continue(self.toggle(toggle)),
            Command::New => {
                self.tree = GameTree::new();
                Outcome::Continue(self.status())
            }
            Command::Help => Outcome::Continue(HELP.to_string()),
            Command::Quit => Outcome::Quit,
            Command::Unknown(input) => {
                if input.is_empty() {
                    Outcome::Continue(String::new())
                } else {
                    Outcome::Continue(format!("unknown command: {input} (try \"help\")"))
                }
            }
        }
    }

    /// Run a navigation on a duplicate and commit it only if it moved.
    fn navigate(&mut self, go: fn(&mut GameTree) -> bool) -> Outcome {
        let mut next = self.tree.duplicate();
        if go(&mut next) {
            self.tree = next;
            Outcome::Continue(self.status())
        } else {
            Outcome::Continue(String::new())
        }
    }

    fn toggle(&mut self, toggle: Toggle) -> String {
        let flag = match toggle {
            Toggle::Central => &mut self.options.central,
            Toggle::Attacking => &mut self.options.attacking,
            Toggle::Defending => &mut self.options.defending,
            Toggle::ReverseWeights => &mut self.options.reverse_weights,
            Toggle::Flip => &mut self.options.flipped,
            Toggle::Shading => &mut self.options.hide_shading,
        };
        *flag = !*flag;
        let state = if *flag { "on" } else { "off" };
        let name = match toggle {
            Toggle::Central => "central",
            Toggle::Attacking => "attacking",
            Toggle::Defending => "defending",
            Toggle::ReverseWeights => "reverse",
            Toggle::Flip => "flip",
            Toggle::Shading => "hide shading",
        };
        format!("{name} {state}")
    }

    /// The current line and the live FEN, printed after every change.
    fn status(&self) -> String {
        let line = self.tree.current_san_line().join(" ");
        let fen = self.tree.position().fen();
        if line.is_empty() {
            fen
        } else {
            format!("{line}\n{fen}")
        }
    }

    /// The move sheet: main line with alternatives in parentheses, comma
    /// separated, the cursor's node bracketed.
    fn render_sheet(&self) -> String {
        match self.tree.next(self.tree.root()) {
            Some(first) => {
                let mut out = String::new();
                self.write_line(first, &mut out);
                out
            }
            None => String::from("(no moves)"),
        }
    }

    fn write_line(&self, start: NodeId, out: &mut String) {
        let mut id = start;
        loop {
            if id == self.tree.current() {
                out.push('[');
                out.push_str(&self.tree.san(id));
                out.push(']');
            } else {
                out.push_str(&self.tree.san(id));
            }
            let alternatives = self.tree.alternatives(id);
            if !alternatives.is_empty() {
                out.push_str(" (");
                for (i, &alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_line(alternative, out);
                }
                out.push(')');
            }
            match self.tree.next(id) {
                Some(next) => {
                    out.push(' ');
                    id = next;
                }
                None => break,
            }
        }
    }

    /// The board as an 8x8 grid, oriented per the flip option.
    fn render_board(&self) -> String {
        let board = self.tree.position().board();
        let mut out = String::new();
        for rank in self.oriented_ranks() {
            out.push(rank.char());
            out.push_str("  ");
            for (i, file) in self.oriented_files().into_iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                match board.piece_at(Square::from_coords(file, rank)) {
                    Some(piece) => out.push(piece.char()),
                    None => out.push('.'),
                }
            }
            out.push('\n');
        }
        out.push_str("   ");
        for (i, file) in self.oriented_files().into_iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push(file.char());
        }
        out
    }

    /// The composed shading grid as hex colors, oriented like the board.
    fn render_shading(&self) -> String {
        let shading = self.shading();
        let mut out = String::new();
        for rank in self.oriented_ranks() {
            out.push(rank.char());
            out.push_str("  ");
            for (i, file) in self.oriented_files().into_iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(&shading.get(Square::from_coords(file, rank)).hex());
            }
            out.push('\n');
        }
        out.pop();
        out
    }

    /// Compose the enabled layers onto a fresh shading.
    fn shading(&self) -> BoardShading {
        let mut shading = BoardShading::new();
        if self.options.hide_shading {
            return shading;
        }
        let options = ControlOptions {
            reverse_weights: self.options.reverse_weights,
        };
        if self.options.central {
            shading = shading.with_central(&central_importance());
        }
        if self.options.attacking {
            shading = shading.with_attacking(&attacking_control(self.tree.position(), options));
        }
        if self.options.defending {
            shading = shading.with_defending(&defending_control(self.tree.position(), options));
        }
        shading
    }

    fn oriented_ranks(&self) -> Vec<Rank> {
        if self.options.flipped {
            Rank::ALL.to_vec()
        } else {
            Rank::ALL.iter().rev().copied().collect()
        }
    }

    fn oriented_files(&self) -> Vec<File> {
        if self.options.flipped {
            File::ALL.iter().rev().copied().collect()
        } else {
            File::ALL.to_vec()
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}
