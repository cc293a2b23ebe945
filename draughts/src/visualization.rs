use crate::{Board, GameState, Square, BOARD_SIZE};

/// Draws the board as text, row 0 at the top.
///
/// Men are `w`/`r`, kings `W`/`R`, empty dark squares `·`.
pub fn visualize_board(board: &Board) -> String {
    let mut result = String::from("    ");
    for col in 0..BOARD_SIZE {
        result += &format!("{:>2}", col);
    }
    result += "\n    ╭";
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "╮\n";

    for row in 0..BOARD_SIZE {
        result += &format!("{:>3} │", row);
        for col in 0..BOARD_SIZE {
            let square = Square::new(row, col);
            match board.get(square) {
                Some(piece) => result += &format!("{} ", piece),
                None if square.is_dark() => result += "· ",
                None => result += "  ",
            }
        }
        result += "│\n";
    }

    result += "    ╰";
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "╯";
    result
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", visualize_board(self))
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.board)?;
        match self.forced_continuation {
            Some(square) => write!(
                f,
                "{} to move, the piece on {} must keep capturing",
                self.side_to_move, square
            ),
            None => write!(f, "{} to move", self.side_to_move),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_board() {
        let text = visualize_board(&Board::standard());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "     0 1 2 3 4 5 6 7");
        assert_eq!(lines[2], "  0 │  w   w   w   w │");
        assert_eq!(lines[5], "  3 │·   ·   ·   ·   │");
        assert_eq!(lines[9], "  7 │r   r   r   r   │");
    }

    #[test]
    fn state_mentions_side_to_move() {
        let text = GameState::new().to_string();
        assert!(text.ends_with("White to move"));
    }
}
