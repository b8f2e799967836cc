//! Text rendering of the board

use hexlink_core::{Board, Cell};

const EMPTY: char = '.';

fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => EMPTY,
        Cell::Stone(player) => char::from(b'0' + player.id()),
    }
}

/// Board as text; odd rows are shifted half a cell right, like the adjacency
pub fn render(board: &Board) -> String {
    let size = board.size();
    let mut out = String::from("Current board:\n");
    for row in 0..size {
        if row % 2 == 1 {
            out.push(' ');
        }
        let line: Vec<String> = (0..size)
            .map(|col| cell_char(board.get(row, col)).to_string())
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}
