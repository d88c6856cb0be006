use super::{ChessBoard, ChessField, Color, Move, PieceType, Square};

const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [(-2, -1), (-2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2), (2, -1), (2, 1)];
const KING_STEPS: [(i8, i8); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

fn on_board(row: i8, col: i8) -> bool {
    (0..8).contains(&row) && (0..8).contains(&col)
}

/// An own piece that shields the king on one ray; it may only move along
/// that ray (in either direction) or capture the piece pinning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pin {
    pub square: ChessField,
    pub direction: (i8, i8),
}

/// An enemy piece currently giving check. `direction` points from the king
/// toward the checker; for knights it is the jump offset and is never used
/// to build blocking squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Check {
    pub square: ChessField,
    pub direction: (i8, i8),
}

/// One pass of the king-safety scan. Recomputed per generation call and per
/// king-move candidate, never stored on the board.
#[derive(Debug, Default)]
pub(crate) struct AttackAnalysis {
    pub in_check: bool,
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
}

/// Legal moves for the side to move together with its in-check status. An
/// empty `moves` with `in_check` set is mate; empty without it means the
/// side has no legal move while not in check. The host draws that
/// conclusion, the engine only reports the pair.
#[derive(Debug)]
pub struct LegalMoves {
    pub moves: Vec<Move>,
    pub in_check: bool,
}

fn pin_direction(pins: &[Pin], field: ChessField) -> Option<(i8, i8)> {
    pins.iter().find(|pin| pin.square == field).map(|pin| pin.direction)
}

fn allowed_by_pin(pin: Option<(i8, i8)>, direction: (i8, i8)) -> bool {
    match pin {
        None => true,
        Some(axis) => axis == direction || axis == (-direction.0, -direction.1),
    }
}

impl ChessBoard {
    /// Walks the 8 rays, the knight offsets and the two pawn squares outward
    /// from `king_square`, reporting checks against `side` and pins of its
    /// pieces. `king_square` is a parameter rather than the cached location
    /// so king-move candidates can be probed without touching board state;
    /// rays deliberately see through `side`'s own king, which keeps a king
    /// that steps along a checker's ray inside the reported check.
    pub(crate) fn scan_pins_and_checks(&self, side: Color, king_square: ChessField) -> AttackAnalysis {
        let mut analysis = AttackAnalysis::default();
        let enemy = side.opposite();

        for (ray_index, &(dr, dc)) in ORTHOGONALS.iter().chain(DIAGONALS.iter()).enumerate() {
            let orthogonal = ray_index < 4;
            let mut possible_pin: Option<ChessField> = None;
            for step in 1..8 {
                let row = king_square.row as i8 + dr * step;
                let col = king_square.col as i8 + dc * step;
                if !on_board(row, col) {
                    break;
                }
                match self.squares[row as usize][col as usize] {
                    Square::Empty => {}
                    Square::Occupied(piece) if piece.color == side => {
                        if piece.kind == PieceType::King {
                            continue;
                        }
                        if possible_pin.is_none() {
                            possible_pin = Some(ChessField::new(row as u8, col as u8));
                        } else {
                            // a second shielding piece kills the ray
                            break;
                        }
                    }
                    Square::Occupied(piece) => {
                        let attacks_along_ray = match piece.kind {
                            PieceType::Rook => orthogonal,
                            PieceType::Bishop => !orthogonal,
                            PieceType::Queen => true,
                            PieceType::King => step == 1,
                            _ => false,
                        };
                        if attacks_along_ray {
                            match possible_pin {
                                None => {
                                    analysis.in_check = true;
                                    analysis.checks.push(Check {
                                        square: ChessField::new(row as u8, col as u8),
                                        direction: (dr, dc),
                                    });
                                }
                                Some(pinned) => analysis.pins.push(Pin {
                                    square: pinned,
                                    direction: (dr, dc),
                                }),
                            }
                        }
                        break;
                    }
                }
            }
        }

        for &(dr, dc) in KNIGHT_JUMPS.iter() {
            let row = king_square.row as i8 + dr;
            let col = king_square.col as i8 + dc;
            if !on_board(row, col) {
                continue;
            }
            if let Square::Occupied(piece) = self.squares[row as usize][col as usize] {
                if piece.color == enemy && piece.kind == PieceType::Knight {
                    analysis.in_check = true;
                    analysis.checks.push(Check {
                        square: ChessField::new(row as u8, col as u8),
                        direction: (dr, dc),
                    });
                }
            }
        }

        // Enemy pawns give check from the two squares diagonally ahead of the king.
        let forward = side.forward();
        for dc in [-1, 1] {
            let row = king_square.row as i8 + forward;
            let col = king_square.col as i8 + dc;
            if !on_board(row, col) {
                continue;
            }
            if let Square::Occupied(piece) = self.squares[row as usize][col as usize] {
                if piece.color == enemy && piece.kind == PieceType::Pawn {
                    analysis.in_check = true;
                    analysis.checks.push(Check {
                        square: ChessField::new(row as u8, col as u8),
                        direction: (forward, dc),
                    });
                }
            }
        }

        analysis
    }

    /// All legal moves for the side to move. Recomputed fresh on every call;
    /// the row-major board scan makes the order deterministic for a position.
    pub fn legal_moves(&self) -> LegalMoves {
        let king = self.king_square(self.active_color);
        let analysis = self.scan_pins_and_checks(self.active_color, king);

        if !analysis.in_check {
            return LegalMoves {
                moves: self.pseudo_moves(&analysis.pins),
                in_check: false,
            };
        }

        if analysis.checks.len() > 1 {
            // double check: nothing but a king move can parry both lines
            let mut moves = Vec::new();
            self.king_moves(king.row, king.col, &mut moves);
            return LegalMoves { moves, in_check: true };
        }

        let check = analysis.checks[0];
        let checker_is_knight = matches!(
            self.squares[check.square.row as usize][check.square.col as usize],
            Square::Occupied(piece) if piece.kind == PieceType::Knight
        );

        // squares that resolve the check: the checker itself, plus for a
        // sliding checker everything strictly between it and the king
        let mut resolution = Vec::new();
        if checker_is_knight {
            resolution.push(check.square);
        } else {
            for step in 1..8 {
                let field = ChessField::new(
                    (king.row as i8 + check.direction.0 * step) as u8,
                    (king.col as i8 + check.direction.1 * step) as u8,
                );
                resolution.push(field);
                if field == check.square {
                    break;
                }
            }
        }

        let mut moves = self.pseudo_moves(&analysis.pins);
        moves.retain(|mv| mv.piece_moved.kind == PieceType::King || resolution.contains(&mv.to));
        LegalMoves { moves, in_check: true }
    }

    fn pseudo_moves(&self, pins: &[Pin]) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for row in 0..8 {
            for col in 0..8 {
                self.pseudo_moves_from(row, col, pins, &mut moves);
            }
        }
        moves
    }

    /// Appends the pseudo-legal moves of the piece on (row, col), if it
    /// belongs to the side to move. Pin restrictions are applied here; king
    /// safety is only handled by the king generator itself.
    pub(crate) fn pseudo_moves_from(&self, row: u8, col: u8, pins: &[Pin], moves: &mut Vec<Move>) {
        if let Square::Occupied(piece) = self.squares[row as usize][col as usize] {
            if piece.color != self.active_color {
                return;
            }
            match piece.kind {
                PieceType::Pawn => self.pawn_moves(row, col, pins, moves),
                PieceType::Knight => self.knight_moves(row, col, pins, moves),
                PieceType::Bishop => self.sliding_moves(row, col, &DIAGONALS, pins, moves),
                PieceType::Rook => self.sliding_moves(row, col, &ORTHOGONALS, pins, moves),
                PieceType::Queen => {
                    self.sliding_moves(row, col, &ORTHOGONALS, pins, moves);
                    self.sliding_moves(row, col, &DIAGONALS, pins, moves);
                }
                PieceType::King => self.king_moves(row, col, moves),
            }
        }
    }

    fn pawn_moves(&self, row: u8, col: u8, pins: &[Pin], moves: &mut Vec<Move>) {
        let from = ChessField::new(row, col);
        let pin = pin_direction(pins, from);
        let side = self.active_color;
        let forward = side.forward();

        let ahead = row as i8 + forward;
        if !(0..8).contains(&ahead) {
            // a pawn stranded on the last rank has nowhere to go
            return;
        }

        if self.squares[ahead as usize][col as usize] == Square::Empty && allowed_by_pin(pin, (forward, 0)) {
            moves.push(Move::new(&self.squares, from, ChessField::new(ahead as u8, col)));
            if row == side.pawn_start_row() {
                let two_ahead = row as i8 + 2 * forward;
                if self.squares[two_ahead as usize][col as usize] == Square::Empty {
                    moves.push(Move::new(&self.squares, from, ChessField::new(two_ahead as u8, col)));
                }
            }
        }

        for dc in [-1, 1] {
            let capture_col = col as i8 + dc;
            if !on_board(ahead, capture_col) {
                continue;
            }
            if let Square::Occupied(piece) = self.squares[ahead as usize][capture_col as usize] {
                if piece.color != side && allowed_by_pin(pin, (forward, dc)) {
                    moves.push(Move::new(
                        &self.squares,
                        from,
                        ChessField::new(ahead as u8, capture_col as u8),
                    ));
                }
            }
        }
    }

    fn knight_moves(&self, row: u8, col: u8, pins: &[Pin], moves: &mut Vec<Move>) {
        let from = ChessField::new(row, col);
        // a pinned knight can never stay on the pin ray, so it cannot move
        if pin_direction(pins, from).is_some() {
            return;
        }
        for &(dr, dc) in KNIGHT_JUMPS.iter() {
            let jump_row = row as i8 + dr;
            let jump_col = col as i8 + dc;
            if !on_board(jump_row, jump_col) {
                continue;
            }
            match self.squares[jump_row as usize][jump_col as usize] {
                Square::Occupied(piece) if piece.color == self.active_color => {}
                _ => moves.push(Move::new(
                    &self.squares,
                    from,
                    ChessField::new(jump_row as u8, jump_col as u8),
                )),
            }
        }
    }

    fn sliding_moves(&self, row: u8, col: u8, directions: &[(i8, i8)], pins: &[Pin], moves: &mut Vec<Move>) {
        let from = ChessField::new(row, col);
        let pin = pin_direction(pins, from);

        for &direction in directions {
            if !allowed_by_pin(pin, direction) {
                continue;
            }
            for step in 1..8 {
                let ray_row = row as i8 + direction.0 * step;
                let ray_col = col as i8 + direction.1 * step;
                if !on_board(ray_row, ray_col) {
                    break;
                }
                let to = ChessField::new(ray_row as u8, ray_col as u8);
                match self.squares[ray_row as usize][ray_col as usize] {
                    Square::Empty => moves.push(Move::new(&self.squares, from, to)),
                    Square::Occupied(piece) => {
                        if piece.color != self.active_color {
                            moves.push(Move::new(&self.squares, from, to));
                        }
                        break;
                    }
                }
            }
        }
    }

    /// King steps self-validate: each candidate square is probed with a full
    /// scan before it is kept, so king moves need no later filtering. The
    /// king itself still sits on its origin square during the probe; the
    /// scan sees through it.
    fn king_moves(&self, row: u8, col: u8, moves: &mut Vec<Move>) {
        let side = self.active_color;
        let from = ChessField::new(row, col);

        for &(dr, dc) in KING_STEPS.iter() {
            let step_row = row as i8 + dr;
            let step_col = col as i8 + dc;
            if !on_board(step_row, step_col) {
                continue;
            }
            if let Square::Occupied(piece) = self.squares[step_row as usize][step_col as usize] {
                if piece.color == side {
                    continue;
                }
            }
            let candidate = ChessField::new(step_row as u8, step_col as u8);
            if !self.scan_pins_and_checks(side, candidate).in_check {
                moves.push(Move::new(&self.squares, from, candidate));
            }
        }
    }
}
