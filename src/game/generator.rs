use super::board::Board;
use super::grid::CellPos;
use super::rng::MineRng;
use crate::config::BoardConfig;
use crate::error::Result;

/// Generates a new board, placing mines uniformly at random.
///
/// The same seed and configuration always produce the same layout. The mine
/// density is bounded by `BoardConfig`, so placement by rejection always
/// terminates.
pub fn generate(config: &BoardConfig, seed: u64) -> Result<Board> {
    let (width, height) = (config.width(), config.height());
    let mut board = Board::empty(width, height)?;

    let mut rng = MineRng::new(seed);
    let mut placed = 0;
    let mut attempts = 0_u64;
    while placed < config.mines() {
        attempts += 1;
        let x = rng.below(width);
        let y = rng.below(height);
        if board.place_mine(CellPos(x as i32, y as i32)) {
            placed += 1;
        }
    }
    board.count_adjacent_mines();

    log::debug!(
        "Generated {}x{} board with {} mines in {} attempts (seed {})",
        width,
        height,
        placed,
        attempts,
        seed,
    );
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tile::Cell;
    use rand::Rng;

    fn check_counts(board: &Board) {
        for pos in board.tiles().positions() {
            if let Some(Cell::Number(n)) = board.cell(pos) {
                let expected = board
                    .tiles()
                    .neighbors(pos)
                    .filter(|&p| board.cell(p) == Some(Cell::Mine))
                    .count();
                assert_eq!(n as usize, expected, "wrong count at {:?}", pos);
            }
        }
    }

    #[test]
    fn test_generated_boards_are_consistent() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let width = rng.gen_range(1..=30);
            let height = rng.gen_range(1..=30);
            let mines = rng.gen_range(0..=BoardConfig::max_mines(width, height));
            let config = BoardConfig::new(width, height, mines).unwrap();
            let board = generate(&config, rng.gen()).unwrap();

            assert_eq!(board.tiles().width(), width);
            assert_eq!(board.tiles().height(), height);
            assert_eq!(board.mine_count(), mines as usize);
            assert_eq!(board.hidden_count(), (width * height) as usize);
            check_counts(&board);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = BoardConfig::default();
        let a = generate(&config, 1234).unwrap();
        let b = generate(&config, 1234).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let config = BoardConfig::default();
        let a = generate(&config, 1).unwrap();
        let b = generate(&config, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_mines_reach_every_edge() {
        let config = BoardConfig::new(4, 4, 4).unwrap();
        let mut seen = Vec::new();
        for seed in 0..200 {
            let board = generate(&config, seed).unwrap();
            seen.extend(
                board
                    .tiles()
                    .positions()
                    .filter(|&p| board.cell(p) == Some(Cell::Mine)),
            );
        }
        assert!(seen.iter().any(|p| p.0 == 0));
        assert!(seen.iter().any(|p| p.1 == 0));
        assert!(seen.iter().any(|p| p.0 == 3));
        assert!(seen.iter().any(|p| p.1 == 3));
    }
}
