//! Integration tests for the Connect More game engine.
//!
//! These tests play complete games through the public session API.

use connect_core::*;
use pretty_assertions::assert_eq;

fn two_humans() -> Vec<Player> {
    vec![Player::human(1, "Ann", 'A'), Player::human(2, "Bob", 'B')]
}

/// Play columns in order, asserting every move but the last keeps the game going
fn play(game: &mut GameSession, columns: &[usize]) -> GameOutcome {
    let (last, rest) = columns.split_last().expect("at least one move");
    for &column in rest {
        assert_eq!(game.submit_move(column).unwrap(), GameOutcome::Ongoing);
    }
    game.submit_move(*last).unwrap()
}

/// Every column's tokens must sit in one unbroken run on the bottom row
fn assert_gravity(grid: &Grid) {
    for column in 0..grid.width() {
        let mut seen_token = false;
        for row in 0..grid.height() {
            let owner = grid.owner(column, row).unwrap();
            if seen_token {
                assert!(!owner.is_empty(), "gap under a token in column {column}");
            }
            seen_token |= !owner.is_empty();
        }
        let stacked = (0..grid.height())
            .filter(|&row| !grid.owner(column, row).unwrap().is_empty())
            .count();
        assert_eq!(stacked, grid.column_height(column));
    }
}

#[test]
fn test_vertical_win_in_first_column() {
    let mut game = new_game(7, 6, 4, two_humans()).unwrap();

    let outcome = play(&mut game, &[0, 1, 0, 1, 0, 1, 0]);

    assert_eq!(
        outcome,
        GameOutcome::Win {
            player: 1,
            axis: Axis::Vertical,
            run_length: 4
        }
    );
    assert_eq!(game.winner().map(|p| p.id), Some(1));
}

#[test]
fn test_horizontal_win_on_bottom_row() {
    let mut game = new_game(7, 6, 4, two_humans()).unwrap();

    let outcome = play(&mut game, &[0, 0, 1, 1, 2, 2, 3]);

    assert!(matches!(
        outcome,
        GameOutcome::Win {
            player: 1,
            axis: Axis::Horizontal,
            ..
        }
    ));
    assert_eq!(game.last_move().map(|m| (m.column, m.row)), Some((3, 5)));
}

#[test]
fn test_horizontal_win_built_right_to_left() {
    let mut game = new_game(7, 6, 4, two_humans()).unwrap();

    let outcome = play(&mut game, &[6, 6, 5, 5, 4, 4, 3]);

    assert_eq!(
        outcome,
        GameOutcome::Win {
            player: 1,
            axis: Axis::Horizontal,
            run_length: 4
        }
    );
}

#[test]
fn test_forward_diagonal_win() {
    let mut game = new_game(7, 6, 4, two_humans()).unwrap();

    let outcome = play(&mut game, &[0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3]);

    assert_eq!(
        outcome,
        GameOutcome::Win {
            player: 1,
            axis: Axis::ForwardDiagonal,
            run_length: 4
        }
    );
}

#[test]
fn test_full_board_without_run_is_draw() {
    let mut game = new_game(5, 5, 5, two_humans()).unwrap();

    let columns: Vec<usize> = (0..5).flat_map(|_| [0, 1, 2, 4, 3]).collect();
    let outcome = play(&mut game, &columns);

    assert_eq!(outcome, GameOutcome::Draw);
    assert!(game.grid().is_full());
    assert_eq!(game.outcome(), Some(GameOutcome::Draw));
    assert_eq!(game.winner(), None);
    assert_gravity(game.grid());
}

#[test]
fn test_full_column_is_rejected_without_change() {
    let mut game = new_game(7, 6, 4, two_humans()).unwrap();

    // Alternate owners so the column never makes a vertical run
    for _ in 0..3 {
        game.submit_move(2).unwrap();
        game.submit_move(2).unwrap();
        game.submit_move(5).unwrap();
        game.submit_move(6).unwrap();
    }
    assert!(game.grid().is_column_full(2));

    let before = game.grid().clone();
    let player_before = game.current_player().id;

    assert_eq!(game.submit_move(2).unwrap(), GameOutcome::ColumnFull);
    assert_eq!(game.grid(), &before);
    assert_eq!(game.current_player().id, player_before);
    assert!(!game.is_over());
}

#[test]
fn test_turn_order_cycles_through_all_players() {
    let players = vec![
        Player::human(1, "Ann", 'A'),
        Player::human(2, "Bob", 'B'),
        Player::computer(3, "Ada", 'X'),
    ];
    let mut game = new_game(7, 6, 4, players).unwrap();

    let mut order = Vec::new();
    for column in [0, 1, 2, 3, 4, 5, 6] {
        order.push(game.current_player().id);
        assert_eq!(game.submit_move(column).unwrap(), GameOutcome::Ongoing);
    }
    assert_eq!(order, vec![1, 2, 3, 1, 2, 3, 1]);
}

#[test]
fn test_random_games_keep_gravity() {
    let players = vec![
        Player::computer(1, "Ada", 'X'),
        Player::computer(2, "Alan", 'Y'),
        Player::computer(3, "Ida", 'Z'),
    ];

    for (seed, (width, height, k)) in [(6, 5, 3), (9, 9, 5), (5, 7, 4), (3, 3, 4)]
        .into_iter()
        .enumerate()
    {
        let mut game =
            GameSession::with_seed(BoardConfig::new(width, height, k), players.clone(), seed as u64)
                .unwrap();
        let mut turn = game.current_player().id;

        while !game.is_over() {
            let outcome = game.play_computer_turn().unwrap();
            assert_gravity(game.grid());
            if outcome == GameOutcome::Ongoing {
                let next = game.current_player().id;
                assert_eq!(next, turn % 3 + 1);
                turn = next;
            }
        }

        if k > width.max(height) {
            assert_eq!(game.outcome(), Some(GameOutcome::Draw));
        }
    }
}

#[test]
fn test_sessions_are_independent() {
    let mut first = new_game(7, 6, 4, two_humans()).unwrap();
    let second = new_game(7, 6, 4, two_humans()).unwrap();

    first.submit_move(0).unwrap();

    assert_eq!(first.moves_made(), 1);
    assert_eq!(second.moves_made(), 0);
    assert_eq!(second.grid().owner(0, 5), Some(CellOwner::Empty));
}

#[test]
fn test_roster_feeds_session() {
    let mut roster = Roster::for_board(7, 6);
    roster.check_counts(1, 1).unwrap();
    roster.add_human("Grace", "g").unwrap();
    let mut rng = rand_seeded();
    roster.add_computer(&mut rng).unwrap();

    let game = new_game(7, 6, 4, roster.into_players()).unwrap();
    assert_eq!(game.players().len(), 2);
    assert_eq!(game.current_player().token, 'G');
    assert!(game.players()[1].is_computer());
}

#[test]
fn test_phase_machine_drives_a_game() {
    let mut phase = GamePhase::Start.advance(PhaseTrigger::Begin).unwrap();
    assert_eq!(phase, GamePhase::Setup);

    let mut game = new_game(7, 6, 4, two_humans()).unwrap();
    phase = phase.advance(PhaseTrigger::Registered).unwrap();

    for column in [0, 1, 0, 1, 0, 1, 0] {
        assert_eq!(phase, GamePhase::Play);
        let outcome = game.submit_move(column).unwrap();
        phase = phase.advance(PhaseTrigger::Moved(outcome)).unwrap();
    }

    assert_eq!(
        phase,
        GamePhase::Win {
            player: 1,
            axis: Axis::Vertical,
            run_length: 4
        }
    );
    phase = phase.advance(PhaseTrigger::Acknowledge).unwrap();
    assert!(!phase.is_running());
}

fn rand_seeded() -> impl rand::Rng {
    use rand::SeedableRng;
    rand::rngs::StdRng::seed_from_u64(5)
}
