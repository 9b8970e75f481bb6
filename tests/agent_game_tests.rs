use std::collections::VecDeque;

use battleboats::{Agent, AgentState, AiPlayer, Event, GameOutcome};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const MAX_STEPS: usize = 10_000;

/// Run two agents against each other with an instant, lossless link.
///
/// Each emitted message is confirmed to its sender before the peer sees it,
/// the same order a node uses.
fn play(seed1: u64, seed2: u64) -> [Agent<AiPlayer>; 2] {
    let mut agents = [
        Agent::new(AiPlayer::new(), SmallRng::seed_from_u64(seed1)),
        Agent::new(AiPlayer::new(), SmallRng::seed_from_u64(seed2)),
    ];
    let mut pending = VecDeque::from([(0usize, Event::StartButton)]);
    let mut steps = 0;
    while let Some((who, event)) = pending.pop_front() {
        if let Some(msg) = agents[who].step(event) {
            pending.push_back((who, Event::MessageSent));
            pending.push_back((1 - who, Event::from(msg)));
        }
        steps += 1;
        assert!(steps < MAX_STEPS, "match did not finish");
    }
    agents
}

#[test]
fn test_ai_match_ends_with_one_winner() {
    for seed in 0..25u64 {
        let [first, second] = play(seed, seed + 1000);
        assert_eq!(first.state(), AgentState::EndScreen, "seed {}", seed);
        assert_eq!(second.state(), AgentState::EndScreen, "seed {}", seed);

        let outcomes = (first.outcome().unwrap(), second.outcome().unwrap());
        let (winner, loser) = match outcomes {
            (GameOutcome::Victory, GameOutcome::Defeat) => (&first, &second),
            (GameOutcome::Defeat, GameOutcome::Victory) => (&second, &first),
            other => panic!("seed {}: unexpected outcomes {:?}", seed, other),
        };
        assert_eq!(loser.own_field().alive_fleet_bitmask(), 0);
        assert_ne!(winner.own_field().alive_fleet_bitmask(), 0);
        assert_eq!(winner.opponent_field().alive_fleet_bitmask(), 0);
    }
}

#[test]
fn test_ai_match_is_reproducible() {
    let [a1, b1] = play(42, 43);
    let [a2, b2] = play(42, 43);
    assert_eq!(a1.outcome(), a2.outcome());
    assert_eq!(b1.outcome(), b2.outcome());
    assert_eq!(a1.turn_counter(), a2.turn_counter());
    assert_eq!(a1.own_field(), a2.own_field());
    assert_eq!(b1.opponent_field(), b2.opponent_field());
}

#[test]
fn test_both_sides_agree_on_handshake() {
    let [challenger, acceptor] = play(7, 8);
    assert_eq!(challenger.handshake(), acceptor.handshake());
}

#[test]
fn test_opponent_view_matches_real_field() {
    let [first, second] = play(3, 4);
    // every hit one side recorded lands on a boat square of the other
    for (shooter, target) in [(&first, &second), (&second, &first)] {
        for (r, row) in shooter.opponent_field().rows().iter().enumerate() {
            for (c, square) in row.iter().enumerate() {
                if *square == battleboats::SquareStatus::Hit {
                    assert_eq!(
                        target.own_field().square(r, c),
                        Some(battleboats::SquareStatus::Hit)
                    );
                }
            }
        }
    }
}
