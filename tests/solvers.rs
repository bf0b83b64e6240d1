//! Integration tests for the assignment solvers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use team_pairing::{
    is_valid_matching, solve, solve_detailed, total_rating, Method, RatingStore, Roster,
};

fn names(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{prefix}{i}")).collect()
}

/// Store over `players` x `opponents` filled row by row from `values`.
fn store(players: &[String], opponents: &[String], values: &[i64]) -> RatingStore {
    let mut ratings = RatingStore::for_rosters(
        &Roster::from_names(players.to_vec()).unwrap(),
        &Roster::from_names(opponents.to_vec()).unwrap(),
    );
    let mut it = values.iter();
    for p in players {
        for o in opponents {
            ratings.set(p, o, *it.next().unwrap()).unwrap();
        }
    }
    ratings
}

fn random_store(rng: &mut StdRng, players: &[String], opponents: &[String]) -> RatingStore {
    let values: Vec<i64> = (0..players.len() * opponents.len())
        .map(|_| rng.gen_range(1..=5))
        .collect();
    store(players, opponents, &values)
}

#[test]
fn greedy_counterexample() {
    // A:{X:5, Y:4}, B:{X:3, Y:1}
    let players = vec!["A".to_string(), "B".to_string()];
    let opponents = vec!["X".to_string(), "Y".to_string()];
    let ratings = store(&players, &opponents, &[5, 4, 3, 1]);

    let greedy = solve(&players, &opponents, &ratings, Method::Greedy);
    let optimal = solve(&players, &opponents, &ratings, Method::Optimal);
    let full = solve(&players, &opponents, &ratings, Method::Full);

    assert_eq!(total_rating(&greedy), 6);
    assert_eq!(total_rating(&optimal), 7);
    assert_eq!(total_rating(&full), 7);
    assert!(optimal.iter().any(|p| p.player == "A" && p.opponent == "Y"));
    assert!(optimal.iter().any(|p| p.player == "B" && p.opponent == "X"));
}

#[test]
fn every_solver_returns_a_matching() {
    let mut rng = StdRng::seed_from_u64(11);
    for (np, no) in [(1, 1), (2, 5), (5, 2), (4, 4), (5, 5), (7, 6), (6, 8)] {
        let players = names("P", np);
        let opponents = names("O", no);
        let ratings = random_store(&mut rng, &players, &opponents);
        for method in [Method::Greedy, Method::Full, Method::Optimal] {
            let pairs = solve(&players, &opponents, &ratings, method);
            assert!(is_valid_matching(&pairs), "{method:?} on {np}x{no}");
            assert_eq!(pairs.len(), np.min(no), "{method:?} on {np}x{no}");
            for pair in &pairs {
                assert_eq!(pair.rating, ratings.value(&pair.player, &pair.opponent));
                assert!(pair.role.is_none());
            }
        }
    }
}

#[test]
fn optimal_equals_exhaustive_and_beats_greedy() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut greedy_lost = false;
    for round in 0..200 {
        let np = 1 + round % 5;
        let no = 1 + (round / 5) % 5;
        let players = names("P", np);
        let opponents = names("O", no);
        let ratings = random_store(&mut rng, &players, &opponents);

        let full = total_rating(&solve(&players, &opponents, &ratings, Method::Full));
        let optimal = total_rating(&solve(&players, &opponents, &ratings, Method::Optimal));
        let greedy = total_rating(&solve(&players, &opponents, &ratings, Method::Greedy));

        assert_eq!(optimal, full, "{np}x{no} round {round}");
        assert!(greedy <= optimal);
        greedy_lost |= greedy < optimal;
    }
    assert!(greedy_lost, "expected at least one matrix where greedy is suboptimal");
}

#[test]
fn greedy_breaks_ties_player_major() {
    let players = names("P", 2);
    let opponents = names("O", 2);
    let ratings = store(&players, &opponents, &[4, 4, 4, 4]);
    let pairs = solve(&players, &opponents, &ratings, Method::Greedy);
    let got: Vec<_> = pairs
        .iter()
        .map(|p| (p.player.as_str(), p.opponent.as_str()))
        .collect();
    assert_eq!(got, [("P1", "O1"), ("P2", "O2")]);
}

#[test]
fn empty_side_gives_empty_pairing() {
    let players = names("P", 3);
    let ratings = RatingStore::default();
    for method in [Method::Greedy, Method::Full, Method::Optimal] {
        assert!(solve(&players, &[], &ratings, method).is_empty());
        assert!(solve(&[], &players, &ratings, method).is_empty());
    }
}

#[test]
fn exhaustive_fallback_is_reported() {
    let players = names("P", 6);
    let opponents = names("O", 6);
    let mut rng = StdRng::seed_from_u64(5);
    let ratings = random_store(&mut rng, &players, &opponents);

    let small = solve_detailed(&players[..5], &opponents[..5], &ratings, Method::Full);
    assert_eq!(small.used, Method::Full);

    // Few players against a long opponent list still leaves the permutation search.
    let wide = solve_detailed(&players[..2], &opponents, &ratings, Method::Full);
    assert_eq!(wide.used, Method::Optimal);
    let wide_optimal = solve_detailed(&players[..2], &opponents, &ratings, Method::Optimal);
    assert_eq!(wide.total, wide_optimal.total);
    assert_eq!(wide.pairs.len(), 2);

    let large = solve_detailed(&players, &opponents, &ratings, Method::Full);
    assert_eq!(large.requested, Method::Full);
    assert_eq!(large.used, Method::Optimal);
    let optimal = solve_detailed(&players, &opponents, &ratings, Method::Optimal);
    assert_eq!(large.total, optimal.total);
}
