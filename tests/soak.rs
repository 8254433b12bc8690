//! Long-running sessions checked against the game's standing invariants

use dual::autopilot::autopilot_input;
use dual::consts::FRAME_MS;
use dual::persistence::MemoryStore;
use dual::platform::Direction;
use dual::sim::{GameEvent, GamePhase, GameState, TickInput};
use dual::{Bests, Lane, Session, Settings, Tuning};

/// Frame times with some jitter, repeated
const JITTER: [f32; 7] = [16.667, 16.0, 17.5, 33.3, 8.2, 16.667, 100.0];

fn session(seed: u64) -> Session<MemoryStore> {
    Session::new(
        seed,
        Tuning::default(),
        Settings::default(),
        MemoryStore::default(),
    )
}

fn check_state(state: &GameState) {
    for (lane, dot) in [(Lane::Left, &state.left), (Lane::Right, &state.right)] {
        let (lo, hi) = lane.dot_bounds();
        assert!(dot.x >= lo && dot.x <= hi, "{lane:?} dot at {} outside lane", dot.x);
        assert!(dot.vx.abs() <= state.tuning.max_vel + 1e-4);
    }
    for row in &state.pool.items {
        for lane in [Lane::Left, Lane::Right] {
            let (lo, hi) = lane.gap_center_bounds(row.gap_w);
            let x = row.gap_center(lane);
            assert!(x >= lo - 1e-3 && x <= hi + 1e-3, "{lane:?} gap at {x} outside lane");
        }
    }
    assert!(state.max_combo >= state.combo);
    assert!(state.hi_score >= state.score || state.phase == GamePhase::Alive);
    assert!(state.shake >= 0.0);
}

#[test]
fn test_autopilot_soak_keeps_invariants() {
    for seed in [1, 7, 42, 0xDEAD, 90210] {
        let mut s = session(seed);
        let mut run = s.state().run;
        let mut last_score = 0;
        let mut last_max_combo = 0;

        for frame in 0..6000 {
            let input = autopilot_input(s.state());
            let events = s.step_with(&input, JITTER[frame % JITTER.len()]);
            let state = s.state();

            if state.run != run {
                assert!(events.iter().any(|e| matches!(e, GameEvent::Restart { .. })));
                run = state.run;
                last_score = 0;
                last_max_combo = 0;
            }
            assert!(state.score >= last_score, "score went down on seed {seed}");
            assert!(state.max_combo >= last_max_combo);
            last_score = state.score;
            last_max_combo = state.max_combo;

            check_state(state);
            assert_eq!(s.store().bests, s.bests());
            assert!(s.bests().score <= state.hi_score);
        }
    }
}

#[test]
fn test_reckless_play_dies_and_restarts() {
    let mut s = session(5);
    let reckless = TickInput {
        direction: Direction::Right,
        any_input: true,
    };

    let mut deaths = 0;
    let mut restarts = 0;
    let mut results = 0;
    for _ in 0..20_000 {
        for event in s.step_with(&reckless, FRAME_MS) {
            match event {
                GameEvent::Death { .. } => deaths += 1,
                GameEvent::Restart { .. } => restarts += 1,
                GameEvent::ShowResult => results += 1,
                _ => {}
            }
        }
        check_state(s.state());
    }

    assert!(deaths >= 2, "only {deaths} deaths");
    assert!(restarts >= deaths - 1 && restarts <= deaths);
    assert!(results >= restarts);
    assert_eq!(s.state().run, restarts);
    assert!(s.bests().level >= 1);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = session(31337);
    let mut b = session(31337);
    for frame in 0..3000 {
        let elapsed = JITTER[frame % JITTER.len()];
        let input = autopilot_input(a.state());
        let ea = a.step_with(&input, elapsed);
        let eb = b.step_with(&input, elapsed);
        assert_eq!(
            serde_json::to_string(&ea).unwrap(),
            serde_json::to_string(&eb).unwrap()
        );
    }
    assert_eq!(
        serde_json::to_string(&a.snapshot()).unwrap(),
        serde_json::to_string(&b.snapshot()).unwrap()
    );
}

#[test]
fn test_prior_bests_survive_weak_runs() {
    let mut s = Session::new(
        3,
        Tuning::default(),
        Settings::default(),
        MemoryStore::with(Bests::new(1_000_000, 99)),
    );
    let reckless = TickInput {
        direction: Direction::Left,
        any_input: true,
    };
    for _ in 0..5000 {
        s.step_with(&reckless, FRAME_MS);
    }
    assert_eq!(s.bests(), Bests::new(1_000_000, 99));
    assert_eq!(s.store().saves, 0);
    assert!(!s.snapshot().new_best);
}
