//! Property tests for the simulation invariants

use proptest::prelude::*;

use cat_run::platform::RecordingHost;
use cat_run::sim::physics::try_jump;
use cat_run::sim::{GameEvent, Player, scroll_speed};
use cat_run::{InputEvent, Session, SessionPhase, Tuning};

/// One host frame: how long since the previous one, and whether to jump first
fn frame() -> impl Strategy<Value = (f64, bool)> {
    (1.0f64..120.0, prop::bool::weighted(0.1))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn player_never_sinks_and_score_only_counts_passes(
        seed in any::<u64>(),
        frames in prop::collection::vec(frame(), 1..400),
    ) {
        let mut session = Session::new(RecordingHost::new(), Tuning::default(), seed);
        session.handle_input(InputEvent::StartOrRestart);

        let mut now = 0.0;
        for (gap_ms, jump) in frames {
            if session.host_mut().take_pending().is_none() {
                break;
            }
            if jump {
                session.handle_input(InputEvent::Jump);
            }
            now += gap_ms;
            let before = session.state().score;
            let events = session.on_frame(now);
            let passes = events
                .iter()
                .filter(|e| matches!(e, GameEvent::ObstaclePassed { .. }))
                .count() as u32;

            prop_assert!(session.state().player.offset <= 0.0);
            prop_assert_eq!(session.state().score, before + passes);
        }
    }

    #[test]
    fn pausing_does_not_advance_time(
        seed in any::<u64>(),
        run_frames in 1usize..120,
        paused_ms in 0.0f64..600_000.0,
    ) {
        let mut session = Session::new(RecordingHost::new(), Tuning::default(), seed);
        session.handle_input(InputEvent::StartOrRestart);
        session.state_mut().spawner.next_delay = f32::MAX;

        let mut now = 0.0;
        for _ in 0..run_frames {
            session.host_mut().take_pending();
            session.on_frame(now);
            now += 16.0;
        }
        let elapsed = session.state().elapsed;
        let player = session.state().player;

        prop_assert!(session.handle_input(InputEvent::TogglePause));
        now += paused_ms;
        session.on_frame(now);
        prop_assert!(session.handle_input(InputEvent::TogglePause));
        prop_assert_eq!(session.phase(), SessionPhase::Running);

        session.host_mut().take_pending();
        session.on_frame(now);
        prop_assert_eq!(session.state().elapsed, elapsed);
        prop_assert_eq!(session.state().player, player);
    }

    #[test]
    fn speed_follows_step_law(elapsed in 0.0f32..600.0, later in 0.0f32..600.0) {
        let tuning = Tuning::default();
        let expected = tuning.base_speed
            + (elapsed / tuning.ramp_interval).floor() * tuning.ramp_increment;
        prop_assert_eq!(scroll_speed(&tuning, elapsed), expected);
        prop_assert!(scroll_speed(&tuning, elapsed) <= scroll_speed(&tuning, elapsed + later));
    }

    #[test]
    fn airborne_jump_is_ignored(offset in -200.0f32..-0.001, velocity in -500.0f32..500.0) {
        let mut player = Player::new(&Tuning::default());
        player.offset = offset;
        player.velocity = velocity;
        prop_assert!(!try_jump(&mut player, -450.0));
        prop_assert_eq!(player.velocity, velocity);
    }
}
