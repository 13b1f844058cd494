//! Match engine scenario tests

use crate::config::MatchConfig;
use crate::engine::*;
use crate::error::ScoringError;
use crate::models::{BatterId, BowlerId, Side};
use crate::notify::Severity;
use crate::save::{HistoryStore, InMemoryHistoryStore};

/// T20 engine with a bowler on and two openers at the crease.
fn ready_engine() -> (MatchEngine, BowlerId, BatterId, BatterId) {
    let mut engine = MatchEngine::default();
    let bowler = engine.select_or_create_bowler("Starc").unwrap();
    let striker = engine.add_batter("Head").unwrap();
    let non_striker = engine.add_batter("Marsh").unwrap();
    (engine, bowler, striker, non_striker)
}

fn record_all(engine: &mut MatchEngine, deliveries: &[Delivery]) {
    for delivery in deliveries {
        engine.record_delivery(*delivery).unwrap();
    }
}

/// Single-wicket match: first innings of `runs` then all out.
fn first_innings_all_out(store: InMemoryHistoryStore, runs: u32) -> MatchEngine {
    let mut engine =
        MatchEngine::with_history(MatchConfig::single_wicket(2), Box::new(store));
    engine.select_or_create_bowler("Cummins").unwrap();
    engine.add_batter("Head").unwrap();
    engine.add_batter("Marsh").unwrap();
    if runs > 0 {
        engine.record_delivery(Delivery::runs(runs)).unwrap();
    }
    let report = engine.record_delivery(Delivery::wicket()).unwrap();
    assert!(report.innings_ended);
    assert_eq!(engine.phase(), MatchPhase::InningsBreak);
    assert!(!engine.can_undo());
    engine
}

fn start_chase(engine: &mut MatchEngine) {
    engine.switch_innings().unwrap();
    engine.select_or_create_bowler("Bumrah").unwrap();
    engine.add_batter("Smith").unwrap();
    engine.add_batter("Labuschagne").unwrap();
}

#[test]
fn test_first_over_end_to_end() {
    let mut engine = MatchEngine::default();
    let a = engine.select_or_create_bowler("A").unwrap();
    let x = engine.add_batter("X").unwrap();
    let y = engine.add_batter("Y").unwrap();

    engine.record_delivery(Delivery::runs(4)).unwrap();
    let batter = engine.batting_team().batter(x).unwrap();
    assert_eq!((batter.runs, batter.balls_faced, batter.fours), (4, 1, 1));
    assert_eq!(engine.batting_team().score_line(), "4/0");

    engine.record_delivery(Delivery::dot()).unwrap();
    assert_eq!(engine.batting_team().batter(x).unwrap().balls_faced, 2);

    engine.record_delivery(Delivery::wicket()).unwrap();
    assert_eq!(engine.batting_team().score_line(), "4/1");
    assert!(engine.batting_team().batter(x).unwrap().is_out);
    assert_eq!(engine.batting_team().batter(x).unwrap().how_out.as_deref(), Some("b A"));
    assert_eq!(engine.on_strike_id(), None);

    let z = engine.add_batter("Z").unwrap();
    engine.select_batter(End::OnStrike, z).unwrap();

    engine.record_delivery(Delivery::dot()).unwrap();
    engine.record_delivery(Delivery::dot()).unwrap();
    let report = engine.record_delivery(Delivery::dot()).unwrap();
    assert!(report.over_completed);
    assert!(report.strike_rotated);

    assert_eq!(engine.record_delivery(Delivery::dot()), Err(ScoringError::NeedsBowler));

    let team = engine.batting_team();
    assert_eq!((team.runs, team.wickets, team.overs, team.balls), (4, 1, 1, 0));
    let bowler = engine.fielding_team().bowler(a).unwrap();
    assert_eq!(bowler.overs_display(), "1.0");
    assert_eq!(bowler.runs_conceded, 4);
    assert_eq!(bowler.wickets, 1);
    assert_eq!(bowler.maidens, 0);
    assert_eq!(engine.current_bowler_id(), None);
    assert_eq!(engine.last_over_bowler_id(), Some(a));
    assert_eq!(engine.batting_team().batter(z).unwrap().balls_faced, 3);
    // Over-end change of strike
    assert_eq!(engine.on_strike_id(), Some(y));
}

#[test]
fn test_missing_bowler_and_striker_reports_both() {
    let mut engine = MatchEngine::default();
    assert_eq!(engine.record_delivery(Delivery::dot()), Err(ScoringError::NeedsBowler));

    let titles: Vec<String> =
        engine.take_notifications().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["Striker Needed", "Bowler Needed"]);
    assert_eq!(engine.batting_team().legal_balls(), 0);
    assert!(engine.commentary().is_empty());
    assert!(!engine.can_undo());
}

#[test]
fn test_missing_striker_after_wicket() {
    let (mut engine, ..) = ready_engine();
    engine.record_delivery(Delivery::wicket()).unwrap();
    let before = engine.batting_team().clone();

    assert_eq!(engine.record_delivery(Delivery::runs(2)), Err(ScoringError::NeedsStriker));
    assert_eq!(engine.batting_team(), &before);
}

#[test]
fn test_oversized_delivery_rejected_without_change() {
    let (mut engine, bowler, ..) = ready_engine();
    engine.record_delivery(Delivery::runs(1)).unwrap();
    let before = engine.batting_team().clone();
    let bowler_before = engine.fielding_team().bowler(bowler).unwrap().clone();
    let entries = engine.commentary().len();

    let err = engine
        .record_delivery(Delivery::new(u32::MAX, false, true, Outcome::Runs))
        .unwrap_err();
    assert!(matches!(err, ScoringError::InvalidDelivery(_)));
    assert!(matches!(
        engine.record_delivery(Delivery::no_ball(u32::MAX)),
        Err(ScoringError::InvalidDelivery(_))
    ));

    assert_eq!(engine.batting_team(), &before);
    assert_eq!(engine.fielding_team().bowler(bowler).unwrap(), &bowler_before);
    assert_eq!(engine.spell().bat_runs, 1);
    assert_eq!(engine.commentary().len(), entries);
    // The earlier single can still be taken back
    assert!(engine.can_undo());
}

#[test]
fn test_all_out_wicket_cannot_be_undone() {
    let mut engine = first_innings_all_out(InMemoryHistoryStore::new(), 3);
    let score = engine.batting_team().score_line();

    assert_eq!(engine.undo(), Err(ScoringError::NothingToUndo));
    assert_eq!(engine.batting_team().score_line(), score);
    assert_eq!(engine.phase(), MatchPhase::InningsBreak);
}

#[test]
fn test_wide_and_no_ball_are_rebowled() {
    let (mut engine, bowler, head, _) = ready_engine();

    engine.record_delivery(Delivery::wide()).unwrap();
    engine.record_delivery(Delivery::no_ball(4)).unwrap();

    let team = engine.batting_team();
    assert_eq!((team.runs, team.extras, team.legal_balls()), (6, 6, 0));
    let batter = team.batter(head).unwrap();
    assert_eq!((batter.runs, batter.balls_faced, batter.fours), (0, 0, 0));
    let bowler = engine.fielding_team().bowler(bowler).unwrap();
    assert_eq!((bowler.runs_conceded, bowler.balls_bowled), (6, 0));
    assert_eq!(engine.spell(), Spell::default());
    // Extras never move the strike
    assert_eq!(engine.on_strike_id(), Some(head));
}

#[test]
fn test_byes_do_not_spoil_a_maiden() {
    let (mut engine, bowler, head, _) = ready_engine();
    record_all(&mut engine, &[Delivery::byes(1); 6]);

    let starc = engine.fielding_team().bowler(bowler).unwrap();
    assert_eq!(starc.maidens, 1);
    assert_eq!(starc.runs_conceded, 6);
    assert_eq!(engine.batting_team().extras, 6);
    assert_eq!(engine.batting_team().batter(head).unwrap().runs, 0);
}

#[test]
fn test_maiden_over() {
    let (mut engine, bowler, ..) = ready_engine();
    let report = {
        record_all(&mut engine, &[Delivery::dot(); 5]);
        engine.record_delivery(Delivery::dot()).unwrap()
    };
    assert!(report.over_completed);
    assert_eq!(engine.fielding_team().bowler(bowler).unwrap().figures(), "1.0 O, 1 M, 0 R, 0 W");
    assert!(engine.commentary().entries().iter().any(|e| e.text.contains("MAIDEN")));
}

#[test]
fn test_single_off_last_ball_changes_ends_once() {
    let (mut engine, _, head, marsh) = ready_engine();
    record_all(&mut engine, &[Delivery::dot(); 5]);

    let report = engine.record_delivery(Delivery::runs(1)).unwrap();
    assert!(report.over_completed);
    // No mid-delivery swap on the sixth ball; the over-end swap still happens
    assert_eq!(engine.on_strike_id(), Some(marsh));
    assert_eq!(engine.off_strike_id(), Some(head));
}

#[test]
fn test_delivery_has_single_commentary_entry() {
    let (mut engine, ..) = ready_engine();
    let before = engine.commentary().len();

    let report = engine.record_delivery(Delivery::runs(3)).unwrap();
    assert!(report.strike_rotated);
    assert_eq!(engine.commentary().len(), before + 1);

    let entry = engine.commentary().get(report.commentary_id).unwrap();
    assert!(entry.finalized);
    assert!(entry.text.starts_with("3 runs scored by Head! Off Starc."));
    assert!(entry.text.contains("Marsh is now on strike"));
    assert!(entry.text.ends_with("Score: 3/0"));
}

#[test]
fn test_boundary_commentary() {
    let (mut engine, ..) = ready_engine();
    let report = engine.record_delivery(Delivery::runs(6)).unwrap();
    let text = &engine.commentary().get(report.commentary_id).unwrap().text;
    assert!(text.starts_with("SIX! 6 runs scored by Head!"));
    assert_eq!(engine.batting_team().batter(engine.on_strike_id().unwrap()).unwrap().sixes, 1);
}

#[test]
fn test_undo_round_trip() {
    let (mut engine, ..) = ready_engine();
    engine.record_delivery(Delivery::runs(2)).unwrap();
    engine.add_manual_commentary("Drinks break").unwrap();

    let team_before = engine.batting_team().clone();
    let bowlers_before = engine.fielding_team().bowlers.clone();
    let strike_before = (engine.on_strike_id(), engine.off_strike_id());
    let spell_before = engine.spell();
    let commentary_before = engine.commentary().entries().to_vec();

    engine.record_delivery(Delivery::runs(1)).unwrap();
    assert!(engine.can_undo());
    engine.undo().unwrap();

    assert_eq!(engine.batting_team(), &team_before);
    assert_eq!(engine.fielding_team().bowlers, bowlers_before);
    assert_eq!((engine.on_strike_id(), engine.off_strike_id()), strike_before);
    assert_eq!(engine.spell(), spell_before);

    let entries = engine.commentary().entries();
    assert_eq!(entries.len(), commentary_before.len() + 1);
    assert_eq!(&entries[..commentary_before.len()], &commentary_before[..]);
    assert_eq!(
        entries.last().unwrap().text,
        "(Action Undone) Last recorded action has been reversed. Score: 2/0. Striker: Head"
    );

    assert!(!engine.can_undo());
    assert_eq!(engine.undo(), Err(ScoringError::NothingToUndo));
}

#[test]
fn test_undo_wicket_restores_striker() {
    let (mut engine, bowler, head, _) = ready_engine();
    engine.record_delivery(Delivery::wicket()).unwrap();
    engine.undo().unwrap();

    assert_eq!(engine.on_strike_id(), Some(head));
    assert!(!engine.batting_team().batter(head).unwrap().is_out);
    assert_eq!(engine.fielding_team().bowler(bowler).unwrap().wickets, 0);
    assert_eq!(engine.batting_team().score_line(), "0/0");
}

#[test]
fn test_undo_revoked_by_over_and_lineup_changes() {
    let (mut engine, ..) = ready_engine();
    engine.record_delivery(Delivery::dot()).unwrap();
    engine.add_batter("Smith").unwrap();
    assert!(!engine.can_undo());

    engine.record_delivery(Delivery::dot()).unwrap();
    assert!(engine.swap_strike());
    assert!(!engine.can_undo());

    record_all(&mut engine, &[Delivery::dot(); 4]);
    assert_eq!(engine.batting_team().overs, 1);
    assert!(!engine.can_undo());
}

#[test]
fn test_manual_commentary_keeps_undo() {
    let (mut engine, ..) = ready_engine();
    engine.record_delivery(Delivery::dot()).unwrap();
    engine.add_manual_commentary("  Rain in the air  ").unwrap();

    assert!(engine.can_undo());
    assert_eq!(engine.commentary().last().unwrap().text, "(Manual) Rain in the air");
    assert_eq!(engine.add_manual_commentary("   "), Err(ScoringError::EmptyCommentary));
}

#[test]
fn test_chase_won_by_wickets() {
    let store = InMemoryHistoryStore::new();
    let mut engine = first_innings_all_out(store.clone(), 6);

    assert!(matches!(
        engine.record_delivery(Delivery::dot()),
        Err(ScoringError::InningsOver { .. })
    ));
    assert!(matches!(engine.add_batter("Green"), Err(ScoringError::InningsOver { .. })));

    start_chase(&mut engine);
    assert_eq!(engine.target(), Some(7));
    assert_eq!(engine.batting_side(), Side::Away);

    engine.record_delivery(Delivery::runs(4)).unwrap();
    assert_eq!(engine.innings_stats().runs_needed, Some(3));
    let report = engine.record_delivery(Delivery::runs(4)).unwrap();

    let result = report.result.unwrap();
    assert_eq!(result.to_string(), "Team Bravo won by 1 wicket.");
    assert_eq!(engine.phase(), MatchPhase::Complete);
    assert!(engine.is_history_saved());

    let records = store.load().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].team1_score, "6/1");
    assert_eq!(records[0].team2_score, "8/0");
    assert_eq!(records[0].result, "Team Bravo won by 1 wicket.");

    assert_eq!(engine.record_delivery(Delivery::dot()), Err(ScoringError::MatchComplete));
    assert_eq!(engine.switch_innings(), Err(ScoringError::MatchComplete));
    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn test_defending_side_wins_by_runs() {
    let store = InMemoryHistoryStore::new();
    let mut engine = first_innings_all_out(store.clone(), 6);
    start_chase(&mut engine);

    engine.record_delivery(Delivery::runs(2)).unwrap();
    let report = engine.record_delivery(Delivery::wicket()).unwrap();

    assert!(report.innings_ended);
    assert_eq!(
        report.result,
        Some(MatchResult::Won {
            winner: Side::Home,
            winner_name: "Team Alpha".into(),
            margin: WinMargin::Runs(4),
        })
    );
    assert_eq!(store.load().unwrap()[0].result, "Team Alpha won by 4 runs.");
}

#[test]
fn test_scores_level_is_a_tie() {
    let store = InMemoryHistoryStore::new();
    let mut engine = first_innings_all_out(store.clone(), 6);
    start_chase(&mut engine);

    engine.record_delivery(Delivery::runs(6)).unwrap();
    let report = engine.record_delivery(Delivery::wicket()).unwrap();

    assert_eq!(report.result, Some(MatchResult::Tied));
    assert_eq!(engine.result().unwrap().to_string(), "Match Tied!");
    assert!(!engine.can_undo());
}

#[test]
fn test_target_passed_off_last_ball() {
    let mut engine = MatchEngine::new(MatchConfig::single_wicket(1));
    engine.select_or_create_bowler("Cummins").unwrap();
    engine.add_batter("Head").unwrap();
    engine.add_batter("Marsh").unwrap();
    engine.record_delivery(Delivery::runs(5)).unwrap();
    let report = {
        record_all(&mut engine, &[Delivery::dot(); 4]);
        engine.record_delivery(Delivery::dot()).unwrap()
    };
    assert!(report.innings_ended);
    assert_eq!(engine.batting_team().score_line(), "5/0");

    start_chase(&mut engine);
    record_all(&mut engine, &[Delivery::dot(); 5]);
    let report = engine.record_delivery(Delivery::runs(6)).unwrap();

    assert!(report.innings_ended);
    assert_eq!(report.result.unwrap().to_string(), "Team Bravo won by 1 wicket.");
}

#[test]
fn test_switch_innings_only_in_break() {
    let (mut engine, ..) = ready_engine();
    let err = engine.switch_innings().unwrap_err();
    assert_eq!(err, ScoringError::InningsInProgress { team: "Team Alpha".into() });
    assert_eq!(engine.take_notifications().last().unwrap().severity, Severity::Warning);
}

#[test]
fn test_innings_break_resets_crease_and_notes_partial_over() {
    let mut engine = first_innings_all_out(InMemoryHistoryStore::new(), 3);
    assert!(engine.current_bowler_id().is_some());

    engine.switch_innings().unwrap();

    assert_eq!(engine.current_bowler_id(), None);
    assert_eq!(engine.on_strike_id(), None);
    assert_eq!(engine.off_strike_id(), None);
    assert_eq!(engine.last_over_bowler_id(), None);
    assert_eq!(engine.batting_team().score_line(), "0/0");
    // Cummins bowled for the away side; the roster survives the break
    assert_eq!(engine.team(Side::Away).bowlers.len(), 1);

    let texts: Vec<&str> = engine.commentary().entries().iter().map(|e| e.text.as_str()).collect();
    assert!(texts.iter().any(|t| t.contains("partial over (2 balls)")));
    assert_eq!(
        texts.last().copied(),
        Some("--- Innings Break: Team Alpha scored 3/1. Team Bravo to bat. Target: 4 ---")
    );
}

#[test]
fn test_reset_keeps_config_and_names() {
    let mut engine = MatchEngine::new(MatchConfig::odi())
        .with_team_names("Perth Scorchers", "Sydney Sixers")
        .unwrap();
    engine.select_or_create_bowler("Lyon").unwrap();
    engine.add_batter("Inglis").unwrap();
    engine.record_delivery(Delivery::runs(4)).unwrap();

    engine.reset_match();

    assert_eq!(engine.config(), &MatchConfig::odi());
    assert_eq!(engine.batting_team().name, "Perth Scorchers");
    assert_eq!(engine.team(Side::Away).score_line(), "DNB");
    assert_eq!(engine.batting_team().score_line(), "0/0");
    assert!(engine.batting_team().batters.is_empty());
    assert!(engine.commentary().is_empty());
    assert_eq!(engine.current_bowler_id(), None);
    assert!(!engine.can_undo());
    assert!(!engine.is_history_saved());
}

#[test]
fn test_empty_team_name_rejected() {
    assert!(MatchEngine::default().with_team_names(" ", "Bravo").is_err());
}

#[test]
fn test_config_locked_once_play_starts() {
    let store = InMemoryHistoryStore::new();
    let mut engine = MatchEngine::with_history(MatchConfig::t20(), Box::new(store.clone()));

    let bad = MatchConfig { max_overs: 0, ..MatchConfig::t20() };
    assert!(matches!(engine.set_config(bad), Err(ScoringError::InvalidConfig(_))));

    engine.set_config(MatchConfig::odi()).unwrap();
    assert_eq!(store.load_settings().unwrap(), Some(MatchConfig::odi()));

    engine.select_or_create_bowler("Starc").unwrap();
    engine.add_batter("Head").unwrap();
    engine.record_delivery(Delivery::dot()).unwrap();
    assert_eq!(engine.set_config(MatchConfig::t20()), Err(ScoringError::ConfigLocked));
    assert_eq!(engine.config(), &MatchConfig::odi());
}

#[test]
fn test_from_store_uses_saved_settings() {
    let store = InMemoryHistoryStore::new();
    store.save_settings(&MatchConfig::single_wicket(3)).unwrap();

    let engine = MatchEngine::from_store(Box::new(store), MatchConfig::t20()).unwrap();
    assert_eq!(engine.config().max_overs, 3);

    let empty = InMemoryHistoryStore::new();
    let engine = MatchEngine::from_store(Box::new(empty), MatchConfig::odi()).unwrap();
    assert_eq!(engine.config(), &MatchConfig::odi());
}

#[test]
fn test_chase_statistics() {
    let mut engine = first_innings_all_out(InMemoryHistoryStore::new(), 6);
    start_chase(&mut engine);
    engine.record_delivery(Delivery::runs(2)).unwrap();
    engine.record_delivery(Delivery::dot()).unwrap();

    let stats = engine.innings_stats();
    assert_eq!(stats.target, Some(7));
    assert_eq!(stats.runs_needed, Some(5));
    assert_eq!(stats.balls_remaining, 10);
    assert_eq!(stats.run_rate, 6.0);
    assert_eq!(stats.required_rate, Some(3.0));
}

#[test]
fn test_commentary_text_is_chronological() {
    let (mut engine, ..) = ready_engine();
    engine.record_delivery(Delivery::runs(4)).unwrap();
    let text = engine.commentary_text();
    let last = text.lines().last().unwrap();
    assert!(last.ends_with("FOUR! 4 runs scored by Head! Off Starc. Score: 4/0"));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn legal_no_wicket() -> impl Strategy<Value = Delivery> {
        prop_oneof![
            Just(Delivery::dot()),
            (0u32..=6).prop_map(Delivery::runs),
            (1u32..=4).prop_map(Delivery::byes),
        ]
    }

    fn illegal() -> impl Strategy<Value = Delivery> {
        prop_oneof![Just(Delivery::wide()), (0u32..=6).prop_map(Delivery::no_ball)]
    }

    fn bat_runs(deliveries: &[Delivery]) -> u32 {
        deliveries
            .iter()
            .filter(|d| d.outcome == Outcome::Runs && !d.is_extra)
            .map(|d| d.runs)
            .sum()
    }

    proptest! {
        /// Six legal balls complete the over and take the ball off the bowler
        #[test]
        fn prop_over_rollover(balls in prop::collection::vec(legal_no_wicket(), 6)) {
            let (mut engine, bowler, ..) = ready_engine();
            record_all(&mut engine, &balls);

            prop_assert_eq!(engine.batting_team().overs, 1);
            prop_assert_eq!(engine.batting_team().balls, 0);
            prop_assert_eq!(engine.current_bowler_id(), None);
            prop_assert_eq!(engine.fielding_team().bowler(bowler).unwrap().balls_bowled, 6);
        }

        /// A maiden is credited exactly when no run came off the bat
        #[test]
        fn prop_maiden_iff_no_bat_runs(balls in prop::collection::vec(legal_no_wicket(), 6)) {
            let (mut engine, bowler, ..) = ready_engine();
            record_all(&mut engine, &balls);

            let maidens = engine.fielding_team().bowler(bowler).unwrap().maidens;
            prop_assert_eq!(maidens == 1, bat_runs(&balls) == 0);
        }

        /// Odd runs off the bat change ends before the last ball of the over
        #[test]
        fn prop_odd_runs_rotate(dots in 0usize..5, runs in 0u32..=6) {
            let (mut engine, _, head, marsh) = ready_engine();
            for _ in 0..dots {
                engine.record_delivery(Delivery::dot()).unwrap();
            }
            let report = engine.record_delivery(Delivery::runs(runs)).unwrap();

            let expected = if runs % 2 == 1 { marsh } else { head };
            prop_assert_eq!(engine.on_strike_id(), Some(expected));
            prop_assert_eq!(report.strike_rotated, runs % 2 == 1);
        }

        /// Wides and no-balls add runs and extras but never a ball
        #[test]
        fn prop_illegal_delivery_adds_no_ball(
            prefix in prop::collection::vec(legal_no_wicket(), 0..5),
            extra in illegal()
        ) {
            let (mut engine, ..) = ready_engine();
            record_all(&mut engine, &prefix);
            let striker = engine.on_strike_id().unwrap();
            let before = engine.batting_team().clone();
            let faced = before.batter(striker).unwrap().balls_faced;

            engine.record_delivery(extra).unwrap();

            let after = engine.batting_team();
            prop_assert_eq!(after.legal_balls(), before.legal_balls());
            prop_assert_eq!(after.batter(striker).unwrap().balls_faced, faced);
            prop_assert_eq!(after.runs, before.runs + extra.runs);
            prop_assert_eq!(after.extras, before.extras + extra.runs);
            prop_assert_eq!(engine.on_strike_id(), Some(striker));
        }

        /// Undo puts back exactly what the last delivery changed
        #[test]
        fn prop_undo_round_trip(
            prefix in prop::collection::vec(legal_no_wicket(), 0..5),
            last in prop_oneof![legal_no_wicket(), illegal(), Just(Delivery::wicket())]
        ) {
            let (mut engine, ..) = ready_engine();
            record_all(&mut engine, &prefix);

            let team = engine.batting_team().clone();
            let bowlers = engine.fielding_team().bowlers.clone();
            let ids = (engine.current_bowler_id(), engine.on_strike_id(), engine.off_strike_id());
            let spell = engine.spell();
            let entries = engine.commentary().len();

            engine.record_delivery(last).unwrap();
            engine.undo().unwrap();

            prop_assert_eq!(engine.batting_team(), &team);
            prop_assert_eq!(&engine.fielding_team().bowlers, &bowlers);
            prop_assert_eq!(
                (engine.current_bowler_id(), engine.on_strike_id(), engine.off_strike_id()),
                ids
            );
            prop_assert_eq!(engine.spell(), spell);
            // The undone line is replaced by the undo notice
            prop_assert_eq!(engine.commentary().len(), entries + 1);
        }
    }
}
