use super::*;
use crate::model::error::ValidationError;
use crate::model::Party;
use crate::testing::reference_config;

fn session(sims_per_tick: usize, max_sims: usize, history_interval: u64) -> SimulationSession {
    SimulationSession::new(
        reference_config(42, true),
        SessionOptions {
            sims_per_tick,
            max_sims,
            history_interval,
        },
    )
    .unwrap()
}

#[test]
fn invalid_options() {
    let options = SessionOptions {
        sims_per_tick: 0,
        ..SessionOptions::default()
    };
    let err = SimulationSession::new(reference_config(42, false), options).unwrap_err();
    assert_eq!(
        "invalid session options: sims per tick must be positive",
        err.to_string()
    );

    let options = SessionOptions {
        history_interval: 0,
        ..SessionOptions::default()
    };
    assert!(SimulationSession::new(reference_config(42, false), options).is_err());
}

#[test]
fn invalid_config() {
    let mut config = reference_config(42, false);
    config.round_weights.party_a[0] = -1.0;
    let err = SimulationSession::new(config, SessionOptions::default()).unwrap_err();
    assert_eq!(
        SessionError::Model(ModelError::Validation(ValidationError::NegativeWeight {
            party: Party::A
        })),
        err
    );
}

#[test]
fn tick_advances_counters() {
    let mut session = session(100, 1_000, 10);
    assert_eq!(100, session.tick());
    assert_eq!(100, session.tick());
    assert_eq!(2, session.ticks());
    assert_eq!(200, session.next_id());
    assert_eq!(200, session.aggregator().len());
    let ids: Vec<_> = session.aggregator().records().iter().map(|record| record.sim_id).collect();
    assert_eq!((0..200).collect::<Vec<_>>(), ids);
}

#[test]
fn run_stops_at_cap() {
    let mut session = session(300, 1_000, 2);
    assert_eq!(4, session.run_to_completion());
    assert!(session.is_complete());
    assert_eq!(1_000, session.aggregator().len());
    assert_eq!(0, session.tick());
    assert_eq!(4, session.ticks());

    // history on every second tick
    let ticks: Vec<_> = session.aggregator().history().iter().map(|snapshot| snapshot.tick).collect();
    assert_eq!(vec![2, 4], ticks);
    assert_eq!(600, session.aggregator().history()[0].total_sims);
    assert_eq!(1_000, session.aggregator().history()[1].total_sims);
}

#[test]
fn session_matches_direct_engine_use() {
    let mut session = session(250, 1_000, 10);
    session.run_to_completion();

    let mut engine = SamplingEngine::new(reference_config(42, true)).unwrap();
    let mut records = vec![];
    for tick in 0..4 {
        records.extend(engine.simulate_batch(250, tick * 250));
    }
    assert_eq!(records, session.aggregator().records());
}

#[test]
fn reveal_never_exceeds_total() {
    let mut session = session(100, 250, 10);
    assert_eq!(0, session.reveal(Reveal::Count(10)));
    session.run_to_completion();
    assert_eq!(10, session.reveal(Reveal::Count(10)));
    assert_eq!(110, session.reveal(Reveal::Count(100)));
    assert_eq!(250, session.reveal(Reveal::Count(1_000)));
    assert_eq!(250, session.reveal(Reveal::Count(usize::MAX)));
    assert_eq!(250, session.reveal(Reveal::All));
}

#[test]
fn revealed_view_replays_prefix() {
    let mut session = session(100, 1_000, 5);
    session.run_to_completion();
    session.reveal(Reveal::Count(100));

    let view = session.revealed_view();
    assert_eq!(100, view.len());
    assert_eq!(&session.aggregator().records()[..100], view.records());
    let expected = ResultAggregator::replay(8, &session.aggregator().records()[..100]);
    assert_eq!(expected.summary(), view.summary());
    assert_eq!(session.aggregator().history(), view.history());

    // the full aggregator is untouched
    assert_eq!(1_000, session.aggregator().len());
}

#[test]
fn reset_clears_counters() {
    let mut session = session(100, 500, 1);
    session.run_to_completion();
    session.reveal(Reveal::All);
    session.reset();
    assert_eq!(0, session.ticks());
    assert_eq!(0, session.next_id());
    assert_eq!(0, session.revealed());
    assert!(session.aggregator().is_empty());
    assert!(session.aggregator().history().is_empty());
    assert!(!session.is_complete());
}

#[test]
fn reseed_restarts_sequence() {
    let mut first = session(100, 100, 10);
    first.run_to_completion();
    first.reset();
    first.reseed(42);
    first.run_to_completion();

    let mut second = session(100, 100, 10);
    second.run_to_completion();
    assert_eq!(first.aggregator().records(), second.aggregator().records());
}

#[test]
fn parse_reveal() {
    assert_eq!(Reveal::All, "all".parse::<Reveal>().unwrap());
    assert_eq!(Reveal::All, "ALL".parse::<Reveal>().unwrap());
    assert_eq!(Reveal::Count(100), "100".parse::<Reveal>().unwrap());
    assert!("lots".parse::<Reveal>().is_err());
}
