//! # Observer Tests
//!
//! Verifies that `Simulator::replay_with` reports every record, in order,
//! together with the outcome the cache produced for it.

use crate::common::builder::TraceBuilder;
use crate::common::harness::simulator;
use crate::common::mocks::MockObserver;
use csim_core::cache::AccessOutcome::{Hit, MissEvict, MissFill};
use csim_core::sim::RecordOutcome;
use csim_core::trace::{AccessKind, AccessRecord};
use mockall::Sequence;
use mockall::predicate::always;

#[test]
fn observer_sees_each_record_in_order() {
    let trace = TraceBuilder::new().load(0x0).instr(0x400).modify(0x8).store(0x0);
    let mut observer = MockObserver::new();
    let mut seq = Sequence::new();

    let expected = [
        (AccessKind::Load, RecordOutcome::Single(MissFill)),
        (AccessKind::Instruction, RecordOutcome::Skipped),
        (
            AccessKind::Modify,
            RecordOutcome::Double(MissEvict { evicted_tag: 0x0 }, Hit),
        ),
        (
            AccessKind::Store,
            RecordOutcome::Single(MissEvict { evicted_tag: 0x8 }),
        ),
    ];
    for (kind, outcome) in expected {
        let _ = observer
            .expect_on_record()
            .withf(move |record: &AccessRecord, seen: &RecordOutcome| {
                record.kind == kind && *seen == outcome
            })
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
    }

    let mut sim = simulator(0, 1, 0);
    let stats = sim.replay_with(trace.records(), &mut observer);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.evictions, 2);
}

#[test]
fn observer_not_called_for_empty_trace() {
    let mut observer = MockObserver::new();
    let _ = observer
        .expect_on_record()
        .with(always(), always())
        .times(0)
        .return_const(());

    let mut sim = simulator(1, 1, 1);
    let stats = sim.replay_with(Vec::<AccessRecord>::new(), &mut observer);
    assert_eq!(stats.accesses(), 0);
}
