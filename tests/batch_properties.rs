//! Property-based tests for batch control invariants
//!
//! These tests verify properties that must hold for every entry list, not
//! just the fixture scenarios.

use ach_batch_engine::{
    Batch, BatchError, BatchHeader, BatchState, CountingSequence, EntryDetail, RoutingNumber,
    SecCode, TransactionCode,
};
use proptest::prelude::*;

const ENTRY_HASH_MODULUS: u64 = 10_000_000_000;

fn header(sec_code: SecCode) -> BatchHeader {
    BatchHeader::new(sec_code, "Acme Corp", "1234567890", 12104288)
}

fn entry(routing: u32, amount: u64, credit: bool, addenda: usize) -> EntryDetail {
    let code = if credit {
        TransactionCode::CheckingCredit
    } else {
        TransactionCode::CheckingDebit
    };
    let mut entry = EntryDetail::new(code, RoutingNumber::new(routing).unwrap(), "123456789", amount);
    for n in 0..addenda {
        entry = entry.with_addenda05(&format!("Invoice {}", n));
    }
    entry
}

fn batch_of(sec_code: SecCode, entries: Vec<EntryDetail>) -> Batch {
    let mut batch = Batch::new(header(sec_code)).unwrap();
    for entry in entries {
        batch.add_entry(entry);
    }
    batch
}

fn entry_strategy(max_addenda: usize) -> impl Strategy<Value = (u32, u64, bool, usize)> {
    (
        0u32..=999_999_999,
        0u64..=10_000_000,
        any::<bool>(),
        0..=max_addenda,
    )
}

// ============================================================================
// Control Invariants
// ============================================================================

proptest! {
    /// Property: entry hash is the routing number sum modulo 10^10
    #[test]
    fn entry_hash_is_routing_sum(
        specs in prop::collection::vec(entry_strategy(0), 0..40),
    ) {
        let expected = specs
            .iter()
            .map(|(routing, ..)| u64::from(*routing))
            .sum::<u64>()
            % ENTRY_HASH_MODULUS;

        let mut batch = batch_of(
            SecCode::Ccd,
            specs.iter().map(|&(r, a, c, n)| entry(r, a, c, n)).collect(),
        );
        let control = batch.build().unwrap();

        prop_assert_eq!(control.entry_hash(), expected);
    }

    /// Property: totals split amounts by direction
    #[test]
    fn totals_split_by_direction(
        specs in prop::collection::vec(entry_strategy(0), 0..40),
    ) {
        let credits: u64 = specs.iter().filter(|s| s.2).map(|s| s.1).sum();
        let debits: u64 = specs.iter().filter(|s| !s.2).map(|s| s.1).sum();

        let mut batch = batch_of(
            SecCode::Ccd,
            specs.iter().map(|&(r, a, c, n)| entry(r, a, c, n)).collect(),
        );
        let control = batch.build().unwrap();

        prop_assert_eq!(control.total_credit(), credits);
        prop_assert_eq!(control.total_debit(), debits);
    }

    /// Property: entry/addenda count is entries plus their addenda records
    #[test]
    fn entry_addenda_count_matches_entries(
        specs in prop::collection::vec(entry_strategy(20), 0..20),
    ) {
        let expected = specs.len() + specs.iter().map(|s| s.3).sum::<usize>();

        let mut batch = batch_of(
            SecCode::Ctx,
            specs.iter().map(|&(r, a, c, n)| entry(r, a, c, n)).collect(),
        );
        let control = batch.build().unwrap();

        prop_assert_eq!(control.entry_addenda_count(), expected);
    }

    /// Property: building two copies of the same batch gives identical results
    #[test]
    fn build_is_deterministic(
        specs in prop::collection::vec(entry_strategy(3), 1..20),
        start in 1u32..1_000_000,
    ) {
        let original = batch_of(
            SecCode::Ctx,
            specs.iter().map(|&(r, a, c, n)| entry(r, a, c, n)).collect(),
        );
        let mut first = original.clone();
        let mut second = original;

        first.build_with(&mut CountingSequence::starting_at(start)).unwrap();
        second.build_with(&mut CountingSequence::starting_at(start)).unwrap();

        prop_assert_eq!(first.control(), second.control());
        prop_assert_eq!(first.entries(), second.entries());
    }

    /// Property: validate is read-only and repeatable
    #[test]
    fn validate_is_idempotent(
        specs in prop::collection::vec(entry_strategy(3), 0..20),
    ) {
        let mut batch = batch_of(
            SecCode::Ctx,
            specs.iter().map(|&(r, a, c, n)| entry(r, a, c, n)).collect(),
        );
        batch.build().unwrap();
        let control = batch.control().clone();

        let first = batch.validate();
        let second = batch.validate();

        prop_assert_eq!(first, second);
        prop_assert_eq!(batch.control(), &control);
        prop_assert_eq!(batch.state(), BatchState::Validated);
    }

    /// Property: rebuilding after a mutation restores the count invariant
    #[test]
    fn rebuild_restores_addenda_count(
        specs in prop::collection::vec(entry_strategy(3), 1..20),
        extra in 1usize..10,
    ) {
        let mut batch = batch_of(
            SecCode::Ctx,
            specs.iter().map(|&(r, a, c, n)| entry(r, a, c, n)).collect(),
        );
        let before = batch.build().unwrap().entry_addenda_count();

        let target = batch.entry_mut(0).unwrap();
        for n in 0..extra {
            target.addenda05.push(ach_batch_engine::types::Addenda05::new(&format!("Extra {}", n)));
        }
        prop_assert_eq!(batch.state(), BatchState::Assembled);
        prop_assert!(batch.built_control().is_err());

        let after = batch.build().unwrap().entry_addenda_count();
        prop_assert_eq!(after, before + extra);
        prop_assert_eq!(batch.entries()[0].recorded_addenda_count, Some(specs[0].3 + extra));
    }
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn entry_hash_of_empty_batch_is_zero() {
    let mut batch = batch_of(SecCode::Ccd, Vec::new());
    assert_eq!(batch.build().unwrap().entry_hash(), 0);
}

#[test]
fn entry_hash_of_single_entry_is_its_routing_number() {
    let mut batch = batch_of(SecCode::Ccd, vec![entry(231380104, 100, true, 0)]);
    assert_eq!(batch.build().unwrap().entry_hash(), 231380104);
}

#[test]
fn entry_hash_wraps_past_ten_digits() {
    let entries = (0..11).map(|_| entry(999_999_999, 100, false, 0)).collect();
    let mut batch = batch_of(SecCode::Ccd, entries);

    assert_eq!(batch.build().unwrap().entry_hash(), 999_999_989);
}

#[test]
fn ctx_accepts_9999_addenda05_records() {
    let mut batch = batch_of(SecCode::Ctx, vec![entry(121042882, 100, true, 9999)]);

    let control = batch.build().unwrap();
    assert_eq!(control.entry_addenda_count(), 10_000);
    assert_eq!(batch.entries()[0].recorded_addenda_count, Some(9999));
}

#[test]
fn ctx_rejects_10000_addenda05_records() {
    let mut batch = batch_of(SecCode::Ctx, vec![entry(121042882, 100, true, 10_000)]);

    match batch.build() {
        Err(BatchError::AddendaCountExceeded {
            index,
            count,
            limit,
            ..
        }) => {
            assert_eq!(index, 0);
            assert_eq!(count, 10_000);
            assert_eq!(limit, 9999);
        }
        other => panic!("expected AddendaCountExceeded, got {:?}", other),
    }
    assert_eq!(batch.state(), BatchState::Failed);
}
