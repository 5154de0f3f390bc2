//! Concurrent attribution behavior.
//!
//! The per-document claim check-then-set is two store calls, so the
//! ledger documents (rather than hides) the race between concurrent
//! claimants. These tests pin the observable contract: the final state is
//! coherent - exactly one owner, drawn from the claimant set - and
//! repeated claiming is idempotent.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rust_decimal::Decimal;

use karat_core::Email;
use karat_integration_tests::init_tracing;
use karat_ledger::{MemoryStore, NewOrder, OrderLedger};

fn email(s: &str) -> Email {
    Email::parse(s).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_interleaved_claimants_leave_exactly_one_owner() {
    init_tracing();

    for round in 0..25 {
        let store = Arc::new(MemoryStore::new());
        let order_id = format!("RACE-{round}");

        OrderLedger::new(&*store)
            .create(NewOrder {
                order_id: Some(order_id.clone()),
                reward_grams: Some(Decimal::ONE),
                ..NewOrder::default()
            })
            .await
            .unwrap();

        let barrier = Arc::new(tokio::sync::Barrier::new(2));
        let mut handles = Vec::new();
        for claimant in ["left@x.com", "right@x.com"] {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            let order_id = order_id.clone();
            handles.push(tokio::spawn(async move {
                barrier.wait().await;
                OrderLedger::new(&*store)
                    .claim(&order_id, &email(claimant))
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // whichever write landed last, the record ends with one coherent owner
        let order = OrderLedger::new(&*store)
            .claim(&order_id, &email("late@x.com"))
            .await
            .unwrap()
            .unwrap();
        let owner = order.user_email.unwrap().into_inner();
        assert!(
            owner == "left@x.com" || owner == "right@x.com",
            "unexpected owner {owner}"
        );
    }
}

#[tokio::test]
async fn test_repeated_claims_are_idempotent() {
    init_tracing();
    let store = MemoryStore::new();
    let ledger = OrderLedger::new(&store);

    ledger
        .create(NewOrder {
            order_id: Some("STABLE-1".to_owned()),
            reward_grams: Some(Decimal::from(5)),
            ..NewOrder::default()
        })
        .await
        .unwrap();

    let first = ledger.claim("STABLE-1", &email("a@b.com")).await.unwrap().unwrap();
    for _ in 0..5 {
        let again = ledger.claim("STABLE-1", &email("a@b.com")).await.unwrap().unwrap();
        assert_eq!(again, first);
    }
}

#[tokio::test]
async fn test_partial_claim_resumes_safely() {
    init_tracing();
    let store = MemoryStore::new();
    let ledger = OrderLedger::new(&store);

    // two shipments under one correlation key, one already claimed:
    // re-running the claim only touches the unclaimed remainder
    ledger
        .create(NewOrder {
            order_id: Some("SPLIT-1".to_owned()),
            user_email: Some(email("a@b.com")),
            reward_grams: Some(Decimal::ONE),
            ..NewOrder::default()
        })
        .await
        .unwrap();
    ledger
        .create(NewOrder {
            order_id: Some("SPLIT-1".to_owned()),
            reward_grams: Some(Decimal::from(2)),
            ..NewOrder::default()
        })
        .await
        .unwrap();

    ledger.claim("SPLIT-1", &email("a@b.com")).await.unwrap().unwrap();

    let orders = ledger.list(Some(&email("a@b.com"))).await.unwrap();
    assert_eq!(orders.len(), 2);
}
