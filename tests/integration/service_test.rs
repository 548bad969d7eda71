use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::time::timeout;
use voting_engine::{
    clock::ManualClock,
    config::ElectionConfig,
    election::{ElectionError, ElectionEvent, ElectionService, EventRecord, SessionPhase},
};

use crate::common::{contender, init_logging, non_owner, owner, voter, GENESIS};

fn test_service() -> (Arc<ElectionService>, ManualClock) {
    init_logging();
    let clock = ManualClock::new(GENESIS);
    let config = ElectionConfig {
        enable_metrics: false,
        ..Default::default()
    };
    let service = ElectionService::new(owner(), Arc::new(clock.clone()), config).unwrap();
    (Arc::new(service), clock)
}

fn open_session(service: &ElectionService, duration: u64) {
    service
        .register_batch(
            owner(),
            [contender(1), contender(2), contender(3)],
            ["ALICE", "BOB", "CHARLIE"],
        )
        .unwrap();
    service.start_voting(owner(), duration).unwrap();
}

#[tokio::test]
async fn test_subscribers_receive_events_in_commit_order() {
    let (service, _) = test_service();
    let mut events = service.subscribe();

    open_session(&service, 3600);
    service.vote(voter(1), "BOB").unwrap();
    service.end_voting(owner()).unwrap();
    service.declare_winner().unwrap();

    let mut names = Vec::new();
    let mut seqs = Vec::new();
    for _ in 0..7 {
        let record = timeout(Duration::from_secs(1), events.recv())
            .await
            .expect("event not delivered")
            .unwrap();
        assert_eq!(record.election_id, service.id());
        names.push(record.event.name());
        seqs.push(record.seq);
    }

    assert_eq!(
        names,
        vec![
            "ContenderRegistered",
            "ContenderRegistered",
            "ContenderRegistered",
            "VotingStarted",
            "VoteCast",
            "VotingEnded",
            "WinnerDeclared",
        ]
    );
    assert_eq!(seqs, (0..7).collect::<Vec<u64>>());
}

#[tokio::test]
async fn test_auto_end_published_despite_rejected_vote() {
    let (service, clock) = test_service();
    open_session(&service, 60);
    let mut events = service.subscribe();

    clock.advance(60);
    let err = service.vote(voter(1), "ALICE").unwrap_err();
    assert_eq!(err.kind(), "VotingEnded");
    assert_eq!(service.phase(), SessionPhase::Ended);

    let record = timeout(Duration::from_secs(1), events.recv()).await.unwrap().unwrap();
    assert_eq!(record.event, ElectionEvent::VotingEnded { ended_at: GENESIS + 60 });
}

#[test]
fn test_phase_rules_around_closed_session() {
    let (service, clock) = test_service();
    assert_eq!(
        service.end_voting(owner()),
        Err(ElectionError::SessionNotActive { phase: SessionPhase::Idle })
    );

    open_session(&service, 60);
    service.vote(voter(1), "CHARLIE").unwrap();
    clock.advance(60);
    assert!(matches!(service.vote(voter(2), "ALICE"), Err(ElectionError::VotingEnded { .. })));

    assert_eq!(
        service.register_batch(owner(), [contender(4), contender(5), contender(6)], ["D", "E", "F"]),
        Err(ElectionError::SessionNotIdle { phase: SessionPhase::Ended })
    );

    let first = service.declare_winner().unwrap();
    let second = service.declare_winner().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.address, contender(3));

    let declared = service
        .history()
        .into_iter()
        .filter(|record| record.event.name() == "WinnerDeclared")
        .count();
    assert_eq!(declared, 2);
}

#[test]
fn test_rejected_operations_publish_nothing() {
    let (service, _) = test_service();
    let mut events = service.subscribe();

    assert!(service.register_one(non_owner(), contender(1), "ALICE").is_err());
    assert!(service.start_voting(owner(), 3600).is_err());
    assert!(service.vote(voter(1), "ALICE").is_err());

    assert!(events.try_recv().is_err());
    assert!(service.history().is_empty());
}

#[test]
fn test_concurrent_voters_are_serialized() {
    let (service, _) = test_service();
    open_session(&service, 3600);

    let codes = ["ALICE", "BOB", "CHARLIE"];
    let handles: Vec<_> = (0..8u64)
        .map(|worker| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let mut cast = 0u64;
                for i in 0..25u64 {
                    let id = worker * 25 + i;
                    if service.vote(voter(id), codes[(id % 3) as usize]).is_ok() {
                        cast += 1;
                    }
                    // every worker also retries a ballot it already cast
                    assert!(service.vote(voter(worker * 25), "ALICE").is_err());
                }
                cast
            })
        })
        .collect();

    let cast: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(cast, 200);
    assert_eq!(service.get_total_votes(), 200);

    let tally: u64 = ["ALICE", "BOB", "CHARLIE"]
        .iter()
        .map(|code| service.get_contender(code).unwrap().vote_count)
        .sum();
    assert_eq!(tally, 200);

    let vote_events = service
        .history()
        .into_iter()
        .filter(|record| matches!(record.event, ElectionEvent::VoteCast { .. }))
        .count();
    assert_eq!(vote_events, 200);
}

#[test]
fn test_history_records_survive_encoding() {
    let (service, _) = test_service();
    open_session(&service, 3600);
    service.vote(voter(1), "CHARLIE").unwrap();

    for record in service.history() {
        let decoded = EventRecord::decode(&record.encode()).unwrap();
        assert_eq!(decoded, record);

        let json = serde_json::to_string(&record).unwrap();
        let parsed: EventRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
    assert_eq!(service.history_since(4).len(), 1);
}

#[test]
fn test_snapshot_for_polling_clients() {
    let (service, clock) = test_service();
    open_session(&service, 3600);
    service.vote(voter(1), "ALICE").unwrap();
    clock.advance(600);

    let snapshot = service.snapshot();
    assert_eq!(snapshot.owner, owner());
    assert_eq!(snapshot.phase, SessionPhase::Active);
    assert_eq!(snapshot.time_remaining, 3000);
    assert_eq!(snapshot.contenders.len(), 3);
    assert_eq!(snapshot.total_votes, 1);
    assert!(snapshot.winner.is_none());

    let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(json["status"]["active"], true);
    assert_eq!(json["contenders"][0]["code"], "ALICE");
    assert_eq!(json["contenders"][0]["vote_count"], 1);
}

#[test]
fn test_config_loaded_from_json() {
    let config = ElectionConfig::from_json(r#"{ "event_capacity": 8, "enable_metrics": false }"#).unwrap();
    assert_eq!(config.event_capacity, 8);
    assert_eq!(config.history_limit, ElectionConfig::default().history_limit);

    let service = ElectionService::new(owner(), Arc::new(ManualClock::new(0)), config.clone()).unwrap();
    assert_eq!(service.config(), &config);
    assert_eq!(service.owner(), owner());
}
