use pretty_assertions::assert_eq;
use voting_engine::election::{ElectionError, ElectionEvent, SessionPhase, VotingStatus};

use crate::common::{contender, non_owner, owner, test_election, two_contenders, voter, GENESIS};

#[test]
fn test_initial_state() {
    let (election, _) = test_election();
    assert_eq!(election.owner(), owner());
    assert_eq!(election.phase(), SessionPhase::Idle);
    assert!(!election.voting_active());
    assert_eq!(election.contender_count(), 0);
    assert_eq!(election.get_voting_status(), VotingStatus { active: false, start: 0, end: 0 });
}

#[test]
fn test_owner_starts_voting() {
    let (mut election, _) = two_contenders();
    election.take_events();

    let status = election.start_voting(owner(), 3600).unwrap();
    assert_eq!(status, VotingStatus { active: true, start: GENESIS, end: GENESIS + 3600 });
    assert_eq!(election.get_voting_status(), status);
    assert_eq!(election.time_remaining(), 3600);
    assert_eq!(
        election.take_events(),
        vec![ElectionEvent::VotingStarted { start: GENESIS, end: GENESIS + 3600 }]
    );
}

#[test]
fn test_start_voting_guards() {
    let (mut election, _) = test_election();
    election.register_one(owner(), contender(1), "ALICE").unwrap();

    assert_eq!(
        election.start_voting(owner(), 3600),
        Err(ElectionError::InsufficientContenders { required: 2, registered: 1 })
    );

    election.register_one(owner(), contender(2), "BOB").unwrap();
    assert_eq!(election.start_voting(non_owner(), 3600).unwrap_err().kind(), "Unauthorized");
    assert_eq!(election.start_voting(owner(), 0), Err(ElectionError::InvalidDuration(0)));
    assert_eq!(election.phase(), SessionPhase::Idle);

    election.start_voting(owner(), 3600).unwrap();
    assert_eq!(election.start_voting(owner(), 3600), Err(ElectionError::SessionActive));
}

#[test]
fn test_ended_session_cannot_restart() {
    let (mut election, _) = two_contenders();
    election.start_voting(owner(), 3600).unwrap();
    election.end_voting(owner()).unwrap();

    assert_eq!(
        election.start_voting(owner(), 3600),
        Err(ElectionError::SessionNotIdle { phase: SessionPhase::Ended })
    );
}

#[test]
fn test_owner_ends_voting_early() {
    let (mut election, clock) = two_contenders();
    election.start_voting(owner(), 3600).unwrap();
    election.take_events();

    clock.advance(10);
    assert_eq!(election.end_voting(owner()), Ok(GENESIS + 10));
    assert!(!election.voting_active());
    assert_eq!(election.time_remaining(), 0);
    assert_eq!(
        election.take_events(),
        vec![ElectionEvent::VotingEnded { ended_at: GENESIS + 10 }]
    );
}

#[test]
fn test_non_owner_cannot_end_before_deadline() {
    let (mut election, clock) = two_contenders();
    election.start_voting(owner(), 3600).unwrap();

    clock.advance(3599);
    let err = election.end_voting(non_owner()).unwrap_err();
    assert_eq!(err.kind(), "Unauthorized");
    assert!(err.to_string().starts_with("Only owner can end voting before deadline"));
    assert!(election.voting_active());
}

#[test]
fn test_anyone_ends_after_deadline() {
    let (mut election, clock) = two_contenders();
    election.start_voting(owner(), 3600).unwrap();

    clock.advance(3601);
    assert!(election.end_voting(non_owner()).is_ok());
    assert_eq!(election.phase(), SessionPhase::Ended);
}

#[test]
fn test_end_voting_requires_active_session() {
    let (mut election, _) = two_contenders();
    assert_eq!(
        election.end_voting(owner()),
        Err(ElectionError::SessionNotActive { phase: SessionPhase::Idle })
    );
}

#[test]
fn test_vote_at_deadline_closes_session() {
    let (mut election, clock) = two_contenders();
    election.start_voting(owner(), 60).unwrap();
    election.take_events();

    clock.set(GENESIS + 60);
    assert_eq!(
        election.vote(voter(1), "ALICE"),
        Err(ElectionError::VotingEnded { ended_at: GENESIS + 60 })
    );
    assert_eq!(election.phase(), SessionPhase::Ended);
    assert_eq!(
        election.take_events(),
        vec![ElectionEvent::VotingEnded { ended_at: GENESIS + 60 }]
    );
    assert_eq!(election.get_total_votes(), 0);
}

#[test]
fn test_vote_one_second_before_deadline_counts() {
    let (mut election, clock) = two_contenders();
    election.start_voting(owner(), 60).unwrap();

    clock.set(GENESIS + 59);
    assert_eq!(election.vote(voter(1), "ALICE"), Ok(1));
    assert!(election.voting_active());
    assert!(election.has_voted(&voter(1)));
}
