use pretty_assertions::assert_eq;
use voting_engine::{
    election::{ElectionError, ElectionEvent},
    types::ContenderCode,
};

use crate::common::{active_election, contender, owner, two_contenders, voter};

#[test]
fn test_vote_is_recorded() {
    let (mut election, _) = active_election(3600);
    election.take_events();

    assert_eq!(election.vote(voter(1), "ALICE"), Ok(1));
    assert!(election.has_voted(&voter(1)));
    assert_eq!(election.get_contender("ALICE").unwrap().vote_count, 1);
    assert_eq!(
        election.take_events(),
        vec![ElectionEvent::VoteCast {
            voter: voter(1),
            contender: contender(1),
            code: ContenderCode::new("ALICE"),
            total_votes: 1,
        }]
    );
}

#[test]
fn test_vote_rejected_before_session_opens() {
    let (mut election, _) = two_contenders();
    assert_eq!(election.vote(voter(1), "ALICE"), Err(ElectionError::VotingNotActive));
    assert!(!election.has_voted(&voter(1)));
}

#[test]
fn test_second_vote_rejected_even_for_other_code() {
    let (mut election, _) = active_election(3600);
    election.vote(voter(1), "ALICE").unwrap();

    assert_eq!(election.vote(voter(1), "BOB"), Err(ElectionError::AlreadyVoted(voter(1))));
    assert_eq!(election.vote(voter(1), "ALICE"), Err(ElectionError::AlreadyVoted(voter(1))));
    assert_eq!(election.get_contender("ALICE").unwrap().vote_count, 1);
    assert_eq!(election.get_contender("BOB").unwrap().vote_count, 0);
    assert_eq!(election.get_total_votes(), 1);
}

#[test]
fn test_unknown_code_rejected_without_burning_ballot() {
    let (mut election, _) = active_election(3600);

    assert_eq!(
        election.vote(voter(1), "INVALID"),
        Err(ElectionError::InvalidCode("INVALID".into()))
    );
    assert!(!election.has_voted(&voter(1)));
    assert_eq!(election.vote(voter(1), "BOB"), Ok(1));
}

#[test]
fn test_tallies_tracked_per_contender() {
    let (mut election, _) = active_election(3600);
    election.vote(voter(1), "ALICE").unwrap();
    election.vote(voter(2), "ALICE").unwrap();
    election.vote(voter(3), "BOB").unwrap();

    assert_eq!(election.get_contender("ALICE").unwrap().vote_count, 2);
    assert_eq!(election.get_contender("BOB").unwrap().vote_count, 1);
    assert_eq!(election.get_contender("CHARLIE").unwrap().vote_count, 0);
    assert_eq!(election.get_total_votes(), 3);
    assert!(!election.has_voted(&voter(4)));
}

#[test]
fn test_owner_and_contenders_may_vote() {
    let (mut election, _) = active_election(3600);
    assert_eq!(election.vote(owner(), "BOB"), Ok(1));
    assert_eq!(election.vote(contender(1), "ALICE"), Ok(2));
}
