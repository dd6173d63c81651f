use proptest::prelude::*;
use std::collections::BTreeSet;

use ourchain_ledger::{
    delimited_vote_key, query, vote_key, LedgerError, NewVote, RecordStore, VoteKeyScheme,
};
use ourchain_nullables::NullLedger;
use ourchain_types::{decode, Vote};

proptest! {
    /// The default vote key is the plain concatenation, every time.
    #[test]
    fn vote_key_is_deterministic_concatenation(
        poll in "\\PC{0,16}",
        voter in "\\PC{0,16}",
    ) {
        let first = vote_key(&poll, &voter);
        prop_assert_eq!(&first, &vote_key(&poll, &voter));
        prop_assert_eq!(first, format!("{poll}{voter}"));
    }

    /// Delimited keys never collide for distinct component pairs.
    #[test]
    fn delimited_keys_are_injective(
        a in ("[a-z0-9]{0,6}", "[a-z0-9]{0,6}"),
        b in ("[a-z0-9]{0,6}", "[a-z0-9]{0,6}"),
    ) {
        let ka = delimited_vote_key(&a.0, &a.1).unwrap();
        let kb = delimited_vote_key(&b.0, &b.1).unwrap();
        prop_assert_eq!(ka == kb, a == b);
    }

    /// A created vote reads back intact and cannot be created twice.
    #[test]
    fn create_then_read_roundtrip(
        poll in "[a-z0-9]{1,12}",
        voter in "\\PC{1,12}",
        hash in "\\PC{1,32}",
    ) {
        let host = NullLedger::new();
        let store = RecordStore::default();
        let new = NewVote { poll_id: poll.clone(), voter_id: voter.clone(), vote_hash: hash.clone() };

        let key = store.create_vote(&host, &new).unwrap();
        let vote: Vote = decode(&store.read(&host, &key).unwrap()).unwrap();
        prop_assert_eq!(vote, Vote::new(poll, voter, hash));

        let again = store.create_vote(&host, &new);
        prop_assert!(matches!(again, Err(LedgerError::AlreadyExists(_))));
        prop_assert_eq!(host.put_count(), 1);
    }

    /// Poll queries return exactly that poll's votes, in key order, and
    /// always release the iterator.
    #[test]
    fn poll_query_returns_matching_votes_in_key_order(
        votes in prop::collection::vec(("[a-c]", "[a-z0-9]{1,4}"), 0..20),
        target in "[a-c]",
    ) {
        let host = NullLedger::new();
        let store = RecordStore::new(VoteKeyScheme::Delimited);
        let mut expected = BTreeSet::new();
        for (poll, voter) in &votes {
            let new = NewVote {
                poll_id: poll.clone(),
                voter_id: voter.clone(),
                vote_hash: "h".to_string(),
            };
            if let Ok(key) = store.create_vote(&host, &new) {
                if *poll == target {
                    expected.insert(key);
                }
            }
        }

        let payload = query::query_votes_by_poll(&host, &target).unwrap();
        let rows: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        let rows = rows.as_array().unwrap();
        let keys: Vec<String> = rows
            .iter()
            .map(|row| row["Key"].as_str().unwrap().to_string())
            .collect();
        prop_assert_eq!(keys, expected.into_iter().collect::<Vec<_>>());
        for row in rows {
            prop_assert_eq!(row["Record"]["pollID"].as_str(), Some(target.as_str()));
        }
        prop_assert_eq!(host.open_iterators(), 0);
    }
}
