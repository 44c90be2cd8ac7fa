//! Sprint voting racing chain import.
//!
//! A voting round holds the milestone guard for its whole duration, so an
//! import never observes a half-decided vote.

#[cfg(test)]
mod tests {
    use super::super::{hash_at, head, make_chain, TestNode};
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_import_waits_for_vote_outcome() {
        let canonical = make_chain(1, 200, 1);
        let fork = make_chain(1, 200, 2);
        let node = Arc::new(TestNode::fresh());

        let lock = node.whitelist.milestone().lock_mutex(128).unwrap();

        let (tx, rx) = mpsc::channel();
        let importer = {
            let node = node.clone();
            let fork = fork.clone();
            thread::spawn(move || {
                let valid = node.whitelist.is_valid_chain(&head(200), &fork);
                tx.send(valid).unwrap();
            })
        };

        // Blocked behind the round.
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        node.whitelist
            .milestone()
            .unlock_mutex(lock, true, "proposal-128", hash_at(&canonical, 128));

        // The import sees the committed lock and rejects the fork.
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(false));
        importer.join().unwrap();

        assert!(node.whitelist.is_valid_chain(&head(200), &canonical));
    }

    #[test]
    fn test_rejected_round_does_not_stall_import() {
        let canonical = make_chain(1, 200, 1);
        let node = TestNode::fresh();
        node.whitelist.process_milestone(160, hash_at(&canonical, 160));

        assert!(node.whitelist.milestone().lock_mutex(128).is_none());
        assert!(node.whitelist.is_valid_chain(&head(200), &canonical));
    }

    #[test]
    fn test_concurrent_rounds_settle_on_highest_sprint() {
        let canonical = make_chain(1, 600, 1);
        let node = Arc::new(TestNode::fresh());
        let ends: Vec<u64> = (1..=8).map(|i| i * 64).collect();

        let voters: Vec<_> = ends
            .iter()
            .map(|&end| {
                let node = node.clone();
                let hash = hash_at(&canonical, end);
                thread::spawn(move || {
                    let milestone = node.whitelist.milestone();
                    if let Some(lock) = milestone.lock_mutex(end) {
                        milestone.unlock_mutex(lock, true, &format!("proposal-{}", end), hash);
                    }
                })
            })
            .collect();

        let importers: Vec<_> = (0..4)
            .map(|_| {
                let node = node.clone();
                let canonical = canonical.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        assert!(node.whitelist.is_valid_chain(&head(600), &canonical));
                    }
                })
            })
            .collect();

        for handle in voters.into_iter().chain(importers) {
            handle.join().unwrap();
        }

        let lock = node.whitelist.milestone().sprint_lock();
        assert!(lock.locked);
        assert_eq!(lock.locked_sprint_number, 512);
        assert_eq!(lock.locked_sprint_hash, hash_at(&canonical, 512));
        assert_eq!(
            node.whitelist.milestone().get_milestone_ids(),
            vec!["proposal-512".to_string()]
        );
    }

    #[test]
    fn test_finality_during_round_applies_after_commit() {
        let canonical = make_chain(1, 200, 1);
        let node = Arc::new(TestNode::fresh());

        let lock = node.whitelist.milestone().lock_mutex(128).unwrap();

        let finalizer = {
            let node = node.clone();
            let hash = hash_at(&canonical, 128);
            thread::spawn(move || node.whitelist.process_milestone(128, hash))
        };

        thread::sleep(Duration::from_millis(50));
        assert!(!finalizer.is_finished());

        node.whitelist
            .milestone()
            .unlock_mutex(lock, true, "proposal-128", hash_at(&canonical, 128));
        finalizer.join().unwrap();

        // Finality reached the sprint, so the lock is gone.
        let lock = node.whitelist.milestone().sprint_lock();
        assert!(!lock.locked);
        assert_eq!(node.whitelist.finalized_block_number(), Some(128));
        assert_eq!(node.metrics.latest("milestone"), Some(128));
    }
}
