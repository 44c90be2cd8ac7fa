//! Whitelist facade against remote peers.

#[cfg(test)]
mod tests {
    use super::super::{hash_at, make_chain, TestNode};
    use async_trait::async_trait;
    use qc_09_finality_guard::ports::PeerHeaderFetcher;
    use shared_types::{BlockHeader, Hash};
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    enum PeerError {
        Timeout,
    }

    /// Peer serving its local chain, optionally with latency.
    struct RemotePeer {
        chain: Vec<BlockHeader>,
        latency: Duration,
    }

    #[async_trait]
    impl PeerHeaderFetcher for RemotePeer {
        type Error = PeerError;

        async fn fetch_headers_by_number(
            &self,
            number: u64,
            amount: usize,
            _skip: usize,
            _reverse: bool,
        ) -> Result<(Vec<BlockHeader>, Vec<Hash>), PeerError> {
            tokio::time::sleep(self.latency).await;
            let headers: Vec<_> = self
                .chain
                .iter()
                .filter(|h| h.height >= number)
                .take(amount)
                .cloned()
                .collect();
            let hashes = headers.iter().map(|h| h.hash()).collect();
            Ok((headers, hashes))
        }
    }

    struct UnreachablePeer;

    #[async_trait]
    impl PeerHeaderFetcher for UnreachablePeer {
        type Error = PeerError;

        async fn fetch_headers_by_number(
            &self,
            _number: u64,
            _amount: usize,
            _skip: usize,
            _reverse: bool,
        ) -> Result<(Vec<BlockHeader>, Vec<Hash>), PeerError> {
            Err(PeerError::Timeout)
        }
    }

    fn peer(chain: Vec<BlockHeader>) -> RemotePeer {
        RemotePeer {
            chain,
            latency: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_fresh_node_accepts_any_peer() {
        let node = TestNode::fresh();

        assert_eq!(node.whitelist.is_valid_peer(&UnreachablePeer).await, Ok(true));
        assert_eq!(
            node.whitelist.is_valid_peer(&peer(make_chain(1, 10, 9))).await,
            Ok(true)
        );
    }

    #[tokio::test]
    async fn test_peer_must_agree_with_both_records() {
        let canonical = make_chain(1, 300, 1);
        let node = TestNode::fresh();
        node.whitelist.process_checkpoint(256, hash_at(&canonical, 256));
        node.whitelist.process_milestone(288, hash_at(&canonical, 288));

        assert_eq!(node.whitelist.is_valid_peer(&peer(canonical.clone())).await, Ok(true));

        // Shares the checkpoint, forks before the milestone.
        let mut late_fork = canonical[..270].to_vec();
        late_fork.extend_from_slice(&make_chain(271, 300, 2));
        assert_eq!(node.whitelist.is_valid_peer(&peer(late_fork)).await, Ok(false));

        // Still syncing below the checkpoint.
        let lagging = canonical[..200].to_vec();
        assert_eq!(node.whitelist.is_valid_peer(&peer(lagging)).await, Ok(false));

        assert_eq!(
            node.whitelist.is_valid_peer(&UnreachablePeer).await,
            Err(PeerError::Timeout)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_peer_check_does_not_hold_guard() {
        let canonical = make_chain(1, 300, 1);
        let node = TestNode::fresh();
        node.whitelist.process_milestone(288, hash_at(&canonical, 288));

        let slow = RemotePeer {
            chain: canonical.clone(),
            latency: Duration::from_secs(30),
        };

        let check = node.whitelist.is_valid_peer(&slow);
        let advance = async {
            // Finality moves while the peer is still answering.
            node.whitelist.process_checkpoint(256, hash_at(&canonical, 256));
            node.whitelist.process_milestone(296, hash_at(&canonical, 296));
        };

        let (valid, ()) = tokio::join!(check, advance);
        assert_eq!(valid, Ok(true));
        assert_eq!(node.whitelist.finalized_block_number(), Some(296));
    }
}
