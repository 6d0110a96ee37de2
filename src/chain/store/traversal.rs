// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Lazy backward walk from a tipset to genesis.
//!
//! The walk is a [`Stream`](futures::Stream) pulled by a single consumer.
//! Every parent block is fetched through a [`BlockFetcher`] under a timeout.
//! A failed or timed-out fetch is yielded as the last item of the stream.
//! Dropping the stream drops whatever fetch is in flight.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use async_trait::async_trait;
use cid::Cid;
use futures::stream::{self, BoxStream, StreamExt as _};
use fvm_ipld_blockstore::Blockstore;
use tracing::{debug, warn};

use super::Error;
use crate::blocks::{self, Block, Tipset};

pub type TipsetStream = BoxStream<'static, Result<Arc<Tipset>, Error>>;

/// Source of parent blocks during a traversal: the local blockstore, or
/// anything that can fetch a block by CID.
#[async_trait]
pub trait BlockFetcher: Send + Sync {
    async fn fetch_block(&self, cid: Cid) -> anyhow::Result<Block>;
}

#[async_trait]
impl<F: BlockFetcher + ?Sized> BlockFetcher for Arc<F> {
    async fn fetch_block(&self, cid: Cid) -> anyhow::Result<Block> {
        self.as_ref().fetch_block(cid).await
    }
}

/// Fetches blocks from a local [`Blockstore`].
pub struct BlockstoreFetcher<DB> {
    db: Arc<DB>,
}

impl<DB> BlockstoreFetcher<DB> {
    pub fn new(db: Arc<DB>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<DB: Blockstore + Send + Sync> BlockFetcher for BlockstoreFetcher<DB> {
    async fn fetch_block(&self, cid: Cid) -> anyhow::Result<Block> {
        Block::load(self.db.as_ref(), &cid)?.context("not found in blockstore")
    }
}

enum State {
    Start(Arc<Tipset>),
    Next(Arc<Tipset>),
    Done,
}

/// Yields `start`, then each ancestor tipset down to genesis.
///
/// On a fetch failure or timeout, the error is yielded and the stream ends.
pub fn traverse<F>(start: Arc<Tipset>, fetcher: F, timeout: Duration) -> TipsetStream
where
    F: BlockFetcher + 'static,
{
    let fetcher = Arc::new(fetcher);
    stream::unfold(State::Start(start), move |state| {
        let fetcher = Arc::clone(&fetcher);
        async move {
            match state {
                State::Start(tipset) => Some((Ok(Arc::clone(&tipset)), State::Next(tipset))),
                State::Next(child) if child.is_genesis() => {
                    debug!("traversal reached genesis");
                    None
                }
                State::Next(child) => match fetch_parent(fetcher.as_ref(), &child, timeout).await {
                    Ok(parent) => {
                        let parent = Arc::new(parent);
                        Some((Ok(Arc::clone(&parent)), State::Next(parent)))
                    }
                    Err(e) => {
                        warn!("chain traversal stopped at height {}: {e}", child.height());
                        Some((Err(e), State::Done))
                    }
                },
                State::Done => None,
            }
        }
    })
    .boxed()
}

async fn fetch_parent(
    fetcher: &impl BlockFetcher,
    child: &Tipset,
    timeout: Duration,
) -> Result<Tipset, Error> {
    let mut parents = Vec::with_capacity(child.parents().len());
    for &cid in child.parents() {
        let block = match tokio::time::timeout(timeout, fetcher.fetch_block(cid)).await {
            Ok(Ok(block)) => block,
            Ok(Err(e)) => {
                return Err(Error::BlockFetch {
                    cid,
                    reason: format!("{e:#}"),
                });
            }
            Err(_) => return Err(Error::BlockFetchTimeout { cid, timeout }),
        };
        let actual = block.cid();
        if actual != cid {
            return Err(Error::BlockFetch {
                cid,
                reason: format!("received block {actual} instead"),
            });
        }
        parents.push(block);
    }
    let parent = Tipset::new(parents)?;
    if parent.height().checked_add(1) != Some(child.height()) {
        return Err(blocks::Error::InvalidTipset(format!(
            "parent height {} does not precede height {}",
            parent.height(),
            child.height()
        ))
        .into());
    }
    Ok(parent)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;
    use crate::blocks::{ChainEpoch, TipsetKey};
    use crate::db::MemoryDB;
    use crate::test_utils::{linear_chain_for_test, new_block_for_test};
    use futures::{StreamExt as _, TryStreamExt as _};
    use itertools::Itertools as _;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn persisted_chain(len: usize) -> (Arc<MemoryDB>, Vec<Tipset>) {
        let db = Arc::new(MemoryDB::default());
        let chain = linear_chain_for_test(len);
        for tipset in &chain {
            for block in tipset.blocks() {
                block.persist(db.as_ref()).unwrap();
            }
        }
        (db, chain)
    }

    #[tokio::test]
    async fn walks_back_to_genesis() {
        let (db, chain) = persisted_chain(4);
        let head = Arc::new(chain.last().unwrap().clone());
        let tipsets: Vec<_> = traverse(head, BlockstoreFetcher::new(db), TIMEOUT)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(
            tipsets.iter().map(|ts| ts.height()).collect_vec(),
            vec![4, 3, 2, 1, 0]
        );
        assert_eq!(tipsets.last().unwrap().as_ref(), &chain[0]);
    }

    #[tokio::test]
    async fn genesis_alone() {
        let (db, chain) = persisted_chain(0);
        let items = traverse(Arc::new(chain[0].clone()), BlockstoreFetcher::new(db), TIMEOUT)
            .collect::<Vec<_>>()
            .await;
        assert_eq!(items.len(), 1);
        assert!(items[0].is_ok());
    }

    #[tokio::test]
    async fn missing_parent_ends_with_one_error() {
        let (db, chain) = persisted_chain(1);
        let orphan_parent = Tipset::from(new_block_for_test(Some(&chain[1]), 99));
        let head = Tipset::from(new_block_for_test(Some(&orphan_parent), 1));

        let items = traverse(Arc::new(head), BlockstoreFetcher::new(db), TIMEOUT)
            .collect::<Vec<_>>()
            .await;
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        let err = items[1].as_ref().unwrap_err();
        assert!(err.to_string().contains("failed to get block"), "{err}");
        assert!(matches!(err, Error::BlockFetch { .. }));
    }

    struct NeverFetcher {
        started: AtomicUsize,
        dropped: Arc<AtomicBool>,
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl BlockFetcher for NeverFetcher {
        async fn fetch_block(&self, _cid: Cid) -> anyhow::Result<Block> {
            self.started.fetch_add(1, Ordering::SeqCst);
            let _flag = DropFlag(Arc::clone(&self.dropped));
            futures::future::pending().await
        }
    }

    fn never_fetcher() -> (Arc<NeverFetcher>, Arc<AtomicBool>) {
        let dropped = Arc::new(AtomicBool::new(false));
        let fetcher = Arc::new(NeverFetcher {
            started: AtomicUsize::new(0),
            dropped: Arc::clone(&dropped),
        });
        (fetcher, dropped)
    }

    #[tokio::test]
    async fn slow_fetch_times_out() {
        let chain = linear_chain_for_test(1);
        let (fetcher, dropped) = never_fetcher();
        let items = traverse(
            Arc::new(chain[1].clone()),
            fetcher,
            Duration::from_millis(20),
        )
        .collect::<Vec<_>>()
        .await;
        assert_eq!(items.len(), 2);
        let err = items[1].as_ref().unwrap_err();
        assert!(matches!(err, Error::BlockFetchTimeout { .. }));
        assert!(err.to_string().contains("failed to get block"));
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn dropping_the_stream_cancels_the_fetch() {
        let chain = linear_chain_for_test(1);
        let (fetcher, dropped) = never_fetcher();
        let mut stream = traverse(
            Arc::new(chain[1].clone()),
            Arc::clone(&fetcher),
            Duration::from_secs(3600),
        );

        assert!(stream.next().await.unwrap().is_ok());
        // the parent fetch is now pending inside the stream
        assert!(
            tokio::time::timeout(Duration::from_millis(20), stream.next())
                .await
                .is_err()
        );
        assert_eq!(fetcher.started.load(Ordering::SeqCst), 1);
        assert!(!dropped.load(Ordering::SeqCst));

        drop(stream);
        assert!(dropped.load(Ordering::SeqCst));
        assert_eq!(Arc::strong_count(&fetcher), 1);
    }

    struct WrongBlockFetcher;

    #[async_trait]
    impl BlockFetcher for WrongBlockFetcher {
        async fn fetch_block(&self, _cid: Cid) -> anyhow::Result<Block> {
            Ok(new_block_for_test(None, 12345))
        }
    }

    #[tokio::test]
    async fn substituted_block_is_rejected() {
        let chain = linear_chain_for_test(1);
        let items = traverse(Arc::new(chain[1].clone()), WrongBlockFetcher, TIMEOUT)
            .collect::<Vec<_>>()
            .await;
        assert_eq!(items.len(), 2);
        assert!(matches!(items[1], Err(Error::BlockFetch { .. })));
    }

    struct FixedFetcher(Block);

    #[async_trait]
    impl BlockFetcher for FixedFetcher {
        async fn fetch_block(&self, _cid: Cid) -> anyhow::Result<Block> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn parent_at_max_height_is_rejected() {
        let genesis = Tipset::from(new_block_for_test(None, 0));
        let mut parent = new_block_for_test(Some(&genesis), 1);
        parent.height = ChainEpoch::MAX;
        let mut child = new_block_for_test(Some(&genesis), 2);
        child.parents = TipsetKey::from(parent.cid());
        child.height = 1;

        let items = traverse(
            Arc::new(Tipset::from(child)),
            FixedFetcher(parent),
            TIMEOUT,
        )
        .collect::<Vec<_>>()
        .await;
        assert_eq!(items.len(), 2);
        assert!(matches!(items[1], Err(Error::Blocks(_))));
    }

    #[tokio::test]
    async fn parent_must_be_one_height_below() {
        let db = Arc::new(MemoryDB::default());
        let genesis = Tipset::from(new_block_for_test(None, 0));
        let mut skipped = new_block_for_test(Some(&genesis), 1);
        skipped.height = 5;
        for block in genesis.blocks() {
            block.persist(db.as_ref()).unwrap();
        }
        let items = traverse(
            Arc::new(Tipset::from(skipped)),
            BlockstoreFetcher::new(db),
            TIMEOUT,
        )
        .collect::<Vec<_>>()
        .await;
        assert_eq!(items.len(), 2);
        assert!(matches!(items[1], Err(Error::Blocks(_))));
    }
}
