//! Single-writer delta queue (spec §4.5, §9): a bounded channel plus one
//! worker task. A producer task pulls committed blocks from the
//! platform's event subscription and enqueues them; the worker drains the
//! queue strictly one block at a time, so two blocks are never applied
//! concurrently — "never apply two blocks concurrently" (spec §9).

use crate::enrich::PageIndex;
use crate::pipeline::apply_block;
use sc_platform::ports::EventPort;
use sc_platform::types::BlockCommitted;
use sc_read_store::PgPool;
use sc_types::retry_forever;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// How many committed blocks may sit in the delta queue awaiting
/// application before the producer blocks on `send` (spec §9: "bounded
/// channel + one worker task").
pub const QUEUE_CAPACITY: usize = 64;

/// Run the delta pipeline forever: subscribe for committed blocks, queue
/// them, and apply them one at a time. Never returns. A block-application
/// failure is logged; the block-upsert primitive's transaction keeps any
/// partial write from that block from being left half-applied (see
/// [`crate::pipeline::apply_block`]).
pub async fn run(events: Arc<dyn EventPort>, pool: PgPool, retry_wait: Duration, property_page_settle: Duration) -> ! {
    let (tx, mut rx) = mpsc::channel::<BlockCommitted>(QUEUE_CAPACITY);

    tokio::spawn(async move {
        loop {
            let block = retry_forever("receive next committed block", retry_wait, || events.next_block()).await;
            if tx.send(block).await.is_err() {
                return;
            }
        }
    });

    let mut page_index = PageIndex::new();
    loop {
        match rx.recv().await {
            Some(block) => {
                if let Err(e) = apply_block(&pool, &block, property_page_settle, &mut page_index).await {
                    tracing::error!(
                        block_num = block.block_num,
                        block_id = %block.block_id,
                        error = %e,
                        "block application failed"
                    );
                }
            }
            None => std::future::pending::<()>().await,
        }
    }
}
