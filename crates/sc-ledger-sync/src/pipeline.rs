//! The per-block job (spec §4.5 steps 1-6), applied strictly one block at
//! a time by [`crate::worker::run`].

use crate::decode::{self, DecodedContainer};
use crate::enrich::{self, PageIndex};
use crate::error::PipelineError;
use sc_address::AddressKind;
use sc_platform::types::BlockCommitted;
use sc_read_store::{EntityTable, PgPool, ReadStoreError};
use sc_schema::PropertyContainer;
use sc_types::BlockDescriptor;
use std::time::Duration;

/// Run one read-store-blocking closure on the blocking thread pool, so the
/// async worker loop never blocks on diesel's synchronous connection API.
async fn blocking<F, T>(f: F) -> Result<T, PipelineError>
where
    F: FnOnce() -> Result<T, ReadStoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking read-store task panicked")
        .map_err(PipelineError::from)
}

fn address_key(address: &str) -> serde_json::Value {
    serde_json::Value::String(address.to_string())
}

/// Apply one committed block to the read store (spec §4.5). `page_index`
/// is owned by the caller and threaded across every block in the run, so
/// a PropertyPage seen many blocks after the Property that named its
/// current page still resolves (see [`crate::enrich`]).
pub async fn apply_block(
    pool: &PgPool,
    block: &BlockCommitted,
    property_page_settle: Duration,
    page_index: &mut PageIndex,
) -> Result<(), PipelineError> {
    let seen = {
        let pool = pool.clone();
        let block_num = block.block_num;
        let block_id = block.block_id.clone();
        blocking(move || sc_read_store::block_exists(&pool, block_num, &block_id)).await?
    };
    if seen {
        tracing::info!(block_num = block.block_num, block_id = %block.block_id, "duplicate block delivery, skipping");
        return Ok(());
    }

    let mut property_page_changes: Vec<(String, DecodedContainer)> = Vec::new();
    let mut other_writes: Vec<(EntityTable, String, serde_json::Value)> = Vec::new();

    for change in &block.changes {
        let kind = match sc_address::classify(&change.address) {
            Ok(kind) => kind,
            Err(e) => {
                tracing::warn!(address = %change.address, error = %e, "change address failed to classify, skipping");
                continue;
            }
        };
        let container = match decode::decode_container(kind, &change.address, &change.value) {
            Ok(container) => container,
            Err(e) => {
                tracing::warn!(address = %change.address, error = %e, "failed to decode container, skipping");
                continue;
            }
        };

        if let DecodedContainer::Property(properties) = &container {
            for property in &properties.entries {
                page_index.record(property);
            }
        }

        match kind {
            AddressKind::PropertyPage(_) => property_page_changes.push((change.address.clone(), container)),
            _ => {
                let doc = decode::to_doc(&container);
                other_writes.push((decode::table_for_kind(kind), change.address.clone(), doc));
            }
        }
    }

    // Step 3: non-PropertyPage entries first.
    for (table, address, doc) in other_writes {
        let pool = pool.clone();
        let block_num = block.block_num;
        let key = address_key(&address);
        blocking(move || sc_read_store::block_upsert(&pool, table, &key, &doc, block_num)).await?;
    }

    // Step 4: settle so the Property rows PropertyPage enrichment depends
    // on are visible (spec §4.5, §9 — a race fence, not a correctness
    // guarantee).
    if !property_page_changes.is_empty() {
        tokio::time::sleep(property_page_settle).await;
    }

    // Step 5: PropertyPage entries, enriched against their Property row.
    for (address, container) in property_page_changes {
        apply_property_page(pool, block.block_num, &address, container, page_index).await?;
    }

    // Step 6.
    let descriptor = BlockDescriptor {
        block_num: block.block_num,
        block_id: block.block_id.clone(),
        state_root_hash: block.state_root_hash.clone(),
    };
    let pool = pool.clone();
    blocking(move || sc_read_store::insert_block(&pool, &descriptor)).await?;

    Ok(())
}

async fn apply_property_page(
    pool: &PgPool,
    block_num: sc_types::BlockNum,
    address: &str,
    container: DecodedContainer,
    page_index: &PageIndex,
) -> Result<(), PipelineError> {
    let doc = decode::to_doc(&container);

    let Some((name, record_id)) = page_index.lookup(address).cloned() else {
        tracing::warn!(address, "no Property row known for this PropertyPage address, skipping enrichment");
        return Ok(());
    };

    let property_address = sc_address::derive_property_address(&record_id, &name);
    let property_doc = {
        let pool = pool.clone();
        let key = address_key(&property_address);
        blocking(move || sc_read_store::find_current(&pool, EntityTable::Properties, &key)).await?
    };

    let Some(property_doc) = property_doc else {
        tracing::warn!(address, %name, %record_id, "Property row not found in read store, skipping PropertyPage");
        return Ok(());
    };

    let properties: PropertyContainer = match serde_json::from_value(property_doc) {
        Ok(properties) => properties,
        Err(e) => {
            tracing::warn!(address, error = %e, "Property doc failed to parse, skipping PropertyPage");
            return Ok(());
        }
    };
    let Some(property) = properties.find(&name) else {
        tracing::warn!(address, %name, %record_id, "Property entry missing from its own container, skipping PropertyPage");
        return Ok(());
    };

    let doc = enrich::enrich_page_doc(doc, property);

    let pool = pool.clone();
    let key = address_key(address);
    blocking(move || sc_read_store::block_upsert(&pool, EntityTable::PropertyPages, &key, &doc, block_num)).await
}
