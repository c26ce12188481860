//! As-of queries (spec §4.6) and the `blocks` table.

use crate::connection::PgPool;
use crate::error::ReadStoreError;
use crate::table::EntityTable;
use diesel::sql_types::{BigInt, Jsonb, Text};
use diesel::{QueryableByName, RunQueryDsl};
use sc_types::{BlockDescriptor, BlockNum, END_OF_TIME};

#[derive(QueryableByName)]
struct DocRow {
    #[diesel(sql_type = Jsonb)]
    doc: serde_json::Value,
}

/// The row live at `block_num` for `index_key` in `table`, if any. "Live
/// at b" means `start_block_num <= b < end_block_num` (spec §4.6).
pub fn find_as_of(
    pool: &PgPool,
    table: EntityTable,
    index_key: &serde_json::Value,
    block_num: BlockNum,
) -> Result<Option<serde_json::Value>, ReadStoreError> {
    let mut conn = pool.get().map_err(|e| ReadStoreError::Connection(e.to_string()))?;
    let name = table.sql_name();
    let rows: Vec<DocRow> = diesel::sql_query(format!(
        "SELECT doc FROM {name} WHERE index_key = $1 AND start_block_num <= $2 AND end_block_num > $2 LIMIT 1"
    ))
    .bind::<Jsonb, _>(index_key.clone())
    .bind::<BigInt, _>(block_num)
    .load(&mut conn)
    .map_err(|e| ReadStoreError::Query(e.to_string()))?;
    Ok(rows.into_iter().next().map(|r| r.doc))
}

/// The row currently live (as-of the read store's current block) for
/// `index_key` in `table`.
pub fn find_current(
    pool: &PgPool,
    table: EntityTable,
    index_key: &serde_json::Value,
) -> Result<Option<serde_json::Value>, ReadStoreError> {
    let mut conn = pool.get().map_err(|e| ReadStoreError::Connection(e.to_string()))?;
    let name = table.sql_name();
    let rows: Vec<DocRow> = diesel::sql_query(format!(
        "SELECT doc FROM {name} WHERE index_key = $1 AND end_block_num = $2 LIMIT 1"
    ))
    .bind::<Jsonb, _>(index_key.clone())
    .bind::<BigInt, _>(END_OF_TIME)
    .load(&mut conn)
    .map_err(|e| ReadStoreError::Query(e.to_string()))?;
    Ok(rows.into_iter().next().map(|r| r.doc))
}

/// Insert one block descriptor into `blocks` (spec §4.6 step 6). Primary
/// keyed on `(block_num, block_id)`; a duplicate insert from a replayed
/// block is not an error (see [`block_exists`] — callers check first).
pub fn insert_block(pool: &PgPool, block: &BlockDescriptor) -> Result<(), ReadStoreError> {
    let mut conn = pool.get().map_err(|e| ReadStoreError::Connection(e.to_string()))?;
    diesel::sql_query("INSERT INTO blocks (block_num, block_id, state_root_hash) VALUES ($1, $2, $3)")
        .bind::<BigInt, _>(block.block_num)
        .bind::<Text, _>(block.block_id.clone())
        .bind::<Text, _>(block.state_root_hash.clone())
        .execute(&mut conn)
        .map_err(|e| ReadStoreError::Query(e.to_string()))?;
    Ok(())
}

#[derive(QueryableByName)]
struct BlockNumRow {
    #[diesel(sql_type = BigInt)]
    block_num: i64,
}

/// Whether `(block_num, block_id)` has already been recorded (spec §9
/// duplicate-block detection: keyed on the pair, not `block_num` alone,
/// so a fork repeating a block number with a different id is not
/// mistaken for a replay).
pub fn block_exists(pool: &PgPool, block_num: BlockNum, block_id: &str) -> Result<bool, ReadStoreError> {
    let mut conn = pool.get().map_err(|e| ReadStoreError::Connection(e.to_string()))?;
    let rows: Vec<BlockNumRow> =
        diesel::sql_query("SELECT block_num FROM blocks WHERE block_num = $1 AND block_id = $2")
            .bind::<BigInt, _>(block_num)
            .bind::<Text, _>(block_id.to_string())
            .load(&mut conn)
            .map_err(|e| ReadStoreError::Query(e.to_string()))?;
    Ok(!rows.is_empty())
}

/// The max `block_num` recorded in `blocks`, the read store's "current
/// block" (spec §4.6).
pub fn current_block(pool: &PgPool) -> Result<Option<BlockNum>, ReadStoreError> {
    let mut conn = pool.get().map_err(|e| ReadStoreError::Connection(e.to_string()))?;
    let rows: Vec<BlockNumRow> = diesel::sql_query("SELECT block_num FROM blocks ORDER BY block_num DESC LIMIT 1")
        .load(&mut conn)
        .map_err(|e| ReadStoreError::Query(e.to_string()))?;
    Ok(rows.into_iter().next().map(|r| r.block_num))
}
