//! The block-upsert primitive (spec §4.6): the single write path every
//! entity projection goes through.
//!
//! 1. Load all rows for `index_key` with `end_block_num = END_OF_TIME`
//!    ("currently live").
//! 2. If any live row already has `start_block_num == block_num`
//!    (duplicate delivery), return without changes — idempotent replay.
//! 3. Otherwise close every currently-live row at `block_num` and insert
//!    a new one carrying `doc`.
//!
//! All three steps run inside one transaction, closing the cross-table
//! read gap the design notes (spec §9) flag as an open question for the
//! non-transactional original.

use crate::connection::PgPool;
use crate::error::ReadStoreError;
use crate::table::EntityTable;
use diesel::sql_types::{BigInt, Jsonb};
use diesel::{Connection, QueryableByName, RunQueryDsl};
use sc_types::{BlockNum, END_OF_TIME};

#[derive(QueryableByName)]
struct LiveRow {
    #[diesel(sql_type = BigInt)]
    start_block_num: i64,
}

/// Apply one block-upsert (spec §4.6) against `table`, synchronously.
/// Blocking; callers on an async runtime should run this via
/// `spawn_blocking` (see [`crate::pipeline_upsert`] in `sc-ledger-sync`).
pub fn block_upsert(
    pool: &PgPool,
    table: EntityTable,
    index_key: &serde_json::Value,
    doc: &serde_json::Value,
    block_num: BlockNum,
) -> Result<(), ReadStoreError> {
    let mut conn = pool.get().map_err(|e| ReadStoreError::Connection(e.to_string()))?;
    let name = table.sql_name();

    conn.transaction(|conn| {
        let live: Vec<LiveRow> = diesel::sql_query(format!(
            "SELECT start_block_num FROM {name} WHERE index_key = $1 AND end_block_num = $2"
        ))
        .bind::<Jsonb, _>(index_key.clone())
        .bind::<BigInt, _>(END_OF_TIME)
        .load(conn)?;

        if live.iter().any(|row| row.start_block_num == block_num) {
            return Ok(());
        }

        diesel::sql_query(format!(
            "UPDATE {name} SET end_block_num = $1 WHERE index_key = $2 AND end_block_num = $3"
        ))
        .bind::<BigInt, _>(block_num)
        .bind::<Jsonb, _>(index_key.clone())
        .bind::<BigInt, _>(END_OF_TIME)
        .execute(conn)?;

        diesel::sql_query(format!(
            "INSERT INTO {name} (index_key, start_block_num, end_block_num, doc) VALUES ($1, $2, $3, $4)"
        ))
        .bind::<Jsonb, _>(index_key.clone())
        .bind::<BigInt, _>(block_num)
        .bind::<BigInt, _>(END_OF_TIME)
        .bind::<Jsonb, _>(doc.clone())
        .execute(conn)?;

        diesel::QueryResult::Ok(())
    })
    .map_err(|e| ReadStoreError::Query(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_of_time_matches_sentinel() {
        assert_eq!(END_OF_TIME, i64::MAX);
    }
}
