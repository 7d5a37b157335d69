//! Pipeline driver
//!
//! READING → VALIDATING/ENRICHING (fused per shard, with shard-local
//! partial aggregation) → WRITING_DETAIL → AGGREGATING → WRITING_ROLLUP.
//! Shards never share state; merging the partial aggregate maps is the
//! one synchronization point before the commits. Any stage failure
//! aborts the run and surfaces as a typed [`EtlError`].

use tracing::info;
use trips2parquet_config::JobParams;
use trips2parquet_core::{
    aggregate_shard, enrich, filter_valid, finish_buckets, merge_partials, AggregateBucket,
    EnrichedRecord, FilterCounts, PartialAggregate,
};
use trips2parquet_writer::write_partitioned;

use crate::catalog::{TripCatalog, TRIPS_TABLE};
use crate::error::{EtlError, Stage};
use crate::init::JobContext;

/// Counts reported by a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input_records: usize,
    pub survivors: usize,
    pub buckets: usize,
    pub detail_partitions: usize,
    pub rollup_partitions: usize,
}

/// One batch pipeline run over the full source snapshot
pub struct EtlJob {
    params: JobParams,
    ctx: JobContext,
}

impl EtlJob {
    pub fn new(params: JobParams, ctx: JobContext) -> Self {
        Self { params, ctx }
    }

    pub async fn run<C: TripCatalog>(&self, catalog: &C) -> Result<RunSummary, EtlError> {
        info!(
            job = %self.params.job_name,
            source = %self.params.source,
            target = %self.params.target,
            database = %self.params.database,
            "starting ETL run"
        );

        let shards = catalog
            .read_table(TRIPS_TABLE)
            .await
            .map_err(|e| EtlError::SourceRead {
                stage: Stage::Reading,
                source: e,
            })?;
        let input_records: usize = shards.iter().map(Vec::len).sum();
        info!(records = input_records, shards = shards.len(), "source read complete");

        // Validate, enrich and partially aggregate shard by shard. Each
        // shard is independent; the accumulator merge below is where the
        // shards meet.
        let mut counts = FilterCounts::default();
        let mut enriched: Vec<EnrichedRecord> = Vec::with_capacity(input_records);
        let mut partials = PartialAggregate::new();

        for shard in shards {
            let (valid, shard_counts) = filter_valid(shard);
            counts.merge(shard_counts);

            let shard_enriched: Vec<EnrichedRecord> = valid.into_iter().map(enrich).collect();
            partials = merge_partials(partials, aggregate_shard(&shard_enriched));
            enriched.extend(shard_enriched);
        }
        info!(
            input = counts.input,
            survivors = counts.survivors,
            dropped = counts.dropped(),
            "validation and enrichment complete"
        );

        let detail = write_partitioned::<EnrichedRecord>(&self.ctx.target, &enriched)
            .await
            .map_err(|e| EtlError::WriteCommit {
                stage: Stage::WritingDetail,
                source: e,
            })?;
        info!(
            partitions = detail.len(),
            rows = enriched.len(),
            "detail dataset committed"
        );

        let buckets = finish_buckets(partials);
        info!(buckets = buckets.len(), "hourly aggregation complete");

        let rollup = write_partitioned::<AggregateBucket>(&self.ctx.target, &buckets)
            .await
            .map_err(|e| EtlError::WriteCommit {
                stage: Stage::WritingRollup,
                source: e,
            })?;
        info!(partitions = rollup.len(), "hourly rollup committed");

        Ok(RunSummary {
            input_records,
            survivors: counts.survivors,
            buckets: buckets.len(),
            detail_partitions: detail.len(),
            rollup_partitions: rollup.len(),
        })
    }
}
