//! Suite catalogue: which tables each index family loads, in which schema,
//! with which row counts and batch sizes.

use seed_generator::{Entity, SynthRequest};
use std::fmt;
use std::str::FromStr;

/// One index family and its target schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suite {
    Btree,
    Hash,
    Gist,
    Spgist,
    Gin,
    Brin,
    Bloom,
}

/// One table load within a suite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableJob {
    pub entity: Entity,
    /// Records to synthesize
    pub rows: u64,
    /// Largest referenced identifier, for tables with a foreign key
    pub fk_bound: Option<u64>,
}

impl TableJob {
    fn new(entity: Entity, rows: u64) -> Self {
        Self {
            entity,
            rows,
            fk_bound: None,
        }
    }

    fn referencing(mut self, fk_bound: u64) -> Self {
        self.fk_bound = Some(fk_bound);
        self
    }

    /// Apply a scale factor to the row count and foreign-key bound.
    ///
    /// Static tables keep their fixed row count.
    pub fn scaled(&self, scale: f64) -> Self {
        let rows = match self.entity.fixed_rows() {
            Some(fixed) => fixed,
            None => scale_count(self.rows, scale),
        };
        Self {
            entity: self.entity,
            rows,
            fk_bound: self.fk_bound.map(|bound| scale_count(bound, scale)),
        }
    }

    /// Generator request for this job.
    pub fn request(&self) -> SynthRequest {
        let request = SynthRequest::new(self.rows);
        match self.fk_bound {
            Some(bound) => request.with_fk_max(bound),
            None => request,
        }
    }
}

/// `ceil(count * scale)`, at least 1.
pub fn scale_count(count: u64, scale: f64) -> u64 {
    ((count as f64 * scale).ceil() as u64).max(1)
}

const FULL_TEXT_UPDATE: &str = "SET search_vector = to_tsvector('english', coalesce(title, '') || ' ' || coalesce(content, '')) WHERE search_vector IS NULL";

impl Suite {
    /// Every suite in run order.
    pub const ALL: [Suite; 7] = [
        Suite::Btree,
        Suite::Hash,
        Suite::Gist,
        Suite::Spgist,
        Suite::Gin,
        Suite::Brin,
        Suite::Bloom,
    ];

    /// Command-line name.
    pub fn name(&self) -> &'static str {
        match self {
            Suite::Btree => "btree",
            Suite::Hash => "hash",
            Suite::Gist => "gist",
            Suite::Spgist => "spgist",
            Suite::Gin => "gin",
            Suite::Brin => "brin",
            Suite::Bloom => "bloom",
        }
    }

    /// Target schema; folded to lower case by PostgreSQL.
    pub fn schema(&self) -> &'static str {
        match self {
            Suite::Btree => "Btree",
            Suite::Hash => "Hash",
            Suite::Gist => "GiST",
            Suite::Spgist => "SPGiST",
            Suite::Gin => "GIN",
            Suite::Brin => "BRIN",
            Suite::Bloom => "Bloom",
        }
    }

    pub fn default_batch_size(&self) -> usize {
        match self {
            Suite::Brin => 5000,
            _ => 1000,
        }
    }

    /// Synthesis progress cadence, in records.
    pub fn progress_every(&self) -> u64 {
        match self {
            Suite::Brin => 50_000,
            _ => 10_000,
        }
    }

    /// Load progress cadence, in batches.
    pub fn log_every(&self) -> usize {
        match self {
            Suite::Brin => 10,
            _ => 1,
        }
    }

    /// Tables in load order with their default sizes.
    pub fn jobs(&self) -> Vec<TableJob> {
        match self {
            Suite::Btree => vec![
                TableJob::new(Entity::BtreeUsers, 500_000),
                TableJob::new(Entity::BtreeOrders, 1_000_000).referencing(500_000),
            ],
            Suite::Hash => vec![
                TableJob::new(Entity::HashProducts, 50_000),
                TableJob::new(Entity::HashSessions, 100_000).referencing(50_000),
                TableJob::new(Entity::HashConfig, 15),
            ],
            Suite::Gist => vec![
                TableJob::new(Entity::GistDocuments, 40_000),
                TableJob::new(Entity::GistEvents, 25_000),
                TableJob::new(Entity::GistNetworkDevices, 20_000),
                TableJob::new(Entity::GistLocations, 15_000),
            ],
            Suite::Spgist => vec![
                TableJob::new(Entity::SpgistSpatial, 30_000),
                TableJob::new(Entity::SpgistMultidimensional, 25_000),
                TableJob::new(Entity::SpgistText, 20_000),
                TableJob::new(Entity::SpgistNetwork, 15_000),
                TableJob::new(Entity::SpgistBoxes, 10_000),
            ],
            Suite::Gin => vec![
                TableJob::new(Entity::GinProducts, 25_000),
                TableJob::new(Entity::GinProfiles, 20_000),
                TableJob::new(Entity::GinArticles, 30_000),
                TableJob::new(Entity::GinDocuments, 15_000),
                TableJob::new(Entity::GinLogs, 40_000),
            ],
            Suite::Brin => vec![
                TableJob::new(Entity::BrinTimeSeries, 500_000),
                TableJob::new(Entity::BrinAccessLogs, 300_000),
                TableJob::new(Entity::BrinTransactions, 400_000),
                TableJob::new(Entity::BrinMetrics, 200_000),
                TableJob::new(Entity::BrinGeographic, 150_000),
            ],
            Suite::Bloom => vec![
                TableJob::new(Entity::BloomUsers, 100_000),
                TableJob::new(Entity::BloomProducts, 80_000),
                TableJob::new(Entity::BloomOrders, 150_000).referencing(100_000),
                TableJob::new(Entity::BloomSecurityLogs, 200_000).referencing(100_000),
                TableJob::new(Entity::BloomInventory, 80_000).referencing(80_000),
            ],
        }
    }

    /// Statements run in one transaction after every table is loaded.
    pub fn post_load_statements(&self) -> Vec<String> {
        match self {
            Suite::Gist => vec![format!("UPDATE documents {FULL_TEXT_UPDATE}")],
            Suite::Gin => vec![format!("UPDATE articles {FULL_TEXT_UPDATE}")],
            _ => Vec::new(),
        }
    }

    /// Resolve `all` or a single suite name.
    pub fn select(name: &str) -> Result<Vec<Suite>, String> {
        if name.eq_ignore_ascii_case("all") {
            Ok(Suite::ALL.to_vec())
        } else {
            name.parse().map(|suite| vec![suite])
        }
    }
}

impl FromStr for Suite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "btree" | "b-tree" => Ok(Suite::Btree),
            "hash" => Ok(Suite::Hash),
            "gist" => Ok(Suite::Gist),
            "spgist" | "sp-gist" => Ok(Suite::Spgist),
            "gin" => Ok(Suite::Gin),
            "brin" => Ok(Suite::Brin),
            "bloom" => Ok(Suite::Bloom),
            _ => Err(format!(
                "Unknown suite: {s} (expected btree, hash, gist, spgist, gin, brin, bloom or all)"
            )),
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_entity_belongs_to_one_suite() {
        let mut seen = HashSet::new();
        for suite in Suite::ALL {
            for job in suite.jobs() {
                assert!(seen.insert(job.entity), "{:?} listed twice", job.entity);
            }
        }
        assert_eq!(seen.len(), Entity::ALL.len());
    }

    #[test]
    fn test_schemas_are_valid_identifiers() {
        for suite in Suite::ALL {
            assert!(seed_core::validate_identifier(suite.schema()).is_ok());
        }
    }

    #[test]
    fn test_scale_rounds_up_to_at_least_one() {
        assert_eq!(scale_count(500_000, 1.0), 500_000);
        assert_eq!(scale_count(500_000, 0.001), 500);
        assert_eq!(scale_count(15_000, 0.0001), 2);
        assert_eq!(scale_count(10, 0.000_001), 1);
    }

    #[test]
    fn test_scaled_job_keeps_static_tables() {
        let jobs = Suite::Hash.jobs();
        let scaled: Vec<TableJob> = jobs.iter().map(|j| j.scaled(0.01)).collect();

        assert_eq!(scaled[0].rows, 500);
        assert_eq!(scaled[1].rows, 1000);
        assert_eq!(scaled[1].fk_bound, Some(500));
        assert_eq!(scaled[2].rows, 15);
    }

    #[test]
    fn test_request_carries_fk_bound() {
        let job = TableJob::new(Entity::BtreeOrders, 10).referencing(4);
        assert_eq!(job.request(), SynthRequest::new(10).with_fk_max(4));
        assert_eq!(
            TableJob::new(Entity::BtreeUsers, 10).request(),
            SynthRequest::new(10)
        );
    }

    #[test]
    fn test_brin_uses_larger_batches() {
        assert_eq!(Suite::Brin.default_batch_size(), 5000);
        assert_eq!(Suite::Brin.log_every(), 10);
        assert_eq!(Suite::Bloom.default_batch_size(), 1000);
    }

    #[test]
    fn test_post_load_statements() {
        assert_eq!(
            Suite::Gist.post_load_statements(),
            vec!["UPDATE documents SET search_vector = to_tsvector('english', coalesce(title, '') || ' ' || coalesce(content, '')) WHERE search_vector IS NULL".to_string()]
        );
        assert_eq!(Suite::Gin.post_load_statements().len(), 1);
        assert!(Suite::Brin.post_load_statements().is_empty());
    }

    #[test]
    fn test_select() {
        assert_eq!(Suite::select("all").unwrap().len(), 7);
        assert_eq!(Suite::select("GiST").unwrap(), vec![Suite::Gist]);
        assert!(Suite::select("rtree").is_err());
    }
}
