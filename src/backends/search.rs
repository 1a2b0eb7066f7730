//! Search backend
//!
//! Scans every source file on a rayon pool: read, extract literals, clean,
//! tokenize and score each one against the query. Per-file hits are merged
//! and sorted once all workers are done.

use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::backends::scan::{scan_files, ScanOptions, SourceFile};
use crate::core::file_reader::{read_source, FileReadConfig};
use crate::core::model::{Candidate, Hit, HitSet, MatchResult, Query};
use crate::core::paths::normalize_path;
use crate::core::specifier::CleanOptions;
use crate::error::Result;

/// Runtime configuration for one search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Minimum score a hit needs
    pub min_score: f64,

    /// Number of worker threads
    pub worker_count: usize,

    pub scan: ScanOptions,
    pub clean: CleanOptions,
    pub read: FileReadConfig,

    /// Order by score (highest first) instead of path and line
    pub sort_by_score: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            worker_count: default_worker_count(),
            scan: ScanOptions::default(),
            clean: CleanOptions::default(),
            read: FileReadConfig::default(),
            sort_by_score: false,
        }
    }
}

/// Logical processors available to this process
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Score every non-empty literal of one file
pub fn process_file(file: &SourceFile, query: &Query, config: &SearchConfig) -> Vec<Hit> {
    let source = match read_source(&file.path, &config.read) {
        Ok(source) => source,
        Err(err) => {
            warn!("skipping {err}");
            return Vec::new();
        }
    };
    if source.lossy {
        debug!(path = %file.path.display(), "invalid UTF-8 replaced");
    }

    let path = normalize_path(&file.path);
    let mut literals = 0usize;
    let mut hits = Vec::new();

    for literal in file.language.extract(&source.content) {
        literals += 1;
        let candidate = Candidate::new(literal, config.clean);
        if candidate.is_empty() {
            continue;
        }
        let result = MatchResult::evaluate(query, candidate);
        hits.push(Hit::new(path.as_str(), &result));
    }

    debug!(
        path = %path,
        language = %file.language,
        literals,
        hits = hits.len(),
        "scanned file"
    );
    hits
}

/// Search a directory tree for literals matching `message`
pub fn run_search(root: &Path, message: &str, config: &SearchConfig) -> Result<HitSet> {
    let query = Query::new(message);
    debug!(tokens = query.tokens.len(), "tokenized message");

    let files = scan_files(root, config.scan)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_count)
        .build()?;

    let per_file: Vec<Vec<Hit>> = pool.install(|| {
        files
            .par_iter()
            .map(|file| process_file(file, &query, config))
            .collect()
    });

    let mut hits: HitSet = per_file.into_iter().flatten().collect();
    hits.retain_min_score(config.min_score);
    hits.sort();
    if config.sort_by_score {
        hits.sort_by_score();
    }

    info!(
        files = files.len(),
        hits = hits.len(),
        workers = config.worker_count,
        "search finished"
    );
    Ok(hits)
}
