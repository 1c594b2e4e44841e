//! Parallel collection loading.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use napi::bindgen_prelude::*;
use napi_derive::napi;
use quire_collections::{
    CollectionEntry, CollectionRegistry, DuplicateIds, EntryError, Loader,
    PassthroughImageResolver,
};
use rayon::prelude::*;
use serde_json::Value as JsonValue;

use crate::convert::{entry_issues, to_json};
use crate::types::FieldIssue;

type Outcome = (PathBuf, std::result::Result<CollectionEntry, EntryError>);

/// Options for loading a collection.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Maximum number of threads to use. Defaults to number of CPU cores.
    pub max_threads: Option<u32>,
    /// Whether to continue after the first broken file. Defaults to true.
    pub continue_on_error: Option<bool>,
    /// Collection registry (JSON). Defaults to the built-in blog/docs site.
    pub registry: Option<JsonValue>,
    /// Rejects hero images whose file is missing. Defaults to true.
    pub check_images: Option<bool>,
}

/// Result for a single file of a collection.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct EntryResult {
    /// Path of the file relative to the collection base.
    pub file: String,
    /// Validated entry (present on success).
    pub entry: Option<JsonValue>,
    /// Problems found in the file (empty on success).
    pub errors: Vec<FieldIssue>,
}

/// Statistics for batch processing.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchStats {
    /// Total number of files discovered.
    pub total: u32,
    /// Number of files that became entries.
    pub succeeded: u32,
    /// Number of rejected files.
    pub failed: u32,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Every file of a collection with statistics.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct CollectionLoadResult {
    /// Collection name.
    pub collection: String,
    /// Per-file results in path order.
    pub results: Vec<EntryResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}

pub(crate) fn load_collection(
    root: String,
    collection: String,
    registry: &CollectionRegistry,
    options: LoadOptions,
) -> Result<CollectionLoadResult> {
    let start = Instant::now();
    let continue_on_error = options.continue_on_error.unwrap_or(true);

    let mut loader = Loader::new(&root, registry);
    if !options.check_images.unwrap_or(true) {
        loader = loader.with_image_resolver(PassthroughImageResolver);
    }
    let config = loader
        .collection(&collection)
        .map_err(|e| Error::from_reason(e.to_string()))?;
    let files = loader
        .discover(&collection)
        .map_err(|e| Error::from_reason(e.to_string()))?;

    let pool = if let Some(max_threads) = options.max_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads as usize)
            .build()
            .ok()
    } else {
        None
    };

    let total = files.len() as u32;
    let failed = AtomicU32::new(0);

    let load = |relative: &PathBuf| -> Outcome {
        let result = loader.load_entry(&collection, config, relative);
        if result.is_err() {
            failed.fetch_add(1, Ordering::Relaxed);
        }
        (relative.clone(), result)
    };

    let outcomes: Vec<Outcome> = if continue_on_error {
        match pool {
            Some(pool) => pool.install(|| files.par_iter().map(load).collect()),
            None => files.par_iter().map(load).collect(),
        }
    } else {
        let mut outcomes = Vec::with_capacity(files.len());
        for relative in &files {
            let outcome = load(relative);
            let had_error = outcome.1.is_err();
            outcomes.push(outcome);
            if had_error {
                break;
            }
        }
        outcomes
    };

    let mut ids = DuplicateIds::new();
    let mut results = Vec::with_capacity(outcomes.len());
    for (relative, outcome) in outcomes {
        let outcome = outcome.and_then(|entry| ids.check(entry));
        if matches!(outcome, Err(EntryError::DuplicateId { .. })) {
            failed.fetch_add(1, Ordering::Relaxed);
        }

        let file = relative.to_string_lossy().replace('\\', "/");
        results.push(match outcome {
            Ok(entry) => EntryResult {
                file,
                entry: Some(to_json(&entry)?),
                errors: Vec::new(),
            },
            Err(err) => {
                log::warn!("rejected {collection} entry: {err}");
                EntryResult {
                    file,
                    entry: None,
                    errors: entry_issues(&err),
                }
            }
        });
    }

    let failed = failed.load(Ordering::Relaxed);
    let stats = BatchStats {
        total,
        succeeded: results.len() as u32 - failed,
        failed,
        processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };
    log::debug!(
        "loaded {collection}: {}/{} files in {:.1}ms",
        stats.succeeded,
        stats.total,
        stats.processing_time_ms
    );

    Ok(CollectionLoadResult {
        collection,
        results,
        stats,
    })
}
