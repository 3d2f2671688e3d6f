//! Parallel filter coordinator.
//!
//! Every query change rebuilds the filtered map wholesale: the entry range is
//! split into contiguous chunks, each chunk is matched into a private buffer
//! (one chunk on the calling thread, the rest on the worker pool), and the
//! buffers are concatenated in chunk order. Absent score sorting the result
//! is therefore in ascending entry order and deterministic for a fixed entry
//! count, independent of worker count.

use std::sync::Arc;
use std::sync::mpsc::channel;

use anyhow::{Result, anyhow};
use sift_mode_api::{Mode, collate_key, levenshtein, tokenize};

use crate::pool::{PoolError, WorkerPool};

/// Entries handled per chunk; one chunk per 500 entries, at least one.
pub const CHUNK_SIZE: usize = 500;

/// Outcome of one refilter pass.
#[derive(Debug, Default)]
pub struct FilterResult {
	/// Ordered entry indices of the matching subset.
	pub map: Vec<usize>,
	/// Edit distance per entry index; populated only when score sorting ran.
	pub distances: Vec<u32>,
}

struct ChunkOutcome {
	chunk: usize,
	matched: Vec<usize>,
	distances: Vec<u32>,
}

/// Owns the worker pool and runs refilter passes over a mode's entries.
pub struct FilterEngine {
	pool: WorkerPool,
}

impl FilterEngine {
	pub fn new(threads: usize) -> Result<Self, PoolError> {
		Ok(Self {
			pool: WorkerPool::new(threads)?,
		})
	}

	/// Rebuild the filtered map for `query`.
	///
	/// An empty query matches everything and yields the identity permutation
	/// without touching the pool. With score sorting enabled the map is
	/// stable-sorted by edit distance, so equal distances keep ascending
	/// entry order.
	pub fn refilter(
		&self,
		mode: &Arc<dyn Mode>,
		query: &str,
		ascii: &Arc<Vec<bool>>,
		case_sensitive: bool,
		sort_by_distance: bool,
	) -> Result<FilterResult> {
		let count = mode.count();
		if count == 0 {
			return Ok(FilterResult::default());
		}

		let tokens = tokenize(query, case_sensitive);
		if tokens.is_empty() {
			return Ok(FilterResult {
				map: (0..count).collect(),
				distances: Vec::new(),
			});
		}

		let tokens = Arc::new(tokens);
		let needle: Option<Arc<str>> =
			sort_by_distance.then(|| Arc::from(collate_key(query, case_sensitive)));

		let chunks = self.chunk_count(count);
		let step = count.div_ceil(chunks);
		let (sender, receiver) = channel();

		for chunk in 1..chunks {
			let mode = Arc::clone(mode);
			let tokens = Arc::clone(&tokens);
			let ascii = Arc::clone(ascii);
			let needle = needle.clone();
			let sender = sender.clone();
			let start = chunk * step;
			let end = ((chunk + 1) * step).min(count);
			self.pool.execute(move || {
				let outcome = match_chunk(
					mode.as_ref(),
					&tokens,
					&ascii,
					needle.as_deref(),
					case_sensitive,
					chunk,
					start,
					end,
				);
				let _ = sender.send(outcome);
			});
		}
		drop(sender);

		let mut slots: Vec<Option<ChunkOutcome>> = (0..chunks).map(|_| None).collect();
		slots[0] = Some(match_chunk(
			mode.as_ref(),
			&tokens,
			&ascii,
			needle.as_deref(),
			case_sensitive,
			0,
			0,
			step.min(count),
		));
		for _ in 1..chunks {
			let outcome = receiver
				.recv()
				.map_err(|_| anyhow!("filter worker channel disconnected"))?;
			let chunk = outcome.chunk;
			slots[chunk] = Some(outcome);
		}

		let mut map = Vec::new();
		let mut distances = if needle.is_some() {
			vec![0u32; count]
		} else {
			Vec::new()
		};
		for outcome in slots.into_iter().flatten() {
			for (&index, &distance) in outcome.matched.iter().zip(&outcome.distances) {
				distances[index] = distance;
			}
			map.extend(outcome.matched);
		}

		if needle.is_some() {
			map.sort_by_key(|&index| distances[index]);
		}

		Ok(FilterResult { map, distances })
	}

	/// Precompute the per-entry ASCII flags for a fresh mode, using the same
	/// chunk scheme as a refilter pass.
	pub fn ascii_table(&self, mode: &Arc<dyn Mode>) -> Result<Vec<bool>> {
		let count = mode.count();
		if count == 0 {
			return Ok(Vec::new());
		}

		let chunks = self.chunk_count(count);
		let step = count.div_ceil(chunks);
		let (sender, receiver) = channel();

		for chunk in 1..chunks {
			let mode = Arc::clone(mode);
			let sender = sender.clone();
			let start = chunk * step;
			let end = ((chunk + 1) * step).min(count);
			self.pool.execute(move || {
				let flags: Vec<bool> = (start..end).map(|index| mode.is_ascii(index)).collect();
				let _ = sender.send((chunk, flags));
			});
		}
		drop(sender);

		let mut slots: Vec<Option<Vec<bool>>> = (0..chunks).map(|_| None).collect();
		slots[0] = Some((0..step.min(count)).map(|index| mode.is_ascii(index)).collect());
		for _ in 1..chunks {
			let (chunk, flags) = receiver
				.recv()
				.map_err(|_| anyhow!("filter worker channel disconnected"))?;
			slots[chunk] = Some(flags);
		}

		Ok(slots.into_iter().flatten().flatten().collect())
	}

	fn chunk_count(&self, count: usize) -> usize {
		(count / CHUNK_SIZE).max(1).min(self.pool.capacity())
	}
}

#[allow(clippy::too_many_arguments)]
fn match_chunk(
	mode: &dyn Mode,
	tokens: &[String],
	ascii: &[bool],
	needle: Option<&str>,
	case_sensitive: bool,
	chunk: usize,
	start: usize,
	end: usize,
) -> ChunkOutcome {
	let mut matched = Vec::new();
	let mut distances = Vec::new();
	for index in start..end {
		if !mode.token_match(tokens, ascii[index], case_sensitive, index) {
			continue;
		}
		matched.push(index);
		if let Some(needle) = needle {
			let haystack = collate_key(&mode.completion_text(index), case_sensitive);
			distances.push(levenshtein(needle, &haystack));
		}
	}
	ChunkOutcome {
		chunk,
		matched,
		distances,
	}
}
