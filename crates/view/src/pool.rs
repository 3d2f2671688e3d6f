//! Bounded worker pool backing the filter engine.

use std::io;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use thiserror::Error;

/// Hard cap on worker threads regardless of configuration.
const MAX_WORKERS: usize = 128;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Startup failure of the filter worker pool. Fatal to the application.
#[derive(Debug, Error)]
pub enum PoolError {
	#[error("failed to spawn filter worker: {0}")]
	Spawn(#[from] io::Error),
}

/// Fixed set of worker threads pulling jobs from a shared queue.
///
/// Created once at startup and kept for the whole program run; dropping the
/// pool closes the queue and joins every worker.
pub struct WorkerPool {
	workers: Vec<JoinHandle<()>>,
	sender: Option<Sender<Job>>,
}

impl WorkerPool {
	/// Spawn `threads` workers, or one per detected processor when `threads`
	/// is zero.
	pub fn new(threads: usize) -> Result<Self, PoolError> {
		let threads = resolve_thread_count(threads);
		let (sender, receiver) = channel::<Job>();
		let receiver = Arc::new(Mutex::new(receiver));

		let mut workers = Vec::with_capacity(threads);
		for id in 0..threads {
			let receiver = Arc::clone(&receiver);
			let handle = thread::Builder::new()
				.name(format!("sift-filter-{id}"))
				.spawn(move || worker_loop(&receiver))?;
			workers.push(handle);
		}

		log::debug!("filter pool running with {threads} workers");
		Ok(Self {
			workers,
			sender: Some(sender),
		})
	}

	/// Number of worker threads in the pool.
	pub fn capacity(&self) -> usize {
		self.workers.len()
	}

	/// Queue a job for execution on some worker.
	pub fn execute(&self, job: impl FnOnce() + Send + 'static) {
		if let Some(sender) = &self.sender {
			// Send fails only once every worker has exited.
			let _ = sender.send(Box::new(job));
		}
	}
}

impl Drop for WorkerPool {
	fn drop(&mut self) {
		self.sender.take();
		for worker in self.workers.drain(..) {
			let _ = worker.join();
		}
	}
}

fn worker_loop(receiver: &Mutex<Receiver<Job>>) {
	loop {
		let job = {
			let Ok(guard) = receiver.lock() else {
				break;
			};
			guard.recv()
		};
		match job {
			Ok(job) => job(),
			Err(_) => break,
		}
	}
}

fn resolve_thread_count(configured: usize) -> usize {
	let threads = if configured == 0 {
		thread::available_parallelism().map_or(1, |count| count.get())
	} else {
		configured
	};
	threads.clamp(1, MAX_WORKERS)
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::mpsc;

	use super::*;

	#[test]
	fn runs_queued_jobs() {
		let pool = WorkerPool::new(2).expect("pool");
		let counter = Arc::new(AtomicUsize::new(0));
		let (tx, rx) = mpsc::channel();

		for _ in 0..8 {
			let counter = Arc::clone(&counter);
			let tx = tx.clone();
			pool.execute(move || {
				counter.fetch_add(1, Ordering::SeqCst);
				let _ = tx.send(());
			});
		}

		for _ in 0..8 {
			rx.recv().expect("job completion");
		}
		assert_eq!(counter.load(Ordering::SeqCst), 8);
	}

	#[test]
	fn zero_threads_resolves_to_detected_count() {
		let pool = WorkerPool::new(0).expect("pool");
		assert!(pool.capacity() >= 1);
	}

	#[test]
	fn drop_joins_workers() {
		let pool = WorkerPool::new(4).expect("pool");
		let (tx, rx) = mpsc::channel();
		let tx_clone = tx.clone();
		pool.execute(move || {
			let _ = tx_clone.send(());
		});
		rx.recv().expect("job completion");
		drop(pool);
	}
}
