//! Worker pool for CPU-bound payload decoding.
//!
//! Jobs travel over one shared queue; each submission gets its own reply
//! channel keyed by a monotonically increasing task id. A worker that
//! panics is replaced, and the waiting caller sees
//! [`SessionError::WorkerPanicked`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, mpsc};
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use crate::session::{Result, SessionError};

/// Pool sizing.
#[derive(Debug, Clone)]
pub struct PoolOptions {
	/// Worker thread count (at least one is started).
	pub workers: usize,
}

impl Default for PoolOptions {
	fn default() -> Self {
		let workers = thread::available_parallelism().map_or(2, |count| count.get()).clamp(1, 8);
		Self { workers }
	}
}

struct Task {
	id: u64,
	run: Box<dyn FnOnce() + Send>,
}

struct Shared {
	queue: Mutex<mpsc::Receiver<Task>>,
	workers: Mutex<Vec<JoinHandle<()>>>,
}

/// Fixed-size pool of decode threads.
pub struct DecodePool {
	sender: Option<mpsc::Sender<Task>>,
	shared: Arc<Shared>,
	next_id: AtomicU64,
	size: usize,
}

/// Pending result of one submitted job.
pub struct TaskHandle<T> {
	id: u64,
	reply: mpsc::Receiver<Result<T>>,
}

impl<T> TaskHandle<T> {
	/// Task id assigned at submission.
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Block until the job finishes.
	pub fn wait(self) -> Result<T> {
		self.reply.recv().map_err(|_| SessionError::WorkerPanicked { task_id: self.id })?
	}
}

impl DecodePool {
	/// Start the pool's worker threads.
	pub fn new(options: &PoolOptions) -> Result<Self> {
		let (sender, receiver) = mpsc::channel();
		let shared = Arc::new(Shared {
			queue: Mutex::new(receiver),
			workers: Mutex::new(Vec::new()),
		});

		let size = options.workers.max(1);
		for index in 0..size {
			spawn_worker(&shared, index)?;
		}
		debug!(workers = size, "decode pool started");

		Ok(Self {
			sender: Some(sender),
			shared,
			next_id: AtomicU64::new(1),
			size,
		})
	}

	/// Number of worker threads.
	pub fn size(&self) -> usize {
		self.size
	}

	/// Queue a job; its result is delivered through the returned handle.
	pub fn submit<T, F>(&self, job: F) -> Result<TaskHandle<T>>
	where
		T: Send + 'static,
		F: FnOnce() -> Result<T> + Send + 'static,
	{
		let sender = self.sender.as_ref().ok_or(SessionError::PoolClosed)?;
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let (reply_tx, reply) = mpsc::channel();

		let run = Box::new(move || {
			let _ = reply_tx.send(job());
		});
		sender.send(Task { id, run }).map_err(|_| SessionError::PoolClosed)?;

		Ok(TaskHandle { id, reply })
	}
}

impl Drop for DecodePool {
	fn drop(&mut self) {
		self.sender = None;
		loop {
			let Some(handle) = lock(&self.shared.workers).pop() else {
				break;
			};
			let _ = handle.join();
		}
		debug!("decode pool stopped");
	}
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn spawn_worker(shared: &Arc<Shared>, index: usize) -> Result<()> {
	let worker_shared = Arc::clone(shared);
	let handle = thread::Builder::new()
		.name(format!("iondoc-decode-{index}"))
		.spawn(move || run_worker(&worker_shared, index))?;
	lock(&shared.workers).push(handle);
	Ok(())
}

fn run_worker(shared: &Arc<Shared>, index: usize) {
	let mut sentinel = Sentinel {
		shared,
		index,
		task_id: None,
	};

	loop {
		let task = lock(&shared.queue).recv();
		let Ok(task) = task else {
			break;
		};
		sentinel.task_id = Some(task.id);
		(task.run)();
		sentinel.task_id = None;
	}
	debug!(worker = index, "decode worker exiting");
}

/// Respawns its worker when dropped during a panic.
struct Sentinel<'a> {
	shared: &'a Arc<Shared>,
	index: usize,
	task_id: Option<u64>,
}

impl Drop for Sentinel<'_> {
	fn drop(&mut self) {
		if !thread::panicking() {
			return;
		}
		error!(worker = self.index, task_id = ?self.task_id, "decode worker panicked, respawning");
		if let Err(err) = spawn_worker(self.shared, self.index) {
			error!(worker = self.index, error = %err, "failed to respawn decode worker");
		}
	}
}
