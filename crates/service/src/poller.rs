//! Fixed-interval refresh for read models
//!
//! A poll task invokes its fetch once immediately, then on a fixed period,
//! publishing every result into a watch channel. The handle owns the
//! schedule: dropping it cancels the task, so a torn-down owner can never be
//! updated by a late result.

use std::future::Future;
use std::time::Duration;

use quad_types::Remote;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::trace;

/// Handle to a running poll schedule.
///
/// The latest snapshot starts as `Loading` and is replaced by each completed
/// fetch. Dropping the handle aborts the schedule.
#[derive(Debug)]
pub struct PollHandle<T> {
	rx: watch::Receiver<Remote<T>>,
	task: JoinHandle<()>,
}

impl<T: Clone + Send + Sync + 'static> PollHandle<T> {
	/// The most recently published state.
	pub fn latest(&self) -> Remote<T> {
		self.rx.borrow().clone()
	}

	/// Wait for the next published state and return it.
	pub async fn changed(&mut self) -> Remote<T> {
		// A closed channel means the task is gone; the last snapshot stands.
		let _ = self.rx.changed().await;
		self.latest()
	}

	/// An independent receiver for the published states.
	pub fn subscribe(&self) -> watch::Receiver<Remote<T>> {
		self.rx.clone()
	}

	/// Replace the schedule with a new fetch. The previous schedule is
	/// cancelled exactly once before the new one starts; subscribers obtained
	/// earlier keep observing the old (now frozen) channel.
	pub fn restart<F, Fut>(&mut self, period: Duration, fetch: F)
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Remote<T>> + Send,
	{
		// Dropping the previous handle aborts its task
		*self = spawn(period, fetch);
	}
}

impl<T> Drop for PollHandle<T> {
	fn drop(&mut self) {
		self.task.abort();
	}
}

/// Start a poll schedule: invoke `fetch` once immediately, then every
/// `period`, publishing each result until the handle is dropped.
pub fn spawn<T, F, Fut>(period: Duration, fetch: F) -> PollHandle<T>
where
	T: Clone + Send + Sync + 'static,
	F: Fn() -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Remote<T>> + Send,
{
	let (tx, rx) = watch::channel(Remote::Loading);

	let task = tokio::spawn(async move {
		let mut ticker = interval(period);
		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
		loop {
			// First tick completes immediately
			ticker.tick().await;
			let next = fetch().await;
			trace!("poll fetch completed");
			if tx.send(next).is_err() {
				// Every receiver is gone; the owning scope was torn down
				break;
			}
		}
	});

	PollHandle { rx, task }
}
