//! Cancel-and-replace delayed tasks.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::{TimeoutHandle, set_timeout_with_handle};
use log::warn;

/// Something that can run a task later and forget it again.
pub trait Scheduler {
	/// Token for cancelling a scheduled task.
	type Handle;

	/// Run `task` once after `delay`. `None` if scheduling failed.
	fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<Self::Handle>;

	/// Stop a scheduled task from running.
	fn cancel(&self, handle: Self::Handle);
}

/// Browser timers via `setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
	type Handle = TimeoutHandle;

	fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<TimeoutHandle> {
		set_timeout_with_handle(task, delay)
			.inspect_err(|e| warn!("setTimeout failed: {e:?}"))
			.ok()
	}

	fn cancel(&self, handle: TimeoutHandle) {
		handle.clear();
	}
}

/// Runs only the most recent task, once the input has been quiet for `delay`.
pub struct Debouncer<S: Scheduler> {
	scheduler: S,
	delay: Duration,
	pending: Rc<RefCell<Option<S::Handle>>>,
}

impl<S: Scheduler> Debouncer<S>
where
	S::Handle: 'static,
{
	/// Debouncer that waits `delay` after the last call.
	pub fn new(scheduler: S, delay: Duration) -> Self {
		Self {
			scheduler,
			delay,
			pending: Rc::new(RefCell::new(None)),
		}
	}

	/// Replace any pending task with `task`.
	pub fn call(&self, task: impl FnOnce() + 'static) {
		self.cancel();
		let pending = self.pending.clone();
		let handle = self.scheduler.schedule(
			self.delay,
			Box::new(move || {
				pending.borrow_mut().take();
				task();
			}),
		);
		*self.pending.borrow_mut() = handle;
	}

	/// Drop the pending task, if any, without running it.
	pub fn cancel(&self) {
		if let Some(handle) = self.pending.borrow_mut().take() {
			self.scheduler.cancel(handle);
		}
	}

	/// A task is waiting to run.
	pub fn is_pending(&self) -> bool {
		self.pending.borrow().is_some()
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use std::cell::{Cell, RefCell};
	use std::rc::Rc;
	use std::time::Duration;

	use super::Scheduler;

	struct Timer {
		id: u64,
		due: Duration,
		task: Box<dyn FnOnce()>,
	}

	/// Deterministic scheduler driven by [`ManualScheduler::advance`].
	#[derive(Clone, Default)]
	pub struct ManualScheduler {
		now: Rc<Cell<Duration>>,
		next_id: Rc<Cell<u64>>,
		timers: Rc<RefCell<Vec<Timer>>>,
	}

	impl ManualScheduler {
		pub fn advance(&self, by: Duration) {
			let now = self.now.get() + by;
			self.now.set(now);
			loop {
				let due = {
					let mut timers = self.timers.borrow_mut();
					let next = timers
						.iter()
						.enumerate()
						.filter(|(_, t)| t.due <= now)
						.min_by_key(|(_, t)| (t.due, t.id))
						.map(|(i, _)| i);
					next.map(|i| timers.remove(i))
				};
				match due {
					Some(timer) => (timer.task)(),
					None => break,
				}
			}
		}

		pub fn pending(&self) -> usize {
			self.timers.borrow().len()
		}
	}

	impl Scheduler for ManualScheduler {
		type Handle = u64;

		fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<u64> {
			let id = self.next_id.get();
			self.next_id.set(id + 1);
			self.timers.borrow_mut().push(Timer {
				id,
				due: self.now.get() + delay,
				task,
			});
			Some(id)
		}

		fn cancel(&self, handle: u64) {
			self.timers.borrow_mut().retain(|t| t.id != handle);
		}
	}
}
