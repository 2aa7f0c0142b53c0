use std::rc::Rc;

use crate::failure::{Failure, FailureHook};

pub(crate) const UNNAMED: &str = "<unnamed>";

/// Construction options for a [`Subject`](crate::Subject).
pub struct SubjectOptions<T> {
	pub(crate) initial_state: Option<T>,
	pub(crate) name: &'static str,
	pub(crate) on_failure: Option<FailureHook>,
}

impl<T> Default for SubjectOptions<T> {
	fn default() -> Self {
		SubjectOptions {
			initial_state: None,
			name: UNNAMED,
			on_failure: None,
		}
	}
}

impl<T> SubjectOptions<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// State reported by `get_current_state` before the first notification.
	#[must_use]
	pub fn initial_state(mut self, state: T) -> Self {
		self.initial_state = Some(state);
		self
	}

	/// Label attached to log records of this subject.
	#[must_use]
	pub fn name(mut self, name: &'static str) -> Self {
		self.name = name;
		self
	}

	/// Receives every observer failure. Failures are still swallowed
	/// by the notification itself.
	#[must_use]
	pub fn on_failure(mut self, hook: impl Fn(&Failure) + 'static) -> Self {
		self.on_failure = Some(Rc::new(hook));
		self
	}
}
