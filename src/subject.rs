use std::cell::RefCell;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::future::{join_all, LocalBoxFuture};
use futures::FutureExt;
use smallvec::SmallVec;

use crate::addr::RcAddr;
use crate::completion::Completion;
use crate::failure::{Failure, FailureHook, ObserverError};
use crate::options::SubjectOptions;
use crate::owner::{Owner, OwnerId};

pub type ObserverFn<T> = dyn Fn(Option<&T>, Option<&T>) -> Completion;

/// Callback receiving `(new_state, previous_state)`.
///
/// The `Rc` allocation is the identity of the observer: keep the value
/// returned by `register` around to unregister it later.
pub type Observer<T> = Rc<ObserverFn<T>>;

/// Wraps a closure into an [`Observer`].
///
/// The closure may return `()`, a `Result<(), E>` or a [`Completion`].
pub fn observer<T, R, F>(func: F) -> Observer<T>
where
	T: 'static,
	R: Into<Completion>,
	F: Fn(Option<&T>, Option<&T>) -> R + 'static,
{
	Rc::new(move |new: Option<&T>, previous: Option<&T>| func(new, previous).into())
}

const INLINE: usize = 4;

pub struct Subject<T> {
	body: Rc<SubjectBody<T>>,
}

struct SubjectBody<T> {
	state: RefCell<Option<Rc<T>>>,
	observers: RefCell<SmallVec<[Registration<T>; INLINE]>>,
	reporter: Reporter,
}

struct Registration<T> {
	observer: RcAddr<ObserverFn<T>>,
	owner: OwnerId,
}

#[derive(Clone)]
struct Reporter {
	name: &'static str,
	hook: Option<FailureHook>,
}

impl<T> Clone for Subject<T> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl<T> Default for Subject<T>
where
	T: 'static,
{
	fn default() -> Self {
		Subject::new()
	}
}

impl<T> Subject<T>
where
	T: 'static,
{
	pub fn new() -> Self {
		Self::with_options(SubjectOptions::default())
	}

	pub fn with_options(options: SubjectOptions<T>) -> Self {
		let SubjectOptions {
			initial_state,
			name,
			on_failure,
		} = options;

		Subject {
			body: Rc::new(SubjectBody {
				state: RefCell::new(initial_state.map(Rc::new)),
				observers: RefCell::new(SmallVec::new_const()),
				reporter: Reporter {
					name,
					hook: on_failure,
				},
			}),
		}
	}

	#[inline]
	pub fn name(&self) -> &'static str {
		self.body.reporter.name
	}

	/// Appends `observer` to the registry under `owner` and hands it back.
	/// The same observer may be registered several times; each record
	/// is invoked on its own.
	pub fn register_observer(&self, observer: Observer<T>, owner: &Owner) -> Observer<T> {
		self.body.register(observer, owner.id())
	}

	/// Removes every record of `observer`, whoever owns it.
	pub fn unregister_observer(&self, observer: &Observer<T>) {
		self.body.unregister(observer)
	}

	pub fn unregister_observers_of_owner(&self, owner: &Owner) {
		self.body.unregister_owner(owner.id())
	}

	pub fn unregister_all_observers(&self) {
		self.body.clear()
	}

	/// Replaces the current state and calls every registered observer
	/// with `(new, previous)` in registration order.
	///
	/// The registry is snapshotted first: observers added or removed while
	/// the pass runs do not change who is called by this pass. A panicking
	/// observer is reported and skipped, the rest still run.
	///
	/// The returned future settles once every deferred completion has
	/// settled, successfully or not. It never reports failures itself;
	/// use [`SubjectOptions::on_failure`] to see them.
	pub fn notify_observers(&self, state: impl Into<Option<T>>) -> Notified {
		self.body.notify(state.into().map(Rc::new))
	}

	#[inline]
	pub fn get_current_state(&self) -> Option<Rc<T>> {
		self.body.state.borrow().clone()
	}

	pub fn observer_count(&self) -> usize {
		self.body.observers.borrow().len()
	}

	pub(crate) fn register_as(&self, observer: Observer<T>, owner: OwnerId) -> Observer<T> {
		self.body.register(observer, owner)
	}

	pub(crate) fn unregister_owner(&self, owner: OwnerId) {
		self.body.unregister_owner(owner)
	}
}

impl<T> SubjectBody<T>
where
	T: 'static,
{
	fn register(&self, observer: Observer<T>, owner: OwnerId) -> Observer<T> {
		let mut observers = self.observers.borrow_mut();
		observers.push(Registration {
			observer: RcAddr::new(observer.clone()),
			owner,
		});

		tracing::debug!(
			subject = self.reporter.name,
			?owner,
			observers = observers.len(),
			"observer registered"
		);

		observer
	}

	fn unregister(&self, observer: &Observer<T>) {
		let mut observers = self.observers.borrow_mut();
		let before = observers.len();
		observers.retain(|r| r.observer != *observer);

		tracing::debug!(
			subject = self.reporter.name,
			removed = before - observers.len(),
			"observer unregistered"
		);
	}

	fn unregister_owner(&self, owner: OwnerId) {
		let mut observers = self.observers.borrow_mut();
		let before = observers.len();
		observers.retain(|r| r.owner != owner);

		tracing::debug!(
			subject = self.reporter.name,
			?owner,
			removed = before - observers.len(),
			"observers of owner unregistered"
		);
	}

	fn clear(&self) {
		let mut observers = self.observers.borrow_mut();
		let removed = observers.len();
		observers.clear();

		tracing::debug!(subject = self.reporter.name, removed, "all observers unregistered");
	}

	fn notify(&self, next: Option<Rc<T>>) -> Notified {
		let previous = std::mem::replace(&mut *self.state.borrow_mut(), next.clone());

		// No borrow may outlive this statement: observers are free
		// to touch the registry while we call them.
		let snapshot = self
			.observers
			.borrow()
			.iter()
			.map(|r| Rc::clone(&*r.observer))
			.collect::<SmallVec<[Observer<T>; INLINE]>>();

		let mut pending = Vec::new();
		for observer in &snapshot {
			let called = catch_unwind(AssertUnwindSafe(|| {
				(**observer)(next.as_deref(), previous.as_deref())
			}));

			match called {
				Ok(Completion::Immediate) => {}
				Ok(Completion::Failed(err)) => self.reporter.report(Failure::Rejected(err)),
				Ok(Completion::Deferred(future)) => pending.push(self.reporter.settle(future)),
				Err(payload) => self.reporter.report(Failure::from_panic(payload)),
			}
		}

		tracing::trace!(
			subject = self.reporter.name,
			observers = snapshot.len(),
			deferred = pending.len(),
			"observers notified"
		);

		Notified::new(pending)
	}
}

impl Reporter {
	fn report(&self, failure: Failure) {
		tracing::warn!(subject = self.name, error = %failure, "observer failed");
		if let Some(hook) = &self.hook {
			hook(&failure)
		}
	}

	fn settle(
		&self,
		future: LocalBoxFuture<'static, Result<(), ObserverError>>,
	) -> LocalBoxFuture<'static, ()> {
		let reporter = self.clone();
		AssertUnwindSafe(future)
			.catch_unwind()
			.map(move |settled| match settled {
				Ok(Ok(())) => {}
				Ok(Err(err)) => reporter.report(Failure::Rejected(err)),
				Err(payload) => reporter.report(Failure::from_panic(payload)),
			})
			.boxed_local()
	}
}

/// Completion of one notification pass.
///
/// Deferred observer work is driven by polling this future and runs
/// concurrently; dropping it drops that work.
#[must_use = "deferred observer work only runs while `Notified` is polled"]
pub struct Notified {
	pending: Option<LocalBoxFuture<'static, ()>>,
}

impl Notified {
	fn new(pending: Vec<LocalBoxFuture<'static, ()>>) -> Self {
		if pending.is_empty() {
			return Notified { pending: None };
		}

		Notified {
			pending: Some(join_all(pending).map(|_| ()).boxed_local()),
		}
	}

	/// `true` once nothing is left to wait for.
	pub fn is_settled(&self) -> bool {
		self.pending.is_none()
	}
}

impl Future for Notified {
	type Output = ();

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
		let Some(pending) = self.pending.as_mut() else {
			return Poll::Ready(());
		};

		match pending.as_mut().poll(cx) {
			Poll::Ready(()) => {
				self.pending = None;
				Poll::Ready(())
			}
			Poll::Pending => Poll::Pending,
		}
	}
}

impl std::fmt::Debug for Notified {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Notified")
			.field("settled", &self.is_settled())
			.finish()
	}
}

impl<T> std::fmt::Debug for Subject<T>
where
	T: std::fmt::Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Subject")
			.field("name", &self.body.reporter.name)
			.field("state", &self.body.state.borrow())
			.field("observers", &self.body.observers.borrow().len())
			.finish()
	}
}
