use std::ops::Deref;
use std::rc::Rc;

use crate::owner::Owner;
use crate::subject::{Observer, Subject};

/// Subscribe-only view over a [`Subject`].
///
/// Implementors can register and unregister observers but can never
/// publish a new state.
pub trait Observe {
	/// State type the observers of this view receive.
	type Value: 'static;
	type State;

	fn get_current_state(&self) -> Self::State;

	/// Returns `observer` so it can be used as the handle for [`Observe::unregister`].
	fn register(&self, observer: Observer<Self::Value>) -> Observer<Self::Value>;

	fn unregister(&self, observer: &Observer<Self::Value>);

	/// Removes every registration made through this view, and only those.
	fn unregister_all_observers(&self);

	/// Releases all registrations of this view when the returned
	/// guard is dropped.
	fn guard(self) -> ObservableGuard<Self>
	where
		Self: Sized,
	{
		ObservableGuard { inner: self }
	}
}

/// Watches the state of a [`Subject`].
///
/// Every registration is tagged with an owner private to this instance,
/// so [`Observe::unregister_all_observers`] leaves other views of the
/// same subject untouched.
pub struct Observable<T> {
	subject: Subject<T>,
	owner: Owner,
}

impl<T> Observable<T>
where
	T: 'static,
{
	pub fn new(subject: Subject<T>) -> Self {
		Observable {
			subject,
			owner: Owner::new(),
		}
	}
}

impl<T> Observe for Observable<T>
where
	T: 'static,
{
	type Value = T;
	type State = Option<Rc<T>>;

	#[inline]
	fn get_current_state(&self) -> Option<Rc<T>> {
		self.subject.get_current_state()
	}

	fn register(&self, observer: Observer<T>) -> Observer<T> {
		self.subject.register_as(observer, self.owner.id())
	}

	fn unregister(&self, observer: &Observer<T>) {
		self.subject.unregister_observer(observer)
	}

	fn unregister_all_observers(&self) {
		self.subject.unregister_owner(self.owner.id())
	}
}

impl<T> From<Subject<T>> for Observable<T>
where
	T: 'static,
{
	fn from(subject: Subject<T>) -> Self {
		Observable::new(subject)
	}
}

impl<T: 'static> std::fmt::Debug for Observable<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Observable")
			.field("subject", &self.subject.name())
			.field("owner", &self.owner)
			.finish()
	}
}

/// Scoped view: unregisters everything the wrapped view registered
/// when dropped.
pub struct ObservableGuard<O: Observe> {
	inner: O,
}

impl<O: Observe> Deref for ObservableGuard<O> {
	type Target = O;
	fn deref(&self) -> &Self::Target {
		&self.inner
	}
}

impl<O: Observe> Drop for ObservableGuard<O> {
	fn drop(&mut self) {
		self.inner.unregister_all_observers()
	}
}
