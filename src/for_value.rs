use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::addr::RcAddr;
use crate::completion::Completion;
use crate::observable::Observe;
use crate::owner::Owner;
use crate::subject::{Observer, ObserverFn, Subject};

/// Fires a zero-argument event each time the subject is notified with
/// a state equal to `value`.
///
/// Observers registered here are `Observer<()>` and are always called
/// with `(None, None)`. Their completion is forwarded to the subject, so
/// deferred work is awaited by [`Notified`](crate::Notified) as usual.
pub struct ObservableForValue<T> {
	subject: Subject<T>,
	value: Rc<T>,
	owner: Owner,
	registered: RefCell<Vec<Mapping<T>>>,
}

struct Mapping<T> {
	registered: Observer<T>,
	exact: RcAddr<ObserverFn<()>>,
}

impl<T> ObservableForValue<T>
where
	T: PartialEq + 'static,
{
	pub fn new(subject: Subject<T>, value: T) -> Self {
		ObservableForValue {
			subject,
			value: Rc::new(value),
			owner: Owner::new(),
			registered: RefCell::new(Vec::new()),
		}
	}

	pub fn value(&self) -> &T {
		&self.value
	}

	fn translate(&self, exact: Observer<()>) -> Observer<T> {
		let value = self.value.clone();
		Rc::new(move |new: Option<&T>, _: Option<&T>| {
			if new == Some(&*value) {
				(*exact)(None, None)
			} else {
				Completion::Immediate
			}
		})
	}
}

impl<T> Observe for ObservableForValue<T>
where
	T: PartialEq + 'static,
{
	type Value = ();
	type State = ();

	fn get_current_state(&self) {}

	fn register(&self, exact: Observer<()>) -> Observer<()> {
		let registered = self
			.subject
			.register_as(self.translate(exact.clone()), self.owner.id());

		self.registered.borrow_mut().push(Mapping {
			registered,
			exact: RcAddr::new(exact.clone()),
		});

		exact
	}

	fn unregister(&self, exact: &Observer<()>) {
		let mut removed = SmallVec::<[Observer<T>; 2]>::new();
		self.registered.borrow_mut().retain(|mapping| {
			if mapping.exact == *exact {
				removed.push(mapping.registered.clone());
				false
			} else {
				true
			}
		});

		for registered in &removed {
			self.subject.unregister_observer(registered);
		}
	}

	fn unregister_all_observers(&self) {
		self.subject.unregister_owner(self.owner.id());
		self.registered.borrow_mut().clear();
	}
}

impl<T> std::fmt::Debug for ObservableForValue<T>
where
	T: std::fmt::Debug + 'static,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ObservableForValue")
			.field("subject", &self.subject.name())
			.field("value", &self.value)
			.field("owner", &self.owner)
			.field("observers", &self.registered.borrow().len())
			.finish()
	}
}
