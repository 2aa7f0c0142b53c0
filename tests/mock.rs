#![allow(dead_code)]

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use mockall::*;
use observe_subject::{observer, Failure, Observer, Subject, SubjectOptions};

#[automock]
pub trait Spy {
	fn trigger(&self, new: Option<String>, previous: Option<String>);
}

#[derive(Clone)]
pub struct SharedMock(Rc<RefCell<MockSpy>>);

impl SharedMock {
	pub fn new() -> SharedMock {
		SharedMock(Rc::new(RefCell::new(MockSpy::new())))
	}

	pub fn get<'a>(&'a self) -> RefMut<'a, MockSpy> {
		return self.0.borrow_mut();
	}

	/// Observer forwarding every notification to the spy.
	pub fn observer(&self) -> Observer<&'static str> {
		let mock = self.clone();
		observer(move |new: Option<&&'static str>, previous: Option<&&'static str>| {
			mock.get()
				.trigger(new.map(|s| s.to_string()), previous.map(|s| s.to_string()))
		})
	}
}

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_max_level(tracing::Level::TRACE)
		.with_test_writer()
		.try_init();
}

/// Subject that turns any observer failure into a test failure,
/// so mock expectations broken inside observers are not swallowed.
pub fn strict<T: 'static>() -> Subject<T> {
	init_tracing();
	Subject::with_options(
		SubjectOptions::new()
			.name("strict")
			.on_failure(|failure: &Failure| panic!("{failure}")),
	)
}

/// Subject collecting failures into the returned list.
pub fn recording<T: 'static>() -> (Subject<T>, Rc<RefCell<Vec<String>>>) {
	init_tracing();
	let failures = Rc::new(RefCell::new(Vec::new()));
	let subject = Subject::with_options(SubjectOptions::new().name("recording").on_failure({
		let failures = failures.clone();
		move |failure: &Failure| failures.borrow_mut().push(failure.to_string())
	}));

	(subject, failures)
}
