use std::future::Future;

use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::failure::ObserverError;

/// What an observer hands back to the subject after being called.
///
/// `Deferred` work is collected by [`Subject::notify_observers`] and driven
/// by the returned [`Notified`] future.
///
/// [`Subject::notify_observers`]: crate::Subject::notify_observers
/// [`Notified`]: crate::Notified
pub enum Completion {
	Immediate,
	Failed(ObserverError),
	Deferred(LocalBoxFuture<'static, Result<(), ObserverError>>),
}

impl Completion {
	pub fn deferred<F, E>(future: F) -> Self
	where
		F: Future<Output = Result<(), E>> + 'static,
		E: Into<ObserverError> + 'static,
	{
		Completion::Deferred(
			future
				.map(|res| res.map_err(Into::<ObserverError>::into))
				.boxed_local(),
		)
	}

	pub fn is_deferred(&self) -> bool {
		matches!(self, Completion::Deferred(_))
	}
}

impl From<()> for Completion {
	fn from(_: ()) -> Self {
		Completion::Immediate
	}
}

impl<E> From<Result<(), E>> for Completion
where
	E: Into<ObserverError>,
{
	fn from(res: Result<(), E>) -> Self {
		match res {
			Ok(()) => Completion::Immediate,
			Err(e) => Completion::Failed(e.into()),
		}
	}
}

impl std::fmt::Debug for Completion {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Completion::Immediate => f.write_str("Immediate"),
			Completion::Failed(e) => f.debug_tuple("Failed").field(e).finish(),
			Completion::Deferred(_) => f.write_str("Deferred"),
		}
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::Completion;

	#[test]
	fn converts_observer_results() {
		assert!(matches!(Completion::from(()), Completion::Immediate));
		assert!(matches!(Completion::from(Ok::<(), &str>(())), Completion::Immediate));

		let Completion::Failed(err) = Completion::from(Err::<(), _>("nope")) else {
			panic!("expected a failed completion");
		};
		assert_eq!(err.to_string(), "nope");
	}

	#[test]
	fn deferred_maps_errors() {
		let completion = Completion::deferred(async { Err::<(), _>("later") });
		assert!(completion.is_deferred());
		assert!(!Completion::Immediate.is_deferred());

		let Completion::Deferred(future) = completion else {
			panic!("expected a deferred completion");
		};
		let err = block_on(future).unwrap_err();
		assert_eq!(err.to_string(), "later");
	}
}
