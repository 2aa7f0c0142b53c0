use std::any::Any;
use std::rc::Rc;

pub type ObserverError = Box<dyn std::error::Error + 'static>;

/// Called once for every observer that failed during a notification.
pub type FailureHook = Rc<dyn Fn(&Failure)>;

/// An observer failure. Failures are reported, never propagated
/// to the caller of `notify_observers`.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
	#[error("observer panicked: {message}")]
	Panicked { message: String },

	#[error("observer rejected: {0}")]
	Rejected(ObserverError),
}

impl Failure {
	pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
		let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
			(*s).to_owned()
		} else if let Some(s) = payload.downcast_ref::<String>() {
			s.clone()
		} else {
			"<non-string panic payload>".to_owned()
		};

		Failure::Panicked { message }
	}

	pub fn is_panic(&self) -> bool {
		matches!(self, Failure::Panicked { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::Failure;

	#[test]
	fn decodes_panic_payloads() {
		let literal = Failure::from_panic(Box::new("kaboom"));
		assert!(literal.is_panic());
		assert_eq!(literal.to_string(), "observer panicked: kaboom");

		let formatted = Failure::from_panic(Box::new(format!("code {}", 7)));
		assert_eq!(formatted.to_string(), "observer panicked: code 7");

		let opaque = Failure::from_panic(Box::new(42_u8));
		assert_eq!(opaque.to_string(), "observer panicked: <non-string panic payload>");
	}

	#[test]
	fn rejections_are_not_panics() {
		let rejected = Failure::Rejected("boom".into());
		assert!(!rejected.is_panic());
		assert_eq!(rejected.to_string(), "observer rejected: boom");
	}
}
