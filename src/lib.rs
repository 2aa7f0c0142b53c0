//! A subject holding a current state, the observers registered on it,
//! and subscribe-only views over it.
//!
//! ```
//! use futures::executor::block_on;
//! use observe_subject::{observer, Observable, Observe, Subject, SubjectOptions};
//!
//! let subject = Subject::with_options(SubjectOptions::new().initial_state("idle"));
//! let observable = Observable::new(subject.clone());
//!
//! let handle = observable.register(observer(|new, previous| {
//!     assert_eq!(new, Some(&"running"));
//!     assert_eq!(previous, Some(&"idle"));
//! }));
//!
//! block_on(subject.notify_observers("running"));
//! observable.unregister(&handle);
//! ```

pub mod macros;

mod addr;
mod completion;
mod failure;
mod for_value;
mod observable;
mod options;
mod owner;
mod subject;

pub use completion::Completion;
pub use failure::{Failure, FailureHook, ObserverError};
pub use for_value::ObservableForValue;
pub use observable::{Observable, ObservableGuard, Observe};
pub use options::SubjectOptions;
pub use owner::{Owner, OwnerId};
pub use subject::{observer, Notified, Observer, ObserverFn, Subject};
