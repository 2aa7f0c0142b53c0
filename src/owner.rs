use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Groups registrations made by one consumer so they can be
/// removed together. Every `Owner` is unique for the process lifetime.
///
/// An owner is deliberately not `Clone`: whoever holds it is the only
/// one able to bulk-unregister its observers.
pub struct Owner {
	id: OwnerId,
}

/// Copyable key stored next to each registration.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct OwnerId(u64);

impl Owner {
	pub fn new() -> Self {
		Owner {
			id: OwnerId(NEXT_OWNER.fetch_add(1, Ordering::Relaxed)),
		}
	}

	#[inline]
	pub fn id(&self) -> OwnerId {
		self.id
	}
}

impl Default for Owner {
	fn default() -> Self {
		Owner::new()
	}
}

impl Debug for Owner {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.id.fmt(f)
	}
}

impl Debug for OwnerId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Owner#{}", self.0)
	}
}
