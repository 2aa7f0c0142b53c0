use std::ops::Deref;
use std::rc::Rc;

/// Compares an `Rc` by the address of its allocation,
/// ignoring the vtable part of fat pointers.
pub struct RcAddr<T: ?Sized> {
	ptr: Rc<T>,
}

impl<T: ?Sized> RcAddr<T> {
	pub fn new(ptr: Rc<T>) -> Self {
		RcAddr { ptr }
	}

	#[inline]
	pub fn same(a: &Rc<T>, b: &Rc<T>) -> bool {
		addr(a) == addr(b)
	}
}

#[inline]
fn addr<T: ?Sized>(ptr: &Rc<T>) -> *const () {
	Rc::as_ptr(ptr) as *const ()
}

impl<T: ?Sized> Clone for RcAddr<T> {
	fn clone(&self) -> Self {
		RcAddr {
			ptr: self.ptr.clone(),
		}
	}
}

impl<T: ?Sized> Deref for RcAddr<T> {
	type Target = Rc<T>;
	fn deref(&self) -> &Self::Target {
		&self.ptr
	}
}

impl<T: ?Sized> PartialEq for RcAddr<T> {
	fn eq(&self, other: &Self) -> bool {
		RcAddr::same(&self.ptr, &other.ptr)
	}
}

impl<T: ?Sized> PartialEq<Rc<T>> for RcAddr<T> {
	fn eq(&self, other: &Rc<T>) -> bool {
		RcAddr::same(&self.ptr, other)
	}
}

impl<T: ?Sized> Eq for RcAddr<T> {}
