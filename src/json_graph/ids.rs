//! Node identifier sources.

use uuid::Uuid;

/// Hands out node ids for a single build.
///
/// Every call must return an id not returned before by the same generator.
pub trait IdGenerator {
	fn next_id(&mut self) -> String;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
	fn next_id(&mut self) -> String {
		(**self).next_id()
	}
}

/// Random v4 UUIDs in simple (hyphen-free) form.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
	fn next_id(&mut self) -> String {
		Uuid::new_v4().simple().to_string()
	}
}

/// Deterministic `n0`, `n1`, ... ids. Used wherever reproducible output matters.
#[derive(Clone, Debug)]
pub struct SequentialIds {
	next: u64,
}

impl SequentialIds {
	pub fn new() -> Self {
		Self { next: 0 }
	}
}

impl Default for SequentialIds {
	fn default() -> Self {
		Self::new()
	}
}

impl IdGenerator for SequentialIds {
	fn next_id(&mut self) -> String {
		let id = format!("n{}", self.next);
		self.next += 1;
		id
	}
}
