/// Row-granular progress callback: receives the current work unit and
/// the total number of units, returns `false` to request cancellation.
///
/// Sequential passes report rows in order; parallel passes report
/// completion counts in whatever order workers finish. Callbacks on
/// parallel passes run concurrently, hence the `Sync` bound.
pub type ProgressFn<'a> = dyn Fn(usize, usize) -> bool + Sync + 'a;

/// How a cancellable pass ended. Cancellation is a cooperative outcome
/// requested by a [`ProgressFn`], distinct from an error: partial output
/// exists but must not be treated as a usable result.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
	Complete,
	Cancelled,
}

impl Status {
	pub fn is_cancelled(&self) -> bool {
		*self == Status::Cancelled
	}
}
