use std::sync::atomic::{
	AtomicBool,
	AtomicUsize,
	Ordering
};

use rayon::prelude::*;

use ttk_core::progress::{ProgressFn, Status};
use ttk_core::quantum::Quantum;
use ttk_core::surface::{Pixel, PixelSurface};

/// Runs `op` over every pixel cell and its auxiliary index, one rayon task
/// per row. The monitor is invoked once per finished row with a completion
/// count; rows already in flight may still finish after it asks to stop.
pub fn apply<F>(surface: &mut PixelSurface, monitor: Option<&ProgressFn>, op: F) -> Status
where
	F: Fn(&mut Pixel, &mut Quantum) + Sync,
{
	let width = surface.width();
	let rows = surface.height();
	if width == 0 || rows == 0 {
		return Status::Complete;
	}

	let halted = AtomicBool::new(false);
	let done = AtomicUsize::new(0);
	let (pixels, indexes) = surface.channels_mut();

	pixels
		.par_chunks_mut(width)
		.zip(indexes.par_chunks_mut(width))
		.for_each(|(row, row_indexes)| {
			if halted.load(Ordering::SeqCst) {
				return;
			}

			for (pixel, index) in row.iter_mut().zip(row_indexes.iter_mut()) {
				op(pixel, index);
			}

			if let Some(monitor) = monitor {
				let previous = done.fetch_add(1, Ordering::SeqCst);
				if !monitor(previous, rows) {
					halted.store(true, Ordering::SeqCst);
				}
			}
		});

	if halted.load(Ordering::SeqCst) {
		Status::Cancelled
	} else {
		Status::Complete
	}
}

/// Runs `op` over every colormap entry. Palette passes are not monitored;
/// they are tiny next to the pixel array.
pub fn apply_colormap<F>(surface: &mut PixelSurface, op: F)
where
	F: Fn(&mut Pixel) + Sync,
{
	surface.colormap_mut().par_iter_mut().for_each(|pixel| op(pixel));
}
