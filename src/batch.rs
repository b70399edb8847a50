use std::num::NonZeroUsize;

/// Most tracks the add endpoint is sent in one request.
pub const SPOTIFY_ADD_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(99).unwrap();

/// Most video ids YouTube accepts in one `watch_videos` lookup.
pub const YOUTUBE_LOOKUP_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(50).unwrap();

/// Splits `items` into contiguous batches of at most `max_size` elements.
///
/// The sequence is lazy and borrows `items`. Calling this again on the same
/// slice yields the same batches. An empty slice yields no batches at all.
pub fn batch<T>(items: &[T], max_size: NonZeroUsize) -> std::slice::Chunks<'_, T> {
    items.chunks(max_size.get())
}

/// Number of batches [`batch`] will produce for `len` items.
pub fn batch_count(len: usize, max_size: NonZeroUsize) -> usize {
    len.div_ceil(max_size.get())
}
