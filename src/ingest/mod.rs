/// Data acquisition from the PEGELONLINE API.
///
/// Submodules:
/// - `cache` — bounded, time-scoped response store behind a trait.
/// - `fetch` — the memoizing GET-and-decode fetcher and its transport seam.
/// - `pegelonline` — endpoint URLs and payload decoding.

pub mod cache;
pub mod fetch;
pub mod pegelonline;
