//! Scroll input: offset-to-progress mapping, notification fan-out, the host surface seam and
//! scrub smoothing.

pub mod bus;
pub mod mapper;
pub mod scrub;
pub mod surface;
