//! Controllers that bind timelines to scroll: pinned sections and one-shot reveals.

pub mod controller;
pub mod playhead;
pub mod reveal;
