//! Property states, easing, keyframe tracks and the phase timeline.

pub mod ease;
pub mod props;
pub mod sequence;
pub mod timeline;
pub mod track;
