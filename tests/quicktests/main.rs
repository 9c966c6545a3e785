//! Property tests comparing `Tree` against the standard library's ordered map.

mod op;
mod persistent;

pub(crate) use op::Op;
