//! Internal scratch buffer management.
//!
//! This module provides a thread-local buffer pool so repeated
//! compress/uncompress cycles reuse their scratch space. It is an
//! implementation detail and not part of the public API.

mod pool;

pub(crate) use pool::Buffer;
