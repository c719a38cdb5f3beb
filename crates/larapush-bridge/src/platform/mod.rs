//! Per-framework dialects of the bridge
//!
//! Both dialects are thin shells over [`PushBridge`](crate::PushBridge); they
//! differ only in how arguments arrive and how replies are handed back.

pub mod flutter;
pub mod react_native;
