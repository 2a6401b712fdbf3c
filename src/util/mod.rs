//! Browser helpers kept apart from routing logic.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything here touches `web-sys` behind the `hydrate` feature and
//! degrades to no-ops or errors in server and test builds.

pub mod logging;
pub mod storage;
