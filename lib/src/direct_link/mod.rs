//! Resources needed to serve files through direct links
//!
//! Direct links are enabled per folder. Their access logs and the IP blacklist applied to
//! them are managed here as well.

pub mod blacklist;
pub mod link;
pub mod logs;
