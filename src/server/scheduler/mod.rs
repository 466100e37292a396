//! Cron jobs for automated tasks.

pub mod auto_approval;
