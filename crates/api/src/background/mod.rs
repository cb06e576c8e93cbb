//! Background jobs.
//!
//! Each submodule exposes a long-running `run` function meant for
//! `tokio::spawn`, stopped through a [`CancellationToken`].
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod counter_reconciliation;
