//! Headless viewer service for pointmap.
//!
//! One dispatcher task owns the [`Viewer`](pointmap_core::Viewer); the HTTP API
//! translates control requests into dispatcher commands and exposes the
//! resulting drawing state and status.

pub mod config;
pub mod dispatch;
pub mod server;
