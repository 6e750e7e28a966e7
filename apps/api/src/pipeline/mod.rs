// Upload → processing → completion lifecycle and the operations built on it.
// The service owns all mutable state; handlers and the sweeper hold clones of it.

pub mod export;
pub mod handlers;
pub mod latency;
pub mod polling;
pub mod scheduler;
pub mod seed;
pub mod service;
pub mod sweeper;
pub mod upload;
