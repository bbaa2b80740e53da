pub mod agent;
pub mod complete;
pub mod message;
pub mod session;
pub mod task;
