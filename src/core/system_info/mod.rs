pub mod collector;
pub mod cpu;
pub mod load;
pub mod memory;
pub mod network;
pub mod ports;
pub mod processes;
pub mod services;
pub mod source;
pub mod storage;
pub mod types;
pub mod uptime;
pub mod users;

pub use collector::collect_report;
pub use source::SystemSource;
pub use types::*;
