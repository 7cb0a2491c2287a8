//! Agent repository port and adapters.

pub mod contract;
pub mod local;

pub use contract::AgentRepository;
pub use local::LocalAgentRepository;
