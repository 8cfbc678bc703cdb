pub mod agent_executor;
pub mod compose;
pub mod context;
pub mod outlet;
pub mod plan;
pub mod research;
pub mod step_forward_agent;
pub mod types;
pub mod workflow;
