pub mod invoker;
pub mod resolver;
pub mod session;
pub mod wallet;
pub mod workflow;

pub use invoker::ContractHandle;
pub use resolver::ProfileResolver;
pub use session::GatewaySession;
pub use wallet::Wallet;
pub use workflow::{JournalWorkflow, StepOutcome, WorkflowOutcome, WorkflowSettings};
