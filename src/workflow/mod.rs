pub mod session;
pub mod synthesis_flow;

pub use session::{GenerateOutcome, WorksheetSession};
pub use synthesis_flow::SynthesisFlow;
