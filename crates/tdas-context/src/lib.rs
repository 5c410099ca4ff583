pub mod report;
pub mod session;

pub use report::{format_amount, summarize};
pub use session::{Session, SessionStats};
