pub mod handlers;
pub mod report;

pub use handlers::winners;
pub use report::{build_report, GameWinners, WinnerEntry};
