pub mod project;
pub mod report;

pub use project::{load_project, ProjectError};
pub use report::{
    run_program_tests, ConsoleReporter, Reporter, RunSummary, SymbolOutcome,
};
