pub mod config;
pub mod extract;
pub mod loader;
pub mod package;
pub mod runner;
pub mod subprocess;
pub mod types;

pub use config::RunnerConfig;
pub use extract::{FileTests, ProgramTests, SymbolTests, TestUnit};
pub use loader::{load_program, LoadError};
pub use package::{locate_package, PackageDescriptor, PackageError, PackageManifest};
pub use runner::{RunnerError, RunnerResult, TestRunner};
pub use subprocess::SubprocessRunner;
pub use types::{CustomTag, Documentation, LinkedFile, LinkedProgram, LinkedSymbol, TagKind};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::extract::*;
    pub use crate::loader::*;
    pub use crate::package::*;
    pub use crate::runner::*;
    pub use crate::subprocess::*;
    pub use crate::types::*;
}
