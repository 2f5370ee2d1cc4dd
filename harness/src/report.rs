use docmodel::extract::{FileTests, ProgramTests, SymbolTests};
use docmodel::runner::TestRunner;
use futures::future::join_all;
use serde::Serialize;
use tracing::warn;

/// Reporting capability injected into the execution engine.
///
/// Files and symbols run concurrently, so implementations must be callable
/// from interleaved tasks; each call emits one complete report line.
pub trait Reporter: Send + Sync {
    fn file_header(&self, module: &str);
    fn file_no_tests(&self, module: &str);
    fn symbol_no_tests(&self, module: &str, symbol: &str);
    fn symbol_passed(&self, module: &str, symbol: &str, units: usize);
    fn symbol_failed(&self, module: &str, symbol: &str, errors: &[String]);
}

/// Default reporter: hierarchical console lines.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn file_header(&self, module: &str) {
        println!("{}:", module);
    }

    fn file_no_tests(&self, module: &str) {
        println!("{}: no doctests", module);
    }

    fn symbol_no_tests(&self, module: &str, symbol: &str) {
        println!("  {}.{}: no doctests", module, symbol);
    }

    fn symbol_passed(&self, module: &str, symbol: &str, units: usize) {
        let noun = if units == 1 { "test" } else { "tests" };
        println!("  ✓ {}.{} ({} {})", module, symbol, units, noun);
    }

    fn symbol_failed(&self, module: &str, symbol: &str, errors: &[String]) {
        println!("  ✗ {}.{}: {}", module, symbol, errors.join("; "));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolOutcome {
    Passed,
    Failed,
    Skipped,
}

/// Structured result of one run, the source of the process exit status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub symbols_passed: usize,
    pub symbols_failed: usize,
    pub symbols_skipped: usize,
    pub files_without_tests: usize,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.symbols_failed > 0
    }

    fn record(&mut self, outcome: SymbolOutcome) {
        match outcome {
            SymbolOutcome::Passed => self.symbols_passed += 1,
            SymbolOutcome::Failed => self.symbols_failed += 1,
            SymbolOutcome::Skipped => self.symbols_skipped += 1,
        }
    }

    fn absorb(&mut self, other: RunSummary) {
        self.symbols_passed += other.symbols_passed;
        self.symbols_failed += other.symbols_failed;
        self.symbols_skipped += other.symbols_skipped;
        self.files_without_tests += other.files_without_tests;
    }
}

/// Drives every extracted test through the runner and reports per symbol
/// and per file. Files, symbols within a file, and units within a symbol
/// all fan out concurrently; each level joins all of its children before
/// its parent settles. Runner failures are observed at the symbol level
/// only — nothing is cancelled and nothing propagates.
pub async fn run_program_tests(
    program: &ProgramTests,
    runner: &dyn TestRunner,
    reporter: &dyn Reporter,
) -> RunSummary {
    let per_file = join_all(
        program
            .files
            .iter()
            .map(|file| run_file_tests(file, runner, reporter)),
    )
    .await;

    let mut summary = RunSummary::default();
    for file_summary in per_file {
        summary.absorb(file_summary);
    }
    summary
}

async fn run_file_tests(
    file: &FileTests,
    runner: &dyn TestRunner,
    reporter: &dyn Reporter,
) -> RunSummary {
    let mut summary = RunSummary::default();

    if file.symbols.is_empty() {
        reporter.file_no_tests(&file.module_name);
        summary.files_without_tests += 1;
        return summary;
    }

    reporter.file_header(&file.module_name);
    let outcomes = join_all(
        file.symbols
            .iter()
            .map(|symbol| run_symbol_tests(&file.module_name, symbol, runner, reporter)),
    )
    .await;

    for outcome in outcomes {
        summary.record(outcome);
    }
    summary
}

async fn run_symbol_tests(
    module: &str,
    symbol: &SymbolTests,
    runner: &dyn TestRunner,
    reporter: &dyn Reporter,
) -> SymbolOutcome {
    if symbol.units.is_empty() {
        reporter.symbol_no_tests(module, &symbol.name);
        return SymbolOutcome::Skipped;
    }

    // All-settle join: every unit runs to completion even when a sibling
    // has already failed.
    let results = join_all(symbol.units.iter().map(|unit| runner.run_unit(unit))).await;

    let errors: Vec<String> = results
        .into_iter()
        .filter_map(|result| result.err())
        .map(|err| err.to_string())
        .collect();

    if errors.is_empty() {
        reporter.symbol_passed(module, &symbol.name, symbol.units.len());
        SymbolOutcome::Passed
    } else {
        warn!(
            "{} of {} test units failed under {}.{}",
            errors.len(),
            symbol.units.len(),
            module,
            symbol.name
        );
        reporter.symbol_failed(module, &symbol.name, &errors);
        SymbolOutcome::Failed
    }
}
