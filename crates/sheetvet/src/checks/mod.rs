//! Rule engine: independent checks producing per-sheet verdicts and
//! per-cell error locations.

mod outcome;
mod rules;

pub use outcome::{CheckResult, ErrorLocation, ErrorTracker};
pub use rules::{
    Check, CheckEngine, ChecksumCheck, ColumnsCheck, DataTypesCheck, MissingValuesCheck,
};
