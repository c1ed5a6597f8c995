use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GasError {
    #[error("cannot aggregate gas prices over an empty validator set")]
    EmptyValidatorSet,

    #[error("validator {validator:?} has invalid {field}: {value:?}")]
    InvalidNumber {
        validator: String,
        field: &'static str,
        value: String,
    },

    #[error("reference gas price {reference} is below the submission margin {margin}")]
    PriceBelowMargin { reference: u64, margin: u64 },
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("failed to run `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {}", failure_output(.stdout, .stderr))]
    Failed {
        program: String,
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
}

fn failure_output<'a>(stdout: &'a str, stderr: &'a str) -> &'a str {
    match stderr.trim() {
        "" => stdout.trim(),
        stderr => stderr,
    }
}
