//! Run errors and their process exit codes.

use sinadef_common::SinadefError;

/// Exit code for configuration and logging setup failures.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for an unreadable or unusable input file.
pub const EXIT_INPUT: u8 = 3;
/// Exit code for rendering and export failures.
pub const EXIT_OUTPUT: u8 = 4;
/// Exit code when no chart could be built.
pub const EXIT_ALL_FAILED: u8 = 5;

/// Why a run stopped, tagged by the stage that failed.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(SinadefError),

    /// The input file could not be loaded.
    #[error(transparent)]
    Input(SinadefError),

    /// Charts could not be rendered or exported.
    #[error(transparent)]
    Output(SinadefError),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// Every chart of the run failed to build.
    #[error("All {attempted} chart(s) failed to build")]
    AllChartsFailed {
        /// Charts attempted.
        attempted: usize,
    },
}

impl CliError {
    /// Process exit code for this error.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Logging(_) => EXIT_CONFIG,
            Self::Input(_) => EXIT_INPUT,
            Self::Output(_) => EXIT_OUTPUT,
            Self::AllChartsFailed { .. } => EXIT_ALL_FAILED,
        }
    }
}

/// Result type for the command-line application.
pub type CliResult<T> = Result<T, CliError>;
