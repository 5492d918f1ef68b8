//! Process exit codes.

use photo_graph_core::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliExitCode {
    Success,
    /// The run or a store query failed.
    Failure,
    /// Configuration could not be loaded or is invalid.
    Config,
}

impl CliExitCode {
    pub fn code(self) -> i32 {
        match self {
            CliExitCode::Success => 0,
            CliExitCode::Failure => 1,
            CliExitCode::Config => 2,
        }
    }
}

pub fn exit_code_for_error(err: &CoreError) -> CliExitCode {
    match err {
        CoreError::ConfigError(_) => CliExitCode::Config,
        _ => CliExitCode::Failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(CliExitCode::Success.code(), 0);
        assert_eq!(CliExitCode::Failure.code(), 1);
        assert_eq!(CliExitCode::Config.code(), 2);
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            exit_code_for_error(&CoreError::ConfigError("bad cutoff".into())),
            CliExitCode::Config
        );
        assert_eq!(
            exit_code_for_error(&CoreError::StoreState("stale".into())),
            CliExitCode::Failure
        );
        assert_eq!(
            exit_code_for_error(&CoreError::store("disk full")),
            CliExitCode::Failure
        );
    }
}
