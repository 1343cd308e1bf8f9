//! Error handling module and error types

use std::process;

use colored::Colorize;

#[derive(Clone, Debug, PartialEq)]
pub enum FatalError {
    // Reader errors
    IoError(String),
    MalformedInput(String),

    // Tree errors
    UnrecognizedNodeKind(String),
}

pub struct ErrorHandler;

impl ErrorHandler {
    pub fn handle_error(error: FatalError) -> ! {
        let message = match error {
            FatalError::IoError(message) => message,
            FatalError::MalformedInput(message) => {
                format!("Malformed AST document: {}", message)
            }
            FatalError::UnrecognizedNodeKind(kind) => {
                format!("Unrecognized node kind: '{}'", kind)
            }
        };

        if cfg!(test) {
            panic!("Error: {}", message.red().clear());
        } else {
            eprintln!("Error: {}", message.red().clear());
            process::exit(1);
        }
    }

    pub fn handle_result<T>(result: Result<T, FatalError>) -> T {
        match result {
            Ok(val) => val,
            Err(error_type) => Self::handle_error(error_type),
        }
    }
}
