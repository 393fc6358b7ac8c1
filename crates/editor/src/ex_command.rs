//! Colon commands typed in command mode.

use crate::error::EditorError;

/// Characters a file or directory name may not contain.
pub const ILLEGAL_NAME_CHARS: [char; 7] = ['<', '>', ':', '"', '|', '?', '*'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExCommand {
    /// `w`
    Write,
    /// `q`
    Quit,
    /// `wq` or `x`
    WriteQuit,
    /// `newfile <name> [.]`; `here` is set by the trailing `.`
    NewFile { name: String, here: bool },
    /// `newdir <name> [.]`
    NewDir { name: String, here: bool },
}

impl ExCommand {
    /// Parse a command line (without the leading `:`).
    pub fn parse(input: &str) -> Result<Self, EditorError> {
        let unknown = || EditorError::UnrecognizedCommand(input.trim().to_string());
        let tokens: Vec<&str> = input.split_whitespace().collect();

        match tokens.as_slice() {
            ["w"] => Ok(ExCommand::Write),
            ["q"] => Ok(ExCommand::Quit),
            ["wq"] | ["x"] => Ok(ExCommand::WriteQuit),
            ["newfile", name, rest @ ..] => {
                let here = parse_marker(rest).ok_or_else(unknown)?;
                Ok(ExCommand::NewFile {
                    name: name.to_string(),
                    here,
                })
            }
            ["newdir", name, rest @ ..] => {
                let here = parse_marker(rest).ok_or_else(unknown)?;
                Ok(ExCommand::NewDir {
                    name: name.to_string(),
                    here,
                })
            }
            _ => Err(unknown()),
        }
    }
}

fn parse_marker(rest: &[&str]) -> Option<bool> {
    match rest {
        [] => Some(false),
        ["."] => Some(true),
        _ => None,
    }
}

/// Reject names that cannot be used as a path component.
pub fn validate_name(name: &str) -> Result<(), EditorError> {
    if name.is_empty() || name.contains(ILLEGAL_NAME_CHARS) {
        return Err(EditorError::InvalidName(name.to_string()));
    }
    Ok(())
}
