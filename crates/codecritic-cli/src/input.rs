//! Reading submissions from files, stdin and the interactive prompt

use std::io::{self, BufRead, Read};
use std::path::PathBuf;

use codecritic_core::Result;

/// Where a one-shot submission comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

/// Read the raw (untrimmed) submission text
pub fn read_submission(source: &SubmissionSource) -> Result<String> {
    match source {
        SubmissionSource::Inline(code) => Ok(code.clone()),
        SubmissionSource::File(path) => Ok(std::fs::read_to_string(path)?),
        SubmissionSource::Stdin => {
            let mut code = String::new();
            io::stdin().read_to_string(&mut code)?;
            Ok(code)
        }
    }
}

/// One interactive prompt entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Code block terminated by an empty line (may itself be empty)
    Submit(String),
    Help,
    Exit,
}

/// Read lines until an empty line ends the block.
///
/// `help`, `exit` and `quit` are only recognised as the first line of a
/// block. End of input submits whatever was collected, or exits if nothing
/// was.
pub fn read_prompt<R: BufRead>(reader: &mut R) -> Result<Prompt> {
    let mut buffer = String::new();

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(if buffer.is_empty() {
                Prompt::Exit
            } else {
                Prompt::Submit(buffer)
            });
        }

        let line = line.trim_end_matches(['\n', '\r']);

        if buffer.is_empty() {
            match line.trim().to_lowercase().as_str() {
                "exit" | "quit" => return Ok(Prompt::Exit),
                "help" => return Ok(Prompt::Help),
                _ => {}
            }
        }

        if line.trim().is_empty() {
            return Ok(Prompt::Submit(buffer));
        }

        buffer.push_str(line);
        buffer.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn empty_line_submits_block() {
        let mut input = Cursor::new("def f():\n    return 1\n\nprint(2)\n");
        assert_eq!(
            read_prompt(&mut input).unwrap(),
            Prompt::Submit("def f():\n    return 1\n".to_string())
        );
        assert_eq!(
            read_prompt(&mut input).unwrap(),
            Prompt::Submit("print(2)\n".to_string())
        );
        assert_eq!(read_prompt(&mut input).unwrap(), Prompt::Exit);
    }

    #[test]
    fn bare_enter_submits_nothing() {
        let mut input = Cursor::new("   \n");
        assert_eq!(read_prompt(&mut input).unwrap(), Prompt::Submit(String::new()));
    }

    #[test]
    fn commands_only_on_first_line() {
        let mut input = Cursor::new("HELP\nquit\nx = 1\nexit\n\n");
        assert_eq!(read_prompt(&mut input).unwrap(), Prompt::Help);
        assert_eq!(read_prompt(&mut input).unwrap(), Prompt::Exit);
        assert_eq!(
            read_prompt(&mut input).unwrap(),
            Prompt::Submit("x = 1\nexit\n".to_string())
        );
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let mut input = Cursor::new("x = 1\r\n\r\n");
        assert_eq!(read_prompt(&mut input).unwrap(), Prompt::Submit("x = 1\n".to_string()));
    }

    #[test]
    fn inline_source_is_returned_untouched() {
        let source = SubmissionSource::Inline("  x = 1  ".to_string());
        assert_eq!(read_submission(&source).unwrap(), "  x = 1  ");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = SubmissionSource::File(PathBuf::from("/definitely/not/here.py"));
        assert!(matches!(
            read_submission(&source),
            Err(codecritic_core::Error::Io(_))
        ));
    }
}
