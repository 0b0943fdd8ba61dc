//! External editor launcher.
//!
//! Opening a note suspends the whole UI until the editor exits; there is
//! no concurrency here on purpose. The editor inherits the terminal.

use std::io;
use std::path::Path;
use std::process::Command;

use log::{info, warn};

pub trait Editor {
    /// Edit `path` and block until the editor exits.
    fn edit(&mut self, path: &Path) -> io::Result<()>;
}

pub struct ExternalEditor {
    program: String,
}

impl ExternalEditor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Editor for ExternalEditor {
    fn edit(&mut self, path: &Path) -> io::Result<()> {
        info!("Launching editor: {} {}", self.program, path.display());
        let status = Command::new(&self.program).arg(path).status().map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("could not start editor '{}': {}", self.program, e),
            )
        })?;
        if !status.success() {
            // The draft is still read back; a crashed editor may have saved.
            warn!("Editor exited with {}", status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_an_error() {
        let mut editor = ExternalEditor::new("notes-term-no-such-editor-xyz");
        let err = editor.edit(Path::new("/tmp/whatever.txt")).unwrap_err();
        assert!(err.to_string().contains("could not start editor"));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_not_an_error() {
        let mut editor = ExternalEditor::new("false");
        assert!(editor.edit(Path::new("/tmp/whatever.txt")).is_ok());
    }
}
