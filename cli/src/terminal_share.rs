//! Clipboard and share support for a plain terminal.

use std::fs;
use std::path::PathBuf;

use chef_core::share::{ShareError, ShareTarget};

/// A terminal has no system clipboard or share sheet. Copied text goes to a
/// file when one is configured, otherwise to stdout. Native share is reported
/// as unsupported so the wizard falls back to a WhatsApp link.
#[derive(Debug, Default)]
pub struct TerminalShare {
    clipboard_file: Option<PathBuf>,
}

impl TerminalShare {
    pub fn new(clipboard_file: Option<PathBuf>) -> Self {
        Self { clipboard_file }
    }
}

impl ShareTarget for TerminalShare {
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), ShareError> {
        match &self.clipboard_file {
            Some(path) => {
                fs::write(path, text)?;
                tracing::debug!(path = %path.display(), "Recipe written to clipboard file");
            }
            None => println!("\n{text}\n"),
        }
        Ok(())
    }

    fn share(&mut self, _title: &str, _text: &str) -> Result<(), ShareError> {
        Err(ShareError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_writes_file() {
        let path = std::env::temp_dir().join(format!("chef-clipboard-{}.txt", std::process::id()));
        let mut target = TerminalShare::new(Some(path.clone()));
        target.copy_to_clipboard("Aloo Sabzi").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Aloo Sabzi");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_native_share_unsupported() {
        let mut target = TerminalShare::default();
        assert!(matches!(
            target.share("Aloo Sabzi", "text"),
            Err(ShareError::Unsupported)
        ));
    }
}
