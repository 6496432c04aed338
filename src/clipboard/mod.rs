use arboard::Clipboard;
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use which::which;

/// Where a copy ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Native,
    SystemTool(&'static str),
    Skipped,
    Failed,
}

impl CopyOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Native | Self::SystemTool(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClipboardBackend {
    pub name: &'static str,
    pub copy_cmd: &'static str,
    pub copy_args: &'static [&'static str],
}

pub const CLIPBOARD_BACKENDS: &[ClipboardBackend] = &[
    ClipboardBackend {
        name: "wl-copy",
        copy_cmd: "wl-copy",
        copy_args: &[],
    },
    ClipboardBackend {
        name: "xclip",
        copy_cmd: "xclip",
        copy_args: &["-selection", "clipboard"],
    },
    ClipboardBackend {
        name: "xsel",
        copy_cmd: "xsel",
        copy_args: &["--clipboard", "--input"],
    },
];

#[derive(Clone)]
pub struct ClipboardService {
    inner: Arc<ClipboardInner>,
}

struct ClipboardInner {
    native: Mutex<Option<Clipboard>>,
    backends: &'static [ClipboardBackend],
}

impl ClipboardService {
    pub fn new() -> Self {
        let native = match Clipboard::new() {
            Ok(cb) => Some(cb),
            Err(err) => {
                warn!(
                    "System clipboard backend unavailable ({}); falling back to clipboard tools",
                    err
                );
                None
            }
        };

        Self {
            inner: Arc::new(ClipboardInner {
                native: Mutex::new(native),
                backends: CLIPBOARD_BACKENDS,
            }),
        }
    }

    /// Skips the native clipboard and only tries the given tools.
    pub fn with_backends(backends: &'static [ClipboardBackend]) -> Self {
        Self {
            inner: Arc::new(ClipboardInner {
                native: Mutex::new(None),
                backends,
            }),
        }
    }

    /// Copies the meeting summary. Failures are logged, never returned.
    pub async fn copy_summary(&self, summary: &str) -> CopyOutcome {
        let outcome = self.copy_text(summary).await;
        if !outcome.succeeded() && outcome != CopyOutcome::Skipped {
            warn!("Failed to copy summary to clipboard; nothing was copied");
        }
        outcome
    }

    pub async fn copy_text(&self, text: &str) -> CopyOutcome {
        if text.is_empty() {
            return CopyOutcome::Skipped;
        }

        info!("Copying {} chars to clipboard", text.len());
        debug!("Text to copy: {}", text);

        {
            let mut native_guard = self.inner.native.lock().await;
            if let Some(clipboard) = native_guard.as_mut() {
                match clipboard.set_text(text) {
                    Ok(_) => return CopyOutcome::Native,
                    Err(err) => {
                        warn!(
                            "Primary clipboard backend failed ({}), disabling until restart",
                            err
                        );
                        *native_guard = None;
                    }
                }
            } else {
                debug!("Native clipboard backend unavailable; using system clipboard tools");
            }
        }

        self.copy_with_system_backends(text)
    }

    fn copy_with_system_backends(&self, text: &str) -> CopyOutcome {
        for backend in self.inner.backends {
            if which(backend.copy_cmd).is_err() {
                continue;
            }

            let mut cmd = Command::new(backend.copy_cmd);
            cmd.args(backend.copy_args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null());

            let Ok(mut child) = cmd.spawn() else {
                continue;
            };

            if let Some(mut stdin) = child.stdin.take() {
                if stdin.write_all(text.as_bytes()).is_err() {
                    let _ = child.kill();
                    let _ = child.wait();
                    continue;
                }
            }

            if let Ok(status) = child.wait() {
                if status.success() {
                    debug!("Text copied to clipboard with {}", backend.name);
                    return CopyOutcome::SystemTool(backend.name);
                }
            }
        }

        warn!("No clipboard tool (wl-copy/xclip/xsel) available for fallback");
        CopyOutcome::Failed
    }
}

impl Default for ClipboardService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING: &[ClipboardBackend] = &[ClipboardBackend {
        name: "missing",
        copy_cmd: "meetcost-no-such-clipboard-tool",
        copy_args: &[],
    }];

    const CAT: &[ClipboardBackend] = &[
        ClipboardBackend {
            name: "missing",
            copy_cmd: "meetcost-no-such-clipboard-tool",
            copy_args: &[],
        },
        ClipboardBackend {
            name: "cat",
            copy_cmd: "cat",
            copy_args: &[],
        },
    ];

    #[tokio::test]
    async fn test_empty_text_is_skipped() {
        let service = ClipboardService::with_backends(MISSING);
        assert_eq!(service.copy_text("").await, CopyOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_total_failure_is_reported_not_raised() {
        let service = ClipboardService::with_backends(MISSING);
        let outcome = service.copy_summary("Meeting Cost Summary\n").await;
        assert_eq!(outcome, CopyOutcome::Failed);
        assert!(!outcome.succeeded());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_falls_through_to_next_tool() {
        let service = ClipboardService::with_backends(CAT);
        let outcome = service.copy_summary("Total Meeting Cost: $75.00\n").await;
        assert_eq!(outcome, CopyOutcome::SystemTool("cat"));
        assert!(outcome.succeeded());
    }
}
