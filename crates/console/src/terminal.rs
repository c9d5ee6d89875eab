// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Terminal implementations of the user-interaction collaborators.

use async_trait::async_trait;
use chapter_desk::{ConfirmPrompt, NoticeLevel, Notifier};

/// Prints transient notices to the terminal.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success => println!("[ok] {message}"),
            NoticeLevel::Warning => println!("[warn] {message}"),
            NoticeLevel::Error => eprintln!("[error] {message}"),
        }
    }
}

/// Asks for confirmation on stdin. Anything but `y`/`yes` declines.
pub struct StdinConfirm;

#[async_trait]
impl ConfirmPrompt for StdinConfirm {
    async fn confirm(&self, title: &str, message: &str) -> bool {
        let title: String = title.to_string();
        let message: String = message.to_string();
        tokio::task::spawn_blocking(move || {
            println!("{title}");
            println!("{message} [y/N]");
            let mut line: String = String::new();
            if std::io::stdin().read_line(&mut line).is_err() {
                return false;
            }
            matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
        })
        .await
        .unwrap_or(false)
    }
}

/// Confirms every prompt; backs the `--yes` flag.
pub struct AutoConfirm;

#[async_trait]
impl ConfirmPrompt for AutoConfirm {
    async fn confirm(&self, _title: &str, _message: &str) -> bool {
        true
    }
}
