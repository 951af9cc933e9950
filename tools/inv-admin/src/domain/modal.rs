//! Modal dialogs drawn over the active tab.

use super::{Command, Form};

/// Yes/no prompt guarding a destructive command.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirm {
    pub message: String,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Form(Form),
    Confirm(Confirm),
}

impl Modal {
    pub fn confirm(message: impl Into<String>, command: Command) -> Self {
        Modal::Confirm(Confirm {
            message: message.into(),
            command,
        })
    }
}
