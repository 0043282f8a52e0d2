//! Modal text prompts
//!
//! Only one prompt is open at a time. The UI edits `input` in place and the
//! editor acts on it when the prompt is submitted.

use starmap_math::Vec3;

/// Editing mode waiting behind the password prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Lanes,
    AddSystem,
}

/// What a prompt is asking for
#[derive(Debug, Clone, PartialEq)]
pub enum PromptKind {
    /// Name for a system about to be created at `world`
    NewSystem { world: Vec3 },
    /// New name for an existing system
    Rename { id: String },
    /// Edit password; `then` is entered on success
    Password { then: EditMode },
}

/// An open prompt
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
    /// Shown under the field after a failed submit
    pub error: Option<String>,
}

impl Prompt {
    pub fn new_system(world: Vec3, default_name: String) -> Self {
        Self {
            kind: PromptKind::NewSystem { world },
            input: default_name,
            error: None,
        }
    }

    pub fn rename(id: impl Into<String>, current: impl Into<String>) -> Self {
        Self {
            kind: PromptKind::Rename { id: id.into() },
            input: current.into(),
            error: None,
        }
    }

    pub fn password(then: EditMode) -> Self {
        Self {
            kind: PromptKind::Password { then },
            input: String::new(),
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            PromptKind::NewSystem { .. } => "Name for new system:",
            PromptKind::Rename { .. } => "Rename system:",
            PromptKind::Password { .. } => "Edit password:",
        }
    }

    /// Input should be masked
    pub fn is_secret(&self) -> bool {
        matches!(self.kind, PromptKind::Password { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_prefill() {
        let prompt = Prompt::new_system(Vec3::ZERO, "New System 9".to_string());
        assert_eq!(prompt.input, "New System 9");
        assert_eq!(prompt.title(), "Name for new system:");
        assert!(!prompt.is_secret());
    }

    #[test]
    fn test_password_prompt_is_secret_and_empty() {
        let prompt = Prompt::password(EditMode::Lanes);
        assert!(prompt.is_secret());
        assert!(prompt.input.is_empty());
    }
}
