//! Edit-mode password gate
//!
//! This is a convenience lock against accidental edits, not security: the
//! password lives in plain text in the configuration.

/// Session lock guarding the editing modes
#[derive(Clone, Debug)]
pub struct AccessGate {
    password: String,
    unlocked: bool,
}

impl AccessGate {
    /// An empty password leaves the gate permanently open
    pub fn new(password: impl Into<String>) -> Self {
        let password = password.into();
        let unlocked = password.is_empty();
        Self { password, unlocked }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Whether a password is configured at all
    pub fn is_gated(&self) -> bool {
        !self.password.is_empty()
    }

    /// Try to unlock; stays unlocked for the rest of the session on success
    pub fn unlock(&mut self, attempt: &str) -> bool {
        if self.unlocked || attempt == self.password {
            if !self.unlocked {
                log::info!("Editing unlocked");
            }
            self.unlocked = true;
        } else {
            log::warn!("Wrong edit password");
        }
        self.unlocked
    }

    /// Lock again; no-op when no password is configured
    pub fn lock(&mut self) {
        if self.is_gated() {
            self.unlocked = false;
            log::info!("Editing locked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_with_password() {
        let mut gate = AccessGate::new("starmap");
        assert!(!gate.is_unlocked());
        assert!(!gate.unlock("wrong"));
        assert!(gate.unlock("starmap"));
        assert!(gate.is_unlocked());
    }

    #[test]
    fn test_lock_again() {
        let mut gate = AccessGate::new("pw");
        gate.unlock("pw");
        gate.lock();
        assert!(!gate.is_unlocked());
    }

    #[test]
    fn test_empty_password_never_locks() {
        let mut gate = AccessGate::new("");
        assert!(gate.is_unlocked());
        assert!(!gate.is_gated());
        gate.lock();
        assert!(gate.is_unlocked());
    }
}
