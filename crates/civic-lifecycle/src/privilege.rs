//! Authorization signal for status changes

use std::fmt;

/// What the current viewer is allowed to do.
///
/// Passed into the controller explicitly; rendering never decides it.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Privilege {
    /// May submit and browse reports
    #[default]
    Viewer,
    /// May also change status and read statistics
    Administrator { token: String },
}

impl Privilege {
    pub fn administrator(token: impl Into<String>) -> Self {
        Privilege::Administrator {
            token: token.into(),
        }
    }

    pub fn can_change_status(&self) -> bool {
        matches!(self, Privilege::Administrator { .. })
    }

    pub fn can_view_statistics(&self) -> bool {
        self.can_change_status()
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Privilege::Viewer => None,
            Privilege::Administrator { token } => Some(token),
        }
    }
}

impl fmt::Debug for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Privilege::Viewer => f.write_str("Viewer"),
            Privilege::Administrator { .. } => f.write_str("Administrator { token: <redacted> }"),
        }
    }
}
