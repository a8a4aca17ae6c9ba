//! Identity models.

/// An authenticated visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// E-mail address; also the partition key of the remote cart record.
    pub email: String,

    /// Whether the user may use the back-office.
    pub is_admin: bool,
}

/// Who is browsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Identity {
    /// Unauthenticated visitor.
    #[default]
    Guest,

    /// Signed-in visitor.
    Authenticated(User),
}

impl Identity {
    /// Build an authenticated identity.
    pub fn user(email: impl Into<String>, is_admin: bool) -> Self {
        Self::Authenticated(User {
            email: email.into(),
            is_admin,
        })
    }

    /// E-mail of the signed-in visitor, if any.
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Guest => None,
            Self::Authenticated(user) => Some(&user.email),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Authenticated(User { is_admin: true, .. }))
    }
}
