use serde::{Deserialize, Serialize};

pub const DEFAULT_AVATAR: &str = concat!(
    "https://images.unsplash.com/photo-1633332755192-727a05c4013d",
    "?w=400&auto=format&fit=crop&q=80"
);

/// Display name and avatar of the single local user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub avatar: String,
}

impl Profile {
    /// A blank or missing avatar falls back to [`DEFAULT_AVATAR`].
    pub fn new(name: impl Into<String>, avatar: Option<String>) -> Self {
        let avatar = avatar
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AVATAR.to_owned());
        Self {
            name: name.into(),
            avatar,
        }
    }

    /// An empty name means the one-time setup has not happened yet.
    pub fn is_configured(&self) -> bool {
        !self.name.is_empty()
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            avatar: DEFAULT_AVATAR.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_needs_setup() {
        let profile = Profile::default();
        assert!(!profile.is_configured());
        assert_eq!(profile.avatar, DEFAULT_AVATAR);
    }

    #[test]
    fn blank_avatar_uses_placeholder() {
        let profile = Profile::new("Ada", Some("  ".to_owned()));
        assert!(profile.is_configured());
        assert_eq!(profile.avatar, DEFAULT_AVATAR);

        let profile =
            Profile::new("Ada", Some("https://example.com/a.png".to_owned()));
        assert_eq!(profile.avatar, "https://example.com/a.png");
    }
}
