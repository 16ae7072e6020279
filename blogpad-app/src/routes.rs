use shared::models::PostId;
use std::fmt;

/// Client-side screens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`: public post listing.
    Home,
    Login,
    Signup,
    /// `/admin`: dashboard, gated on a stored token only.
    Admin,
    /// `/edit-post/{id}`. No screen is registered for it yet.
    EditPost { id: PostId },
    NotFound,
}

impl Route {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::Admin => "/admin".to_string(),
            Self::EditPost { id } => format!("/edit-post/{id}"),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Maps a path back to a route; unknown paths become [`Route::NotFound`].
    #[must_use]
    pub fn recognize(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/admin" => Self::Admin,
            other => match other.strip_prefix("/edit-post/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::EditPost {
                    id: PostId::from(id),
                },
                _ => Self::NotFound,
            },
        }
    }

    /// Whether the screen exists in this application.
    #[must_use]
    pub fn is_implemented(&self) -> bool {
        !matches!(self, Self::EditPost { .. } | Self::NotFound)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Route::Signup.path(), "/signup");
        assert_eq!(Route::Admin.path(), "/admin");
        assert_eq!(
            Route::EditPost {
                id: PostId::Numeric(5)
            }
            .to_string(),
            "/edit-post/5"
        );
    }

    #[test]
    fn test_recognize_known_paths() {
        assert_eq!(Route::recognize("/"), Route::Home);
        assert_eq!(Route::recognize("/login"), Route::Login);
        assert_eq!(Route::recognize("/signup/"), Route::Signup);
        assert_eq!(Route::recognize("/admin"), Route::Admin);
        assert_eq!(
            Route::recognize("/edit-post/abc"),
            Route::EditPost {
                id: PostId::Text("abc".to_string())
            }
        );
    }

    #[test]
    fn test_recognize_unknown_paths() {
        assert_eq!(Route::recognize("/edit-post/"), Route::NotFound);
        assert_eq!(Route::recognize("/edit-post/1/2"), Route::NotFound);
        assert_eq!(Route::recognize("/posts"), Route::NotFound);
    }

    #[test]
    fn test_edit_screen_is_an_extension_point() {
        assert!(Route::Admin.is_implemented());
        assert!(
            !Route::EditPost {
                id: PostId::Numeric(1)
            }
            .is_implemented()
        );
    }
}
