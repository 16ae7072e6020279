pub mod errors;
pub mod post;
pub mod user;

pub use errors::ErrorResponse;
pub use post::{Post, PostId, PostInput, PostListResponse, PostStatus};
pub use user::{AuthResponse, Credentials, SignupRequest, UserProfile};
