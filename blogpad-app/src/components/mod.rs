pub mod banner;
pub mod post_form;

pub use banner::Banner;
pub use post_form::PostForm;
