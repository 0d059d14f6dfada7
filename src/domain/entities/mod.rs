pub mod cms_post;
pub mod session;
pub mod subscription;
pub mod user;
