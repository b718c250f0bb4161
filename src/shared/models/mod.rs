//! Domain models shared by the server and any API client.

pub mod article;
pub mod user;

pub use article::{Article, AuthorSummary, Page, PageMeta, Tag};
pub use user::{PublicUser, Role, User};
