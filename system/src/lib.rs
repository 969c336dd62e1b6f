mod cloud;
mod credentials;
mod error;
mod id;
mod mount;

pub use crate::cloud::*;
pub use crate::credentials::*;
pub use crate::error::*;
pub use crate::id::*;
pub use crate::mount::*;
