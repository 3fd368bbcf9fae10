pub mod error;
pub mod url;

pub use error::report;
pub use self::url::{NormalizedUrl, normalize};
