pub mod error;

pub use error::{MrzFormatError, PassportError};
