pub mod expiry;
pub mod mrz;

pub use expiry::ExpiryValidator;
pub use mrz::MrzValidator;
