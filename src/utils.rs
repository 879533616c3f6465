/// Terminal progress feedback for network-bound commands
pub mod spinner;

pub use spinner::Spinner;
