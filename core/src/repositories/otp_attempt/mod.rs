pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;


pub use r#trait::OtpAttemptRepository;
pub use memory::InMemoryOtpAttemptRepository;
