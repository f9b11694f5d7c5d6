// ── Multi-step checkout ──

pub mod draft;
pub mod machine;
pub mod step;
pub mod validate;

pub use draft::BookingDraft;
pub use machine::{BackOutcome, Checkout, CheckoutError};
pub use step::CheckoutStep;
pub use validate::{DetailsViolation, TravelerProblem, ValidationError};
