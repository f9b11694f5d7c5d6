// ── Domain model ──

pub mod booking;
pub mod catalog;
pub mod money;

pub use booking::{Booking, BookingRef, BookingStatus, BookingType, PaymentStatus, TravelerInfo};
pub use catalog::{BookingTarget, Destination, VacationPackage};
pub use money::Money;
