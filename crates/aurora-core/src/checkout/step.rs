use serde::Serialize;
use strum::Display;

/// The four screens of the checkout wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
pub enum CheckoutStep {
    #[strum(serialize = "Booking Details")]
    Details,
    #[strum(serialize = "Traveler Information")]
    TravelerInfo,
    #[strum(serialize = "Payment")]
    Payment,
    #[strum(serialize = "Confirmation")]
    Confirmation,
}

impl CheckoutStep {
    pub const ALL: [CheckoutStep; 4] = [
        Self::Details,
        Self::TravelerInfo,
        Self::Payment,
        Self::Confirmation,
    ];

    /// 1-based position shown in the progress indicator.
    pub fn number(self) -> u8 {
        match self {
            Self::Details => 1,
            Self::TravelerInfo => 2,
            Self::Payment => 3,
            Self::Confirmation => 4,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Details => None,
            Self::TravelerInfo => Some(Self::Details),
            Self::Payment => Some(Self::TravelerInfo),
            Self::Confirmation => Some(Self::Payment),
        }
    }

    /// Whether travelers can still be added or removed on this step.
    pub fn allows_traveler_edits(self) -> bool {
        matches!(self, Self::Details | Self::TravelerInfo)
    }
}
