use crate::{HiddenReason, OfferVisibility};

/// Visibility change a company or administrator can request for one offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityAction {
    Hide,
    Enable,
    Disable { admin_reason: String },
}

impl VisibilityAction {
    /// Whether an offer currently in `visibility` accepts this action.
    ///
    /// Offers disabled by an administrator or belonging to a blocked company
    /// cannot be changed from the offer list.
    pub fn is_allowed_from(&self, visibility: OfferVisibility) -> bool {
        match (self, visibility) {
            (VisibilityAction::Hide, OfferVisibility::Visible) => true,
            (VisibilityAction::Enable, OfferVisibility::Hidden(HiddenReason::CompanyRequest)) => {
                true
            }
            (
                VisibilityAction::Disable { .. },
                OfferVisibility::Visible | OfferVisibility::Hidden(HiddenReason::CompanyRequest),
            ) => true,
            _ => false,
        }
    }

    pub fn resulting_visibility(&self) -> OfferVisibility {
        match self {
            VisibilityAction::Hide => OfferVisibility::Hidden(HiddenReason::CompanyRequest),
            VisibilityAction::Enable => OfferVisibility::Visible,
            VisibilityAction::Disable { .. } => OfferVisibility::Hidden(HiddenReason::AdminRequest),
        }
    }

    pub(crate) fn success_message(&self) -> &'static str {
        match self {
            VisibilityAction::Hide => "The offer was hidden",
            VisibilityAction::Enable => "The offer was enabled",
            VisibilityAction::Disable { .. } => "The offer was disabled",
        }
    }

    pub(crate) fn key_suffix(&self) -> &'static str {
        match self {
            VisibilityAction::Hide => "hidden",
            VisibilityAction::Enable => "enabled",
            VisibilityAction::Disable { .. } => "disabled",
        }
    }
}
