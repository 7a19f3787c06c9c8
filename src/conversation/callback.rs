//! Inline button callback actions
//!
//! Buttons carry `PREFIX:value` data. It is parsed once at the webhook
//! boundary; everything downstream matches on [`CallbackAction`].

use std::fmt;

/// Where a back button leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackTarget {
    /// Main reply keyboard
    Main,
    /// Category list
    Categories,
}

/// Action carried by an inline button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// `CAT:<category_id>`
    SelectCategory(String),
    /// `ADD:<item_id>`
    AddItem(String),
    /// `BACK:MAIN` / `BACK:CATS`
    Back(BackTarget),
    /// `CART:CLEAR`
    ClearCart,
    /// `CHECKOUT:CONFIRM`
    ConfirmCheckout,
}

impl CallbackAction {
    /// Parse callback data, `None` for anything unrecognized
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        let (prefix, value) = data.trim().split_once(':')?;
        let value = value.trim();

        match (prefix, value) {
            ("CAT", id) if !id.is_empty() => Some(Self::SelectCategory(id.to_string())),
            ("ADD", id) if !id.is_empty() => Some(Self::AddItem(id.to_string())),
            ("BACK", "MAIN") => Some(Self::Back(BackTarget::Main)),
            ("BACK", "CATS") => Some(Self::Back(BackTarget::Categories)),
            ("CART", "CLEAR") => Some(Self::ClearCart),
            ("CHECKOUT", "CONFIRM") => Some(Self::ConfirmCheckout),
            _ => None,
        }
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectCategory(id) => write!(f, "CAT:{id}"),
            Self::AddItem(id) => write!(f, "ADD:{id}"),
            Self::Back(BackTarget::Main) => f.write_str("BACK:MAIN"),
            Self::Back(BackTarget::Categories) => f.write_str("BACK:CATS"),
            Self::ClearCart => f.write_str("CART:CLEAR"),
            Self::ConfirmCheckout => f.write_str("CHECKOUT:CONFIRM"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_prefixes() {
        assert_eq!(
            CallbackAction::parse("CAT:shawarma"),
            Some(CallbackAction::SelectCategory("shawarma".to_string()))
        );
        assert_eq!(
            CallbackAction::parse("ADD:item_3"),
            Some(CallbackAction::AddItem("item_3".to_string()))
        );
        assert_eq!(
            CallbackAction::parse("BACK:CATS"),
            Some(CallbackAction::Back(BackTarget::Categories))
        );
        assert_eq!(CallbackAction::parse("CART:CLEAR"), Some(CallbackAction::ClearCart));
        assert_eq!(
            CallbackAction::parse("CHECKOUT:CONFIRM"),
            Some(CallbackAction::ConfirmCheckout)
        );
    }

    #[test]
    fn item_ids_may_contain_colons() {
        assert_eq!(
            CallbackAction::parse("ADD:cat_1:item_2"),
            Some(CallbackAction::AddItem("cat_1:item_2".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_or_empty_data() {
        for data in ["", "CAT:", "ADD:  ", "BACK:HOME", "CART:FILL", "PAY:NOW", "no-colon"] {
            assert_eq!(CallbackAction::parse(data), None, "{data}");
        }
    }

    #[test]
    fn display_is_parseable() {
        for action in [
            CallbackAction::SelectCategory("grill".to_string()),
            CallbackAction::Back(BackTarget::Main),
            CallbackAction::ConfirmCheckout,
        ] {
            assert_eq!(CallbackAction::parse(&action.to_string()), Some(action));
        }
    }
}
