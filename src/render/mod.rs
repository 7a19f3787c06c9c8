//! Rendering of menus, carts and conversation messages
//!
//! Everything here is pure: functions take canonical records and return
//! [`Reply`] descriptors that a channel turns into API calls. Text is HTML
//! (Telegram `parse_mode=HTML`), so tenant-provided strings are escaped.

pub mod texts;

use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::conversation::{BackTarget, CallbackAction};
use crate::menu::{Menu, MenuCategory, MenuItem};
use crate::session::{Cart, CustomerInfo};
use crate::tenant::TenantConfig;

/// A button that triggers a callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub text: String,
    pub action: CallbackAction,
}

impl InlineButton {
    #[must_use]
    pub fn new(text: impl Into<String>, action: CallbackAction) -> Self {
        Self {
            text: text.into(),
            action,
        }
    }
}

/// Keyboard attached to a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Persistent keyboard whose labels are sent back as text
    Reply(Vec<Vec<String>>),
    /// Buttons under the message that send callback data
    Inline(Vec<Vec<InlineButton>>),
}

/// One outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text {
        text: String,
        keyboard: Option<Keyboard>,
    },
    Photo {
        image_ref: String,
        caption: String,
        keyboard: Option<Keyboard>,
    },
}

impl Reply {
    /// Plain text reply without a keyboard
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            keyboard: None,
        }
    }

    /// Text reply carrying a keyboard
    #[must_use]
    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self::Text {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    /// Message text or photo caption
    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::Text { text, .. } => text,
            Self::Photo { caption, .. } => caption,
        }
    }

    #[must_use]
    pub const fn keyboard(&self) -> Option<&Keyboard> {
        match self {
            Self::Text { keyboard, .. } | Self::Photo { keyboard, .. } => keyboard.as_ref(),
        }
    }
}

/// Escape text for Telegram HTML
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Two-decimal price with a dollar sign, or "price on request" for zero
#[must_use]
pub fn format_price(price: Decimal) -> String {
    if price.is_zero() {
        return texts::PRICE_ON_REQUEST.to_string();
    }
    format!("{:.2}$", price.round_dp(2))
}

/// Cart lines with per-line subtotals and the running total
#[must_use]
pub fn format_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return texts::CART_EMPTY.to_string();
    }

    let mut out = String::new();
    for line in cart.lines() {
        let name = escape_html(&line.name);
        if line.is_price_on_request() {
            let _ = writeln!(out, "• {name} × {} – {}", line.quantity, texts::PRICE_ON_REQUEST);
        } else {
            let _ = writeln!(
                out,
                "• {name} × {} – {} = {}",
                line.quantity,
                format_price(line.unit_price),
                format_price(line.subtotal())
            );
        }
    }

    let _ = write!(out, "\n{}: {}", texts::TOTAL_LABEL, format_price(cart.total()));
    out
}

/// Main reply keyboard
#[must_use]
pub fn main_keyboard() -> Keyboard {
    Keyboard::Reply(vec![
        vec![
            texts::BUTTON_SHOW_MENU.to_string(),
            texts::BUTTON_SHOW_CART.to_string(),
        ],
        vec![texts::BUTTON_CLEAR_CART.to_string()],
    ])
}

/// One button per category, then back to main
#[must_use]
pub fn categories_keyboard(menu: &Menu) -> Keyboard {
    let mut rows: Vec<Vec<InlineButton>> = menu
        .categories()
        .iter()
        .map(|c| {
            vec![InlineButton::new(
                c.name.clone(),
                CallbackAction::SelectCategory(c.id.clone()),
            )]
        })
        .collect();

    rows.push(vec![InlineButton::new(
        texts::BUTTON_BACK_MAIN,
        CallbackAction::Back(BackTarget::Main),
    )]);
    Keyboard::Inline(rows)
}

/// Confirm, keep browsing, or clear
#[must_use]
pub fn checkout_keyboard() -> Keyboard {
    Keyboard::Inline(vec![
        vec![InlineButton::new(
            texts::BUTTON_CONFIRM_ORDER,
            CallbackAction::ConfirmCheckout,
        )],
        vec![InlineButton::new(
            texts::BUTTON_KEEP_BROWSING,
            CallbackAction::Back(BackTarget::Main),
        )],
        vec![InlineButton::new(
            texts::BUTTON_CLEAR_CART,
            CallbackAction::ClearCart,
        )],
    ])
}

fn add_to_cart_keyboard(item: &MenuItem) -> Keyboard {
    Keyboard::Inline(vec![vec![InlineButton::new(
        texts::BUTTON_ADD_TO_CART,
        CallbackAction::AddItem(item.id.clone()),
    )]])
}

/// Category picker message
#[must_use]
pub fn category_list(menu: &Menu) -> Reply {
    Reply::with_keyboard(texts::CHOOSE_CATEGORY, categories_keyboard(menu))
}

/// One item as a photo (when it has an image) or text, with its add button
#[must_use]
pub fn item_block(item: &MenuItem) -> Reply {
    let mut caption = format!("<b>{}</b>", escape_html(&item.name));
    if !item.description.trim().is_empty() {
        let _ = write!(caption, "\n{}", escape_html(&item.description));
    }
    let _ = write!(caption, "\n💰 {}", format_price(item.price));

    let keyboard = Some(add_to_cart_keyboard(item));
    match &item.image_ref {
        Some(image_ref) => Reply::Photo {
            image_ref: image_ref.clone(),
            caption,
            keyboard,
        },
        None => Reply::Text {
            text: caption,
            keyboard,
        },
    }
}

/// Header, one block per item, then navigation back to the categories
#[must_use]
pub fn category_replies(category: &MenuCategory) -> Vec<Reply> {
    let mut replies = Vec::with_capacity(category.items.len() + 2);
    replies.push(Reply::text(format!(
        "{} <b>{}</b>",
        texts::CATEGORY_ICON,
        escape_html(&category.name)
    )));

    if category.items.is_empty() {
        replies.push(Reply::text(texts::CATEGORY_EMPTY));
    }
    replies.extend(category.items.iter().map(item_block));

    replies.push(Reply::with_keyboard(
        texts::AFTER_ITEMS,
        Keyboard::Inline(vec![vec![InlineButton::new(
            texts::BUTTON_BACK_CATEGORIES,
            CallbackAction::Back(BackTarget::Categories),
        )]]),
    ));
    replies
}

/// Current cart with checkout controls, or the main keyboard when empty
#[must_use]
pub fn cart_view(cart: &Cart) -> Reply {
    let text = format!("{}\n\n{}", texts::CART_HEADER, format_cart(cart));
    let keyboard = if cart.is_empty() {
        main_keyboard()
    } else {
        checkout_keyboard()
    };
    Reply::with_keyboard(text, keyboard)
}

/// Greeting sent when a chat is bound to a tenant
#[must_use]
pub fn welcome(config: &TenantConfig) -> Reply {
    let mut text = config.welcome_text.as_deref().map_or_else(
        || format!("{} <b>{}</b>!", texts::WELCOME_INTRO, escape_html(&config.restaurant_name)),
        escape_html,
    );

    if let Some(tagline) = &config.tagline {
        let _ = write!(text, "\n✨ {}", escape_html(tagline));
    }

    let details = [
        (texts::LABEL_OPENING_HOURS, &config.opening_hours),
        (texts::LABEL_DELIVERY, &config.delivery_info),
        (texts::LABEL_CONTACT, &config.contact_phone),
    ];
    let mut first = true;
    for (label, value) in details {
        if let Some(value) = value {
            text.push_str(if first { "\n\n" } else { "\n" });
            first = false;
            let _ = write!(text, "{label}: {}", escape_html(value));
        }
    }

    let _ = write!(text, "\n\n{}", texts::USE_BUTTONS_BELOW);
    Reply::with_keyboard(text, main_keyboard())
}

/// Greeting for a bare `/start` from an already bound chat
#[must_use]
pub fn welcome_back(config: &TenantConfig) -> Reply {
    Reply::with_keyboard(
        format!(
            "{} <b>{}</b>.",
            texts::WELCOME_BACK,
            escape_html(&config.restaurant_name)
        ),
        main_keyboard(),
    )
}

/// Confirmation after adding an item
#[must_use]
pub fn added_to_cart(item: &MenuItem) -> Reply {
    Reply::with_keyboard(
        format!(
            "{} \"{}\" {}",
            texts::ADDED_TO_CART_PREFIX,
            escape_html(&item.name),
            texts::ADDED_TO_CART_SUFFIX
        ),
        main_keyboard(),
    )
}

/// Final summary: cart, customer details and a thank-you
#[must_use]
pub fn order_summary(config: &TenantConfig, cart: &Cart, customer: &CustomerInfo) -> Reply {
    let text = format!(
        "{}\n\n{}\n\n{}: {}\n{}: {}\n{}: {}\n\n{} {} 🤍",
        texts::ORDER_RECEIVED,
        format_cart(cart),
        texts::LABEL_NAME,
        escape_html(&customer.name),
        texts::LABEL_PHONE,
        escape_html(&customer.phone),
        texts::LABEL_ADDRESS,
        escape_html(&customer.address),
        texts::THANK_YOU,
        escape_html(&config.restaurant_name),
    );
    Reply::with_keyboard(text, main_keyboard())
}
