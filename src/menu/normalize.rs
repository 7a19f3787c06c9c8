//! Menu normalization from raw tenant configuration
//!
//! Tenants configure menus in one of three shapes, tried in order:
//!
//! 1. `menu` as a list of categories, each with an `items` list
//! 2. `menu` as a flat list of items
//! 3. `menuItems` (or `menu`) as free text, one item per line
//!
//! Normalization never fails. Malformed fields fall back to defaults and a
//! tenant without any usable item gets a single placeholder item.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::{MAIN_CATEGORY_ID, Menu, MenuCategory, MenuItem, PLACEHOLDER_ITEM_ID};
use crate::render::texts;

/// Currency markers stripped around a price token
const CURRENCY_MARKERS: &[char] = &['$', '€', '£', '¥', '₺'];

/// A menu parsing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStrategy {
    /// `menu` is a list of categories carrying `items`
    Categories,
    /// `menu` is a flat list of items
    FlatItems,
    /// Free-text lines in `menuItems`
    FreeText,
}

impl MenuStrategy {
    /// Strategies in the order they are attempted
    pub const ORDER: [Self; 3] = [Self::Categories, Self::FlatItems, Self::FreeText];

    /// Apply this strategy to a raw config
    ///
    /// Returns `None` when the config does not have this shape or when the
    /// shape yields no items at all.
    #[must_use]
    pub fn apply(self, raw: &Value) -> Option<Vec<MenuCategory>> {
        let categories = match self {
            Self::Categories => parse_categories(raw),
            Self::FlatItems => parse_flat_items(raw),
            Self::FreeText => parse_free_text(raw),
        }?;

        let has_items = categories.iter().any(|c| !c.items.is_empty());
        has_items.then_some(categories)
    }
}

/// Build the canonical menu for a raw tenant config
#[must_use]
pub fn normalize(raw: &Value) -> Menu {
    for strategy in MenuStrategy::ORDER {
        if let Some(categories) = strategy.apply(raw) {
            tracing::debug!(?strategy, categories = categories.len(), "menu normalized");
            return Menu::new(categories);
        }
    }

    tracing::debug!("no menu configured, using placeholder");
    Menu::new(vec![placeholder_category()])
}

fn parse_categories(raw: &Value) -> Option<Vec<MenuCategory>> {
    let entries = raw.get("menu")?.as_array()?;
    if entries.is_empty()
        || !entries
            .iter()
            .all(|e| e.as_object().is_some_and(|o| o.contains_key("items")))
    {
        return None;
    }

    let categories = entries
        .iter()
        .filter_map(Value::as_object)
        .enumerate()
        .map(|(index, obj)| {
            let id = id_field(obj).unwrap_or_else(|| format!("cat_{}", index + 1));
            let items = obj
                .get("items")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .enumerate()
                        .filter_map(|(pos, v)| item_from_value(v, &format!("{id}_item_{}", pos + 1)))
                        .collect()
                })
                .unwrap_or_default();

            MenuCategory {
                name: text_field(obj, &["name", "title"])
                    .unwrap_or_else(|| texts::DEFAULT_CATEGORY_NAME.to_string()),
                id,
                items,
            }
        })
        .collect();

    Some(categories)
}

fn parse_flat_items(raw: &Value) -> Option<Vec<MenuCategory>> {
    let entries = raw.get("menu")?.as_array()?;

    // Category-shaped entries contribute their dishes, never themselves
    let items: Vec<MenuItem> = entries
        .iter()
        .flat_map(|entry| match entry.get("items") {
            Some(nested) => nested.as_array().map(Vec::as_slice).unwrap_or_default(),
            None => std::slice::from_ref(entry),
        })
        .enumerate()
        .filter_map(|(pos, v)| item_from_value(v, &format!("item_{}", pos + 1)))
        .collect();

    Some(vec![main_category(items)])
}

fn parse_free_text(raw: &Value) -> Option<Vec<MenuCategory>> {
    let source = ["menuItems", "menu"]
        .iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_str))?;

    let items = source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(pos, line)| parse_line(line, format!("item_{}", pos + 1)))
        .collect();

    Some(vec![main_category(items)])
}

/// Parse one free-text menu line such as `Grilled Chicken – 9.99$`
fn parse_line(line: &str, id: String) -> MenuItem {
    let (name, rest) = split_line(line);
    let name = non_blank(name).unwrap_or(texts::DEFAULT_ITEM_NAME).to_string();
    let rest = rest.map(str::trim).unwrap_or_default();

    let (price, description) = if rest.is_empty() {
        (Decimal::ZERO, String::new())
    } else if rest.contains(texts::QUOTE_MARKER) {
        (Decimal::ZERO, texts::PRICE_ON_REQUEST_NOTE.to_string())
    } else {
        let price = rest
            .split_whitespace()
            .next()
            .and_then(parse_price)
            .unwrap_or(Decimal::ZERO);
        (price, rest.to_string())
    };

    MenuItem {
        id,
        name,
        description,
        price,
        image_ref: None,
    }
}

/// Split a line at the first dash separator
///
/// En/em dashes win over hyphens, and a spaced hyphen wins over a bare one so
/// names like `Coca-Cola - 2$` stay intact.
fn split_line(line: &str) -> (&str, Option<&str>) {
    if let Some((name, rest)) = line.split_once(['–', '—']) {
        return (name, Some(rest));
    }
    if let Some((name, rest)) = line.split_once(" - ") {
        return (name, Some(rest));
    }
    line.split_once('-')
        .map_or((line, None), |(name, rest)| (name, Some(rest)))
}

/// Parse a price token like `9.99$`, `$4` or `12,50`
fn parse_price(token: &str) -> Option<Decimal> {
    let cleaned = token.trim_matches(CURRENCY_MARKERS).replace(',', ".");
    Decimal::from_str(&cleaned)
        .ok()
        .filter(|p| !p.is_sign_negative())
}

fn item_from_value(value: &Value, fallback_id: &str) -> Option<MenuItem> {
    match value {
        Value::Object(obj) => Some(MenuItem {
            id: id_field(obj).unwrap_or_else(|| fallback_id.to_string()),
            name: text_field(obj, &["name", "title"])
                .unwrap_or_else(|| texts::DEFAULT_ITEM_NAME.to_string()),
            description: text_field(obj, &["description", "desc"]).unwrap_or_default(),
            price: obj.get("price").map_or(Decimal::ZERO, price_value),
            image_ref: text_field(obj, &["imageUrl", "image_url", "image"]),
        }),
        Value::String(name) => non_blank(name).map(|name| MenuItem {
            id: fallback_id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price: Decimal::ZERO,
            image_ref: None,
        }),
        _ => None,
    }
}

/// Coerce a JSON price to a non-negative decimal, zero when unusable
fn price_value(value: &Value) -> Decimal {
    let parsed = match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => parse_price(s.trim()),
        _ => None,
    };
    parsed
        .filter(|p| !p.is_sign_negative())
        .unwrap_or(Decimal::ZERO)
}

fn id_field(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("id")? {
        Value::String(s) => non_blank(s).map(ToString::to_string),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str).and_then(non_blank))
        .map(ToString::to_string)
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn main_category(items: Vec<MenuItem>) -> MenuCategory {
    MenuCategory {
        id: MAIN_CATEGORY_ID.to_string(),
        name: texts::MAIN_CATEGORY_NAME.to_string(),
        items,
    }
}

fn placeholder_category() -> MenuCategory {
    main_category(vec![MenuItem {
        id: PLACEHOLDER_ITEM_ID.to_string(),
        name: texts::MENU_NOT_CONFIGURED_NAME.to_string(),
        description: texts::MENU_NOT_CONFIGURED_NOTE.to_string(),
        price: Decimal::ZERO,
        image_ref: None,
    }])
}
