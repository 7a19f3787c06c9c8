//! Menu Gateway - multi-tenant restaurant ordering over Telegram
//!
//! One bot account serves many restaurants. A chat is tied to a restaurant
//! through a deep link (`/start <tenant_id>`); from then on the bot shows
//! that restaurant's menu, keeps a cart and walks the customer through
//! checkout.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   HTTP (axum)                        │
//! │   /telegram-webhook  │  /webhook (WhatsApp)  │  ...  │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                    OrderBot                          │
//! │   Resolver  │  Sessions  │  State machine  │ Render │
//! └──────────┬─────────────────────────────┬────────────┘
//!            │                             │
//! ┌──────────▼──────────┐       ┌──────────▼────────────┐
//! │  Config store       │       │  Channel (Telegram)   │
//! │  (Supabase REST)    │       │  Bot API              │
//! └─────────────────────┘       └───────────────────────┘
//! ```

pub mod api;
pub mod bot;
pub mod channels;
pub mod config;
pub mod conversation;
pub mod error;
pub mod menu;
pub mod render;
pub mod session;
pub mod store;
pub mod tenant;

pub use bot::{InboundUpdate, OrderBot};
pub use config::Config;
pub use error::{Error, Result};
