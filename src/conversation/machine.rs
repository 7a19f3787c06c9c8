//! Ordering conversation state machine

use super::{BackTarget, CallbackAction, Input};
use crate::render::{self, Reply, texts};
use crate::session::{ChatSession, CheckoutState, CustomerInfo};
use crate::tenant::TenantContext;

/// Apply one input to a chat's session and produce the replies, in order
///
/// Pure and synchronous: the caller holds the chat's lock and delivers the
/// replies afterwards.
pub fn handle(ctx: &TenantContext, session: &mut ChatSession, input: &Input) -> Vec<Reply> {
    match input {
        Input::Start(_) => {
            session.reset();
            let greeting = if ctx.freshly_bound {
                render::welcome(ctx.config())
            } else {
                render::welcome_back(ctx.config())
            };
            vec![greeting]
        }
        Input::Text(text) => on_text(ctx, session, text),
        Input::Callback(action) => on_callback(ctx, session, action),
        Input::UnknownCallback(data) => {
            tracing::debug!(tenant_id = %ctx.tenant_id, data = %data, "ignoring unknown callback");
            vec![use_buttons()]
        }
    }
}

fn on_text(ctx: &TenantContext, session: &mut ChatSession, text: &str) -> Vec<Reply> {
    let text = text.trim();

    match session.state {
        CheckoutState::Idle => {}
        state if text.is_empty() => return vec![prompt(state)],
        CheckoutState::AskName => {
            session.customer.name = text.to_string();
            session.state = CheckoutState::AskPhone;
            return vec![prompt(CheckoutState::AskPhone)];
        }
        CheckoutState::AskPhone => {
            session.customer.phone = text.to_string();
            session.state = CheckoutState::AskAddress;
            return vec![prompt(CheckoutState::AskAddress)];
        }
        CheckoutState::AskAddress => {
            session.customer.address = text.to_string();
            session.state = CheckoutState::Idle;
            tracing::info!(
                tenant_id = %ctx.tenant_id,
                lines = session.cart.lines().len(),
                "order details collected"
            );
            return vec![render::order_summary(
                ctx.config(),
                &session.cart,
                &session.customer,
            )];
        }
    }

    match text {
        texts::BUTTON_SHOW_MENU => vec![render::category_list(ctx.menu())],
        texts::BUTTON_SHOW_CART => vec![render::cart_view(&session.cart)],
        texts::BUTTON_CLEAR_CART => vec![clear_cart(session)],
        _ => vec![use_buttons()],
    }
}

fn on_callback(ctx: &TenantContext, session: &mut ChatSession, action: &CallbackAction) -> Vec<Reply> {
    match action {
        CallbackAction::SelectCategory(id) => ctx.menu().category(id).map_or_else(
            || vec![Reply::text(texts::CATEGORY_NOT_FOUND)],
            render::category_replies,
        ),
        CallbackAction::AddItem(id) => {
            let Some(item) = ctx.menu().item(id) else {
                return vec![Reply::text(texts::ITEM_NOT_FOUND)];
            };
            let quantity = session.cart.add(item);
            tracing::debug!(tenant_id = %ctx.tenant_id, item_id = %id, quantity, "item added to cart");
            vec![render::added_to_cart(item)]
        }
        CallbackAction::Back(BackTarget::Main) => {
            vec![Reply::with_keyboard(texts::BACK_TO_MAIN, render::main_keyboard())]
        }
        CallbackAction::Back(BackTarget::Categories) => vec![render::category_list(ctx.menu())],
        CallbackAction::ClearCart => vec![clear_cart(session)],
        CallbackAction::ConfirmCheckout => {
            if session.cart.is_empty() {
                return vec![Reply::with_keyboard(
                    texts::CART_EMPTY_AT_CHECKOUT,
                    render::main_keyboard(),
                )];
            }
            session.customer = CustomerInfo::default();
            session.state = CheckoutState::AskName;
            vec![prompt(CheckoutState::AskName)]
        }
    }
}

fn clear_cart(session: &mut ChatSession) -> Reply {
    session.cart.clear();
    session.state = CheckoutState::Idle;
    Reply::with_keyboard(texts::CART_CLEARED, render::main_keyboard())
}

fn prompt(state: CheckoutState) -> Reply {
    Reply::text(match state {
        CheckoutState::AskName => texts::ASK_NAME,
        CheckoutState::AskPhone => texts::ASK_PHONE,
        CheckoutState::AskAddress => texts::ASK_ADDRESS,
        CheckoutState::Idle => texts::USE_BUTTONS,
    })
}

fn use_buttons() -> Reply {
    Reply::with_keyboard(texts::USE_BUTTONS, render::main_keyboard())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::tenant::Tenant;

    fn context() -> TenantContext {
        let raw = json!({
            "restaurantName": "Sham",
            "menu": [
                {"id": "grill", "name": "Grill", "items": [
                    {"id": "kofta", "name": "Kofta", "price": 12},
                    {"id": "wings", "name": "Wings", "price": 8.5}
                ]},
                {"id": "drinks", "name": "Drinks", "items": [
                    {"id": "ayran", "name": "Ayran", "price": 1}
                ]}
            ]
        });
        TenantContext {
            tenant_id: "t1".to_string(),
            tenant: Arc::new(Tenant::from_raw(raw)),
            freshly_bound: false,
        }
    }

    fn text(s: &str) -> Input {
        Input::Text(s.to_string())
    }

    fn add(id: &str) -> Input {
        Input::Callback(CallbackAction::AddItem(id.to_string()))
    }

    fn confirm() -> Input {
        Input::Callback(CallbackAction::ConfirmCheckout)
    }

    fn start() -> Input {
        Input::from_text("/start")
    }

    #[test]
    fn checkout_collects_fields_in_order() {
        let ctx = context();
        let mut session = ChatSession::default();

        handle(&ctx, &mut session, &add("kofta"));
        let replies = handle(&ctx, &mut session, &confirm());
        assert_eq!(session.state, CheckoutState::AskName);
        assert_eq!(replies[0].body(), texts::ASK_NAME);

        handle(&ctx, &mut session, &text("Rami"));
        assert_eq!(session.state, CheckoutState::AskPhone);
        handle(&ctx, &mut session, &text("0550"));
        assert_eq!(session.state, CheckoutState::AskAddress);

        let replies = handle(&ctx, &mut session, &text("Main st"));
        assert_eq!(session.state, CheckoutState::Idle);
        assert_eq!(session.customer.phone, "0550");
        assert!(replies[0].body().contains("Main st"));
    }

    #[test]
    fn checkout_text_is_never_a_command() {
        let ctx = context();
        let mut session = ChatSession::default();
        handle(&ctx, &mut session, &add("kofta"));
        handle(&ctx, &mut session, &confirm());

        handle(&ctx, &mut session, &text(texts::BUTTON_CLEAR_CART));
        assert_eq!(session.customer.name, texts::BUTTON_CLEAR_CART);
        assert_eq!(session.state, CheckoutState::AskPhone);
        assert!(!session.cart.is_empty());
    }

    #[test]
    fn empty_text_reprompts() {
        let ctx = context();
        let mut session = ChatSession::default();
        handle(&ctx, &mut session, &add("kofta"));
        handle(&ctx, &mut session, &confirm());

        let replies = handle(&ctx, &mut session, &text("   "));
        assert_eq!(replies[0].body(), texts::ASK_NAME);
        assert_eq!(session.state, CheckoutState::AskName);
        assert!(session.customer.name.is_empty());
    }

    #[test]
    fn confirm_with_empty_cart_stays_idle() {
        let ctx = context();
        let mut session = ChatSession::default();

        let replies = handle(&ctx, &mut session, &confirm());
        assert_eq!(session.state, CheckoutState::Idle);
        assert_eq!(replies[0].body(), texts::CART_EMPTY_AT_CHECKOUT);
    }

    #[test]
    fn start_abandons_checkout() {
        let ctx = context();
        let mut session = ChatSession::default();
        handle(&ctx, &mut session, &add("kofta"));
        handle(&ctx, &mut session, &confirm());
        handle(&ctx, &mut session, &text("Rami"));

        handle(&ctx, &mut session, &start());
        assert_eq!(session, ChatSession::default());
    }

    #[test]
    fn clear_callback_resets_checkout() {
        let ctx = context();
        let mut session = ChatSession::default();
        handle(&ctx, &mut session, &add("kofta"));
        handle(&ctx, &mut session, &confirm());

        handle(&ctx, &mut session, &Input::Callback(CallbackAction::ClearCart));
        assert!(session.cart.is_empty());
        assert_eq!(session.state, CheckoutState::Idle);
    }

    #[test]
    fn navigation_never_touches_cart() {
        let ctx = context();
        let mut session = ChatSession::default();
        handle(&ctx, &mut session, &add("ayran"));
        let before = session.clone();

        for input in [
            Input::Callback(CallbackAction::SelectCategory("grill".to_string())),
            Input::Callback(CallbackAction::Back(BackTarget::Categories)),
            Input::Callback(CallbackAction::Back(BackTarget::Main)),
            text(texts::BUTTON_SHOW_MENU),
            text(texts::BUTTON_SHOW_CART),
        ] {
            handle(&ctx, &mut session, &input);
        }
        assert_eq!(session, before);
    }

    #[test]
    fn category_renders_one_block_per_item() {
        let ctx = context();
        let mut session = ChatSession::default();

        let replies = handle(
            &ctx,
            &mut session,
            &Input::Callback(CallbackAction::SelectCategory("grill".to_string())),
        );
        // header, two items, back navigation
        assert_eq!(replies.len(), 4);
    }

    #[test]
    fn stale_ids_report_not_found() {
        let ctx = context();
        let mut session = ChatSession::default();

        let replies = handle(&ctx, &mut session, &add("removed"));
        assert_eq!(replies[0].body(), texts::ITEM_NOT_FOUND);
        let replies = handle(
            &ctx,
            &mut session,
            &Input::Callback(CallbackAction::SelectCategory("gone".to_string())),
        );
        assert_eq!(replies[0].body(), texts::CATEGORY_NOT_FOUND);
        assert_eq!(session, ChatSession::default());
    }

    #[test]
    fn unknown_text_gets_hint() {
        let ctx = context();
        let mut session = ChatSession::default();

        let replies = handle(&ctx, &mut session, &text("hello"));
        assert_eq!(replies[0].body(), texts::USE_BUTTONS);
        assert_eq!(replies[0].keyboard(), Some(&render::main_keyboard()));
    }

    #[test]
    fn fresh_binding_gets_full_welcome() {
        let mut ctx = context();
        ctx.freshly_bound = true;
        let mut session = ChatSession::default();

        let replies = handle(&ctx, &mut session, &Input::from_text("/start t1"));
        assert!(replies[0].body().contains(texts::WELCOME_INTRO));
    }
}
