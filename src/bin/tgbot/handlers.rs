use bites::{
    cart::Cart,
    session::Sessions,
    view::{format_price, PageView},
};
use std::sync::Arc;
use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Message},
    utils::command::BotCommands,
    Bot,
};

macro_rules! send {
    ([$bot:expr, $msg:expr], $text:expr) => {
        if let Err(e) = $bot.send_message($msg.chat.id, $text).await {
            tracing::error!("fail to send message: {e}")
        }
    };
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Bites restaurant, these commands are supported:")]
pub(super) enum Commands {
    #[command(description = "display this text.")]
    Help,
    #[command(description = "browse our dishes.")]
    Menu,
    #[command(description = "show what is in your cart.")]
    Cart,
    #[command(description = "search dishes by name.")]
    Search(String),
    #[command(description = "add a dish to the cart by its id.")]
    Add(String),
}

pub(super) fn handler_schema() -> UpdateHandler<anyhow::Error> {
    let command_handler = teloxide::filter_command::<Commands, _>()
        .branch(dptree::case![Commands::Help].endpoint(help_handler))
        .branch(dptree::case![Commands::Menu].endpoint(menu_handler))
        .branch(dptree::case![Commands::Cart].endpoint(cart_handler))
        .branch(dptree::case![Commands::Search(pattern)].endpoint(search_handler))
        .branch(dptree::case![Commands::Add(id)].endpoint(add_handler));

    let message_handler = Update::filter_message().branch(command_handler);
    let callback_handler = Update::filter_callback_query().endpoint(gallery_callback_handler);

    dptree::entry().branch(message_handler).branch(callback_handler)
}

fn session_key(chat: ChatId) -> String {
    chat.0.to_string()
}

/// Button presses on the gallery message.
///
/// Callback data is built as "{category}-{argument}".
#[derive(Debug, PartialEq, Eq)]
enum GalleryAction {
    Previous,
    Next,
    Add(String),
}

impl GalleryAction {
    fn new(data: &str) -> Result<Self, &'static str> {
        let Some((category, argument)) = data.split_once('-') else {
            return Err("malformed callback data");
        };

        match (category, argument) {
            ("PAGE", "prev") => Ok(Self::Previous),
            ("PAGE", "next") => Ok(Self::Next),
            ("PAGE", _) => Err("unexpected page action"),
            ("ADD", id) if !id.is_empty() => Ok(Self::Add(id.to_string())),
            _ => Err("unexpected action"),
        }
    }
}

fn render_page(view: &PageView) -> String {
    let mut text = String::from("Popular Dishes\n");
    if let Some(fallback) = view.fallback {
        text.push_str(&format!("\n{fallback}\n"));
    }
    for card in &view.dishes {
        text.push_str(&format!(
            "\n{} - {}\n{}\n{}\n",
            card.name, card.price, card.rating, card.description
        ));
    }
    if let Some(badge) = &view.cart_badge {
        text.push_str(&format!("\n🛒 {badge}"));
    }
    text
}

fn page_markup(view: &PageView) -> InlineKeyboardMarkup {
    let btn = InlineKeyboardButton::callback;
    let mut rows = view
        .dishes
        .iter()
        .map(|card| vec![btn(format!("Add {} to cart", card.name), format!("ADD-{}", card.id))])
        .collect::<Vec<_>>();

    // telegram has no disabled buttons, leave out the ones that would do nothing
    let mut nav = Vec::new();
    if view.can_go_previous {
        nav.push(btn("◀ Previous".to_string(), "PAGE-prev".to_string()));
    }
    if view.can_go_next {
        nav.push(btn("Next ▶".to_string(), "PAGE-next".to_string()));
    }
    if !nav.is_empty() {
        rows.push(nav);
    }

    InlineKeyboardMarkup::new(rows)
}

fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }

    cart.items()
        .iter()
        .fold(String::from("Your cart:\n"), |sumed, item| {
            format!(
                "{sumed}\n{} x {} ({})",
                item.quantity,
                item.dish.name,
                format_price(item.dish.price)
            )
        })
        + &format!("\n\n{} items in total", cart.total_item_count())
}

async fn help_handler(msg: Message, bot: Bot) -> anyhow::Result<()> {
    send!([bot, msg], Commands::descriptions().to_string());
    Ok(())
}

async fn menu_handler(msg: Message, bot: Bot, sessions: Arc<Sessions>) -> anyhow::Result<()> {
    let view = sessions.with_session(&session_key(msg.chat.id), |shop| shop.view());
    bot.send_message(msg.chat.id, render_page(&view))
        .reply_markup(page_markup(&view))
        .await?;
    Ok(())
}

async fn cart_handler(msg: Message, bot: Bot, sessions: Arc<Sessions>) -> anyhow::Result<()> {
    let text = sessions.with_session(&session_key(msg.chat.id), |shop| render_cart(shop.cart()));
    send!([bot, msg], text);
    Ok(())
}

async fn search_handler(
    msg: Message,
    bot: Bot,
    pattern: String,
    sessions: Arc<Sessions>,
) -> anyhow::Result<()> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        send!([bot, msg], "Usage: /search <name>");
        return Ok(());
    }

    let found = sessions.catalog().search(pattern);
    if found.is_empty() {
        send!([bot, msg], format!("No dish matches {pattern}"));
        return Ok(());
    }

    let result = found.into_iter().fold(String::new(), |sumed, dish| {
        format!("{sumed}\n{} ({}): {}", dish.name, dish.id, format_price(dish.price))
    });
    send!([bot, msg], result);
    Ok(())
}

async fn add_handler(
    msg: Message,
    bot: Bot,
    id: String,
    sessions: Arc<Sessions>,
) -> anyhow::Result<()> {
    let id = id.trim();
    if id.is_empty() {
        send!([bot, msg], "Usage: /add <dish id>");
        return Ok(());
    }

    let added = sessions.with_session(&session_key(msg.chat.id), |shop| {
        let item = shop
            .add_to_cart_by_id(id)
            .map(|item| (item.dish.name.clone(), item.quantity))?;
        Some((item, shop.cart().total_item_count()))
    });

    match added {
        Some(((name, quantity), total)) => {
            send!([bot, msg], format!("Added {name} (x{quantity}). 🛒 {total}"));
        }
        None => {
            send!([bot, msg], format!("No dish with id {id}, try /search"));
        }
    }
    Ok(())
}

async fn gallery_callback_handler(
    q: CallbackQuery,
    bot: Bot,
    sessions: Arc<Sessions>,
) -> anyhow::Result<()> {
    let (Some(data), Some(msg)) = (q.data.as_deref(), q.message.as_ref()) else {
        return Ok(());
    };

    let action = match GalleryAction::new(data) {
        Ok(action) => action,
        Err(hint) => {
            tracing::warn!("drop callback {data}: {hint}");
            bot.answer_callback_query(q.id.clone()).await?;
            return Ok(());
        }
    };

    let (view, notice) = sessions.with_session(&session_key(msg.chat.id), |shop| {
        let notice = match &action {
            GalleryAction::Previous => {
                shop.previous();
                None
            }
            GalleryAction::Next => {
                shop.next();
                None
            }
            GalleryAction::Add(id) => shop
                .add_to_cart_by_id(id)
                .map(|item| format!("Added {} to cart", item.dish.name)),
        };
        (shop.view(), notice)
    });

    let answer = bot.answer_callback_query(q.id.clone());
    match notice {
        Some(notice) => answer.text(notice).await?,
        None => answer.await?,
    };

    if let Err(e) = bot
        .edit_message_text(msg.chat.id, msg.id, render_page(&view))
        .reply_markup(page_markup(&view))
        .await
    {
        tracing::error!("fail to update gallery: {e}")
    }

    Ok(())
}
