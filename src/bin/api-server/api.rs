use actix_web::{web, HttpResponse};
use bites::{cart::Cart, data::CartItem, pager::NavKey, session::Sessions, view::DishCard};
use std::sync::Arc;

pub(super) struct ApiState {
    sessions: Arc<Sessions>,
}

impl ApiState {
    pub(super) fn new(sessions: Arc<Sessions>) -> Self {
        Self { sessions }
    }
}

#[derive(serde::Serialize)]
struct ErrJsonResp {
    message: String,
}

#[derive(serde::Serialize)]
struct CartResp<'a> {
    items: &'a [CartItem],
    total_items: u32,
}

impl<'a> From<&'a Cart> for CartResp<'a> {
    fn from(cart: &'a Cart) -> Self {
        Self {
            items: cart.items(),
            total_items: cart.total_item_count(),
        }
    }
}

#[actix_web::get("/api/v1/dishes")]
pub(super) async fn dishes(data: web::Data<ApiState>) -> HttpResponse {
    let cards = data
        .sessions
        .catalog()
        .dishes()
        .iter()
        .map(DishCard::from)
        .collect::<Vec<_>>();
    HttpResponse::Ok().json(cards)
}

#[derive(serde::Deserialize)]
pub(super) struct SearchPath {
    pattern: String,
}

#[actix_web::get("/api/v1/dishes/search/{pattern}")]
pub(super) async fn search(data: web::Data<ApiState>, path: web::Path<SearchPath>) -> HttpResponse {
    let cards = data
        .sessions
        .catalog()
        .search(&path.pattern)
        .into_iter()
        .map(DishCard::from)
        .collect::<Vec<_>>();
    HttpResponse::Ok().json(cards)
}

#[derive(serde::Deserialize)]
pub(super) struct SessionPath {
    session: String,
}

#[actix_web::get("/api/v1/sessions/{session}/page")]
pub(super) async fn page(data: web::Data<ApiState>, path: web::Path<SessionPath>) -> HttpResponse {
    let view = data.sessions.with_session(&path.session, |shop| shop.view());
    HttpResponse::Ok().json(view)
}

#[actix_web::post("/api/v1/sessions/{session}/page/next")]
pub(super) async fn next_page(
    data: web::Data<ApiState>,
    path: web::Path<SessionPath>,
) -> HttpResponse {
    let view = data.sessions.with_session(&path.session, |shop| {
        shop.next();
        shop.view()
    });
    HttpResponse::Ok().json(view)
}

#[actix_web::post("/api/v1/sessions/{session}/page/previous")]
pub(super) async fn previous_page(
    data: web::Data<ApiState>,
    path: web::Path<SessionPath>,
) -> HttpResponse {
    let view = data.sessions.with_session(&path.session, |shop| {
        shop.previous();
        shop.view()
    });
    HttpResponse::Ok().json(view)
}

#[derive(serde::Deserialize)]
pub(super) struct KeyPath {
    session: String,
    key: String,
}

#[actix_web::post("/api/v1/sessions/{session}/page/key/{key}")]
pub(super) async fn page_key(data: web::Data<ApiState>, path: web::Path<KeyPath>) -> HttpResponse {
    let nav = path.key.parse::<NavKey>().ok();
    let view = data.sessions.with_session(&path.session, |shop| {
        if let Some(nav) = nav {
            shop.handle_key(nav);
        }
        shop.view()
    });
    HttpResponse::Ok().json(view)
}

#[actix_web::get("/api/v1/sessions/{session}/cart")]
pub(super) async fn show_cart(data: web::Data<ApiState>, path: web::Path<SessionPath>) -> HttpResponse {
    data.sessions.with_session(&path.session, |shop| {
        HttpResponse::Ok().json(CartResp::from(shop.cart()))
    })
}

#[derive(serde::Deserialize)]
pub(super) struct AddPath {
    session: String,
    dish_id: String,
}

#[actix_web::post("/api/v1/sessions/{session}/cart/{dish_id}")]
pub(super) async fn add_to_cart(
    data: web::Data<ApiState>,
    path: web::Path<AddPath>,
) -> HttpResponse {
    data.sessions.with_session(&path.session, |shop| {
        shop.add_to_cart_by_id(&path.dish_id);
        HttpResponse::Ok().json(CartResp::from(shop.cart()))
    })
}

#[actix_web::delete("/api/v1/sessions/{session}")]
pub(super) async fn end_session(
    data: web::Data<ApiState>,
    path: web::Path<SessionPath>,
) -> HttpResponse {
    if data.sessions.end_session(&path.session) {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().json(ErrJsonResp {
            message: format!("no session {}", path.session),
        })
    }
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dishes)
        .service(search)
        .service(page)
        .service(next_page)
        .service(previous_page)
        .service(page_key)
        .service(show_cart)
        .service(add_to_cart)
        .service(end_session);
}
