//! The catalog's operation table: names, required arguments, and handlers.
//!
//! Guards play the schema's role of rejecting calls with missing required
//! arguments before they reach the catalog.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{Context, HandlerError, Service};
use crate::catalog::Catalog;
use crate::model::{MediaItemPatch, NewMediaItem, NewSubscriber, SubscriberPatch};

pub const ITEMS_BY_TIER: &str = "itemsByTier";
pub const ALL_SUBSCRIBERS: &str = "allSubscribers";
pub const ITEM_BY_ID: &str = "itemById";
pub const SUBSCRIBER_BY_ID: &str = "subscriberById";
pub const CREATE_ITEM: &str = "createItem";
pub const CREATE_SUBSCRIBER: &str = "createSubscriber";
pub const UPDATE_ITEM: &str = "updateItem";
pub const UPDATE_SUBSCRIBER: &str = "updateSubscriber";
pub const DELETE_ITEM: &str = "deleteItem";
pub const DELETE_SUBSCRIBER: &str = "deleteSubscriber";
pub const LOGIN: &str = "login";

#[derive(Deserialize)]
struct TierArgs {
    tier: String,
}

#[derive(Deserialize)]
struct IdArgs {
    id: String,
}

#[derive(Deserialize)]
struct UpdateItemArgs {
    id: String,
    #[serde(flatten)]
    patch: MediaItemPatch,
}

#[derive(Deserialize)]
struct UpdateSubscriberArgs {
    id: String,
    #[serde(flatten)]
    patch: SubscriberPatch,
}

#[derive(Deserialize)]
struct LoginArgs {
    email: String,
    password: String,
}

/// Build a service exposing every catalog query and mutation.
pub fn catalog_service(catalog: Catalog) -> Service<Catalog> {
    Service::new(catalog)
        .operation_guarded(ITEMS_BY_TIER, |ctx| ctx.has_field("tier"), items_by_tier)
        .operation(ALL_SUBSCRIBERS, all_subscribers)
        .operation_guarded(ITEM_BY_ID, |ctx| ctx.has_field("id"), item_by_id)
        .operation_guarded(SUBSCRIBER_BY_ID, |ctx| ctx.has_field("id"), subscriber_by_id)
        .operation_guarded(
            CREATE_ITEM,
            |ctx| ctx.has_fields(&["title", "description", "tier", "imageUrl", "trailerUrl"]),
            create_item,
        )
        .operation_guarded(
            CREATE_SUBSCRIBER,
            |ctx| ctx.has_fields(&["name", "email", "password", "tier"]),
            create_subscriber,
        )
        .operation_guarded(UPDATE_ITEM, |ctx| ctx.has_field("id"), update_item)
        .operation_guarded(UPDATE_SUBSCRIBER, |ctx| ctx.has_field("id"), update_subscriber)
        .operation_guarded(DELETE_ITEM, |ctx| ctx.has_field("id"), delete_item)
        .operation_guarded(DELETE_SUBSCRIBER, |ctx| ctx.has_field("id"), delete_subscriber)
        .operation_guarded(LOGIN, |ctx| ctx.has_fields(&["email", "password"]), login)
}

fn items_by_tier(ctx: &Context<Catalog>) -> Result<Value, HandlerError> {
    let args = ctx.input::<TierArgs>()?;
    Ok(json!(ctx.state().items_by_tier(&args.tier)))
}

fn all_subscribers(ctx: &Context<Catalog>) -> Result<Value, HandlerError> {
    Ok(json!(ctx.state().all_subscribers()))
}

fn item_by_id(ctx: &Context<Catalog>) -> Result<Value, HandlerError> {
    let args = ctx.input::<IdArgs>()?;
    Ok(json!(ctx.state().item_by_id(&args.id)))
}

fn subscriber_by_id(ctx: &Context<Catalog>) -> Result<Value, HandlerError> {
    let args = ctx.input::<IdArgs>()?;
    Ok(json!(ctx.state().subscriber_by_id(&args.id)))
}

fn create_item(ctx: &Context<Catalog>) -> Result<Value, HandlerError> {
    let draft = ctx.input::<NewMediaItem>()?;
    Ok(json!(ctx.state().create_item(draft)))
}

fn create_subscriber(ctx: &Context<Catalog>) -> Result<Value, HandlerError> {
    let draft = ctx.input::<NewSubscriber>()?;
    Ok(json!(ctx.state().create_subscriber(draft)))
}

fn update_item(ctx: &Context<Catalog>) -> Result<Value, HandlerError> {
    let args = ctx.input::<UpdateItemArgs>()?;
    Ok(json!(ctx.state().update_item(&args.id, args.patch)))
}

fn update_subscriber(ctx: &Context<Catalog>) -> Result<Value, HandlerError> {
    let args = ctx.input::<UpdateSubscriberArgs>()?;
    Ok(json!(ctx.state().update_subscriber(&args.id, args.patch)))
}

fn delete_item(ctx: &Context<Catalog>) -> Result<Value, HandlerError> {
    let args = ctx.input::<IdArgs>()?;
    Ok(json!(ctx.state().delete_item(&args.id)))
}

fn delete_subscriber(ctx: &Context<Catalog>) -> Result<Value, HandlerError> {
    let args = ctx.input::<IdArgs>()?;
    Ok(json!(ctx.state().delete_subscriber(&args.id)))
}

fn login(ctx: &Context<Catalog>) -> Result<Value, HandlerError> {
    let args = ctx.input::<LoginArgs>()?;
    Ok(json!(ctx.state().login(&args.email, &args.password)))
}
