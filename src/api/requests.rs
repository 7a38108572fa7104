//! Request bodies for the rules service endpoints.

use serde::Serialize;
use std::collections::BTreeMap;

use super::command::ManipulateAction;
use crate::models::{CardId, TheaterType};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNameRequest<'a> {
    pub player_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest<'a> {
    pub player_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayCardRequest<'a> {
    pub player_id: &'a str,
    pub card_id: CardId,
    pub theater: TheaterType,
    pub face_up: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManipulateCardRequest<'a> {
    pub player_id: &'a str,
    pub theater: TheaterType,
    pub card_id: CardId,
    pub action: ManipulateAction,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestroyCardRequest<'a> {
    pub player_id: &'a str,
    pub card_id: CardId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoresRequest<'a> {
    pub player_id: &'a str,
    pub scores: &'a BTreeMap<TheaterType, u32>,
}
