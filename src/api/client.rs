//! Client for the rules/room service.
//!
//! Every game command answers with a complete [`GameSnapshot`]. Non-success
//! responses are turned into [`ApiError::Rejected`]; the body text is kept for
//! logs only.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::command::{Command, ManipulateAction};
use super::requests::{
    DestroyCardRequest, ManipulateCardRequest, PlayCardRequest, PlayerNameRequest, PlayerRequest,
    UpdateScoresRequest,
};
use crate::adapters::ReqwestHttpClient;
use crate::error::{ApiError, NetworkError};
use crate::models::{
    CardId, CreateRoomResponse, GameSnapshot, JoinRoomResponse, Room, SessionIds, TheaterType,
};
use crate::traits::HttpClient;

/// Default address of the rules service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Request/response operations offered by the rules service.
#[async_trait]
pub trait GameApi: Send + Sync {
    async fn create_room(&self, player_name: &str) -> Result<CreateRoomResponse, ApiError>;

    async fn join_room(
        &self,
        room_id: &str,
        player_name: &str,
    ) -> Result<JoinRoomResponse, ApiError>;

    async fn get_room(&self, room_id: &str) -> Result<Room, ApiError>;

    async fn get_game(&self, game_id: &str) -> Result<GameSnapshot, ApiError>;

    async fn play_card(
        &self,
        game_id: &str,
        player_id: &str,
        card_id: CardId,
        theater: TheaterType,
        face_up: bool,
    ) -> Result<GameSnapshot, ApiError>;

    async fn draw_card(&self, game_id: &str, player_id: &str) -> Result<GameSnapshot, ApiError>;

    async fn end_turn(&self, game_id: &str, player_id: &str) -> Result<GameSnapshot, ApiError>;

    async fn withdraw(&self, game_id: &str, player_id: &str) -> Result<GameSnapshot, ApiError>;

    async fn manipulate_card(
        &self,
        game_id: &str,
        player_id: &str,
        theater: TheaterType,
        card_id: CardId,
        action: ManipulateAction,
    ) -> Result<GameSnapshot, ApiError>;

    async fn destroy_card(
        &self,
        game_id: &str,
        player_id: &str,
        card_id: CardId,
    ) -> Result<GameSnapshot, ApiError>;

    async fn update_scores(
        &self,
        game_id: &str,
        player_id: &str,
        scores: &BTreeMap<TheaterType, u32>,
    ) -> Result<GameSnapshot, ApiError>;

    async fn advance_battle(&self, game_id: &str) -> Result<GameSnapshot, ApiError>;

    async fn advance_game(&self, game_id: &str) -> Result<GameSnapshot, ApiError>;

    /// Issue `command` on behalf of the session's player.
    async fn execute(&self, ids: &SessionIds, command: &Command) -> Result<GameSnapshot, ApiError> {
        let game = ids.game_id.as_str();
        let player = ids.player_id.as_str();
        match command {
            Command::PlayCard {
                card_id,
                theater,
                face_up,
            } => self.play_card(game, player, *card_id, *theater, *face_up).await,
            Command::DrawCard => self.draw_card(game, player).await,
            Command::EndTurn => self.end_turn(game, player).await,
            Command::Withdraw => self.withdraw(game, player).await,
            Command::SubmitScores { scores } => self.update_scores(game, player, scores).await,
            Command::Manipulate {
                theater,
                card_id,
                action,
            } => {
                self.manipulate_card(game, player, *theater, *card_id, *action)
                    .await
            }
            Command::DestroyCard { card_id } => self.destroy_card(game, player, *card_id).await,
            Command::AdvanceBattle { .. } => self.advance_battle(game).await,
            Command::AdvanceGame => self.advance_game(game).await,
        }
    }
}

#[async_trait]
impl<T: GameApi + ?Sized> GameApi for Arc<T> {
    async fn create_room(&self, player_name: &str) -> Result<CreateRoomResponse, ApiError> {
        (**self).create_room(player_name).await
    }

    async fn join_room(
        &self,
        room_id: &str,
        player_name: &str,
    ) -> Result<JoinRoomResponse, ApiError> {
        (**self).join_room(room_id, player_name).await
    }

    async fn get_room(&self, room_id: &str) -> Result<Room, ApiError> {
        (**self).get_room(room_id).await
    }

    async fn get_game(&self, game_id: &str) -> Result<GameSnapshot, ApiError> {
        (**self).get_game(game_id).await
    }

    async fn play_card(
        &self,
        game_id: &str,
        player_id: &str,
        card_id: CardId,
        theater: TheaterType,
        face_up: bool,
    ) -> Result<GameSnapshot, ApiError> {
        (**self)
            .play_card(game_id, player_id, card_id, theater, face_up)
            .await
    }

    async fn draw_card(&self, game_id: &str, player_id: &str) -> Result<GameSnapshot, ApiError> {
        (**self).draw_card(game_id, player_id).await
    }

    async fn end_turn(&self, game_id: &str, player_id: &str) -> Result<GameSnapshot, ApiError> {
        (**self).end_turn(game_id, player_id).await
    }

    async fn withdraw(&self, game_id: &str, player_id: &str) -> Result<GameSnapshot, ApiError> {
        (**self).withdraw(game_id, player_id).await
    }

    async fn manipulate_card(
        &self,
        game_id: &str,
        player_id: &str,
        theater: TheaterType,
        card_id: CardId,
        action: ManipulateAction,
    ) -> Result<GameSnapshot, ApiError> {
        (**self)
            .manipulate_card(game_id, player_id, theater, card_id, action)
            .await
    }

    async fn destroy_card(
        &self,
        game_id: &str,
        player_id: &str,
        card_id: CardId,
    ) -> Result<GameSnapshot, ApiError> {
        (**self).destroy_card(game_id, player_id, card_id).await
    }

    async fn update_scores(
        &self,
        game_id: &str,
        player_id: &str,
        scores: &BTreeMap<TheaterType, u32>,
    ) -> Result<GameSnapshot, ApiError> {
        (**self).update_scores(game_id, player_id, scores).await
    }

    async fn advance_battle(&self, game_id: &str) -> Result<GameSnapshot, ApiError> {
        (**self).advance_battle(game_id).await
    }

    async fn advance_game(&self, game_id: &str) -> Result<GameSnapshot, ApiError> {
        (**self).advance_game(game_id).await
    }
}

/// [`GameApi`] over any [`HttpClient`].
pub struct GameApiClient<C: HttpClient = ReqwestHttpClient> {
    base_url: String,
    http: C,
}

impl GameApiClient<ReqwestHttpClient> {
    /// Client against `base_url` using the production transport.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(base_url, ReqwestHttpClient::new())
    }
}

impl<C: HttpClient> GameApiClient<C> {
    pub fn with_http(base_url: impl Into<String>, http: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(operation, url = %url, "GET");
        let response = self
            .http
            .get_json(&url)
            .await
            .map_err(|e| ApiError::Transport {
                operation,
                source: NetworkError::from_http(e, &url),
            })?;
        Self::decode(operation, response)
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        operation: &'static str,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|source| ApiError::Encode { operation, source })?;
        tracing::debug!(operation, url = %url, "POST");
        let response = self
            .http
            .post_json(&url, body.as_deref())
            .await
            .map_err(|e| ApiError::Transport {
                operation,
                source: NetworkError::from_http(e, &url),
            })?;
        Self::decode(operation, response)
    }

    fn decode<T: DeserializeOwned>(
        operation: &'static str,
        response: crate::traits::Response,
    ) -> Result<T, ApiError> {
        if !response.is_success() {
            let message = response.text().trim().to_string();
            return Err(ApiError::Rejected {
                operation,
                status: response.status,
                message,
            });
        }
        response
            .json()
            .map_err(|source| ApiError::Decode { operation, source })
    }

    async fn game_command<B: Serialize>(
        &self,
        operation: &'static str,
        game_id: &str,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<GameSnapshot, ApiError> {
        let path = format!("/api/games/{}/{}", game_id, endpoint);
        self.post_json(operation, &path, body).await
    }
}

#[async_trait]
impl<C: HttpClient> GameApi for GameApiClient<C> {
    async fn create_room(&self, player_name: &str) -> Result<CreateRoomResponse, ApiError> {
        self.post_json("create room", "/api/rooms", Some(&PlayerNameRequest { player_name }))
            .await
    }

    async fn join_room(
        &self,
        room_id: &str,
        player_name: &str,
    ) -> Result<JoinRoomResponse, ApiError> {
        let path = format!("/api/rooms/{}/join", room_id);
        self.post_json("join room", &path, Some(&PlayerNameRequest { player_name }))
            .await
    }

    async fn get_room(&self, room_id: &str) -> Result<Room, ApiError> {
        self.get_json("get room", &format!("/api/rooms/{}", room_id))
            .await
    }

    async fn get_game(&self, game_id: &str) -> Result<GameSnapshot, ApiError> {
        self.get_json("get game", &format!("/api/games/{}", game_id))
            .await
    }

    async fn play_card(
        &self,
        game_id: &str,
        player_id: &str,
        card_id: CardId,
        theater: TheaterType,
        face_up: bool,
    ) -> Result<GameSnapshot, ApiError> {
        let body = PlayCardRequest {
            player_id,
            card_id,
            theater,
            face_up,
        };
        self.game_command("play card", game_id, "play-card", Some(&body))
            .await
    }

    async fn draw_card(&self, game_id: &str, player_id: &str) -> Result<GameSnapshot, ApiError> {
        self.game_command("draw card", game_id, "draw-card", Some(&PlayerRequest { player_id }))
            .await
    }

    async fn end_turn(&self, game_id: &str, player_id: &str) -> Result<GameSnapshot, ApiError> {
        self.game_command("end turn", game_id, "end-turn", Some(&PlayerRequest { player_id }))
            .await
    }

    async fn withdraw(&self, game_id: &str, player_id: &str) -> Result<GameSnapshot, ApiError> {
        self.game_command("withdraw", game_id, "withdraw", Some(&PlayerRequest { player_id }))
            .await
    }

    async fn manipulate_card(
        &self,
        game_id: &str,
        player_id: &str,
        theater: TheaterType,
        card_id: CardId,
        action: ManipulateAction,
    ) -> Result<GameSnapshot, ApiError> {
        let body = ManipulateCardRequest {
            player_id,
            theater,
            card_id,
            action,
        };
        self.game_command("manipulate card", game_id, "manipulate-card", Some(&body))
            .await
    }

    async fn destroy_card(
        &self,
        game_id: &str,
        player_id: &str,
        card_id: CardId,
    ) -> Result<GameSnapshot, ApiError> {
        let body = DestroyCardRequest { player_id, card_id };
        self.game_command("destroy card", game_id, "destroy-card", Some(&body))
            .await
    }

    async fn update_scores(
        &self,
        game_id: &str,
        player_id: &str,
        scores: &BTreeMap<TheaterType, u32>,
    ) -> Result<GameSnapshot, ApiError> {
        let body = UpdateScoresRequest { player_id, scores };
        self.game_command("update scores", game_id, "update-scores", Some(&body))
            .await
    }

    async fn advance_battle(&self, game_id: &str) -> Result<GameSnapshot, ApiError> {
        self.game_command::<()>("advance battle", game_id, "next-battle", None)
            .await
    }

    async fn advance_game(&self, game_id: &str) -> Result<GameSnapshot, ApiError> {
        self.game_command::<()>("advance game", game_id, "next-game", None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::HttpError;

    fn snapshot_json() -> serde_json::Value {
        serde_json::json!({
            "id": "g1",
            "roomId": "r1",
            "player1": {"id": "a", "name": "Ann", "hand": [], "score": 0},
            "player2": {"id": "b", "name": "Bo", "hand": [], "score": 0},
            "deck": [],
            "trash": [],
            "theaterOrder": ["air", "land", "sea"],
            "theaters": {},
            "currentPlayerId": "a",
            "phase": "playing",
            "battleNumber": 1,
            "firstPlayerId": "a"
        })
    }

    #[tokio::test]
    async fn test_execute_play_card_posts_body() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://svc/api/games/g1/play-card",
            MockResponse::json(&snapshot_json()),
        );
        let api = GameApiClient::with_http("http://svc/", mock.clone());
        let ids = SessionIds::new("g1", "a", "r1");

        let snapshot = api
            .execute(
                &ids,
                &Command::PlayCard {
                    card_id: 7,
                    theater: TheaterType::Air,
                    face_up: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(snapshot.id, "g1");

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        let body = requests[0].json_body().unwrap();
        assert_eq!(body["playerId"], "a");
        assert_eq!(body["cardId"], 7);
        assert_eq!(body["theater"], "air");
        assert_eq!(body["faceUp"], true);
    }

    #[tokio::test]
    async fn test_non_success_is_rejected() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://svc/api/games/g1/end-turn",
            MockResponse::status(400, "not your turn\n"),
        );
        let api = GameApiClient::with_http("http://svc", mock);

        let err = api.end_turn("g1", "b").await.unwrap_err();
        match err {
            ApiError::Rejected {
                operation,
                status,
                message,
            } => {
                assert_eq!(operation, "end turn");
                assert_eq!(status, 400);
                assert_eq!(message, "not your turn");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_url() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://svc/api/games/g1",
            MockResponse::Error(HttpError::Timeout("slow".to_string())),
        );
        let api = GameApiClient::with_http("http://svc", mock);

        let err = api.get_game("g1").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Transport {
                source: NetworkError::Timeout { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_advance_battle_sends_no_body() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://svc/api/games/g1/next-battle",
            MockResponse::json(&snapshot_json()),
        );
        let api = GameApiClient::with_http("http://svc", mock.clone());

        api.advance_battle("g1").await.unwrap();
        let requests = mock.get_requests();
        assert_eq!(requests[0].body, None);
    }
}
