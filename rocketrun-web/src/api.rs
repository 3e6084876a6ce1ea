//! HTTP client for the game service.
use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use rocketrun_game::{
    ActionResponse, ApiError, Destination, FlyRequest, GameApi, RoleRequest,
    interpret_destinations, interpret_reply,
};
use serde::Serialize;

use crate::config::AppConfig;

pub struct HttpGameApi {
    config: AppConfig,
}

fn network(err: gloo::net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

async fn read_reply(response: Response) -> Result<ActionResponse, ApiError> {
    let (ok, status) = (response.ok(), response.status());
    let body = response.text().await.map_err(network)?;
    interpret_reply(ok, status, &body)
}

impl HttpGameApi {
    #[must_use]
    pub const fn new(config: AppConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    async fn post_empty(&self, path: &str) -> Result<ActionResponse, ApiError> {
        let response = Request::post(&self.config.endpoint(path))
            .send()
            .await
            .map_err(network)?;
        read_reply(response).await
    }

    async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ActionResponse, ApiError> {
        let request = Request::post(&self.config.endpoint(path))
            .json(body)
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        let response = request.send().await.map_err(network)?;
        read_reply(response).await
    }
}

#[async_trait(?Send)]
impl GameApi for HttpGameApi {
    async fn start_game(&self) -> Result<ActionResponse, ApiError> {
        self.post_empty("start").await
    }

    async fn choose_role(&self, role: &str) -> Result<ActionResponse, ApiError> {
        let body = RoleRequest {
            role: role.to_string(),
        };
        self.post_json("choose_role", &body).await
    }

    async fn destinations(&self) -> Result<Vec<Destination>, ApiError> {
        let response = Request::get(&self.config.endpoint("countries"))
            .send()
            .await
            .map_err(network)?;
        let (ok, status) = (response.ok(), response.status());
        let body = response.text().await.map_err(network)?;
        interpret_destinations(ok, status, &body)
    }

    async fn fly(&self, icao: &str) -> Result<ActionResponse, ApiError> {
        let body = FlyRequest {
            icao: icao.to_string(),
        };
        self.post_json("fly", &body).await
    }

    async fn eat(&self) -> Result<ActionResponse, ApiError> {
        self.post_empty("eat").await
    }

    async fn fight(&self) -> Result<ActionResponse, ApiError> {
        self.post_empty("fight").await
    }
}
