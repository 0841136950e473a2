use super::error::ApiError;
use contracts::projections::p909_fleet_selector::dto::{
    ApiErrorBody, FleetFacetRequest, FleetFacetResponse, FleetSearchRequest, FleetSearchResponse,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;
use std::time::Duration;

/// Сервер подбора техники: фасеты и постраничный поиск
#[allow(async_fn_in_trait)]
pub trait FleetBackend {
    async fn fetch_facets(
        &self,
        request: &FleetFacetRequest,
    ) -> Result<FleetFacetResponse, ApiError>;

    async fn search_fleet(
        &self,
        request: &FleetSearchRequest,
    ) -> Result<FleetSearchResponse, ApiError>;
}

impl<T: FleetBackend> FleetBackend for Rc<T> {
    async fn fetch_facets(
        &self,
        request: &FleetFacetRequest,
    ) -> Result<FleetFacetResponse, ApiError> {
        (**self).fetch_facets(request).await
    }

    async fn search_fleet(
        &self,
        request: &FleetSearchRequest,
    ) -> Result<FleetSearchResponse, ApiError> {
        (**self).search_fleet(request).await
    }
}

/// Источник задержек для debounce
#[allow(async_fn_in_trait)]
pub trait Clock {
    async fn sleep(&self, duration: Duration);
}

/// Таймеры браузера
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooClock;

impl Clock for GlooClock {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

/// HTTP-клиент: `POST {base}/facets` и `POST {base}/search`
#[derive(Debug, Clone)]
pub struct HttpFleetBackend {
    base: String,
}

impl HttpFleetBackend {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, ApiError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base.trim_end_matches('/'), path);

        let response = Request::post(&url)
            .json(body)
            .map_err(|e| ApiError::Network(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("Request failed: {}", e)))?;

        if !response.ok() {
            return Err(server_error(response).await);
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

async fn server_error(response: Response) -> ApiError {
    let status = response.status();
    let body = match response.text().await {
        Ok(text) => serde_json::from_str::<ApiErrorBody>(&text).ok(),
        Err(_) => None,
    };
    ApiError::Server { status, body }
}

impl FleetBackend for HttpFleetBackend {
    async fn fetch_facets(
        &self,
        request: &FleetFacetRequest,
    ) -> Result<FleetFacetResponse, ApiError> {
        self.post("/facets", request).await
    }

    async fn search_fleet(
        &self,
        request: &FleetSearchRequest,
    ) -> Result<FleetSearchResponse, ApiError> {
        self.post("/search", request).await
    }
}
