// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! REST client for the class diary backend.

use std::sync::Arc;

use async_trait::async_trait;
use diario_core::{
    Aula, AulaApi, Failure, GenerateRequest, Page, Query, Record, Resource, ResourceApi,
};
use reqwest::Method;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::types::DataEnvelope;

/// REST client for the class diary backend.
///
/// Every resource lives under `{base_url}/{resource}`, see
/// [`ResourceKind::path`](diario_core::ResourceKind::path).
///
/// # Example
///
/// ```ignore
/// use diario_client::{ApiConfig, AuthMethod, DiarioClient};
/// use diario_core::{Aluno, Query};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ApiConfig {
///     auth: AuthMethod::Bearer {
///         token: "secret".to_string(),
///     },
///     ..ApiConfig::new("https://diario.example.com/api")
/// };
///
/// let client = DiarioClient::new(config)?;
/// let alunos = client.list::<Aluno>(&Query::page(1, 20)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DiarioClient {
    http: Arc<HttpClient>,
    config: ApiConfig,
}

impl DiarioClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or HTTP client initialization fails.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let http = HttpClient::new(config.clone())?;
        Ok(Self {
            http: Arc::new(http),
            config,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Lists a page of entities.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list<R: Resource>(&self, query: &Query) -> Result<Page<Record<R>>, ApiError> {
        let req = self
            .http
            .build_request(Method::GET, R::KIND.path())
            .query(query);
        self.http.execute_json(req).await
    }

    /// Fetches one entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get<R: Resource>(&self, id: i64) -> Result<Record<R>, ApiError> {
        let req = self.http.build_request(Method::GET, &item_path::<R>(id));
        self.data(req).await
    }

    /// Creates an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create<R: Resource>(&self, data: &R) -> Result<Record<R>, ApiError> {
        let req = self
            .http
            .build_request(Method::POST, R::KIND.path())
            .json(data);
        self.data(req).await
    }

    /// Replaces an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update<R: Resource>(&self, id: i64, data: &R) -> Result<Record<R>, ApiError> {
        let req = self
            .http
            .build_request(Method::PUT, &item_path::<R>(id))
            .json(data);
        self.data(req).await
    }

    /// Deletes an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete<R: Resource>(&self, id: i64) -> Result<(), ApiError> {
        let req = self.http.build_request(Method::DELETE, &item_path::<R>(id));
        self.http.execute(req).await?;
        Ok(())
    }

    /// Lists the sessions of a student.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_aulas_by_aluno(
        &self,
        aluno_id: i64,
        query: &Query,
    ) -> Result<Page<Record<Aula>>, ApiError> {
        let path = format!("{}/aluno/{aluno_id}", Aula::KIND.path());
        let req = self.http.build_request(Method::GET, &path).query(query);
        self.http.execute_json(req).await
    }

    /// Asks the backend to generate, without persisting, the sessions of a contract.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn generate_aulas(&self, request: &GenerateRequest) -> Result<Vec<Aula>, ApiError> {
        let path = format!("{}/gerar", Aula::KIND.path());
        let req = self.http.build_request(Method::POST, &path).json(request);
        self.data(req).await
    }

    async fn data<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let envelope: DataEnvelope<T> = self.http.execute_json(req).await?;
        Ok(envelope.data)
    }
}

fn item_path<R: Resource>(id: i64) -> String {
    format!("{}/{id}", R::KIND.path())
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for DiarioClient {
    async fn list(&self, query: &Query) -> Result<Page<Record<R>>, Failure> {
        Ok(DiarioClient::list(self, query).await?)
    }

    async fn get(&self, id: i64) -> Result<Record<R>, Failure> {
        Ok(DiarioClient::get(self, id).await?)
    }

    async fn create(&self, data: &R) -> Result<Record<R>, Failure> {
        Ok(DiarioClient::create(self, data).await?)
    }

    async fn update(&self, id: i64, data: &R) -> Result<Record<R>, Failure> {
        Ok(DiarioClient::update(self, id, data).await?)
    }

    async fn delete(&self, id: i64) -> Result<(), Failure> {
        Ok(DiarioClient::delete::<R>(self, id).await?)
    }
}

#[async_trait]
impl AulaApi for DiarioClient {
    async fn list_by_aluno(
        &self,
        aluno_id: i64,
        query: &Query,
    ) -> Result<Page<Record<Aula>>, Failure> {
        Ok(self.list_aulas_by_aluno(aluno_id, query).await?)
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<Vec<Aula>, Failure> {
        Ok(self.generate_aulas(request).await?)
    }
}
