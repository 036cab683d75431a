// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The REST resource API consumed by the store.

use async_trait::async_trait;

use crate::{
    Aluno, Aula, Contrato, DiaAula, Failure, GenerateRequest, Page, Professor, Query, Record,
    Resource,
};

/// CRUD access to one resource.
///
/// Implementations normalize every transport error into a [`Failure`].
#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync {
    /// Lists a page of entities.
    async fn list(&self, query: &Query) -> Result<Page<Record<R>>, Failure>;

    /// Fetches one entity.
    async fn get(&self, id: i64) -> Result<Record<R>, Failure>;

    /// Creates an entity.
    async fn create(&self, data: &R) -> Result<Record<R>, Failure>;

    /// Replaces an entity.
    async fn update(&self, id: i64, data: &R) -> Result<Record<R>, Failure>;

    /// Deletes an entity.
    async fn delete(&self, id: i64) -> Result<(), Failure>;
}

/// Session-specific reads on top of the CRUD access.
#[async_trait]
pub trait AulaApi: ResourceApi<Aula> {
    /// Lists the sessions of a student.
    async fn list_by_aluno(&self, aluno_id: i64, query: &Query)
    -> Result<Page<Record<Aula>>, Failure>;

    /// Generates, without persisting, the sessions of a contract.
    async fn generate(&self, request: &GenerateRequest) -> Result<Vec<Aula>, Failure>;
}

/// Everything the application needs from the backend.
pub trait Api:
    ResourceApi<Aluno>
    + ResourceApi<Professor>
    + ResourceApi<Contrato>
    + ResourceApi<DiaAula>
    + AulaApi
{
}

impl<T> Api for T where
    T: ResourceApi<Aluno>
        + ResourceApi<Professor>
        + ResourceApi<Contrato>
        + ResourceApi<DiaAula>
        + AulaApi
{
}
