// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::store::{Slice, Store};

/// The resources exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Students.
    Aluno,

    /// Professors.
    Professor,

    /// Contracts.
    Contrato,

    /// Class sessions.
    Aula,

    /// Weekly class-day rules.
    DiaAula,
}

impl ResourceKind {
    /// Path segment of the resource in the REST API.
    pub const fn path(self) -> &'static str {
        match self {
            ResourceKind::Aluno => "alunos",
            ResourceKind::Professor => "professores",
            ResourceKind::Contrato => "contratos",
            ResourceKind::Aula => "aulas",
            ResourceKind::DiaAula => "diasAulas",
        }
    }

    /// Human readable, singular name.
    pub const fn label(self) -> &'static str {
        match self {
            ResourceKind::Aluno => "aluno",
            ResourceKind::Professor => "professor",
            ResourceKind::Contrato => "contrato",
            ResourceKind::Aula => "aula",
            ResourceKind::DiaAula => "dia de aula",
        }
    }

    /// Route of the listing screen, where successful mutations navigate to.
    pub fn route(self) -> String {
        format!("/{}", self.path())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An entity type served by the REST API.
pub trait Resource:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Which resource this is.
    const KIND: ResourceKind;

    /// The slice of the store holding this resource.
    fn slice(store: &Store) -> &Slice<Self>;
}

/// A persisted entity: the backend-assigned id plus the entity fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record<T> {
    /// Durable id assigned by the backend.
    pub id: i64,

    /// The entity itself.
    #[serde(flatten)]
    pub data: T,
}

impl<T> Record<T> {
    /// Creates a new record.
    pub fn new(id: i64, data: T) -> Self {
        Self { id, data }
    }
}

/// One page of a listing, together with the total number of matching entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Entities in this page.
    pub data: Vec<T>,

    /// Total number of matching entities.
    #[serde(default)]
    pub count: u64,

    /// Optional message from the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Page<T> {
    /// Creates a page whose count is the number of entities.
    pub fn from_vec(data: Vec<T>) -> Self {
        let count = data.len() as u64;
        Self {
            data,
            count,
            message: None,
        }
    }
}

/// Listing query, with pagination and free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    /// Page number, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// The maximum number of items to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Free-text search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Query {
    /// Creates a query for the given page with the given page size.
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page.max(1)),
            limit: Some(limit),
            search: None,
        }
    }

    /// Sets the free-text search.
    #[must_use]
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.trim().is_empty());
        self
    }
}
