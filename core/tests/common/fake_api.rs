// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory backend implementing the resource API.
//!
//! Entities are kept as JSON values keyed by resource, the way the REST backend
//! would see them, so every resource shares one generic implementation.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use diario_core::schedule::generate;
use diario_core::{
    Aula, AulaApi, Failure, FailureKind, GenerateRequest, Page, Query, Record, Resource,
    ResourceApi, ResourceKind,
};
use serde_json::Value;

#[derive(Debug, Default)]
struct Tables {
    rows: HashMap<ResourceKind, BTreeMap<i64, Value>>,
    next_id: i64,
    failures: VecDeque<Failure>,
    delays: VecDeque<Duration>,
    calls: Vec<String>,
}

/// In-memory stand-in for the REST API.
#[derive(Debug, Default)]
pub struct FakeApi {
    tables: Mutex<Tables>,
}

#[allow(dead_code)]
impl FakeApi {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an entity directly and returns its id.
    pub fn seed<R: Resource>(&self, data: &R) -> i64 {
        let mut tables = self.lock();
        tables.next_id += 1;
        let id = tables.next_id;
        let value = serde_json::to_value(data).unwrap();
        tables.rows.entry(R::KIND).or_default().insert(id, value);
        id
    }

    /// Number of stored entities of a resource.
    pub fn len(&self, kind: ResourceKind) -> usize {
        self.lock().rows.get(&kind).map_or(0, BTreeMap::len)
    }

    /// Makes the next call fail with `failure`, after its delay if any.
    pub fn fail_next(&self, failure: Failure) {
        self.lock().failures.push_back(failure);
    }

    /// Delays the next call by `delay`.
    pub fn delay_next(&self, delay: Duration) {
        self.lock().delays.push_back(delay);
    }

    /// The calls received so far, like `POST aulas`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn enter(&self, call: String) -> Result<(), Failure> {
        let (delay, failure) = {
            let mut tables = self.lock();
            tables.calls.push(call);
            (tables.delays.pop_front(), tables.failures.pop_front())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        failure.map_or(Ok(()), Err)
    }

    fn records<R: Resource>(&self, filter: impl Fn(&Value) -> bool) -> Vec<Record<R>> {
        self.lock()
            .rows
            .get(&R::KIND)
            .into_iter()
            .flatten()
            .filter(|(_, v)| filter(v))
            .map(|(id, v)| Record::new(*id, serde_json::from_value(v.clone()).unwrap()))
            .collect()
    }
}

fn paginate<T>(mut records: Vec<T>, query: &Query) -> Page<T> {
    let count = records.len() as u64;
    if let (Some(page), Some(limit)) = (query.page, query.limit) {
        let start = ((page.max(1) - 1) * limit) as usize;
        records = records.into_iter().skip(start).take(limit as usize).collect();
    }
    let message = records.is_empty().then(|| "Nenhum registro encontrado".to_string());
    Page {
        data: records,
        count,
        message,
    }
}

fn not_found(kind: ResourceKind, id: i64) -> Failure {
    Failure::new(FailureKind::NotFound, format!("{kind} #{id} not found")).with_status(404)
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for FakeApi {
    async fn list(&self, query: &Query) -> Result<Page<Record<R>>, Failure> {
        self.enter(format!("GET {}", R::KIND.path())).await?;
        let search = query.search.as_deref().map(str::to_lowercase);
        let records = self.records::<R>(|v| match &search {
            Some(s) => v.to_string().to_lowercase().contains(s),
            None => true,
        });
        Ok(paginate(records, query))
    }

    async fn get(&self, id: i64) -> Result<Record<R>, Failure> {
        self.enter(format!("GET {}/{id}", R::KIND.path())).await?;
        let value = self.lock().rows.get(&R::KIND).and_then(|a| a.get(&id)).cloned();
        match value {
            Some(v) => Ok(Record::new(id, serde_json::from_value(v).unwrap())),
            None => Err(not_found(R::KIND, id)),
        }
    }

    async fn create(&self, data: &R) -> Result<Record<R>, Failure> {
        self.enter(format!("POST {}", R::KIND.path())).await?;
        let id = self.seed(data);
        Ok(Record::new(id, data.clone()))
    }

    async fn update(&self, id: i64, data: &R) -> Result<Record<R>, Failure> {
        self.enter(format!("PUT {}/{id}", R::KIND.path())).await?;
        let mut tables = self.lock();
        match tables.rows.get_mut(&R::KIND).and_then(|a| a.get_mut(&id)) {
            Some(v) => {
                *v = serde_json::to_value(data).unwrap();
                Ok(Record::new(id, data.clone()))
            }
            None => Err(not_found(R::KIND, id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), Failure> {
        self.enter(format!("DELETE {}/{id}", R::KIND.path())).await?;
        let removed = self
            .lock()
            .rows
            .get_mut(&R::KIND)
            .and_then(|a| a.remove(&id));
        removed.map(|_| ()).ok_or_else(|| not_found(R::KIND, id))
    }
}

#[async_trait]
impl AulaApi for FakeApi {
    async fn list_by_aluno(
        &self,
        aluno_id: i64,
        query: &Query,
    ) -> Result<Page<Record<Aula>>, Failure> {
        self.enter(format!("GET aulas/aluno/{aluno_id}")).await?;
        let records = self.records::<Aula>(|v| v["alunoId"] == aluno_id);
        Ok(paginate(records, query))
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<Vec<Aula>, Failure> {
        self.enter("POST aulas/gerar".to_string()).await?;
        generate(request).map_err(|e| Failure::from(e).with_status(422))
    }
}
