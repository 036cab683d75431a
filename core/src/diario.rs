// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, Time};

use crate::api::{AulaApi, ResourceApi};
use crate::form::AulaForm;
use crate::schedule::GenerateRequest;
use crate::store::{Dispatcher, Store};
use crate::{
    Aluno, Aula, Config, Contrato, DiaAula, Failure, Professor, Query, Record, Resource,
};

/// Class diary application core.
#[derive(Debug, Clone)]
pub struct Diario<A> {
    config: Config,
    api: A,
    store: Store,
}

impl<A> Diario<A> {
    /// Creates a new instance with the given configuration and backend.
    pub fn new(mut config: Config, api: A) -> Self {
        config.normalize();
        Self {
            config,
            api,
            store: Store::new(),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The backend.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// The application state.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// A listing query for the given page, sized by the configuration.
    pub fn query(&self, page: u32, search: Option<String>) -> Query {
        Query::page(page, self.config.page_size).with_search(search)
    }

    /// A new session with the configured default kind.
    pub fn default_aula(&self, data: Date, hora_inicio: Time, hora_fim: Time) -> Aula {
        Aula {
            tipo: self.config.default_tipo,
            ..Aula::new(data, hora_inicio, hora_fim)
        }
    }

    /// The dispatcher of a resource.
    pub fn dispatcher<R>(&self) -> Dispatcher<'_, R, A>
    where
        R: Resource,
        A: ResourceApi<R>,
    {
        Dispatcher::new(self.store.slice::<R>(), &self.api)
    }
}

impl<A> Diario<A>
where
    A: ResourceApi<Aluno>
        + ResourceApi<Professor>
        + ResourceApi<Contrato>
        + ResourceApi<DiaAula>
        + AulaApi,
{
    /// Students.
    pub fn alunos(&self) -> Dispatcher<'_, Aluno, A> {
        self.dispatcher()
    }

    /// Professors.
    pub fn professores(&self) -> Dispatcher<'_, Professor, A> {
        self.dispatcher()
    }

    /// Contracts.
    pub fn contratos(&self) -> Dispatcher<'_, Contrato, A> {
        self.dispatcher()
    }

    /// Class sessions.
    pub fn aulas(&self) -> Dispatcher<'_, Aula, A> {
        self.dispatcher()
    }

    /// Weekly class-day rules.
    pub fn dias_aulas(&self) -> Dispatcher<'_, DiaAula, A> {
        self.dispatcher()
    }

    /// Generates the sessions of a contract into a new form.
    ///
    /// The backend generates them unless `local` is set.
    pub async fn generate_form(
        &self,
        contrato: &Record<Contrato>,
        local: bool,
    ) -> Result<AulaForm, Failure> {
        let request = GenerateRequest::from(contrato);
        let aulas = if local {
            self.aulas().generate_local(&request)?
        } else {
            self.aulas().generate(&request).await?
        };

        let mut form = AulaForm::new();
        form.replace_all(
            aulas
                .into_iter()
                .map(|a| Aula {
                    contrato_id: Some(contrato.id),
                    aluno_id: Some(contrato.data.aluno_id),
                    ..a
                })
                .collect(),
        );
        Ok(form)
    }
}
