// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! CRUD lifecycle of a resource through its dispatcher.

use diario_core::{
    Aluno, Diario, Failure, FailureKind, FieldErrors, Operation, Professor, RequestState,
    ResourceKind,
};

use crate::common::{FakeApi, assert_field_error, test_aluno, test_config, test_diario};

#[tokio::test]
async fn crud_lifecycle_list_create_update_delete() {
    // Arrange
    let diario = test_diario();
    for nome in ["Ana", "Bruno", "Carla"] {
        diario.api().seed(&test_aluno(nome));
    }
    let alunos = diario.alunos();

    // Act - list
    let page = alunos.list(&diario.query(1, None)).await.unwrap();
    assert_eq!(page.data.len(), 3);
    assert_eq!(alunos.state().count(), 3);

    // Act - create
    let created = alunos.create(&test_aluno("Daniel")).await.unwrap();
    let state = alunos.state();
    assert_eq!(state.count(), 4);
    assert_eq!(state.list().len(), 4);
    assert_eq!(state.current().map(|a| a.id), Some(created.id));
    assert!(state.request().succeeded(Operation::Create));

    // Act - update
    let changed = Aluno {
        email: Some("daniel@example.com".to_string()),
        ..created.data.clone()
    };
    alunos.update(created.id, &changed).await.unwrap();
    let state = alunos.state();
    let listed = state.list().iter().find(|a| a.id == created.id).unwrap();
    assert_eq!(listed.data.email.as_deref(), Some("daniel@example.com"));

    // Act - delete
    alunos.delete(created.id).await.unwrap();
    let state = alunos.state();
    assert_eq!(state.count(), 3);
    assert!(state.list().iter().all(|a| a.id != created.id));
    assert!(state.current().is_none());
    assert_eq!(diario.api().len(ResourceKind::Aluno), 3);
}

#[tokio::test]
async fn crud_lifecycle_delete_among_three() {
    // Arrange
    let diario = test_diario();
    let ids: Vec<_> = ["Ana", "Bruno", "Carla"]
        .into_iter()
        .map(|a| diario.api().seed(&test_aluno(a)))
        .collect();
    let alunos = diario.alunos();
    alunos.list(&diario.query(1, None)).await.unwrap();
    alunos.get(ids[1]).await.unwrap();

    // Act
    alunos.delete(ids[1]).await.unwrap();

    // Assert
    let state = alunos.state();
    assert_eq!(state.list().len(), 2);
    assert_eq!(state.count(), 2);
    assert!(state.current().is_none());
}

#[tokio::test]
async fn crud_lifecycle_failed_create_keeps_list() {
    // Arrange
    let diario = test_diario();
    diario.api().seed(&test_aluno("Ana"));
    let alunos = diario.alunos();
    alunos.list(&diario.query(1, None)).await.unwrap();

    let mut errors = FieldErrors::new();
    errors.insert("nome".to_string(), "required".to_string());
    diario
        .api()
        .fail_next(Failure::validation("Invalid data", errors).with_status(422));

    // Act
    let failure = alunos.create(&Aluno::default()).await.unwrap_err();

    // Assert
    assert_field_error(&failure, "nome");
    let state = alunos.state();
    assert_eq!(state.request().failed(Operation::Create), Some(&failure));
    assert_eq!(state.list().len(), 1);
    assert_eq!(state.count(), 1);

    alunos.clear();
    assert_eq!(alunos.state().request(), &RequestState::Idle);
}

#[tokio::test]
async fn crud_lifecycle_not_found() {
    let diario = test_diario();
    let professores = diario.professores();

    let failure = professores.get(99).await.unwrap_err();

    assert_eq!(failure.kind, FailureKind::NotFound);
    assert_eq!(failure.status, Some(404));
    assert!(professores.state().current().is_none());
    assert!(
        diario
            .store()
            .slice::<Professor>()
            .snapshot()
            .request()
            .failed(Operation::Get)
            .is_some()
    );
}

#[tokio::test]
async fn crud_lifecycle_search_and_pages() {
    let diario = Diario::new(test_config(2), FakeApi::new());
    for nome in ["Ana", "Bruno", "Carla", "Anabela"] {
        diario.api().seed(&test_aluno(nome));
    }
    let alunos = diario.alunos();

    let page = alunos.list(&diario.query(1, Some("ana".to_string()))).await.unwrap();
    assert_eq!(page.count, 2);

    let page = alunos.list(&diario.query(2, None)).await.unwrap();
    assert_eq!(page.count, 4);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].data.nome, "Carla");

    let page = alunos.list(&diario.query(5, None)).await.unwrap();
    assert!(page.data.is_empty());
    assert!(alunos.state().request().succeeded(Operation::List));
    assert_eq!(
        alunos.state().request(),
        &RequestState::Success {
            op: Operation::List,
            message: Some("Nenhum registro encontrado".to_string())
        }
    );
}
