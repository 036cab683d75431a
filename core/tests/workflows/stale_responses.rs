// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Overlapping requests against the same resource.

use std::time::Duration;

use diario_core::{Failure, FailureKind, Operation};

use crate::common::{test_aluno, test_diario};

#[tokio::test]
async fn stale_responses_older_listing_is_ignored() {
    // Arrange
    let diario = test_diario();
    for nome in ["Ana", "Bruno"] {
        diario.api().seed(&test_aluno(nome));
    }
    let alunos = diario.alunos();
    diario.api().delay_next(Duration::from_millis(50));

    // Act - the first request is slow, the second answers at once
    let slow = diario.query(1, Some("ana".to_string()));
    let fast = diario.query(1, Some("bruno".to_string()));
    let (older, newer) = tokio::join!(alunos.list(&slow), alunos.list(&fast));

    // Assert - both calls return their own data, only the newer one is kept
    assert_eq!(older.unwrap().data[0].data.nome, "Ana");
    assert_eq!(newer.unwrap().data[0].data.nome, "Bruno");
    let state = alunos.state();
    assert_eq!(state.list().len(), 1);
    assert_eq!(state.list()[0].data.nome, "Bruno");
    assert!(state.request().succeeded(Operation::List));
}

#[tokio::test]
async fn stale_responses_older_failure_is_ignored() {
    let diario = test_diario();
    diario.api().seed(&test_aluno("Ana"));
    let alunos = diario.alunos();
    diario.api().delay_next(Duration::from_millis(50));

    let query = diario.query(1, None);
    let failing = async {
        let result = alunos.list(&query).await;
        assert!(result.is_err());
    };
    let succeeding = async {
        alunos.list(&query).await.unwrap();
    };
    diario.api().fail_next(Failure::new(FailureKind::Network, "offline"));
    tokio::join!(failing, succeeding);

    let state = alunos.state();
    assert!(state.request().failure().is_none());
    assert_eq!(state.list().len(), 1);
}
