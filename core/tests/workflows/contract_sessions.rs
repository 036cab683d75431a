// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! A contract's sessions from generation, through manual edits, to submission.

use diario_core::{
    Aula, AulaForm, AulaPatch, DiaSemana, Failure, FailureKind, FormError, Operation, Record,
    ResourceKind, TipoAula,
};
use jiff::civil::{date, time};

use crate::common::{
    assert_field_error, assert_sessions_on, test_aluno, test_contrato, test_diario, test_rule,
};

#[tokio::test]
async fn contract_sessions_generate_edit_submit() {
    // Arrange
    let diario = test_diario();
    let aluno_id = diario.api().seed(&test_aluno("Ana"));
    let contrato = test_contrato(
        aluno_id,
        date(2024, 1, 1),
        date(2024, 1, 14),
        vec![test_rule(DiaSemana::Segunda, 9, 10)],
    );
    let contrato = diario.contratos().create(&contrato).await.unwrap();

    // Act - generate remotely
    let mut form = diario.generate_form(&contrato, false).await.unwrap();
    assert_eq!(diario.api().calls().last().map(String::as_str), Some("POST aulas/gerar"));
    assert_sessions_on(&form.to_payload(), &[date(2024, 1, 1), date(2024, 1, 8)]);
    assert!(diario.aulas().state().request().succeeded(Operation::Generate));
    assert_eq!(diario.aulas().state().generated().len(), 2);

    // Act - manual edits
    let first = form.entries()[0].id;
    let extra = form
        .add(Aula {
            tipo: TipoAula::Reposicao,
            contrato_id: Some(contrato.id),
            aluno_id: Some(aluno_id),
            ..Aula::new(date(2024, 1, 3), time(14, 0, 0, 0), time(15, 0, 0, 0))
        })
        .unwrap();
    form.edit(
        first,
        &AulaPatch {
            observacao: Some(Some("primeira aula".to_string())),
            ..Default::default()
        },
    )
    .unwrap();

    // Act - submit
    let summary = diario.aulas().submit(&mut form).await.unwrap();

    // Assert
    assert_eq!(summary.created, 3);
    assert_eq!(summary.updated, 0);
    assert_eq!(diario.api().len(ResourceKind::Aula), 3);
    assert!(form.remote_id(extra).is_some());
    assert!(form.changes().is_empty());

    let page = diario
        .aulas()
        .list_by_aluno(aluno_id, &diario.query(1, None))
        .await
        .unwrap();
    assert_eq!(page.count, 3);
    assert!(page.data.iter().all(|a| a.data.contrato_id == Some(contrato.id)));
    let first = page.data.iter().find(|a| a.data.data == date(2024, 1, 1)).unwrap();
    assert_eq!(first.data.observacao.as_deref(), Some("primeira aula"));
}

#[tokio::test]
async fn contract_sessions_local_generation_skips_backend() {
    let diario = test_diario();
    let contrato = Record::new(
        7,
        test_contrato(
            1,
            date(2024, 1, 1),
            date(2024, 1, 31),
            vec![
                test_rule(DiaSemana::Terca, 9, 10),
                test_rule(DiaSemana::Quinta, 9, 10),
            ],
        ),
    );

    let form = diario.generate_form(&contrato, true).await.unwrap();

    assert!(diario.api().calls().is_empty());
    // 2024-01 has five Tuesdays and four Thursdays
    assert_eq!(form.len(), 9);
    assert!(form.entries().iter().all(|a| a.aula.contrato_id == Some(7)));
    assert!(form.entries().iter().all(|a| a.aula.aluno_id == Some(1)));
}

#[tokio::test]
async fn contract_sessions_invalid_schedule() {
    let diario = test_diario();
    let contrato = Record::new(
        1,
        test_contrato(
            1,
            date(2024, 1, 14),
            date(2024, 1, 1),
            vec![test_rule(DiaSemana::Segunda, 9, 10)],
        ),
    );

    let failure = diario.generate_form(&contrato, true).await.unwrap_err();
    assert_field_error(&failure, "dataFim");
    assert!(diario.aulas().state().request().failed(Operation::Generate).is_some());

    let failure = diario.generate_form(&contrato, false).await.unwrap_err();
    assert_field_error(&failure, "dataFim");
    assert_eq!(failure.status, Some(422));
}

#[tokio::test]
async fn contract_sessions_form_rejects_duplicate_dates() {
    let diario = test_diario();
    let contrato = Record::new(
        1,
        test_contrato(
            1,
            date(2024, 1, 1),
            date(2024, 1, 14),
            vec![test_rule(DiaSemana::Segunda, 9, 10)],
        ),
    );
    let mut form = diario.generate_form(&contrato, true).await.unwrap();

    let err = form
        .add(diario.default_aula(date(2024, 1, 8), time(16, 0, 0, 0), time(17, 0, 0, 0)))
        .unwrap_err();
    assert_eq!(err, FormError::DuplicateDate(date(2024, 1, 8)));
    assert_field_error(&Failure::from(err), "data");
    assert_eq!(form.len(), 2);
}

#[tokio::test]
async fn contract_sessions_submit_resumes_after_failure() {
    // Arrange
    let diario = test_diario();
    let mut form = AulaForm::new();
    form.replace_all(vec![
        Aula::new(date(2024, 1, 1), time(9, 0, 0, 0), time(10, 0, 0, 0)),
        Aula::new(date(2024, 1, 8), time(9, 0, 0, 0), time(10, 0, 0, 0)),
    ]);
    diario.api().fail_next(Failure::new(FailureKind::Network, "offline"));

    // Act - first attempt fails before anything is stored
    let failure = diario.aulas().submit(&mut form).await.unwrap_err();
    assert_eq!(failure.kind, FailureKind::Network);
    assert_eq!(form.changes().create.len(), 2);

    // Act - second attempt
    let summary = diario.aulas().submit(&mut form).await.unwrap();

    // Assert
    assert_eq!(summary.created, 2);
    assert_eq!(diario.api().len(ResourceKind::Aula), 2);
}

#[tokio::test]
async fn contract_sessions_edit_persisted_sessions() {
    // Arrange
    let diario = test_diario();
    let ids: Vec<_> = [1, 8, 15]
        .into_iter()
        .map(|d| {
            diario
                .api()
                .seed(&Aula::new(date(2024, 1, d), time(9, 0, 0, 0), time(10, 0, 0, 0)))
        })
        .collect();
    let page = diario.aulas().list(&diario.query(1, None)).await.unwrap();
    let mut form = AulaForm::from_records(page.data);

    // Act
    let moved = form.local_id(ids[0]).unwrap();
    form.edit(
        moved,
        &AulaPatch {
            data: Some(date(2024, 1, 2)),
            ..Default::default()
        },
    )
    .unwrap();
    let dropped = form.local_id(ids[2]).unwrap();
    let removed = form.remove(dropped).unwrap();
    assert_eq!(removed.remote_id, Some(ids[2]));

    let summary = diario.aulas().submit(&mut form).await.unwrap();

    // Assert
    assert_eq!((summary.created, summary.updated, summary.deleted), (0, 1, 1));
    assert_eq!(diario.api().len(ResourceKind::Aula), 2);
    let stored = diario.aulas().get(ids[0]).await.unwrap();
    assert_eq!(stored.data.data, date(2024, 1, 2));
    assert_eq!(
        diario.api().calls().iter().filter(|a| a.starts_with("DELETE")).count(),
        1
    );
}
