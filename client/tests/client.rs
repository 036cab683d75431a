// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client integration tests with wiremock.

use diario_client::{ApiConfig, ApiError, AuthMethod, DiarioClient};
use diario_core::{
    Aluno, Aula, AulaApi, Contrato, DiaAula, DiaSemana, Diario, Failure, FailureKind,
    GenerateRequest, Operation, Query, Record, ResourceApi, TipoAula,
};
use jiff::civil::{date, time};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> DiarioClient {
    let config = ApiConfig {
        base_url: format!("{}/api", server.uri()),
        auth: AuthMethod::Bearer {
            token: "secret".to_string(),
        },
        ..Default::default()
    };
    DiarioClient::new(config).expect("Failed to create client")
}

#[tokio::test]
async fn client_list_alunos() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/alunos"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .and(query_param("search", "ana"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 11, "nome": "Ana", "email": "ana@example.com" },
                { "id": 12, "nome": "Mariana" }
            ],
            "count": 12
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let query = Query::page(2, 10).with_search(Some("ana".to_string()));
    let page = client.list::<Aluno>(&query).await.expect("Failed to list");

    assert_eq!(page.count, 12);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].id, 11);
    assert_eq!(page.data[0].data.email.as_deref(), Some("ana@example.com"));
    assert_eq!(page.data[1].data.nome, "Mariana");
}

#[tokio::test]
async fn client_get_contrato() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contratos/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": 5,
                "alunoId": 1,
                "dataInicio": "2024-01-01",
                "dataFim": "2024-06-30T00:00:00.000Z",
                "diasAulas": [
                    { "dia": "SEGUNDA", "horaInicio": "09:00", "horaFim": "10:00" }
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let contrato = client(&mock_server)
        .get::<Contrato>(5)
        .await
        .expect("Failed to get");

    assert_eq!(contrato.id, 5);
    assert_eq!(contrato.data.data_fim, date(2024, 6, 30));
    assert_eq!(contrato.data.dias_aulas[0].dia, DiaSemana::Segunda);
}

#[tokio::test]
async fn client_create_and_update_aula() {
    let mock_server = MockServer::start().await;
    let aula = Aula {
        contrato_id: Some(5),
        ..Aula::new(date(2024, 1, 8), time(9, 0, 0, 0), time(10, 0, 0, 0))
    };

    Mock::given(method("POST"))
        .and(path("/api/aulas"))
        .and(body_json(json!({
            "data": "2024-01-08",
            "horaInicio": "09:00",
            "horaFim": "10:00",
            "tipo": "PADRAO",
            "contratoId": 5
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "id": 40,
                "data": "2024-01-08",
                "horaInicio": "09:00",
                "horaFim": "10:00",
                "tipo": "PADRAO",
                "contratoId": 5
            },
            "message": "Aula criada"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/aulas/40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": 40,
                "data": "2024-01-09",
                "horaInicio": "09:00",
                "horaFim": "10:00",
                "tipo": "REPOSICAO"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let created = client.create(&aula).await.expect("Failed to create");
    assert_eq!(created.id, 40);
    assert_eq!(created.data.contrato_id, Some(5));

    let updated = client
        .update(
            40,
            &Aula {
                data: date(2024, 1, 9),
                tipo: TipoAula::Reposicao,
                ..aula
            },
        )
        .await
        .expect("Failed to update");
    assert_eq!(updated.data.tipo, TipoAula::Reposicao);
}

#[tokio::test]
async fn client_delete_dia_aula() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/diasAulas/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    client(&mock_server)
        .delete::<DiaAula>(3)
        .await
        .expect("Failed to delete");
}

#[tokio::test]
async fn client_list_aulas_by_aluno_and_generate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/aulas/aluno/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "count": 0,
            "message": "Nenhuma aula encontrada"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/aulas/gerar"))
        .and(body_json(json!({
            "contratoId": 5,
            "dataInicio": "2024-01-01",
            "dataFim": "2024-01-14",
            "diasAulas": [
                { "dia": "SEGUNDA", "horaInicio": "09:00", "horaFim": "10:00" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "data": "2024-01-01", "horaInicio": "09:00", "horaFim": "10:00", "tipo": "PADRAO" },
                { "data": "2024-01-08", "horaInicio": "09:00", "horaFim": "10:00", "tipo": "PADRAO" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let page = AulaApi::list_by_aluno(&client, 1, &Query::default())
        .await
        .expect("Failed to list");
    assert!(page.data.is_empty());
    assert_eq!(page.message.as_deref(), Some("Nenhuma aula encontrada"));

    let request = GenerateRequest {
        contrato_id: Some(5),
        data_inicio: Some(date(2024, 1, 1)),
        data_fim: Some(date(2024, 1, 14)),
        dias_aulas: vec![DiaAula::new(
            DiaSemana::Segunda,
            time(9, 0, 0, 0),
            time(10, 0, 0, 0),
        )],
    };
    let aulas = AulaApi::generate(&client, &request)
        .await
        .expect("Failed to generate");
    let dates: Vec<_> = aulas.iter().map(|a| a.data).collect();
    assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 8)]);
}

#[tokio::test]
async fn client_maps_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/professores"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expirado" })),
        )
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let err = client
        .list::<diario_core::Professor>(&Query::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { status: 401, .. }));

    let failure = Failure::from(err);
    assert_eq!(failure.kind, FailureKind::Unauthorized);
    assert_eq!(failure.message, "Token expirado");
    assert_eq!(failure.status, Some(401));
}

#[tokio::test]
async fn client_maps_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/alunos/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let failure = ResourceApi::<Aluno>::get(&client, 99).await.unwrap_err();
    assert_eq!(failure.kind, FailureKind::NotFound);
    assert_eq!(failure.status, Some(404));
}

#[tokio::test]
async fn client_maps_validation_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/alunos"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Dados inválidos",
            "errors": { "nome": "required" }
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let failure = ResourceApi::<Aluno>::create(&client, &Aluno::default())
        .await
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::Validation);
    assert_eq!(failure.message, "Dados inválidos");
    assert_eq!(failure.errors["nome"], "required");
}

#[tokio::test]
async fn client_maps_server_error_to_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/alunos"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let failure = ResourceApi::<Aluno>::list(&client, &Query::default())
        .await
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::Other);
    assert_eq!(failure.message, diario_core::FALLBACK_MESSAGE);
    assert_eq!(failure.status, Some(502));
}

#[tokio::test]
async fn client_maps_unreachable_server() {
    // nothing listens on the discard port
    let config = ApiConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        ..Default::default()
    };
    let client = DiarioClient::new(config).unwrap();
    let failure = ResourceApi::<Aluno>::get(&client, 1).await.unwrap_err();
    assert_eq!(failure.kind, FailureKind::Network);
    assert_eq!(failure.status, None);
}

#[tokio::test]
async fn client_rejects_missing_base_url() {
    let err = DiarioClient::new(ApiConfig::default()).unwrap_err();
    assert!(matches!(err, ApiError::Config(_)));

    let err = DiarioClient::new(ApiConfig {
        base_url: "localhost:3000".to_string(),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, ApiError::Config(_)));
}

#[tokio::test]
async fn client_drives_the_store() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/alunos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 3, "nome": "Ana" },
                { "id": 5, "nome": "Bruno" },
                { "id": 8, "nome": "Carla" }
            ],
            "count": 3
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/alunos/5"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let diario = Diario::new(diario_core::Config::default(), client(&mock_server));
    let alunos = diario.alunos();
    alunos.list(&diario.query(1, None)).await.unwrap();
    alunos.delete(5).await.unwrap();

    let state = alunos.state();
    assert_eq!(state.count(), 2);
    let ids: Vec<_> = state.list().iter().map(|a: &Record<Aluno>| a.id).collect();
    assert_eq!(ids, vec![3, 8]);
    assert!(state.request().succeeded(Operation::Delete));
}
