//! Pruebas del orquestador de sincronización con un doble del cliente
//! remoto: verifican el aislamiento por caso, el orden de las llamadas y
//! el código de salida resultante.

use std::cell::RefCell;

use test_case_sync::commands::sync_definitions;
use test_case_sync::error::SyncError;
use test_case_sync::models::{StepDefinition, SyncOutcome, TestCaseDefinition};
use test_case_sync::remote::WorkItemApi;

/// Llamadas registradas por el doble, en orden de ejecución.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(String),
    AddToSuite(u64),
}

/// Doble del cliente remoto: asigna identificadores consecutivos y falla
/// en los títulos indicados.
struct FakeApi {
    calls: RefCell<Vec<Call>>,
    next_id: RefCell<u64>,
    fail_create_titles: Vec<String>,
    fail_suite_ids: Vec<u64>,
}

impl FakeApi {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_id: RefCell::new(100),
            fail_create_titles: Vec::new(),
            fail_suite_ids: Vec::new(),
        }
    }

    fn failing_create(mut self, title: &str) -> Self {
        self.fail_create_titles.push(title.to_string());
        self
    }

    fn failing_suite(mut self, work_item_id: u64) -> Self {
        self.fail_suite_ids.push(work_item_id);
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl WorkItemApi for FakeApi {
    fn create_test_case(&self, definition: &TestCaseDefinition) -> Result<u64, SyncError> {
        self.calls
            .borrow_mut()
            .push(Call::Create(definition.title.clone()));
        if self.fail_create_titles.contains(&definition.title) {
            return Err(SyncError::RemoteApi {
                status: 500,
                body: String::from("error interno simulado"),
            });
        }
        let mut next = self.next_id.borrow_mut();
        let id = *next;
        *next += 1;
        Ok(id)
    }

    fn add_to_suite(&self, work_item_id: u64) -> Result<(), SyncError> {
        self.calls.borrow_mut().push(Call::AddToSuite(work_item_id));
        if self.fail_suite_ids.contains(&work_item_id) {
            return Err(SyncError::RemoteApi {
                status: 404,
                body: String::from("suite no encontrada"),
            });
        }
        Ok(())
    }
}

fn definition(id: &str, title: &str, steps: usize) -> TestCaseDefinition {
    TestCaseDefinition {
        id: id.to_string(),
        title: title.to_string(),
        priority: 2,
        category: String::from("Feedback"),
        tags: vec![],
        steps: (0..steps)
            .map(|i| StepDefinition {
                action: format!("paso {}", i + 1),
                expected: format!("resultado {}", i + 1),
            })
            .collect(),
    }
}

#[test]
fn caso_valido_crea_y_luego_asocia_con_el_id_devuelto() {
    let api = FakeApi::new();
    let defs = vec![definition("TC-1", "Caso válido", 2)];

    let summary = sync_definitions(&api, &defs);

    assert_eq!(
        api.calls(),
        vec![
            Call::Create(String::from("Caso válido")),
            Call::AddToSuite(100),
        ]
    );
    assert_eq!(
        summary.results[0].outcome,
        SyncOutcome::Created { work_item_id: 100 }
    );
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn una_definicion_invalida_no_genera_llamadas_remotas() {
    let api = FakeApi::new();
    let defs = vec![
        definition("TC-1", "", 2),
        definition("TC-2", "Sin pasos", 0),
    ];

    let summary = sync_definitions(&api, &defs);

    assert!(api.calls().is_empty());
    assert_eq!(summary.skipped(), 2);
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn escenario_mixto_crea_uno_omite_uno_y_falla_uno() {
    // Tres definiciones: la 1 válida, la 2 sin pasos, la 3 falla al crear.
    let api = FakeApi::new().failing_create("Caso que falla");
    let defs = vec![
        definition("TC-1", "Caso válido", 1),
        definition("TC-2", "Caso sin pasos", 0),
        definition("TC-3", "Caso que falla", 1),
    ];

    let summary = sync_definitions(&api, &defs);

    assert_eq!(summary.created(), 1);
    assert_eq!(summary.skipped(), 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.exit_code(), 1);

    // El fallo del tercero no impide que el primero quede completo.
    assert_eq!(
        api.calls(),
        vec![
            Call::Create(String::from("Caso válido")),
            Call::AddToSuite(100),
            Call::Create(String::from("Caso que falla")),
        ]
    );
}

#[test]
fn un_fallo_al_asociar_marca_solo_ese_caso() {
    let api = FakeApi::new().failing_suite(101);
    let defs = vec![
        definition("TC-1", "Primero", 1),
        definition("TC-2", "Segundo", 1),
        definition("TC-3", "Tercero", 1),
    ];

    let summary = sync_definitions(&api, &defs);

    assert_eq!(summary.created(), 2);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.exit_code(), 1);
    match &summary.results[1].outcome {
        SyncOutcome::Failed { reason } => {
            assert!(reason.contains("#101"));
            assert!(reason.contains("404"));
        }
        other => panic!("se esperaba Failed, se obtuvo {:?}", other),
    }
    // El tercero se procesa con normalidad después del fallo.
    assert_eq!(
        summary.results[2].outcome,
        SyncOutcome::Created { work_item_id: 102 }
    );
}

#[test]
fn cada_definicion_produce_exactamente_un_resultado_en_orden() {
    let api = FakeApi::new();
    let defs = vec![
        definition("TC-1", "Uno", 1),
        definition("TC-2", "", 1),
        definition("TC-3", "Tres", 1),
    ];

    let summary = sync_definitions(&api, &defs);

    let ids: Vec<&str> = summary
        .results
        .iter()
        .map(|r| r.definition_id.as_str())
        .collect();
    assert_eq!(ids, vec!["TC-1", "TC-2", "TC-3"]);
}

#[test]
fn sin_definiciones_el_resumen_queda_vacio() {
    let api = FakeApi::new();
    let summary = sync_definitions(&api, &[]);
    assert!(summary.results.is_empty());
    assert_eq!(summary.exit_code(), 0);
}
