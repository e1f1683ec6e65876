use colored::*;
use inquire::Select;
use std::path::Path;

use crate::error::SyncError;
use crate::models::{SyncOutcome, SyncResult, SyncSummary, TestCaseDefinition};
use crate::remote::{fetch_secret, AzureDevOpsClient, RemoteCredentials, WorkItemApi};
use crate::utils::{definitions_path, load_definitions, save_report, SyncConfig};

/// Ejecuta la sincronización completa y devuelve el código de salida del
/// proceso. Los fallos de configuración o de secreto abortan la ejecución;
/// los fallos por caso se acumulan en el resumen.
pub fn run_sync(file: Option<&str>, assume_yes: bool) -> i32 {
    match sync(file, assume_yes) {
        Ok(code) => code,
        Err(e) => {
            println!("{}", format!("{}", e).red());
            if e.is_fatal() {
                println!(
                    "{}",
                    "Revisa sync.config.json y las credenciales antes de reintentar.".yellow()
                );
            }
            1
        }
    }
}

fn sync(file: Option<&str>, assume_yes: bool) -> Result<i32, SyncError> {
    // Init -> ConfigLoaded
    let config = SyncConfig::load()?;

    // ConfigLoaded -> CredentialsFetched
    println!(
        "{}",
        format!("Recuperando el secreto '{}'...", config.secret_name).blue()
    );
    let pat = fetch_secret(&config.key_vault_url, &config.secret_name)?;
    let credentials = RemoteCredentials::from_pat(pat);

    // Ready: cargar las definiciones locales
    let path = match file {
        Some(f) => Path::new(f).to_path_buf(),
        None => definitions_path(),
    };
    let definitions = load_definitions(&path)?;

    if definitions.is_empty() {
        println!("{}", "No hay casos de prueba para sincronizar.".yellow());
        return Ok(0);
    }

    println!(
        "{}",
        format!(
            "Se sincronizarán {} casos de prueba de {} con el plan {} / suite {}.",
            definitions.len(),
            path.display(),
            config.plan_id,
            config.suite_id
        )
        .blue()
    );

    if !assume_yes {
        let options = vec!["Sí", "No"];
        let selection = Select::new("¿Deseas continuar?", options).prompt();
        if !matches!(selection, Ok("Sí")) {
            println!("{}", "Operación cancelada.".yellow());
            return Ok(0);
        }
    }

    let client = AzureDevOpsClient::new(&config, credentials);
    let summary = sync_definitions(&client, &definitions);

    print_summary(&summary);

    match save_report(&summary) {
        Ok((csv_path, md_path)) => {
            println!(
                "{}",
                format!(
                    "Informe guardado en {} y {}",
                    csv_path.display(),
                    md_path.display()
                )
                .green()
            );
        }
        Err(e) => {
            println!(
                "{}",
                format!("No se pudo guardar el informe: {}", e).yellow()
            );
        }
    }

    Ok(summary.exit_code())
}

/// Recorre las definiciones en orden y produce exactamente un resultado por
/// cada una. Una definición inválida se omite sin llamada remota; un error
/// remoto marca solo ese caso como fallido y el recorrido continúa.
///
/// El procesamiento es secuencial a propósito: la creación remota no es
/// idempotente y los envíos concurrentes podrían duplicar work items.
pub fn sync_definitions<A: WorkItemApi>(
    api: &A,
    definitions: &[TestCaseDefinition],
) -> SyncSummary {
    let mut results = Vec::with_capacity(definitions.len());

    for definition in definitions {
        let outcome = sync_one(api, definition);
        println!("{} - {}: {}", definition.id, definition.title, outcome);
        results.push(SyncResult {
            definition_id: definition.id.clone(),
            title: definition.title.clone(),
            outcome,
        });
    }

    SyncSummary::new(results)
}

fn sync_one<A: WorkItemApi>(api: &A, definition: &TestCaseDefinition) -> SyncOutcome {
    if let Some(reason) = definition.validation_error() {
        return SyncOutcome::Skipped { reason };
    }

    let work_item_id = match api.create_test_case(definition) {
        Ok(id) => id,
        Err(e) => {
            return SyncOutcome::Failed {
                reason: format!("al crear el work item: {}", e),
            }
        }
    };

    if let Err(e) = api.add_to_suite(work_item_id) {
        return SyncOutcome::Failed {
            reason: format!("al añadir el work item #{} a la suite: {}", work_item_id, e),
        };
    }

    SyncOutcome::Created { work_item_id }
}

fn print_summary(summary: &SyncSummary) {
    println!("\n{}", "Resumen de la sincronización:".blue());
    println!("- Total de casos: {}", summary.results.len());
    println!("{}", format!("- ✅ Creados: {}", summary.created()).green());
    println!(
        "{}",
        format!("- ⏭️ Omitidos: {}", summary.skipped()).yellow()
    );
    println!("{}", format!("- ❌ Fallidos: {}", summary.failed()).red());

    for result in &summary.results {
        match &result.outcome {
            SyncOutcome::Skipped { reason } => {
                println!(
                    "{}",
                    format!("  ⏭️ {} ({}): {}", result.definition_id, result.title, reason)
                        .yellow()
                );
            }
            SyncOutcome::Failed { reason } => {
                println!(
                    "{}",
                    format!("  ❌ {} ({}): {}", result.definition_id, result.title, reason).red()
                );
            }
            SyncOutcome::Created { .. } => {}
        }
    }
}
