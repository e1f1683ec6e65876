use chrono::Local;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::SyncError;
use crate::models::{SyncOutcome, SyncSummary, TestCaseDefinition};

/// Variable de entorno que permite seleccionar otro archivo de definiciones.
pub const TEST_CASES_FILE_VAR: &str = "TEST_CASES_FILE";

/// Archivo de definiciones incluido en el repositorio.
pub const DEFAULT_TEST_CASES_FILE: &str = "definitions/test_cases.json";

/// Resuelve la ruta del archivo de definiciones: primero la variable de
/// entorno, después el archivo incluido por defecto.
pub fn definitions_path() -> PathBuf {
    match env::var(TEST_CASES_FILE_VAR) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_TEST_CASES_FILE),
    }
}

/// Carga las definiciones de casos de prueba desde un archivo JSON.
/// Un archivo ilegible o mal formado es un error fatal.
pub fn load_definitions(path: &Path) -> Result<Vec<TestCaseDefinition>, SyncError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        SyncError::Configuration(format!(
            "no se pudo leer el archivo de definiciones '{}': {}",
            path.display(),
            e
        ))
    })?;
    let definitions: Vec<TestCaseDefinition> = serde_json::from_str(&contents)?;
    Ok(definitions)
}

/// Obtiene la lista de archivos de definición JSON disponibles.
pub fn get_definition_files() -> std::io::Result<Vec<String>> {
    let mut files = Vec::new();

    let definitions_dir = Path::new("definitions");
    if !definitions_dir.exists() {
        return Ok(files);
    }

    for entry in fs::read_dir(definitions_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
            if let Some(path_str) = path.to_str() {
                files.push(path_str.to_string());
            }
        }
    }

    files.sort();

    Ok(files)
}

/// Guarda el informe de la ejecución en CSV y Markdown dentro de `reports/`.
/// Devuelve las rutas generadas.
pub fn save_report(summary: &SyncSummary) -> std::io::Result<(PathBuf, PathBuf)> {
    let reports_dir = Path::new("reports");
    if !reports_dir.exists() {
        fs::create_dir_all(reports_dir)?;
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let csv_path = reports_dir.join(format!("sync-{}.csv", timestamp));
    let md_path = reports_dir.join(format!("sync-{}.md", timestamp));

    save_report_csv(&csv_path, summary)?;
    save_report_markdown(&md_path, summary)?;

    Ok((csv_path, md_path))
}

fn save_report_csv(path: &Path, summary: &SyncSummary) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(["id", "titulo", "resultado", "detalle"])?;
    for result in &summary.results {
        let (estado, detalle) = match &result.outcome {
            SyncOutcome::Created { work_item_id } => {
                ("creado".to_string(), work_item_id.to_string())
            }
            SyncOutcome::Skipped { reason } => ("omitido".to_string(), reason.clone()),
            SyncOutcome::Failed { reason } => ("fallido".to_string(), reason.clone()),
        };
        writer.write_record([
            result.definition_id.as_str(),
            result.title.as_str(),
            estado.as_str(),
            detalle.as_str(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

fn save_report_markdown(path: &Path, summary: &SyncSummary) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    // Escribir encabezado
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let run_id = Uuid::new_v4();
    writeln!(file, "# Informe de Sincronización de Casos de Prueba")?;
    writeln!(file, "\nFecha de ejecución: {}", timestamp)?;
    writeln!(file, "Identificador de ejecución: {}\n", run_id)?;

    let created = summary.created();
    let skipped = summary.skipped();
    let failed = summary.failed();

    // Escribir resumen textual primero
    writeln!(file, "## Resumen Numérico\n")?;
    writeln!(file, "- Total de casos: {}", summary.results.len())?;
    writeln!(file, "- ✅ Creados: {}", created)?;
    writeln!(file, "- ⏭️ Omitidos: {}", skipped)?;
    writeln!(file, "- ❌ Fallidos: {}\n", failed)?;

    // Crear gráfico circular con Mermaid
    writeln!(file, "## Resumen Visual\n")?;
    writeln!(file, "```mermaid")?;
    writeln!(file, "pie title Resultado de la Sincronización")?;

    // Añadir secciones al gráfico solo si tienen valores mayores que cero
    if created > 0 {
        writeln!(file, "    \"✅ Creados\" : {}", created)?;
    }
    if skipped > 0 {
        writeln!(file, "    \"⏭️ Omitidos\" : {}", skipped)?;
    }
    if failed > 0 {
        writeln!(file, "    \"❌ Fallidos\" : {}", failed)?;
    }
    writeln!(file, "```\n")?;

    // Escribir tabla de detalle
    writeln!(file, "## Detalle de casos\n")?;
    writeln!(file, "| ID | Título | Resultado |")?;
    writeln!(file, "|-----|--------|-----------|")?;

    for result in &summary.results {
        writeln!(
            file,
            "| {} | {} | {} |",
            result.definition_id, result.title, result.outcome
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn carga_definiciones_desde_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("casos.json");
        fs::write(
            &path,
            r#"[
                {
                    "id": "TC-001",
                    "title": "Buscar en el portal",
                    "priority": 1,
                    "category": "Busqueda",
                    "tags": ["smoke"],
                    "steps": [
                        { "action": "Escribir 'facturación'", "expected": "Aparecen resultados" }
                    ]
                }
            ]"#,
        )
        .unwrap();

        let definitions = load_definitions(&path).unwrap();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].id, "TC-001");
        assert_eq!(definitions[0].steps.len(), 1);
    }

    #[test]
    fn archivo_inexistente_es_fatal() {
        let err = load_definitions(Path::new("definitions/no_existe.json")).unwrap_err();
        assert!(matches!(err, crate::error::SyncError::Configuration(_)));
    }

    #[test]
    fn json_mal_formado_es_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roto.json");
        fs::write(&path, "{ esto no es json").unwrap();

        let err = load_definitions(&path).unwrap_err();
        assert!(matches!(err, crate::error::SyncError::Parse(_)));
    }

    #[test]
    fn la_variable_de_entorno_selecciona_otro_archivo() {
        // Las pruebas corren en paralelo; restaurar siempre la variable.
        std::env::set_var(TEST_CASES_FILE_VAR, "otros/casos.json");
        let path = definitions_path();
        std::env::remove_var(TEST_CASES_FILE_VAR);

        assert_eq!(path, PathBuf::from("otros/casos.json"));
        assert_eq!(definitions_path(), PathBuf::from(DEFAULT_TEST_CASES_FILE));
    }
}
