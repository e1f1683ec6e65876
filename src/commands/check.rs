use colored::*;
use std::path::Path;

use crate::utils::{definitions_path, load_definitions};

/// Valida las definiciones localmente, sin ninguna llamada remota.
/// Devuelve el código de salida: 0 si el archivo se pudo leer, 1 si no.
pub fn run_check(file: Option<&str>) -> i32 {
    let path = match file {
        Some(f) => Path::new(f).to_path_buf(),
        None => definitions_path(),
    };

    let definitions = match load_definitions(&path) {
        Ok(defs) => defs,
        Err(e) => {
            println!("{}", format!("{}", e).red());
            return 1;
        }
    };

    if definitions.is_empty() {
        println!("{}", "El archivo no contiene casos de prueba.".yellow());
        return 0;
    }

    println!(
        "{}",
        format!("Casos de prueba en {}:", path.display()).blue()
    );

    let mut invalid = 0;
    for definition in &definitions {
        match definition.validation_error() {
            None => {
                println!(
                    "{}",
                    format!(
                        "  ✅ {} - {} ({} pasos)",
                        definition.id,
                        definition.title,
                        definition.steps.len()
                    )
                    .green()
                );
            }
            Some(reason) => {
                invalid += 1;
                println!(
                    "{}",
                    format!("  ⏭️ {} - {}: {}", definition.id, definition.title, reason).yellow()
                );
            }
        }
    }

    println!(
        "{}",
        format!(
            "Total: {} casos, {} válidos, {} se omitirían.",
            definitions.len(),
            definitions.len() - invalid,
            invalid
        )
        .blue()
    );

    0
}
