use colored::*;
use std::io;

use crate::utils::get_definition_files;

/// Lista los archivos de definición disponibles
pub fn list_definition_files() -> io::Result<()> {
    let definition_files = get_definition_files()?;

    if definition_files.is_empty() {
        println!("{}", "No hay archivos de definición disponibles.".yellow());
        return Ok(());
    }

    println!("{}", "Archivos de definición disponibles:".green());
    for (i, file) in definition_files.iter().enumerate() {
        println!("{}: {}", i + 1, file);
    }

    Ok(())
}
