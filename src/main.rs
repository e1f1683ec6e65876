use clap::{Parser, Subcommand};
use colored::*;
use inquire::Select;
use std::process;

use test_case_sync::commands::{list_definition_files, run_check, run_sync};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sincronizar los casos de prueba con Azure DevOps
    Sync {
        /// Ruta al archivo JSON de definiciones
        #[arg(short, long)]
        file: Option<String>,

        /// No pedir confirmación antes de sincronizar
        #[arg(short, long)]
        yes: bool,
    },
    /// Validar las definiciones localmente, sin llamadas remotas
    Check {
        /// Ruta al archivo JSON de definiciones
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Listar archivos de definición disponibles
    List,
}

fn main() {
    let cli = Cli::parse();

    let code = match &cli.command {
        Some(Commands::Sync { file, yes }) => run_sync(file.as_deref(), *yes),
        Some(Commands::Check { file }) => run_check(file.as_deref()),
        Some(Commands::List) => match list_definition_files() {
            Ok(()) => 0,
            Err(e) => {
                println!("{}", format!("Error al listar archivos: {}", e).red());
                1
            }
        },
        None => {
            // Menú interactivo si no se proporciona un comando
            let options = vec![
                "Sincronizar casos de prueba",
                "Validar casos de prueba",
                "Listar archivos de definición",
                "Salir",
            ];

            let selection = Select::new("¿Qué deseas hacer?", options).prompt();

            match selection {
                Ok("Sincronizar casos de prueba") => run_sync(None, false),
                Ok("Validar casos de prueba") => run_check(None),
                Ok("Listar archivos de definición") => match list_definition_files() {
                    Ok(()) => 0,
                    Err(e) => {
                        println!("{}", format!("Error al listar archivos: {}", e).red());
                        1
                    }
                },
                _ => {
                    println!("¡Hasta pronto!");
                    0
                }
            }
        }
    };

    process::exit(code);
}
