use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SyncError;

/// Nombre del archivo de configuración buscado hacia arriba desde el
/// directorio de trabajo.
pub const CONFIG_FILE_NAME: &str = "sync.config.json";

/// Configuración necesaria para la sincronización con Azure DevOps.
/// Todos los campos son obligatorios; la ausencia de cualquiera es fatal.
#[derive(Debug, Deserialize, Clone)]
pub struct SyncConfig {
    pub key_vault_url: String,
    pub secret_name: String,
    pub organization_url: String,
    pub project: String,
    pub plan_id: u32,
    pub suite_id: u32,
}

impl SyncConfig {
    /// Localiza y carga la configuración desde el directorio actual.
    pub fn load() -> Result<Self, SyncError> {
        let cwd = env::current_dir().map_err(|e| {
            SyncError::Configuration(format!("no se pudo determinar el directorio actual: {}", e))
        })?;
        let path = find_config_file(&cwd).ok_or_else(|| {
            SyncError::Configuration(format!(
                "no se encontró '{}' en {} ni en sus directorios superiores",
                CONFIG_FILE_NAME,
                cwd.display()
            ))
        })?;
        Self::load_from(&path)
    }

    /// Carga y valida la configuración desde una ruta concreta.
    pub fn load_from(path: &Path) -> Result<Self, SyncError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SyncError::Configuration(format!("no se pudo leer '{}': {}", path.display(), e))
        })?;
        let config: SyncConfig = serde_json::from_str(&contents).map_err(|e| {
            SyncError::Configuration(format!("'{}' no es válido: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SyncError> {
        let required = [
            ("key_vault_url", &self.key_vault_url),
            ("secret_name", &self.secret_name),
            ("organization_url", &self.organization_url),
            ("project", &self.project),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(SyncError::Configuration(format!(
                    "el campo '{}' está vacío en {}",
                    name, CONFIG_FILE_NAME
                )));
            }
        }
        Ok(())
    }
}

/// Busca el archivo de configuración subiendo por los directorios ancestros.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}
