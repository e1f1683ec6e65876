use thiserror::Error;

/// Errores del flujo de sincronización.
///
/// Los errores de configuración y de secreto son fatales: abortan toda la
/// ejecución sin reintentos. Los errores de la API remota se aíslan por caso
/// de prueba y el recorrido continúa con el siguiente.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Error de configuración: {0}")]
    Configuration(String),

    #[error("Error al recuperar el secreto: {0}")]
    SecretRetrieval(String),

    #[error("Error de la API remota (HTTP {status}): {body}")]
    RemoteApi { status: u16, body: String },

    #[error("Error de red: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error al interpretar JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SyncError {
    /// Indica si el error debe abortar la ejecución completa.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::Configuration(_) | SyncError::SecretRetrieval(_)
        )
    }
}
