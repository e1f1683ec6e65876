use reqwest::blocking::Client;
use serde_json::Value;
use std::env;

use crate::error::SyncError;

/// Variable de entorno con el token de acceso delegado para Key Vault.
/// En CI lo emite la identidad del pipeline; en local, `az account get-access-token`.
pub const ACCESS_TOKEN_VAR: &str = "AZURE_ACCESS_TOKEN";

const API_VERSION: &str = "7.4";

/// Recupera un secreto por nombre desde Azure Key Vault.
///
/// Cualquier fallo es fatal y no se reintenta: un secreto ausente o un
/// permiso denegado es un problema del operador, no un fallo transitorio.
/// El valor solo vive en memoria durante la ejecución.
pub fn fetch_secret(vault_url: &str, secret_name: &str) -> Result<String, SyncError> {
    let token = env::var(ACCESS_TOKEN_VAR).map_err(|_| {
        SyncError::SecretRetrieval(format!(
            "no se encontró la variable de entorno {}; inicia sesión con 'az login' y exporta el token",
            ACCESS_TOKEN_VAR
        ))
    })?;

    let url = format!(
        "{}/secrets/{}?api-version={}",
        vault_url.trim_end_matches('/'),
        secret_name,
        API_VERSION
    );

    let client = Client::new();
    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .map_err(|e| {
            SyncError::SecretRetrieval(format!("no se pudo contactar con Key Vault: {}", e))
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(SyncError::SecretRetrieval(format!(
            "Key Vault respondió HTTP {} al pedir '{}': {}",
            status.as_u16(),
            secret_name,
            body
        )));
    }

    let json: Value = response.json().map_err(|e| {
        SyncError::SecretRetrieval(format!("respuesta de Key Vault ilegible: {}", e))
    })?;

    json.get("value")
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| {
            SyncError::SecretRetrieval(format!(
                "la respuesta de Key Vault para '{}' no contiene 'value'",
                secret_name
            ))
        })
}
