use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::Client;
use serde_json::{json, Value};

use crate::error::SyncError;
use crate::models::TestCaseDefinition;
use crate::utils::SyncConfig;

const API_VERSION: &str = "7.0";

/// Credenciales para la API de Azure DevOps, construidas una sola vez por
/// ejecución a partir del secreto y pasadas explícitamente a cada llamada.
#[derive(Debug, Clone)]
pub struct RemoteCredentials {
    pub pat_token: String,
    pub auth_header_value: String,
}

impl RemoteCredentials {
    /// Deriva la cabecera de autenticación Basic a partir del PAT.
    pub fn from_pat(pat_token: String) -> Self {
        let encoded = STANDARD.encode(format!(":{}", pat_token));
        let auth_header_value = format!("Basic {}", encoded);
        Self {
            pat_token,
            auth_header_value,
        }
    }
}

/// Operaciones remotas sobre el sistema de seguimiento. El orquestador
/// depende de este contrato, no del cliente HTTP concreto.
pub trait WorkItemApi {
    /// Crea el caso de prueba y devuelve el identificador del work item.
    fn create_test_case(&self, definition: &TestCaseDefinition) -> Result<u64, SyncError>;

    /// Asocia un work item ya creado al plan y la suite configurados.
    fn add_to_suite(&self, work_item_id: u64) -> Result<(), SyncError>;
}

/// Cliente HTTP contra Azure DevOps.
pub struct AzureDevOpsClient {
    http: Client,
    credentials: RemoteCredentials,
    organization_url: String,
    project: String,
    plan_id: u32,
    suite_id: u32,
}

impl AzureDevOpsClient {
    pub fn new(config: &SyncConfig, credentials: RemoteCredentials) -> Self {
        Self {
            http: Client::new(),
            credentials,
            organization_url: config.organization_url.trim_end_matches('/').to_string(),
            project: config.project.clone(),
            plan_id: config.plan_id,
            suite_id: config.suite_id,
        }
    }

    fn check_response(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, SyncError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(SyncError::RemoteApi {
            status: status.as_u16(),
            body,
        })
    }
}

impl WorkItemApi for AzureDevOpsClient {
    fn create_test_case(&self, definition: &TestCaseDefinition) -> Result<u64, SyncError> {
        let url = format!(
            "{}/{}/_apis/wit/workitems/$Test%20Case?api-version={}",
            self.organization_url, self.project, API_VERSION
        );

        let patch = build_patch_document(definition);

        let response = self
            .http
            .post(&url)
            .header("Authorization", &self.credentials.auth_header_value)
            .header("Content-Type", "application/json-patch+json")
            .body(serde_json::to_string(&patch)?)
            .send()?;
        let response = Self::check_response(response)?;

        let status = response.status().as_u16();
        let body: Value = response.json()?;
        extract_work_item_id(status, &body)
    }

    fn add_to_suite(&self, work_item_id: u64) -> Result<(), SyncError> {
        let url = format!(
            "{}/{}/_apis/test/Plans/{}/suites/{}/testcases/{}?api-version={}",
            self.organization_url, self.project, self.plan_id, self.suite_id, work_item_id,
            API_VERSION
        );

        let response = self
            .http
            .post(&url)
            .header("Authorization", &self.credentials.auth_header_value)
            .header("Content-Type", "application/json")
            .send()?;
        Self::check_response(response)?;

        Ok(())
    }
}

/// Extrae el identificador del work item de la respuesta de creación.
/// Conserva el estado HTTP real (Azure DevOps responde 201) por si la
/// respuesta viene sin 'id'.
fn extract_work_item_id(status: u16, body: &Value) -> Result<u64, SyncError> {
    body.get("id")
        .and_then(|id| id.as_u64())
        .ok_or_else(|| SyncError::RemoteApi {
            status,
            body: String::from("la respuesta de creación no contiene 'id'"),
        })
}

/// Documento JSON-patch con los campos del caso de prueba.
pub fn build_patch_document(definition: &TestCaseDefinition) -> Value {
    json!([
        {
            "op": "add",
            "path": "/fields/System.Title",
            "value": definition.title
        },
        {
            "op": "add",
            "path": "/fields/Microsoft.VSTS.Common.Priority",
            "value": definition.priority
        },
        {
            "op": "add",
            "path": "/fields/Microsoft.VSTS.TCM.Steps",
            "value": build_steps_xml(definition)
        },
        {
            "op": "add",
            "path": "/fields/System.Tags",
            "value": build_tags(definition)
        }
    ])
}

/// Genera el marcado `<steps>` que Azure DevOps espera en
/// `Microsoft.VSTS.TCM.Steps`. Los identificadores de paso empiezan en 2,
/// como hace el propio editor web de Azure DevOps.
pub fn build_steps_xml(definition: &TestCaseDefinition) -> String {
    let mut xml = format!(
        "<steps id=\"0\" last=\"{}\">",
        definition.steps.len() + 1
    );
    for (i, step) in definition.steps.iter().enumerate() {
        xml.push_str(&format!(
            "<step id=\"{}\" type=\"ValidateStep\">\
             <parameterizedString isformatted=\"true\">{}</parameterizedString>\
             <parameterizedString isformatted=\"true\">{}</parameterizedString>\
             <description/></step>",
            i + 2,
            escape_xml(&step.action),
            escape_xml(&step.expected)
        ));
    }
    xml.push_str("</steps>");
    xml
}

/// Escapa `&`, `<` y `>` para mantener el marcado bien formado.
///
/// NOTA: las comillas (`"` y `'`) no se escapan a propósito; el script
/// original tampoco lo hacía y reproducimos ese comportamiento tal cual.
/// Véase la prueba `las_comillas_no_se_escapan`.
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Cadena de etiquetas para `System.Tags`: primero las etiquetas explícitas,
/// después `LogicalID:<id>` y `Category:<categoria>`, unidas con "; ".
pub fn build_tags(definition: &TestCaseDefinition) -> String {
    let mut tags: Vec<String> = definition.tags.clone();
    if !definition.id.trim().is_empty() {
        tags.push(format!("LogicalID:{}", definition.id));
    }
    if !definition.category.trim().is_empty() {
        tags.push(format!("Category:{}", definition.category));
    }
    tags.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StepDefinition;

    fn definition() -> TestCaseDefinition {
        TestCaseDefinition {
            id: String::from("TC-010"),
            title: String::from("Enviar el diálogo de avería"),
            priority: 1,
            category: String::from("Feedback"),
            tags: vec![String::from("smoke"), String::from("dialogo")],
            steps: vec![
                StepDefinition {
                    action: String::from("Abrir 'Tell us more'"),
                    expected: String::from("El diálogo es visible"),
                },
                StepDefinition {
                    action: String::from("Seleccionar Internet"),
                    expected: String::from("El botón de envío se habilita"),
                },
            ],
        }
    }

    #[test]
    fn escapa_ampersand_y_angulos() {
        assert_eq!(
            escape_xml("a & b < c > d"),
            "a &amp; b &lt; c &gt; d"
        );
    }

    #[test]
    fn el_ampersand_se_escapa_primero() {
        // "&lt;" de entrada debe quedar como "&amp;lt;", no doble-escapado.
        assert_eq!(escape_xml("&lt;"), "&amp;lt;");
    }

    #[test]
    fn las_comillas_no_se_escapan() {
        // Desviación conocida heredada del script original: " y ' pasan tal cual.
        assert_eq!(escape_xml(r#"di "hola" y 'adiós'"#), r#"di "hola" y 'adiós'"#);
    }

    #[test]
    fn el_marcado_de_pasos_incluye_cada_paso_en_orden() {
        let xml = build_steps_xml(&definition());
        assert!(xml.starts_with("<steps id=\"0\" last=\"3\">"));
        assert!(xml.ends_with("</steps>"));
        assert_eq!(xml.matches("<step id=").count(), 2);
        let first = xml.find("Abrir 'Tell us more'").unwrap();
        let second = xml.find("Seleccionar Internet").unwrap();
        assert!(first < second);
    }

    #[test]
    fn el_marcado_escapa_accion_y_resultado() {
        let mut def = definition();
        def.steps = vec![StepDefinition {
            action: String::from("pulsar <Enviar>"),
            expected: String::from("se ve A & B"),
        }];
        let xml = build_steps_xml(&def);
        assert!(xml.contains("pulsar &lt;Enviar&gt;"));
        assert!(xml.contains("se ve A &amp; B"));
        assert!(!xml.contains("pulsar <Enviar>"));
    }

    #[test]
    fn las_etiquetas_conservan_el_orden() {
        assert_eq!(
            build_tags(&definition()),
            "smoke; dialogo; LogicalID:TC-010; Category:Feedback"
        );
    }

    #[test]
    fn sin_id_ni_categoria_solo_quedan_las_explicitas() {
        let mut def = definition();
        def.id = String::new();
        def.category = String::from("  ");
        assert_eq!(build_tags(&def), "smoke; dialogo");
    }

    #[test]
    fn el_documento_patch_lleva_los_cuatro_campos() {
        let patch = build_patch_document(&definition());
        let ops = patch.as_array().unwrap();
        let paths: Vec<&str> = ops
            .iter()
            .map(|op| op.get("path").unwrap().as_str().unwrap())
            .collect();
        assert_eq!(
            paths,
            vec![
                "/fields/System.Title",
                "/fields/Microsoft.VSTS.Common.Priority",
                "/fields/Microsoft.VSTS.TCM.Steps",
                "/fields/System.Tags",
            ]
        );
    }

    #[test]
    fn la_respuesta_de_creacion_entrega_el_id() {
        let body = serde_json::json!({ "id": 4312, "rev": 1 });
        assert_eq!(extract_work_item_id(201, &body).unwrap(), 4312);
    }

    #[test]
    fn sin_id_el_error_conserva_el_estado_real() {
        let body = serde_json::json!({ "rev": 1 });
        match extract_work_item_id(201, &body).unwrap_err() {
            SyncError::RemoteApi { status, body } => {
                assert_eq!(status, 201);
                assert!(body.contains("no contiene 'id'"));
            }
            other => panic!("se esperaba RemoteApi, se obtuvo {:?}", other),
        }
    }

    #[test]
    fn la_cabecera_basic_se_deriva_del_pat() {
        let credentials = RemoteCredentials::from_pat(String::from("pat-secreto"));
        // base64(":pat-secreto")
        assert_eq!(credentials.auth_header_value, "Basic OnBhdC1zZWNyZXRv");
        assert_eq!(credentials.pat_token, "pat-secreto");
    }
}
