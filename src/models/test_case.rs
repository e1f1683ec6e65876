use serde::{Deserialize, Serialize};

/// Un paso de un caso de prueba. El orden dentro de la definición se
/// conserva y se convierte en la secuencia numerada de pasos en Azure DevOps.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StepDefinition {
    pub action: String,
    pub expected: String,
}

/// Definición local de un caso de prueba, cargada una sola vez por ejecución.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TestCaseDefinition {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

fn default_priority() -> u8 {
    2
}

impl TestCaseDefinition {
    /// Valida los campos obligatorios antes de cualquier llamada remota.
    /// Devuelve el motivo cuando la definición no debe sincronizarse.
    pub fn validation_error(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some(String::from("el título está vacío"));
        }
        if self.steps.is_empty() {
            return Some(String::from("no tiene pasos definidos"));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_definition() -> TestCaseDefinition {
        TestCaseDefinition {
            id: String::from("TC-001"),
            title: String::from("Abrir el portal de soporte"),
            priority: 1,
            category: String::from("Navegación"),
            tags: vec![String::from("smoke")],
            steps: vec![StepDefinition {
                action: String::from("Navegar a la página principal"),
                expected: String::from("Se muestra el título del portal"),
            }],
        }
    }

    #[test]
    fn definicion_valida_no_produce_motivo() {
        assert!(valid_definition().validation_error().is_none());
    }

    #[test]
    fn titulo_vacio_se_rechaza() {
        let mut def = valid_definition();
        def.title = String::from("   ");
        assert_eq!(
            def.validation_error(),
            Some(String::from("el título está vacío"))
        );
    }

    #[test]
    fn sin_pasos_se_rechaza() {
        let mut def = valid_definition();
        def.steps.clear();
        assert_eq!(
            def.validation_error(),
            Some(String::from("no tiene pasos definidos"))
        );
    }

    #[test]
    fn prioridad_por_defecto_al_deserializar() {
        let def: TestCaseDefinition = serde_json::from_str(
            r#"{ "title": "Caso sin prioridad", "steps": [{ "action": "a", "expected": "b" }] }"#,
        )
        .unwrap();
        assert_eq!(def.priority, 2);
        assert!(def.validation_error().is_none());
    }
}
