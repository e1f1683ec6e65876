use serde::{Deserialize, Serialize};
use std::fmt;

/// Resultado de la sincronización de una definición. Cada definición produce
/// exactamente un resultado, en el mismo orden del archivo de origen.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum SyncOutcome {
    Created { work_item_id: u64 },
    Skipped { reason: String },
    Failed { reason: String },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SyncResult {
    pub definition_id: String,
    pub title: String,
    pub outcome: SyncOutcome,
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Created { work_item_id } => {
                write!(f, "✅ Creado (work item #{})", work_item_id)
            }
            SyncOutcome::Skipped { reason } => write!(f, "⏭️ Omitido ({})", reason),
            SyncOutcome::Failed { reason } => write!(f, "❌ Fallido ({})", reason),
        }
    }
}

/// Resumen acumulado de una ejecución completa.
#[derive(Debug, Clone)]
pub struct SyncSummary {
    pub results: Vec<SyncResult>,
}

impl SyncSummary {
    pub fn new(results: Vec<SyncResult>) -> Self {
        Self { results }
    }

    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Created { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Failed { .. }))
    }

    /// Código de salida del proceso: 0 solo cuando ningún caso terminó en
    /// `Failed`. Los omitidos no afectan al código de salida.
    pub fn exit_code(&self) -> i32 {
        if self.failed() > 0 {
            1
        } else {
            0
        }
    }

    fn count(&self, pred: impl Fn(&SyncOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}
