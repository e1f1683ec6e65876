use chromiumoxide::Page;
use std::fmt;

use crate::pages::base::{BasePage, PageError, CRITICAL_TIMEOUT, DEFAULT_TIMEOUT};

/// Localizadores del diálogo "Tell us more", resueltos por semántica de
/// rol/nombre accesible.
pub mod locators {
    pub const DIALOG: &str = "[role='dialog'][aria-label='Tell us more']";
    pub const SUBMIT_BUTTON: &str = "[role='dialog'] button[type='submit']";
    pub const CLOSE_BUTTON: &str = "[role='dialog'] button[aria-label='Close']";
    pub const CONFIRM_PROMPT: &str = "[role='alertdialog'][aria-label='Discard report?']";
    pub const CONFIRM_YES: &str = "[role='alertdialog'] button[value='yes']";
    pub const CONFIRM_NO: &str = "[role='alertdialog'] button[value='no']";
}

/// Opciones de "¿Qué no funciona?". Conjunto cerrado: añadir una variante
/// obliga a actualizar la correspondencia en `label` y `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceOption {
    Internet,
    Tv,
    Phone,
    Email,
    Other,
}

impl ServiceOption {
    pub const ALL: [ServiceOption; 5] = [
        ServiceOption::Internet,
        ServiceOption::Tv,
        ServiceOption::Phone,
        ServiceOption::Email,
        ServiceOption::Other,
    ];

    /// Texto visible de la opción en el diálogo.
    pub fn label(self) -> &'static str {
        match self {
            ServiceOption::Internet => "Internet",
            ServiceOption::Tv => "TV",
            ServiceOption::Phone => "Phone",
            ServiceOption::Email => "Email",
            ServiceOption::Other => "Something else",
        }
    }

    /// Valor del control de opción asociado.
    pub fn value(self) -> &'static str {
        match self {
            ServiceOption::Internet => "internet",
            ServiceOption::Tv => "tv",
            ServiceOption::Phone => "phone",
            ServiceOption::Email => "email",
            ServiceOption::Other => "other",
        }
    }

    /// Selector del botón de opción de este servicio.
    pub fn selector(self) -> String {
        format!("input[type='radio'][name='service'][value='{}']", self.value())
    }
}

impl fmt::Display for ServiceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Objeto de página del diálogo de notificación de averías.
pub struct FeedbackDialog {
    base: BasePage,
}

impl FeedbackDialog {
    pub fn new(page: Page) -> Self {
        Self {
            base: BasePage::new(page),
        }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    /// Espera a que el diálogo esté abierto y visible.
    pub async fn wait_until_open(&self) -> Result<(), PageError> {
        self.base
            .wait_for_visible(locators::DIALOG, DEFAULT_TIMEOUT)
            .await
    }

    pub async fn is_open(&self) -> bool {
        self.base.is_visible(locators::DIALOG).await
    }

    /// Selecciona una de las opciones de "¿Qué no funciona?".
    pub async fn select_service(&self, option: ServiceOption) -> Result<(), PageError> {
        self.base
            .safe_click(&option.selector(), CRITICAL_TIMEOUT)
            .await
    }

    pub async fn is_selected(&self, option: ServiceOption) -> Result<bool, PageError> {
        self.base.is_checked(&option.selector()).await
    }

    pub async fn submit_enabled(&self) -> Result<bool, PageError> {
        self.base.is_enabled(locators::SUBMIT_BUTTON).await
    }

    pub async fn submit(&self) -> Result<(), PageError> {
        if !self.submit_enabled().await? {
            return Err(PageError::Assertion(String::from(
                "el botón de envío sigue deshabilitado",
            )));
        }
        self.base
            .safe_click(locators::SUBMIT_BUTTON, CRITICAL_TIMEOUT)
            .await
    }

    /// Pulsa el control de cierre del diálogo. Con una selección hecha, el
    /// sitio abre un aviso de confirmación en lugar de cerrar directamente.
    pub async fn request_close(&self) -> Result<(), PageError> {
        self.base
            .safe_click(locators::CLOSE_BUTTON, CRITICAL_TIMEOUT)
            .await
    }

    pub async fn confirmation_visible(&self) -> bool {
        self.base.is_visible(locators::CONFIRM_PROMPT).await
    }

    /// "Yes" en el aviso: descarta el informe y cierra el diálogo.
    pub async fn confirm_discard(&self) -> Result<(), PageError> {
        self.base
            .safe_click(locators::CONFIRM_YES, CRITICAL_TIMEOUT)
            .await?;
        self.base
            .wait_for_hidden(locators::DIALOG, DEFAULT_TIMEOUT)
            .await
    }

    /// "No" en el aviso: vuelve al diálogo con la selección intacta.
    pub async fn cancel_discard(&self) -> Result<(), PageError> {
        self.base
            .safe_click(locators::CONFIRM_NO, CRITICAL_TIMEOUT)
            .await?;
        self.base
            .wait_for_hidden(locators::CONFIRM_PROMPT, DEFAULT_TIMEOUT)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cada_opcion_tiene_etiqueta_y_valor() {
        for option in ServiceOption::ALL {
            assert!(!option.label().is_empty());
            assert!(!option.value().is_empty());
            assert!(option.selector().contains(option.value()));
        }
    }

    #[test]
    fn los_valores_son_unicos() {
        let mut values: Vec<&str> = ServiceOption::ALL.iter().map(|o| o.value()).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), ServiceOption::ALL.len());
    }

    #[test]
    fn la_etiqueta_se_usa_como_display() {
        assert_eq!(ServiceOption::Other.to_string(), "Something else");
    }
}
