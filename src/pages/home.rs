use chromiumoxide::Page;

use crate::pages::base::{BasePage, PageError, DEFAULT_TIMEOUT};
use crate::pages::feedback::FeedbackDialog;

/// Localizadores de la página principal del portal de soporte.
pub mod locators {
    pub const HERO_TITLE: &str = "main h1";
    pub const STATUS_BANNER: &str = "[role='status'][aria-label='Service status']";
    pub const FEEDBACK_BUTTON: &str = "button[aria-label='Tell us more']";
    pub const SEARCH_LINK: &str = "a[aria-label='Search support']";
}

/// Objeto de página de la portada del portal de soporte.
pub struct SupportHomePage {
    base: BasePage,
}

impl SupportHomePage {
    pub fn new(page: Page) -> Self {
        Self {
            base: BasePage::new(page),
        }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    /// Navega a la portada y espera a que el encabezado sea visible.
    pub async fn open(&self, base_url: &str) -> Result<(), PageError> {
        self.base.navigate(base_url).await?;
        self.base
            .wait_for_visible(locators::HERO_TITLE, DEFAULT_TIMEOUT)
            .await
    }

    /// Comprueba que el encabezado principal muestra el texto esperado.
    pub async fn verify_title(&self, expected: &str) -> Result<(), PageError> {
        let actual = self
            .base
            .text_of(locators::HERO_TITLE, DEFAULT_TIMEOUT)
            .await?;
        if actual.trim() != expected {
            return Err(PageError::Assertion(format!(
                "título esperado '{}', encontrado '{}'",
                expected,
                actual.trim()
            )));
        }
        Ok(())
    }

    pub async fn status_banner_visible(&self) -> bool {
        self.base.is_visible(locators::STATUS_BANNER).await
    }

    /// Abre el diálogo "Tell us more" y devuelve su objeto de página.
    pub async fn open_feedback_dialog(&self) -> Result<FeedbackDialog, PageError> {
        self.base
            .safe_click(locators::FEEDBACK_BUTTON, DEFAULT_TIMEOUT)
            .await?;
        let dialog = FeedbackDialog::new(self.base.page().clone());
        dialog.wait_until_open().await?;
        Ok(dialog)
    }

    /// Navega a la búsqueda desde el enlace de la portada.
    pub async fn go_to_search(&self) -> Result<(), PageError> {
        self.base
            .safe_click(locators::SEARCH_LINK, DEFAULT_TIMEOUT)
            .await
    }
}
