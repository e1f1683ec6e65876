use chromiumoxide::Page;

use crate::pages::base::{BasePage, PageError, DEFAULT_TIMEOUT};

/// Localizadores de la página de búsqueda del portal.
pub mod locators {
    pub const SEARCH_INPUT: &str = "input[type='search'][aria-label='Search support']";
    pub const SEARCH_BUTTON: &str = "button[aria-label='Search']";
    pub const RESULTS_LIST: &str = "[role='list'][aria-label='Search results']";
    pub const RESULT_ITEMS: &str = "[role='list'][aria-label='Search results'] [role='listitem']";
}

/// Objeto de página de la búsqueda de artículos de soporte.
pub struct SearchPage {
    base: BasePage,
}

impl SearchPage {
    pub fn new(page: Page) -> Self {
        Self {
            base: BasePage::new(page),
        }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    pub async fn open(&self, url: &str) -> Result<(), PageError> {
        self.base.navigate(url).await?;
        self.base
            .wait_for_visible(locators::SEARCH_INPUT, DEFAULT_TIMEOUT)
            .await
    }

    /// Escribe la consulta y lanza la búsqueda; espera a que aparezca la
    /// lista de resultados.
    pub async fn search(&self, query: &str) -> Result<(), PageError> {
        self.base
            .fill(locators::SEARCH_INPUT, query, DEFAULT_TIMEOUT)
            .await?;
        self.base
            .safe_click(locators::SEARCH_BUTTON, DEFAULT_TIMEOUT)
            .await?;
        self.base
            .wait_for_visible(locators::RESULTS_LIST, DEFAULT_TIMEOUT)
            .await
    }

    pub async fn result_count(&self) -> Result<usize, PageError> {
        self.base.count_of(locators::RESULT_ITEMS).await
    }

    /// Texto del primer resultado; falla si no hay resultados visibles.
    pub async fn first_result_text(&self) -> Result<String, PageError> {
        self.base
            .text_of(locators::RESULT_ITEMS, DEFAULT_TIMEOUT)
            .await
    }
}
