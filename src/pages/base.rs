use chromiumoxide::Page;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Tiempo de espera por defecto para elementos.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Tiempo de espera para verificaciones críticas (deben ser rápidas).
pub const CRITICAL_TIMEOUT: Duration = Duration::from_secs(5);
/// Tiempo de espera para navegaciones completas.
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(15);
/// Intervalo de sondeo de las esperas.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Error de una operación de página. Cada paso falla con su propio selector
/// y su propio límite de tiempo, de modo que el informe de la prueba puede
/// atribuir el fallo a un paso concreto.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Tiempo agotado ({timeout:?}) esperando el elemento '{selector}'")]
    Timeout { selector: String, timeout: Duration },

    #[error("Error del navegador: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("Resultado de script ilegible: {0}")]
    Script(#[from] serde_json::Error),

    #[error("Verificación fallida: {0}")]
    Assertion(String),
}

/// Reintenta una operación con retroceso exponencial. Es el único mecanismo
/// de reintento por operación; el resto de reintentos son responsabilidad
/// del arnés de pruebas.
pub async fn with_backoff<T, E, F, Fut>(
    attempts: u32,
    base_delay: Duration,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut delay = base_delay;
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= attempts => return Err(e),
            Err(_) => {
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
        }
    }
}

/// Página base: envuelve una pestaña del navegador con esperas acotadas,
/// clic seguro y una sonda de visibilidad que nunca lanza errores.
pub struct BasePage {
    page: Page,
}

impl BasePage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navegación con reintentos (3 intentos con retroceso exponencial),
    /// acotada por `NAVIGATION_TIMEOUT`.
    pub async fn navigate(&self, url: &str) -> Result<(), PageError> {
        tokio::time::timeout(
            NAVIGATION_TIMEOUT,
            with_backoff(3, Duration::from_millis(500), || async {
                self.page.goto(url).await.map(|_| ())
            }),
        )
        .await
        .map_err(|_| PageError::Timeout {
            selector: url.to_string(),
            timeout: NAVIGATION_TIMEOUT,
        })?
        .map_err(PageError::Browser)
    }

    /// Sonda de visibilidad: nunca lanza errores, un fallo cuenta como
    /// "no visible".
    pub async fn is_visible(&self, selector: &str) -> bool {
        self.probe_visible(selector).await.unwrap_or(false)
    }

    async fn probe_visible(&self, selector: &str) -> Result<bool, PageError> {
        let script = format!(
            "(function() {{ \
                const el = document.querySelector({sel}); \
                if (!el) return false; \
                const style = window.getComputedStyle(el); \
                return style.display !== 'none' \
                    && style.visibility !== 'hidden' \
                    && el.getClientRects().length > 0; \
            }})()",
            sel = js_string(selector)
        );
        let visible: bool = self.page.evaluate(script).await?.into_value()?;
        Ok(visible)
    }

    /// Espera acotada hasta que el elemento sea visible.
    pub async fn wait_for_visible(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), PageError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.is_visible(selector).await {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(PageError::Timeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Espera acotada hasta que el elemento deje de ser visible.
    pub async fn wait_for_hidden(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), PageError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if !self.is_visible(selector).await {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(PageError::Timeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Clic seguro: espera a que el elemento sea visible antes de pulsarlo.
    pub async fn safe_click(&self, selector: &str, timeout: Duration) -> Result<(), PageError> {
        self.wait_for_visible(selector, timeout).await?;
        let element = self.page.find_element(selector).await?;
        element.click().await?;
        Ok(())
    }

    /// Texto visible del elemento, tras esperar a que aparezca.
    pub async fn text_of(&self, selector: &str, timeout: Duration) -> Result<String, PageError> {
        self.wait_for_visible(selector, timeout).await?;
        let element = self.page.find_element(selector).await?;
        let text = element.inner_text().await?;
        Ok(text.unwrap_or_default())
    }

    /// Valor de un atributo del elemento, tras esperar a que aparezca.
    pub async fn attribute_of(
        &self,
        selector: &str,
        attribute: &str,
        timeout: Duration,
    ) -> Result<Option<String>, PageError> {
        self.wait_for_visible(selector, timeout).await?;
        let element = self.page.find_element(selector).await?;
        let value = element.attribute(attribute).await?;
        Ok(value)
    }

    /// Estado habilitado/deshabilitado de un control de formulario.
    pub async fn is_enabled(&self, selector: &str) -> Result<bool, PageError> {
        let script = format!(
            "(function() {{ \
                const el = document.querySelector({sel}); \
                return el !== null && !el.disabled; \
            }})()",
            sel = js_string(selector)
        );
        let enabled: bool = self.page.evaluate(script).await?.into_value()?;
        Ok(enabled)
    }

    /// Estado marcado de una casilla o botón de opción.
    pub async fn is_checked(&self, selector: &str) -> Result<bool, PageError> {
        let script = format!(
            "(function() {{ \
                const el = document.querySelector({sel}); \
                return el !== null && el.checked === true; \
            }})()",
            sel = js_string(selector)
        );
        let checked: bool = self.page.evaluate(script).await?.into_value()?;
        Ok(checked)
    }

    /// Escribe texto en un campo tras esperar a que sea visible.
    pub async fn fill(
        &self,
        selector: &str,
        text: &str,
        timeout: Duration,
    ) -> Result<(), PageError> {
        self.wait_for_visible(selector, timeout).await?;
        let element = self.page.find_element(selector).await?;
        element.click().await?;
        element.type_str(text).await?;
        Ok(())
    }

    /// Número de elementos que coinciden con el selector.
    pub async fn count_of(&self, selector: &str) -> Result<usize, PageError> {
        let script = format!(
            "document.querySelectorAll({sel}).length",
            sel = js_string(selector)
        );
        let count: usize = self.page.evaluate(script).await?.into_value()?;
        Ok(count)
    }
}

/// Convierte un selector en un literal de cadena de JavaScript.
fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| String::from("\"\""))
}
