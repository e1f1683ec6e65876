//! Objetos de página del portal de soporte, construidos sobre chromiumoxide.
//!
//! Cada escenario usa su propio contexto de navegador y dentro de un
//! escenario las operaciones son estrictamente secuenciales; el único
//! mecanismo de cancelación es el tiempo de espera de cada operación.

pub mod base;
pub mod feedback;
pub mod home;
pub mod search;

pub use base::{
    with_backoff, BasePage, PageError, CRITICAL_TIMEOUT, DEFAULT_TIMEOUT, NAVIGATION_TIMEOUT,
    POLL_INTERVAL,
};
pub use feedback::{FeedbackDialog, ServiceOption};
pub use home::SupportHomePage;
pub use search::SearchPage;
