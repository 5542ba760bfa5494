pub mod canvas;
pub mod layout;

use crate::composer::Composition;
use crate::model::{RenderError, Report};

pub use canvas::FontRenderer;

pub trait ImageRenderer: Send + Sync {
    /// Produces the PNG for a report and its composed text.
    fn render(&self, report: &Report, composition: &Composition) -> Result<Vec<u8>, RenderError>;
}
