use crate::services::alert_service::TemplateChooser;

/// Always picks the same template index.
pub(crate) struct FixedChooser(pub usize);

impl TemplateChooser for FixedChooser {
    fn choose(&self, _count: usize) -> usize {
        self.0
    }
}
