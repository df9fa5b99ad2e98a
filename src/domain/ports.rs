use crate::utils::error::Result;

/// Destination for report lines produced by a scenario run.
pub trait Reporter {
    fn report(&mut self, line: &str) -> Result<()>;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, line: &str) -> Result<()> {
        (**self).report(line)
    }
}
