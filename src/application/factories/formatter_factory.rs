use crate::adapters::outbound::formatters::{CycloneDxFormatter, SpdxFormatter};
use crate::application::dto::SbomFormat;
use crate::ports::outbound::SbomFormatter;

/// Function that supplies the formatter for a format; `FormatterFactory::create` by default
pub type FormatterSource = fn(SbomFormat) -> Box<dyn SbomFormatter>;

/// Factory for creating SBOM formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified format
    ///
    /// # Examples
    /// ```
    /// use inno_sbom::application::dto::SbomFormat;
    /// use inno_sbom::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(SbomFormat::Spdx);
    /// assert_eq!(formatter.file_name(), "sbom.spdx.json");
    /// ```
    pub fn create(format: SbomFormat) -> Box<dyn SbomFormatter> {
        match format {
            SbomFormat::Spdx => Box::new(SpdxFormatter::new()),
            SbomFormat::CycloneDx => Box::new(CycloneDxFormatter::new()),
        }
    }

    /// Returns the progress message for the specified format
    pub fn progress_message(format: SbomFormat) -> &'static str {
        match format {
            SbomFormat::Spdx => "📝 Generating SPDX 2.3 JSON document...",
            SbomFormat::CycloneDx => "📝 Generating CycloneDX 1.6 JSON document...",
        }
    }
}
