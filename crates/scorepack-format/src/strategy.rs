//! Version-keyed format strategies
//!
//! Each historical format generation has its own structural parser with its
//! own element vocabulary. The table holds them in fixed priority order and
//! selects the first whose version-range predicate matches; entries are
//! independent units, so tests can substitute recording stubs.

use crate::Result;
use crate::legacy::{Era114Reader, Era206Reader, Era302Reader};
use crate::modern::ModernReader;
use crate::xml::XmlStream;
use scorepack_model::{MasterScore, ReadContext};

/// One format generation's structural parsing capability.
pub trait FormatStrategy {
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this strategy handles the given version ordinal.
    fn matches(&self, version: i32, test_mode: bool) -> bool;

    /// Parse the root element's children into the document.
    fn read(
        &self,
        score: &mut MasterScore,
        xml: &mut XmlStream<'_>,
        ctx: &mut ReadContext,
    ) -> Result<()>;
}

/// Priority-ordered table of format strategies.
pub struct StrategyTable {
    strategies: Vec<Box<dyn FormatStrategy>>,
}

impl StrategyTable {
    /// Build a table from strategies in priority order.
    pub fn new(strategies: Vec<Box<dyn FormatStrategy>>) -> Self {
        Self { strategies }
    }

    /// The standard dispatch table: the three legacy eras, then the modern
    /// parser.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(Era114Reader),
            Box::new(Era206Reader),
            Box::new(Era302Reader),
            Box::new(ModernReader),
        ])
    }

    /// Select the first strategy matching the version, in priority order.
    pub fn select(&self, version: i32, test_mode: bool) -> Option<&dyn FormatStrategy> {
        self.strategies
            .iter()
            .find(|s| s.matches(version, test_mode))
            .map(|s| s.as_ref())
    }
}

impl Default for StrategyTable {
    fn default() -> Self {
        Self::standard()
    }
}
