use crate::error::{Error, Result};
use crate::events::EventKind;
use serde::Deserialize;

/// Per-event-kind update weights, taken from configuration once per
/// activation and immutable afterwards. A kind with no mapped weight and no
/// fallback is a configuration error caught by [`WeightTable::validate`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WeightTable {
    open: Option<f64>,
    manual_save: Option<f64>,
    auto_save: Option<f64>,
    active_focus: Option<f64>,
    directory_visit: Option<f64>,
    fallback: Option<f64>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            open: Some(1.0),
            manual_save: Some(1.0),
            auto_save: Some(0.3),
            active_focus: Some(0.2),
            directory_visit: Some(1.0),
            fallback: None,
        }
    }
}

impl WeightTable {
    pub fn weight_for(&self, kind: EventKind) -> Result<f64> {
        let mapped = match kind {
            EventKind::Open => self.open,
            EventKind::ManualSave => self.manual_save,
            EventKind::AutoSave => self.auto_save,
            EventKind::ActiveFocus => self.active_focus,
            EventKind::DirectoryVisit => self.directory_visit,
        };
        mapped
            .or(self.fallback)
            .ok_or(Error::UnmappedEventKind(kind))
    }

    /// Check every kind resolves to a non-negative weight. Run once at
    /// activation so later lookups cannot fail mid-event.
    pub fn validate(&self) -> Result<()> {
        for kind in EventKind::ALL {
            let weight = self.weight_for(kind)?;
            if weight < 0.0 {
                return Err(Error::NegativeWeight { kind, weight });
            }
        }
        Ok(())
    }
}
