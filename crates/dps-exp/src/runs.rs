use dps_core::errors::{DpsError, ErrorInfo};
use dps_core::{merge, ParamSet};
use serde::Serialize;

use crate::loadouts::PresetRegistry;

/// Catalogue entry: a run name and the presets composing its baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunDef {
    pub name: &'static str,
    /// Presets override-merged in order; later presets win.
    pub presets: &'static [&'static str],
    /// Whether the run belongs to the default pass.
    pub active: bool,
}

/// A named, fully composed parameter set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub name: String,
    pub params: ParamSet,
}

impl RunDef {
    /// Override-merges the run's presets into its baseline.
    pub fn compose(&self, registry: &PresetRegistry) -> Result<Run, DpsError> {
        let presets = self
            .presets
            .iter()
            .map(|name| registry.get(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Run {
            name: self.name.to_string(),
            params: merge(presets),
        })
    }
}

/// Fixed list of runs known to the driver, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCatalog {
    defs: Vec<RunDef>,
}

const fn def(name: &'static str, presets: &'static [&'static str], active: bool) -> RunDef {
    RunDef {
        name,
        presets,
        active,
    }
}

impl RunCatalog {
    /// Every two-hand and dual-wield combination of the built-in presets.
    pub fn builtin() -> Self {
        Self {
            defs: vec![
                def("2h-no-talents", &["th", "gear"], false),
                def("2h-arms", &["th", "gear", "th_arms"], true),
                def("2h-arms-prot", &["th", "gear", "th_arms_prot"], true),
                def("2h-fury", &["th", "gear", "th_fury"], true),
                def("2h-fury-prot", &["th", "gear", "th_fury_prot"], false),
                def("2h-arms-fury", &["th", "gear", "th_arms_fury"], false),
                def("dw-no-talents", &["dw", "gear"], false),
                def("dw-arms", &["dw", "gear", "dw_arms"], true),
                def("dw-arms-prot", &["dw", "gear", "dw_arms_prot"], false),
                def("dw-fury", &["dw", "gear", "dw_fury"], true),
                def("dw-fury-prot", &["dw", "gear", "dw_fury_prot"], false),
                def("dw-arms-fury", &["dw", "gear", "dw_arms_fury"], false),
            ],
        }
    }

    /// Builds a catalogue from explicit definitions.
    pub fn from_defs(defs: Vec<RunDef>) -> Self {
        Self { defs }
    }

    pub fn defs(&self) -> &[RunDef] {
        &self.defs
    }

    pub fn find(&self, name: &str) -> Option<&RunDef> {
        self.defs.iter().find(|def| def.name == name)
    }
}

/// Composes the runs for one orchestrator pass.
///
/// With no names the catalogue's active runs are used. Otherwise the named
/// runs are returned in catalogue order, and unknown names are rejected.
pub fn select_runs(
    catalog: &RunCatalog,
    registry: &PresetRegistry,
    names: &[String],
) -> Result<Vec<Run>, DpsError> {
    if let Some(unknown) = names.iter().find(|name| catalog.find(name).is_none()) {
        let known = catalog
            .defs()
            .iter()
            .map(|def| def.name)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(DpsError::Config(
            ErrorInfo::new("unknown-run", "no run registered under this name")
                .with_context("run", unknown.as_str())
                .with_hint(format!("known runs: {known}")),
        ));
    }
    catalog
        .defs()
        .iter()
        .filter(|def| {
            if names.is_empty() {
                def.active
            } else {
                names.iter().any(|name| name == def.name)
            }
        })
        .map(|def| def.compose(registry))
        .collect()
}
