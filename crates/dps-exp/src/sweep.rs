use dps_core::errors::DpsError;
use dps_core::{add, merge, ParamSet, ParamValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::invoker::{SimOptions, Simulator};
use crate::table::Table;

/// How a step index turns into a parameter change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "scale", rename_all = "lowercase")]
pub enum AxisRule {
    /// Adds `step * scale` to the baseline value.
    Offset(ParamValue),
    /// Replaces the baseline value with `step * scale`.
    Replace(ParamValue),
}

/// One swept parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepAxis {
    /// Row label in the output table.
    pub label: String,
    pub parameter: String,
    pub rule: AxisRule,
}

impl SweepAxis {
    /// Axis adding `step * scale` to `parameter`, labelled by the parameter name.
    pub fn offset(parameter: impl Into<String>, scale: impl Into<ParamValue>) -> Self {
        let parameter = parameter.into();
        Self {
            label: parameter.clone(),
            parameter,
            rule: AxisRule::Offset(scale.into()),
        }
    }

    /// Axis replacing `parameter` with `step * scale`.
    pub fn replace(parameter: impl Into<String>, scale: impl Into<ParamValue>) -> Self {
        let parameter = parameter.into();
        Self {
            label: parameter.clone(),
            parameter,
            rule: AxisRule::Replace(scale.into()),
        }
    }

    /// Renames the axis row without changing the swept parameter.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Baseline perturbed for step `step`.
    pub fn perturb(&self, baseline: &ParamSet, step: u32) -> ParamSet {
        match self.rule {
            AxisRule::Offset(scale) => {
                add([baseline, &ParamSet::single(&self.parameter, scale.scaled(step))])
            }
            AxisRule::Replace(scale) => {
                merge([baseline, &ParamSet::single(&self.parameter, scale.scaled(step))])
            }
        }
    }
}

/// Axes swept by full mode, in row order.
pub fn standard_axes() -> Vec<SweepAxis> {
    vec![
        SweepAxis::offset("hitBonus", 1),
        SweepAxis::offset("critBonus", 1),
        SweepAxis::offset("strength", 10),
        SweepAxis::offset("agility", 10),
        SweepAxis::offset("bonusAttackPower", 20),
    ]
}

/// Steps, axes and baseline handling for one sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Steps run over `1..=steps`.
    pub steps: u32,
    /// Prepend a step-0 column holding the unperturbed result.
    #[serde(default)]
    pub include_baseline: bool,
    pub axes: Vec<SweepAxis>,
}

impl SweepPlan {
    pub fn standard(steps: u32) -> Self {
        Self {
            steps,
            include_baseline: true,
            axes: standard_axes(),
        }
    }
}

/// Sweeps every axis of `plan` around `baseline`, one capture per step.
///
/// `baseline_options` applies only to the unperturbed invocation;
/// perturbed steps use `step_options`. The first failed invocation aborts
/// the sweep and the partial table is dropped.
pub fn sweep<S: Simulator + ?Sized>(
    sim: &S,
    baseline: &ParamSet,
    plan: &SweepPlan,
    baseline_options: &SimOptions,
    step_options: &SimOptions,
) -> Result<Table, DpsError> {
    let mut table = Table::with_header(plan.steps, plan.include_baseline);
    if plan.axes.is_empty() {
        return Ok(table);
    }
    let zero = if plan.include_baseline {
        Some(sim.capture(baseline, baseline_options)?)
    } else {
        None
    };
    for axis in &plan.axes {
        let _span = debug_span!("axis", label = %axis.label).entered();
        let mut row = Vec::with_capacity(plan.steps as usize + 2);
        row.push(axis.label.clone());
        row.extend(zero.clone());
        for step in 1..=plan.steps {
            let params = axis.perturb(baseline, step);
            let result = sim.capture(&params, step_options)?;
            debug!(step, %result, "step complete");
            row.push(result);
        }
        table.push_row(row);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_adds_scaled_step() {
        let baseline = ParamSet::from_pairs([("strength", 223), ("hitBonus", 4)]);
        let axis = SweepAxis::offset("strength", 10);
        let perturbed = axis.perturb(&baseline, 3);
        assert_eq!(perturbed.get("strength"), Some(ParamValue::Int(253)));
        assert_eq!(perturbed.get("hitBonus"), Some(ParamValue::Int(4)));
    }

    #[test]
    fn replace_overrides_baseline() {
        let baseline = ParamSet::from_pairs([("strength", 223)]);
        let axis = SweepAxis::replace("strength", 10);
        assert_eq!(
            axis.perturb(&baseline, 2).get("strength"),
            Some(ParamValue::Int(20))
        );
    }

    #[test]
    fn offset_introduces_missing_parameter() {
        let baseline = ParamSet::from_pairs([("strength", 223)]);
        let perturbed = SweepAxis::offset("critBonus", 1).perturb(&baseline, 2);
        assert_eq!(perturbed.get("critBonus"), Some(ParamValue::Int(2)));
        assert_eq!(perturbed.to_tokens(), vec!["strength=223", "critBonus=2"]);
    }
}
