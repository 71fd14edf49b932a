//! Preset composition.
//!
//! Both policies walk the inputs in order and never fail: names are
//! forwarded uninterpreted. The output keeps the position at which each
//! name was first seen.

use crate::params::ParamSet;

/// Override-merge: the last input defining a name decides its value.
pub fn merge<'a, I>(presets: I) -> ParamSet
where
    I: IntoIterator<Item = &'a ParamSet>,
{
    let mut result = ParamSet::new();
    for preset in presets {
        for (name, value) in preset.iter() {
            result.insert(name, value);
        }
    }
    result
}

/// Additive-merge: a name's value is the sum over the inputs that define it.
pub fn add<'a, I>(presets: I) -> ParamSet
where
    I: IntoIterator<Item = &'a ParamSet>,
{
    let mut result = ParamSet::new();
    for preset in presets {
        for (name, value) in preset.iter() {
            match result.entry_mut(name) {
                Some(existing) => *existing = *existing + value,
                None => result.insert(name, value),
            }
        }
    }
    result
}
