//! Compiled-in loadout presets: weapon facets, gear and talent builds.

use dps_core::errors::{DpsError, ErrorInfo};
use dps_core::{ParamSet, ParamValue};
use indexmap::IndexMap;

/// Named, immutable presets available to the run catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetRegistry {
    presets: IndexMap<&'static str, ParamSet>,
}

impl PresetRegistry {
    /// Registry holding every built-in loadout facet.
    pub fn builtin() -> Self {
        let mut presets = IndexMap::new();
        presets.insert("th", two_hand());
        presets.insert("dw", dual_wield());
        presets.insert("gear", gear());
        presets.insert("th_arms", th_arms());
        presets.insert("th_arms_prot", th_arms_prot());
        presets.insert("th_fury", th_fury());
        presets.insert("th_fury_prot", th_fury_prot());
        presets.insert("th_arms_fury", th_arms_fury());
        presets.insert("dw_arms", dw_arms());
        presets.insert("dw_arms_prot", dw_arms_prot());
        presets.insert("dw_fury", dw_fury());
        presets.insert("dw_fury_prot", dw_fury_prot());
        presets.insert("dw_arms_fury", dw_arms_fury());
        Self { presets }
    }

    /// Looks up a preset by name.
    pub fn get(&self, name: &str) -> Result<&ParamSet, DpsError> {
        self.presets.get(name).ok_or_else(|| {
            DpsError::Config(
                ErrorInfo::new("unknown-preset", "no preset registered under this name")
                    .with_context("preset", name),
            )
        })
    }

    /// Preset names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.presets.keys().copied()
    }
}

fn two_hand() -> ParamSet {
    ParamSet::from_pairs([
        ("dualWield", ParamValue::Int(0)),
        ("mainSwingTime", ParamValue::Float(3.3)),
        ("mainWeaponDamageMin", ParamValue::Int(142)),
        ("mainWeaponDamageMax", ParamValue::Int(214)),
    ])
}

fn dual_wield() -> ParamSet {
    ParamSet::from_pairs([
        ("dualWield", ParamValue::Int(1)),
        ("mainSwingTime", ParamValue::Float(2.3)),
        ("mainWeaponDamageMin", ParamValue::Int(63)),
        ("mainWeaponDamageMax", ParamValue::Int(118)),
        ("offSwingTime", ParamValue::Float(1.8)),
        ("offWeaponDamageMin", ParamValue::Int(57)),
        ("offWeaponDamageMax", ParamValue::Int(87)),
    ])
}

fn gear() -> ParamSet {
    ParamSet::from_pairs([
        ("strength", 223),
        ("agility", 172),
        ("bonusAttackPower", 140),
        ("hitBonus", 4),
        ("critBonus", 1),
    ])
}

fn th_arms() -> ParamSet {
    ParamSet::from_pairs([
        ("tacticalMasteryLevel", 5),
        ("angerManagementLevel", 1),
        ("improvedOverpowerLevel", 2),
        ("deepWoundsLevel", 3),
        ("impaleLevel", 2),
        ("twoHandSpecLevel", 5),
        ("swordSpecLevel", 5),
        ("axeSpecLevel", 0),
        ("mortalStrikeLevel", 1),
        ("crueltyLevel", 5),
        ("unbridledWrathLevel", 5),
        ("improvedBattleShoutLevel", 5),
    ])
}

fn th_arms_prot() -> ParamSet {
    ParamSet::from_pairs([
        ("tacticalMasteryLevel", 5),
        ("angerManagementLevel", 1),
        ("improvedOverpowerLevel", 2),
        ("deepWoundsLevel", 3),
        ("impaleLevel", 2),
        ("twoHandSpecLevel", 1),
        ("swordSpecLevel", 5),
        ("axeSpecLevel", 0),
        ("mortalStrikeLevel", 1),
        ("crueltyLevel", 3),
    ])
}

fn th_fury() -> ParamSet {
    ParamSet::from_pairs([
        ("tacticalMasteryLevel", 5),
        ("angerManagementLevel", 1),
        ("improvedOverpowerLevel", 2),
        ("deepWoundsLevel", 3),
        ("impaleLevel", 2),
        ("twoHandSpecLevel", 2),
        ("crueltyLevel", 5),
        ("unbridledWrathLevel", 5),
        ("improvedBattleShoutLevel", 5),
        ("flurryLevel", 5),
        ("improvedBerserkerRageLevel", 0),
        ("bloodthirstLevel", 1),
    ])
}

fn th_fury_prot() -> ParamSet {
    ParamSet::from_pairs([
        ("crueltyLevel", 5),
        ("improvedBattleShoutLevel", 5),
        ("unbridledWrathLevel", 5),
        ("flurryLevel", 5),
        ("improvedBerserkerRageLevel", 2),
        ("bloodthirstLevel", 1),
    ])
}

fn th_arms_fury() -> ParamSet {
    ParamSet::from_pairs([
        ("tacticalMasteryLevel", 5),
        ("angerManagementLevel", 1),
        ("improvedOverpowerLevel", 2),
        ("deepWoundsLevel", 3),
        ("impaleLevel", 2),
        ("twoHandSpecLevel", 5),
        ("crueltyLevel", 5),
        ("unbridledWrathLevel", 5),
        ("improvedBattleShoutLevel", 5),
    ])
}

fn dw_arms() -> ParamSet {
    ParamSet::from_pairs([
        ("tacticalMasteryLevel", 5),
        ("angerManagementLevel", 1),
        ("improvedOverpowerLevel", 2),
        ("deepWoundsLevel", 3),
        ("impaleLevel", 2),
        ("swordSpecLevel", 5),
        ("axeSpecLevel", 0),
        ("mortalStrikeLevel", 1),
        ("crueltyLevel", 5),
        ("unbridledWrathLevel", 5),
        ("improvedBattleShoutLevel", 5),
        ("dualWieldSpecLevel", 5),
    ])
}

fn dw_arms_prot() -> ParamSet {
    ParamSet::from_pairs([
        ("tacticalMasteryLevel", 5),
        ("angerManagementLevel", 1),
        ("improvedOverpowerLevel", 2),
        ("deepWoundsLevel", 3),
        ("impaleLevel", 2),
        ("swordSpecLevel", 5),
        ("axeSpecLevel", 0),
        ("crueltyLevel", 5),
        ("unbridledWrathLevel", 4),
    ])
}

fn dw_fury() -> ParamSet {
    ParamSet::from_pairs([
        ("tacticalMasteryLevel", 5),
        ("angerManagementLevel", 1),
        ("deepWoundsLevel", 3),
        ("impaleLevel", 2),
        ("crueltyLevel", 5),
        ("unbridledWrathLevel", 5),
        ("improvedBattleShoutLevel", 5),
        ("dualWieldSpecLevel", 5),
        ("flurryLevel", 5),
        ("improvedBerserkerRageLevel", 0),
        ("bloodthirstLevel", 1),
    ])
}

fn dw_fury_prot() -> ParamSet {
    ParamSet::from_pairs([
        ("crueltyLevel", 5),
        ("unbridledWrathLevel", 5),
        ("improvedBattleShoutLevel", 5),
        ("dualWieldSpecLevel", 5),
        ("flurryLevel", 5),
        ("improvedBerserkerRageLevel", 2),
        ("bloodthirstLevel", 1),
    ])
}

fn dw_arms_fury() -> ParamSet {
    ParamSet::from_pairs([
        ("tacticalMasteryLevel", 5),
        ("angerManagementLevel", 1),
        ("deepWoundsLevel", 3),
        ("impaleLevel", 2),
        ("improvedOverpowerLevel", 2),
        ("crueltyLevel", 5),
        ("unbridledWrathLevel", 5),
        ("improvedBattleShoutLevel", 5),
        ("dualWieldSpecLevel", 5),
        ("flurryLevel", 5),
        ("improvedBerserkerRageLevel", 0),
    ])
}
