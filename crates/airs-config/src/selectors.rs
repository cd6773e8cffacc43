//! Strategy selector tables.
//!
//! Every strategy family is chosen by a small integer code. The tables below
//! are the only place codes are defined; an unknown code is rejected before
//! any trainer state exists.

use airs_core::distance::AttributeDistance;
use airs_core::error::{AirsError, Result};
use airs_immune::initialisation::ModelInitialisation;
use airs_immune::merger::MemoryCellMerger;

/// A `(code, label)` lookup table.
pub type SelectorTable = &'static [(u32, &'static str)];

pub const NUMERIC_DISTANCES: SelectorTable = &[(1, "Squared difference")];

pub const NOMINAL_DISTANCES: SelectorTable = &[(1, "Exact match (0 on match, 1 otherwise)")];

pub const INITIALISATIONS: SelectorTable = &[(1, "Random training instances")];

pub const SAMPLE_GENERATORS: SelectorTable = &[
    (1, "Random mutate"),
    (2, "Stimulation proportional"),
    (3, "Range bounded"),
];

pub const MERGES: SelectorTable = &[(1, "Concatenate class pools")];

/// Sample generator family, before its parameters are bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorSelection {
    RandomMutate,
    StimulationProportional,
    RangeBounded,
}

fn lookup(table: SelectorTable, selector: &str, code: u32) -> Result<&'static str> {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .ok_or_else(|| {
            let known: Vec<String> = table.iter().map(|(c, _)| c.to_string()).collect();
            AirsError::configuration(selector, code, format!("expected one of {}", known.join(", ")))
        })
}

pub fn describe_numeric_distance(code: u32) -> Result<&'static str> {
    lookup(NUMERIC_DISTANCES, "numeric_distance", code)
}

pub fn describe_nominal_distance(code: u32) -> Result<&'static str> {
    lookup(NOMINAL_DISTANCES, "nominal_distance", code)
}

pub fn describe_initialisation(code: u32) -> Result<&'static str> {
    lookup(INITIALISATIONS, "initialisation", code)
}

pub fn describe_sample_generator(code: u32) -> Result<&'static str> {
    lookup(SAMPLE_GENERATORS, "sample_generator", code)
}

pub fn describe_merge(code: u32) -> Result<&'static str> {
    lookup(MERGES, "merge", code)
}

pub fn resolve_numeric_distance(code: u32) -> Result<AttributeDistance> {
    describe_numeric_distance(code)?;
    Ok(AttributeDistance::Numeric)
}

pub fn resolve_nominal_distance(code: u32) -> Result<AttributeDistance> {
    describe_nominal_distance(code)?;
    Ok(AttributeDistance::Nominal)
}

pub fn resolve_initialisation(code: u32) -> Result<ModelInitialisation> {
    describe_initialisation(code)?;
    Ok(ModelInitialisation::RandomInstances)
}

pub fn resolve_sample_generator(code: u32) -> Result<GeneratorSelection> {
    describe_sample_generator(code)?;
    Ok(match code {
        1 => GeneratorSelection::RandomMutate,
        2 => GeneratorSelection::StimulationProportional,
        _ => GeneratorSelection::RangeBounded,
    })
}

pub fn resolve_merge(code: u32) -> Result<MemoryCellMerger> {
    describe_merge(code)?;
    Ok(MemoryCellMerger::Concatenate)
}
