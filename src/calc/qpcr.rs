//! qPCR master-mix calculator.

use serde::{Deserialize, Serialize};

use super::{finite, format_number, positive};
use crate::error::CalcError;

/// One master-mix component and its volume in a single reaction (µL).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reagent {
    pub name: String,
    pub per_reaction_ul: f64,
}

impl Reagent {
    pub fn new(name: impl Into<String>, per_reaction_ul: f64) -> Self {
        Self {
            name: name.into(),
            per_reaction_ul,
        }
    }
}

/// Computed row of the master-mix table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MixLine {
    pub name: String,
    pub per_reaction_ul: f64,
    pub total_ul: f64,
}

/// Master-mix recipe: reagents, reaction count and pipetting overage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterMix {
    pub reagents: Vec<Reagent>,
    pub reactions: u32,
    /// Extra volume in percent, e.g. 10 for 10 %
    pub overage_percent: f64,
}

impl Default for MasterMix {
    /// 20 µL SYBR reaction, one plate row worth of reactions, 10 % overage.
    fn default() -> Self {
        Self {
            reagents: vec![
                Reagent::new("2x SYBR Green master mix", 10.0),
                Reagent::new("Forward primer (10 µM)", 0.8),
                Reagent::new("Reverse primer (10 µM)", 0.8),
                Reagent::new("Nuclease-free water", 6.4),
            ],
            reactions: 12,
            overage_percent: 10.0,
        }
    }
}

impl MasterMix {
    /// Multiplier applied to per-reaction volumes.
    pub fn scale(&self) -> Result<f64, CalcError> {
        if self.reactions == 0 {
            return Err(CalcError::Empty("Reaction count"));
        }
        let overage = finite("Overage", self.overage_percent)?;
        if overage < 0.0 {
            return Err(CalcError::NotPositive {
                field: "Overage",
                value: overage,
            });
        }
        Ok(f64::from(self.reactions) * (1.0 + overage / 100.0))
    }

    /// Total volume of each reagent.
    pub fn compute(&self) -> Result<Vec<MixLine>, CalcError> {
        let scale = self.scale()?;
        self.reagents
            .iter()
            .map(|r| {
                let per_reaction = positive("Reagent volume", r.per_reaction_ul)?;
                Ok(MixLine {
                    name: r.name.clone(),
                    per_reaction_ul: per_reaction,
                    total_ul: per_reaction * scale,
                })
            })
            .collect()
    }

    /// Master-mix volume dispensed per well (µL).
    pub fn per_reaction_total(&self) -> f64 {
        self.reagents.iter().map(|r| r.per_reaction_ul).sum()
    }

    /// Tab-separated table with a header and a total row.
    pub fn to_tsv(&self) -> Result<String, CalcError> {
        let lines = self.compute()?;
        let mut out = String::from("Reagent\tPer reaction (µL)\tTotal (µL)\n");
        for line in &lines {
            out.push_str(&format!(
                "{}\t{}\t{}\n",
                line.name,
                format_number(line.per_reaction_ul),
                format_number(line.total_ul)
            ));
        }
        let total: f64 = lines.iter().map(|l| l.total_ul).sum();
        out.push_str(&format!(
            "Total\t{}\t{}\n",
            format_number(self.per_reaction_total()),
            format_number(total)
        ));
        Ok(out)
    }
}
