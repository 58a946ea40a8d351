//! Serial-dilution calculator.
//!
//! Each tube is filled to `final_volume` by transferring `final_volume / factor`
//! from the previous tube (the stock for the first one) and topping up with
//! diluent. Every tube but the last gives the same transfer volume onward.

use serde::{Deserialize, Serialize};

use super::{format_number, positive};
use crate::error::CalcError;

/// Serial-dilution parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerialDilution {
    pub initial_concentration: f64,
    pub factor: f64,
    pub steps: u32,
    /// Volume in each tube before the onward transfer (µL)
    pub final_volume: f64,
}

/// One tube of the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DilutionStep {
    /// 1-based tube number
    pub step: u32,
    pub concentration: f64,
    pub transfer_volume: f64,
    pub diluent_volume: f64,
    /// Volume left in the tube once the series is done
    pub remaining_volume: f64,
}

impl SerialDilution {
    fn validate(&self) -> Result<(), CalcError> {
        positive("Initial concentration", self.initial_concentration)?;
        positive("Final volume", self.final_volume)?;
        if positive("Dilution factor", self.factor)? <= 1.0 {
            return Err(CalcError::FactorTooSmall(self.factor));
        }
        if self.steps == 0 {
            return Err(CalcError::Empty("Step count"));
        }
        Ok(())
    }

    /// Compute every tube of the series.
    pub fn compute(&self) -> Result<Vec<DilutionStep>, CalcError> {
        self.validate()?;
        let transfer = self.final_volume / self.factor;
        let diluent = self.final_volume - transfer;
        let steps = (1..=self.steps)
            .map(|step| DilutionStep {
                step,
                concentration: self.initial_concentration / self.factor.powi(step as i32),
                transfer_volume: transfer,
                diluent_volume: diluent,
                remaining_volume: if step == self.steps {
                    self.final_volume
                } else {
                    self.final_volume - transfer
                },
            })
            .collect();
        Ok(steps)
    }

    /// Tab-separated table with a header row.
    pub fn to_tsv(&self) -> Result<String, CalcError> {
        let mut out =
            String::from("Step\tConcentration\tTransfer (µL)\tDiluent (µL)\tRemaining (µL)\n");
        for s in self.compute()? {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                s.step,
                format_number(s.concentration),
                format_number(s.transfer_volume),
                format_number(s.diluent_volume),
                format_number(s.remaining_volume)
            ));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenfold() -> SerialDilution {
        SerialDilution {
            initial_concentration: 1000.0,
            factor: 10.0,
            steps: 3,
            final_volume: 100.0,
        }
    }

    #[test]
    fn tenfold_series() {
        let steps = tenfold().compute().unwrap();
        let conc: Vec<f64> = steps.iter().map(|s| s.concentration).collect();
        assert_eq!(conc, vec![100.0, 10.0, 1.0]);
        assert_eq!(steps[0].transfer_volume, 10.0);
        assert_eq!(steps[0].diluent_volume, 90.0);
        assert_eq!(steps[0].remaining_volume, 90.0);
        assert_eq!(steps[2].remaining_volume, 100.0);
    }

    #[test]
    fn invalid_parameters() {
        let mut d = tenfold();
        d.factor = 1.0;
        assert_eq!(d.compute(), Err(CalcError::FactorTooSmall(1.0)));
        d.factor = 2.0;
        d.steps = 0;
        assert_eq!(d.compute(), Err(CalcError::Empty("Step count")));
        d.steps = 2;
        d.final_volume = f64::INFINITY;
        assert_eq!(d.compute(), Err(CalcError::NonFinite("Final volume")));
    }

    #[test]
    fn tsv_table() {
        let d = SerialDilution {
            initial_concentration: 8.0,
            factor: 2.0,
            steps: 2,
            final_volume: 50.0,
        };
        assert_eq!(
            d.to_tsv().unwrap(),
            "Step\tConcentration\tTransfer (µL)\tDiluent (µL)\tRemaining (µL)\n1\t4\t25\t25\t25\n2\t2\t25\t25\t50\n"
        );
    }
}
