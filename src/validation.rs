//! # Validation Engine
//!
//! Field and cross-field rules applied before anything is written. Rules are
//! independent: each one reports into a [`Checks`] collector and the caller
//! finishes with every violation at once. A rule that needs another's output
//! (the kind check needs the inventory item to exist) is simply skipped when
//! its input is missing.

use crate::error::LedgerError;
use crate::framework::{entity_type, HerdEntity, Table};
use crate::model::{AnimalId, Biometrics, LifeState, MAX_UNITS};
use crate::store::HerdStore;
use chrono::NaiveDate;

/// Collector for independent rule outcomes.
#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<LedgerError>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: LedgerError) {
        match error {
            LedgerError::Validation(errors) => self.errors.extend(errors),
            other => self.errors.push(other),
        }
    }

    pub fn check(&mut self, result: Result<(), LedgerError>) {
        if let Err(error) = result {
            self.push(error);
        }
    }

    /// Records the error, if any, and hands back the value for dependent rules.
    pub fn take<T>(&mut self, result: Result<T, LedgerError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// One violation is returned as itself, several as [`LedgerError::Validation`].
    pub fn finish(mut self) -> Result<(), LedgerError> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(LedgerError::Validation(self.errors)),
        }
    }
}

pub fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), LedgerError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(LedgerError::range(
            field,
            format!("between {min} and {max}"),
            value,
        ))
    }
}

pub fn at_least(field: &'static str, value: f64, min: f64) -> Result<(), LedgerError> {
    if value >= min {
        Ok(())
    } else {
        Err(LedgerError::range(field, format!("at least {min}"), value))
    }
}

pub fn finite(field: &'static str, value: f64) -> Result<(), LedgerError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LedgerError::range(field, "a finite number", value))
    }
}

/// Conformation score: 1 to 9 with at most two decimals.
pub fn score(field: &'static str, value: f64) -> Result<(), LedgerError> {
    within(field, value, 1.0, 9.0)?;
    let hundredths = value * 100.0;
    if (hundredths - hundredths.round()).abs() > 1e-6 {
        return Err(LedgerError::range(
            field,
            "given with at most two decimals",
            value,
        ));
    }
    Ok(())
}

pub fn unit_count(value: u32) -> Result<(), LedgerError> {
    if value <= MAX_UNITS {
        Ok(())
    } else {
        Err(LedgerError::range(
            "unitCount",
            format!("between 0 and {MAX_UNITS}"),
            value,
        ))
    }
}

pub fn biometrics(values: &Biometrics, checks: &mut Checks) {
    let somatic = u64::from(values.somatic_cell_count);
    if !(50_000..=2_000_000).contains(&somatic) {
        checks.push(LedgerError::range(
            "somaticCellCount",
            "between 50000 and 2000000",
            somatic,
        ));
    }
    checks.check(at_least("milkYield", values.milk_yield, 0.0));
    checks.check(score("legQuality", values.leg_quality));
    checks.check(score("udderQuality", values.udder_quality));
    checks.check(within("fatPercent", values.fat_percent, 2.5, 6.0));
    checks.check(within("proteinPercent", values.protein_percent, 2.8, 4.0));
}

pub fn not_blank(field: &'static str, value: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        Err(LedgerError::Required { field })
    } else {
        Ok(())
    }
}

pub fn require<T>(field: &'static str, value: Option<T>) -> Result<T, LedgerError> {
    value.ok_or(LedgerError::Required { field })
}

/// Resolves a referenced id against its table.
pub fn exists<T: HerdEntity>(table: &Table<T>, id: T::Id) -> Result<&T, LedgerError> {
    table
        .get(id)
        .ok_or_else(|| LedgerError::not_found(entity_type::<T>(), id))
}

/// Names are unique per table, ignoring case and surrounding whitespace.
pub fn unique_name<T: HerdEntity>(
    table: &Table<T>,
    name: &str,
    except: Option<T::Id>,
) -> Result<(), LedgerError> {
    match table.name_owner(name) {
        Some(owner) if Some(owner) != except => Err(LedgerError::conflict(
            "name",
            format!("{} named `{}` already exists", entity_type::<T>(), name.trim()),
        )),
        _ => Ok(()),
    }
}

pub fn ordered(
    earlier_field: &'static str,
    earlier: NaiveDate,
    later_field: &'static str,
    later: NaiveDate,
) -> Result<(), LedgerError> {
    if later >= earlier {
        Ok(())
    } else {
        Err(LedgerError::Ordering {
            earlier: earlier_field,
            later: later_field,
        })
    }
}

/// `removalDate` is present exactly when the life state is dead or sold.
pub fn removal_matches_state(
    life_state: LifeState,
    removal_date: Option<NaiveDate>,
) -> Result<(), LedgerError> {
    match (life_state.is_terminal(), removal_date) {
        (true, None) => Err(LedgerError::StateConsistency {
            field: "removalDate",
            message: format!("required when lifeState is {life_state}"),
        }),
        (false, Some(_)) => Err(LedgerError::StateConsistency {
            field: "removalDate",
            message: format!("must be empty while lifeState is {life_state}"),
        }),
        _ => Ok(()),
    }
}

/// The dam link must point at another animal and must not loop back.
pub fn dam_acyclic(store: &HerdStore, animal: AnimalId, dam: AnimalId) -> Result<(), LedgerError> {
    let mut cursor = Some(dam);
    while let Some(current) = cursor {
        if current == animal {
            return Err(LedgerError::conflict(
                "dam",
                format!("{dam} cannot be the dam of {animal}: parentage would form a cycle"),
            ));
        }
        cursor = store.animals.get(current).and_then(|record| record.dam);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn healthy() -> Biometrics {
        Biometrics {
            somatic_cell_count: 180_000,
            milk_yield: 31.5,
            leg_quality: 7.25,
            udder_quality: 8.0,
            fat_percent: 3.9,
            protein_percent: 3.3,
        }
    }

    #[test]
    fn biometrics_within_bounds_pass() {
        let mut checks = Checks::new();
        biometrics(&healthy(), &mut checks);
        assert!(checks.finish().is_ok());
    }

    #[test]
    fn every_out_of_range_field_is_reported() {
        let values = Biometrics {
            somatic_cell_count: 49_999,
            milk_yield: -1.0,
            leg_quality: 9.5,
            udder_quality: 4.125,
            fat_percent: 6.1,
            protein_percent: 2.7,
        };
        let mut checks = Checks::new();
        biometrics(&values, &mut checks);

        let err = checks.finish().unwrap_err();
        let report = err.report();
        let fields: Vec<_> = report.violations.iter().filter_map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec![
                "somaticCellCount",
                "milkYield",
                "legQuality",
                "udderQuality",
                "fatPercent",
                "proteinPercent"
            ]
        );
        assert!(err.kinds().iter().all(|kind| *kind == ErrorKind::RangeError));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(within("fatPercent", 2.5, 2.5, 6.0).is_ok());
        assert!(within("fatPercent", 6.0, 2.5, 6.0).is_ok());
        assert!(score("legQuality", 1.0).is_ok());
        assert!(score("legQuality", 9.0).is_ok());
        assert!(unit_count(30).is_ok());
        assert_eq!(unit_count(31).unwrap_err().kind(), ErrorKind::RangeError);
    }

    #[test]
    fn nan_is_out_of_range() {
        assert!(within("fatPercent", f64::NAN, 2.5, 6.0).is_err());
        assert!(finite("milkTransmission", f64::INFINITY).is_err());
    }

    #[test]
    fn single_violation_is_returned_unwrapped() {
        let mut checks = Checks::new();
        checks.check(not_blank("responsible", "  "));
        assert_eq!(
            checks.finish().unwrap_err(),
            LedgerError::Required {
                field: "responsible"
            }
        );
    }

    #[test]
    fn removal_date_tracks_life_state() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(removal_matches_state(LifeState::Sold, Some(day)).is_ok());
        assert!(removal_matches_state(LifeState::Pregnant, None).is_ok());
        assert_eq!(
            removal_matches_state(LifeState::Dead, None).unwrap_err().kind(),
            ErrorKind::StateConsistencyError
        );
        assert_eq!(
            removal_matches_state(LifeState::Empty, Some(day))
                .unwrap_err()
                .kind(),
            ErrorKind::StateConsistencyError
        );
    }

    #[test]
    fn later_date_may_equal_earlier() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(ordered("startDate", day, "endDate", day).is_ok());
        let err = ordered("startDate", day, "endDate", day.pred_opt().unwrap()).unwrap_err();
        assert_eq!(err.field(), Some("endDate"));
    }
}
