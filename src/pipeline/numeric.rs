use crate::error::{AppError, Result};
use crate::models::RawRecord;
use serde::{Deserialize, Serialize};

/// Pre-fitted mean imputer for the numeric column set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeanImputer {
    /// Columns the imputer was fitted on, in order
    columns: Vec<String>,

    /// Fill statistic per column (training-time mean)
    statistics: Vec<f64>,
}

impl MeanImputer {
    pub fn new(columns: Vec<String>, statistics: Vec<f64>) -> Result<Self> {
        if columns.len() != statistics.len() {
            return Err(AppError::SchemaMismatch(format!(
                "imputer fitted on {} columns but has {} statistics",
                columns.len(),
                statistics.len()
            )));
        }
        Ok(Self { columns, statistics })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Replace non-finite entries with the fitted statistic, in place.
    pub fn transform(&self, row: &mut [f64]) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(AppError::SchemaMismatch(format!(
                "imputer expects {} columns, got {}",
                self.columns.len(),
                row.len()
            )));
        }
        for (value, statistic) in row.iter_mut().zip(&self.statistics) {
            if !value.is_finite() {
                *value = *statistic;
            }
        }
        Ok(())
    }
}

/// Pre-fitted standardization scaler for the numeric column set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Columns the scaler was fitted on, in order
    columns: Vec<String>,

    /// Training-time mean per column
    mean: Vec<f64>,

    /// Training-time standard deviation per column
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(columns: Vec<String>, mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if columns.len() != mean.len() || columns.len() != scale.len() {
            return Err(AppError::SchemaMismatch(format!(
                "scaler fitted on {} columns but has {} means and {} scales",
                columns.len(),
                mean.len(),
                scale.len()
            )));
        }
        if scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(AppError::SchemaMismatch(
                "scaler has a non-positive scale parameter".to_string(),
            ));
        }
        Ok(Self { columns, mean, scale })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Apply the fitted affine transform `(x - mean) / scale`, in place.
    pub fn transform(&self, row: &mut [f64]) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(AppError::SchemaMismatch(format!(
                "scaler expects {} columns, got {}",
                self.columns.len(),
                row.len()
            )));
        }
        for ((value, mean), scale) in row.iter_mut().zip(&self.mean).zip(&self.scale) {
            *value = (*value - mean) / scale;
        }
        Ok(())
    }
}

/// Numeric preprocessing: zero-defaulted sub-table, imputation, scaling
pub struct NumericPipeline<'a> {
    imputer: &'a MeanImputer,
    scaler: &'a StandardScaler,
}

impl<'a> NumericPipeline<'a> {
    pub fn new(imputer: &'a MeanImputer, scaler: &'a StandardScaler) -> Self {
        Self { imputer, scaler }
    }

    /// Build the one-row numeric sub-table for the fitted column set.
    ///
    /// Every column defaults to 0 and is overwritten by the record value
    /// when one is present, then imputed and scaled in that order.
    pub fn transform(&self, record: &RawRecord) -> Result<Vec<(String, f64)>> {
        if self.imputer.columns() != self.scaler.columns() {
            return Err(AppError::SchemaMismatch(
                "imputer and scaler were fitted on different column sets".to_string(),
            ));
        }

        let mut row: Vec<f64> = self
            .imputer
            .columns()
            .iter()
            .map(|col| {
                record
                    .get(col)
                    .and_then(|v| v.as_number())
                    .unwrap_or(0.0)
            })
            .collect();

        self.imputer.transform(&mut row)?;
        self.scaler.transform(&mut row)?;

        Ok(self
            .imputer
            .columns()
            .iter()
            .cloned()
            .zip(row)
            .collect())
    }
}
