use super::models::DrawFile;
use crate::{ImporterError, Result};
use std::collections::HashSet;
use tracing::warn;

pub const FORMAT_VERSION: &str = "1.0.0";

pub struct DrawValidator;

impl DrawValidator {
    pub fn validate(draw: &DrawFile) -> Result<ValidationReport> {
        let report = Self::check(draw);

        if !report.errors.is_empty() {
            Err(ImporterError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }

    /// Collects every problem without failing.
    pub fn check(draw: &DrawFile) -> ValidationReport {
        let mut report = ValidationReport::default();

        if draw.format_version != FORMAT_VERSION {
            report.errors.push(format!(
                "Unsupported format version: {}. Expected {}",
                draw.format_version, FORMAT_VERSION
            ));
        }

        if draw.challenge.name.trim().is_empty() {
            report.errors.push("Challenge name is required".to_string());
        }
        if draw.challenge.tournament.trim().is_empty() {
            report
                .errors
                .push("Challenge tournament is required".to_string());
        }
        if draw.challenge.end_date < draw.challenge.start_date {
            report
                .errors
                .push("Challenge end_date must be >= start_date".to_string());
        }
        if draw.challenge.description.is_none() {
            report
                .warnings
                .push("Challenge description is not specified".to_string());
        }

        if !(1..=64).contains(&draw.first_round) {
            report.errors.push(format!(
                "Invalid first_round: {}. Must be between 1 and 64",
                draw.first_round
            ));
        }

        if draw.matches.is_empty() {
            report
                .errors
                .push("At least one match is required".to_string());
        } else if !draw.matches.len().is_power_of_two() {
            report.errors.push(format!(
                "Draw has {} matches, the first round needs a power of two",
                draw.matches.len()
            ));
        }

        let mut names = HashSet::new();
        for (idx, m) in draw.matches.iter().enumerate() {
            let label = format!("Match {}", idx + 1);

            if m.player1.is_none() || m.player2.is_none() {
                report
                    .warnings
                    .push(format!("{} has an undecided slot (TBD)", label));
            }

            for player in m.players() {
                let name = player.name.trim();
                if name.is_empty() {
                    report
                        .errors
                        .push(format!("{} has a player with an empty name", label));
                    continue;
                }
                if !names.insert(name) {
                    report
                        .errors
                        .push(format!("Duplicate player name: '{}'", name));
                }
                if player.seed.is_none() {
                    report
                        .warnings
                        .push(format!("{}: '{}' has no seed", label, name));
                }
            }
        }

        report
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}
