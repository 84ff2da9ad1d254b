//! Filter engine: applies the questionnaire answers to a classified catalog.
//!
//! All predicates are conjunctive, so their order affects nothing but how
//! early a row is rejected. An empty result is a valid outcome, not an error.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classify::{ClassifiedRow, ClassifiedTable, DistanceGroup, Gender, Goal, Surface};
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GenderAnswer {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceAnswer {
    Road,
    Trail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GoalAnswer {
    Race,
    Training,
}

/// Weekly running frequency. High (4+ days a week) restricts results to
/// long-durability shoes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyAnswer {
    Low,
    High,
}

/// Typical run distance. High (20 km and up) restricts results to the
/// medium and long distance groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DistanceAnswer {
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum YesNoAnswer {
    Yes,
    No,
}

/// The seven questionnaire choices for one filtering pass. Immutable once
/// built; a completed wizard session produces one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    pub gender: GenderAnswer,
    pub surface: SurfaceAnswer,
    pub goal: GoalAnswer,
    pub frequency: FrequencyAnswer,
    pub distance: DistanceAnswer,
    pub injury: YesNoAnswer,
    pub pronation: YesNoAnswer,
}

fn row_matches(row: &ClassifiedRow, answers: &AnswerSet) -> bool {
    let wanted_gender = match answers.gender {
        GenderAnswer::Male => Gender::Male,
        GenderAnswer::Female => Gender::Female,
    };
    if row.gender != wanted_gender {
        return false;
    }

    let wanted_surface = match answers.surface {
        SurfaceAnswer::Road => Surface::Road,
        SurfaceAnswer::Trail => Surface::Trail,
    };
    if row.surface != wanted_surface {
        return false;
    }

    let wanted_goal = match answers.goal {
        GoalAnswer::Race => Goal::Race,
        GoalAnswer::Training => Goal::Training,
    };
    if row.goal != wanted_goal {
        return false;
    }

    if answers.frequency == FrequencyAnswer::High && !row.is_long_durability {
        return false;
    }

    if answers.distance == DistanceAnswer::High
        && !matches!(row.distance_group, DistanceGroup::Medium | DistanceGroup::Long)
    {
        return false;
    }

    if answers.injury == YesNoAnswer::Yes && !row.injury_ok {
        return false;
    }

    if answers.pronation == YesNoAnswer::Yes && !row.pronation_yes {
        return false;
    }

    true
}

/// Rows of the classified catalog satisfying every applicable predicate, as a
/// new table with the source's column shape and row order.
pub fn apply_filters(classified: &ClassifiedTable, answers: &AnswerSet) -> Table {
    let matching: Vec<usize> = classified
        .derived()
        .iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, answers))
        .map(|(i, _)| i)
        .collect();
    info!(
        total = classified.derived().len(),
        matched = matching.len(),
        "applied questionnaire filters"
    );
    classified.source().select_rows(&matching)
}
