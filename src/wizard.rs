//! Seven-step questionnaire session, modelled as an explicit state machine:
//! the current step plus seven optional answer slots. Transitions clamp at
//! the ends instead of failing, matching how a back/forward UI behaves.

use serde::{Deserialize, Serialize};

use crate::constants::WIZARD_STEPS;
use crate::filter::{
    AnswerSet, DistanceAnswer, FrequencyAnswer, GenderAnswer, GoalAnswer, SurfaceAnswer,
    YesNoAnswer,
};

/// Presentation data for one step: the question and its two option labels,
/// in the order [`WizardSession::select`] indexes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub step: u8,
    pub prompt: &'static str,
    pub options: [&'static str; 2],
}

const QUESTIONS: [Question; WIZARD_STEPS as usize] = [
    Question {
        step: 1,
        prompt: "Which gender are the shoes for?",
        options: ["male", "female"],
    },
    Question {
        step: 2,
        prompt: "What surface do you plan to run on?",
        options: ["road", "trail"],
    },
    Question {
        step: 3,
        prompt: "What is your running goal?",
        options: ["race", "training"],
    },
    Question {
        step: 4,
        prompt: "How many days a week do you run? (3 or fewer / 4 or more)",
        options: ["low", "high"],
    },
    Question {
        step: 5,
        prompt: "How far is a typical run? (under 20 km / 20 km or more)",
        options: ["low", "high"],
    },
    Question {
        step: 6,
        prompt: "Have you had a knee or hip injury?",
        options: ["yes", "no"],
    },
    Question {
        step: 7,
        prompt: "Do you overpronate?",
        options: ["yes", "no"],
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Slots {
    gender: Option<GenderAnswer>,
    surface: Option<SurfaceAnswer>,
    goal: Option<GoalAnswer>,
    frequency: Option<FrequencyAnswer>,
    distance: Option<DistanceAnswer>,
    injury: Option<YesNoAnswer>,
    pronation: Option<YesNoAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSession {
    step: u8,
    slots: Slots,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            step: 1,
            slots: Slots::default(),
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    /// The question for the current step.
    pub fn question(&self) -> Question {
        QUESTIONS[(self.step - 1) as usize]
    }

    /// Record an answer for the current step by option index (0 or 1).
    /// Out-of-range indices are rejected without changing state.
    pub fn select(&mut self, option: usize) -> bool {
        if option > 1 {
            return false;
        }
        let first = option == 0;
        match self.step {
            1 => {
                self.slots.gender = Some(if first {
                    GenderAnswer::Male
                } else {
                    GenderAnswer::Female
                })
            }
            2 => {
                self.slots.surface = Some(if first {
                    SurfaceAnswer::Road
                } else {
                    SurfaceAnswer::Trail
                })
            }
            3 => {
                self.slots.goal = Some(if first {
                    GoalAnswer::Race
                } else {
                    GoalAnswer::Training
                })
            }
            4 => {
                self.slots.frequency = Some(if first {
                    FrequencyAnswer::Low
                } else {
                    FrequencyAnswer::High
                })
            }
            5 => {
                self.slots.distance = Some(if first {
                    DistanceAnswer::Low
                } else {
                    DistanceAnswer::High
                })
            }
            6 => {
                self.slots.injury = Some(if first {
                    YesNoAnswer::Yes
                } else {
                    YesNoAnswer::No
                })
            }
            7 => {
                self.slots.pronation = Some(if first {
                    YesNoAnswer::Yes
                } else {
                    YesNoAnswer::No
                })
            }
            _ => return false,
        }
        true
    }

    /// Advance to the next step, clamping at the last.
    pub fn next(&mut self) {
        self.step = (self.step + 1).min(WIZARD_STEPS);
    }

    /// Go back one step, clamping at the first.
    pub fn prev(&mut self) {
        self.step = (self.step - 1).max(1);
    }

    /// Back to step one with every slot cleared.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_complete(&self) -> bool {
        self.answer_set().is_some()
    }

    /// The completed answer set, once all seven slots are filled.
    pub fn answer_set(&self) -> Option<AnswerSet> {
        Some(AnswerSet {
            gender: self.slots.gender?,
            surface: self.slots.surface?,
            goal: self.slots.goal?,
            frequency: self.slots.frequency?,
            distance: self.slots.distance?,
            injury: self.slots.injury?,
            pronation: self.slots.pronation?,
        })
    }
}
