//! Protocol state: the human's recorded picks across the six pairing steps.

use crate::models::roster::{Roster, Side};
use crate::models::session::PairingError;
use serde::{Deserialize, Serialize};

/// Attackers offered per round, on each side.
pub const ATTACKERS_PER_ROUND: usize = 2;

/// Which half of the protocol a step belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    First,
    Second,
}

/// What is decided within a round.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Both teams put up a defender.
    Defenders,
    /// Both teams offer two attackers against the other's defender.
    Attackers,
    /// Both teams accept one of the attackers offered to them.
    Choices,
}

/// One of the six protocol steps, in order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    FirstDefender,
    FirstAttackers,
    FirstAttackerChoice,
    SecondDefender,
    SecondAttackers,
    SecondAttackerChoice,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::FirstDefender,
        Step::FirstAttackers,
        Step::FirstAttackerChoice,
        Step::SecondDefender,
        Step::SecondAttackers,
        Step::SecondAttackerChoice,
    ];

    /// 1-based step number as shown in the wizard.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn round(self) -> Round {
        if self < Step::SecondDefender {
            Round::First
        } else {
            Round::Second
        }
    }

    pub fn stage(self) -> Stage {
        match self {
            Step::FirstDefender | Step::SecondDefender => Stage::Defenders,
            Step::FirstAttackers | Step::SecondAttackers => Stage::Attackers,
            Step::FirstAttackerChoice | Step::SecondAttackerChoice => Stage::Choices,
        }
    }

    pub fn from_parts(round: Round, stage: Stage) -> Self {
        match (round, stage) {
            (Round::First, Stage::Defenders) => Step::FirstDefender,
            (Round::First, Stage::Attackers) => Step::FirstAttackers,
            (Round::First, Stage::Choices) => Step::FirstAttackerChoice,
            (Round::Second, Stage::Defenders) => Step::SecondDefender,
            (Round::Second, Stage::Attackers) => Step::SecondAttackers,
            (Round::Second, Stage::Choices) => Step::SecondAttackerChoice,
        }
    }

    pub fn next(self) -> Option<Step> {
        Step::ALL.get(self.number() as usize).copied()
    }

    pub fn prev(self) -> Option<Step> {
        (self.number() as usize).checked_sub(2).map(|i| Step::ALL[i])
    }
}

impl TryFrom<u8> for Step {
    type Error = PairingError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        n.checked_sub(1)
            .and_then(|i| Step::ALL.get(i as usize).copied())
            .ok_or(PairingError::InvalidStep(n))
    }
}

/// Where the wizard currently is.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Editing rosters and ratings; no picks yet.
    #[default]
    Setup,
    /// Working through one of the six steps.
    InProgress(Step),
    /// All steps done; final pairing computed.
    Completed,
}

/// A single pick recorded for the current step. The round comes from the step.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "slot", content = "value", rename_all = "snake_case")]
pub enum Slot {
    /// Our defender.
    Defender(String),
    /// Their defender.
    OpponentDefender(String),
    /// Our players offered against their defender.
    Attackers(Vec<String>),
    /// Their opponents offered against our defender.
    OpponentAttackers(Vec<String>),
    /// The offered opponent we accept against our defender.
    AttackerChoice(String),
    /// Our offered player they accept against their defender.
    OpponentAttackerChoice(String),
}

impl Slot {
    pub fn stage(&self) -> Stage {
        match self {
            Slot::Defender(_) | Slot::OpponentDefender(_) => Stage::Defenders,
            Slot::Attackers(_) | Slot::OpponentAttackers(_) => Stage::Attackers,
            Slot::AttackerChoice(_) | Slot::OpponentAttackerChoice(_) => Stage::Choices,
        }
    }
}

/// Picks of one round (three steps).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundPicks {
    pub defender: Option<String>,
    pub opponent_defender: Option<String>,
    pub attackers: Vec<String>,
    pub opponent_attackers: Vec<String>,
    pub attacker_choice: Option<String>,
    pub opponent_attacker_choice: Option<String>,
}

impl RoundPicks {
    fn clear_stage(&mut self, stage: Stage) {
        match stage {
            Stage::Defenders => {
                self.defender = None;
                self.opponent_defender = None;
            }
            Stage::Attackers => {
                self.attackers.clear();
                self.opponent_attackers.clear();
            }
            Stage::Choices => {
                self.attacker_choice = None;
                self.opponent_attacker_choice = None;
            }
        }
    }

    /// Players and opponents this round holds once the steps before `before` are done.
    /// Offered attackers stay committed whether or not they were accepted.
    fn committed(&self, round: Round, before: Step, players: &mut Vec<String>, opponents: &mut Vec<String>) {
        let done = |stage| Step::from_parts(round, stage) < before;
        if done(Stage::Defenders) {
            players.extend(self.defender.iter().cloned());
            opponents.extend(self.opponent_defender.iter().cloned());
        }
        if done(Stage::Attackers) {
            players.extend(self.attackers.iter().cloned());
            opponents.extend(self.opponent_attackers.iter().cloned());
        }
    }

    fn rename(&mut self, side: Side, old: &str, new: &str) {
        let swap = |name: &mut String| {
            if name == old {
                *name = new.to_string();
            }
        };
        match side {
            Side::Team => {
                self.defender.iter_mut().for_each(swap);
                self.attackers.iter_mut().for_each(swap);
                self.opponent_attacker_choice.iter_mut().for_each(swap);
            }
            Side::Opponents => {
                self.opponent_defender.iter_mut().for_each(swap);
                self.opponent_attackers.iter_mut().for_each(swap);
                self.attacker_choice.iter_mut().for_each(swap);
            }
        }
    }
}

/// Players and opponents still free at some step, in roster order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Available {
    pub players: Vec<String>,
    pub opponents: Vec<String>,
}

/// Full protocol: wizard phase plus both rounds of picks.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProtocolState {
    pub phase: Phase,
    pub first: RoundPicks,
    pub second: RoundPicks,
}

impl ProtocolState {
    pub fn round(&self, round: Round) -> &RoundPicks {
        match round {
            Round::First => &self.first,
            Round::Second => &self.second,
        }
    }

    pub fn round_mut(&mut self, round: Round) -> &mut RoundPicks {
        match round {
            Round::First => &mut self.first,
            Round::Second => &mut self.second,
        }
    }

    /// Names placed by any step earlier than `step`.
    pub fn committed_before(&self, step: Step) -> (Vec<String>, Vec<String>) {
        let mut players = Vec::new();
        let mut opponents = Vec::new();
        self.first
            .committed(Round::First, step, &mut players, &mut opponents);
        self.second
            .committed(Round::Second, step, &mut players, &mut opponents);
        (players, opponents)
    }

    /// Roster entries not yet placed by a step earlier than `step`.
    pub fn available(&self, step: Step, players: &Roster, opponents: &Roster) -> Available {
        let (taken_players, taken_opponents) = self.committed_before(step);
        Available {
            players: players
                .iter()
                .filter(|p| !taken_players.contains(p))
                .cloned()
                .collect(),
            opponents: opponents
                .iter()
                .filter(|o| !taken_opponents.contains(o))
                .cloned()
                .collect(),
        }
    }

    /// Drop every pick belonging to a step after `step`.
    pub fn clear_after(&mut self, step: Step) {
        let mut next = step.next();
        while let Some(s) = next {
            self.round_mut(s.round()).clear_stage(s.stage());
            next = s.next();
        }
    }

    /// Replace `old` by `new` in every slot holding a name from `side`.
    pub fn rename(&mut self, side: Side, old: &str, new: &str) {
        self.first.rename(side, old, new);
        self.second.rename(side, old, new);
    }
}
