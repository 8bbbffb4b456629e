//! Star conditions and their evaluation against one placement
//!
//! A level carries up to three independent conditions. An empty slot never
//! counts as satisfied.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::algorithm::bitset::CellBitset;
use crate::io::configuration::STAR_SLOT_COUNT;

/// Required value of one specific cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRequirement {
    /// Cell id
    pub id: usize,
    /// Value the cell must display
    pub value: i32,
}

/// Expected position of a switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwitchPosition {
    /// Switch open, acting as a free cell
    #[serde(rename = "SWITCH_ON")]
    On,
    /// Switch closed, acting as a block
    #[serde(rename = "SWITCH_OFF")]
    Off,
}

impl fmt::Display for SwitchPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => write!(f, "SWITCH_ON"),
            Self::Off => write!(f, "SWITCH_OFF"),
        }
    }
}

/// Required position of one switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchRequirement {
    /// Switch cell id
    pub id: usize,
    /// Position the switch must be in
    pub state: SwitchPosition,
}

/// One star sub-goal a placement may satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StarCondition {
    /// Score equals the value exactly
    #[serde(rename = "getScore")]
    ExactScore {
        /// Required score
        value: i64,
    },
    /// Every listed cell holds a bomb of any kind
    #[serde(rename = "placeBombAt")]
    BombAtCells {
        /// Cells that must be occupied
        cells: Vec<usize>,
    },
    /// At least one open cell displays the value
    #[serde(rename = "anyCellValue")]
    AnyCellEquals {
        /// Value to look for
        value: i32,
    },
    /// Every listed cell displays its required value
    #[serde(rename = "cellValues")]
    CellEquals {
        /// Cell/value pairs that must all match
        requirements: Vec<CellRequirement>,
    },
    /// Exactly this many open non-bomb cells display zero
    #[serde(rename = "emptyCellsCount")]
    EmptyCellCount {
        /// Required number of zero cells
        value: usize,
    },
    /// Every listed switch is in its required position
    #[serde(rename = "setSwitches")]
    SwitchState {
        /// Switch/position pairs that must all match
        requirements: Vec<SwitchRequirement>,
    },
}

/// Condition variant without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConditionKind {
    /// [`StarCondition::ExactScore`]
    #[serde(rename = "getScore")]
    ExactScore,
    /// [`StarCondition::BombAtCells`]
    #[serde(rename = "placeBombAt")]
    BombAtCells,
    /// [`StarCondition::AnyCellEquals`]
    #[serde(rename = "anyCellValue")]
    AnyCellEquals,
    /// [`StarCondition::CellEquals`]
    #[serde(rename = "cellValues")]
    CellEquals,
    /// [`StarCondition::EmptyCellCount`]
    #[serde(rename = "emptyCellsCount")]
    EmptyCellCount,
    /// [`StarCondition::SwitchState`]
    #[serde(rename = "setSwitches")]
    SwitchState,
}

impl ConditionKind {
    /// Every kind in a stable order
    pub const ALL: [Self; 6] = [
        Self::ExactScore,
        Self::BombAtCells,
        Self::AnyCellEquals,
        Self::CellEquals,
        Self::EmptyCellCount,
        Self::SwitchState,
    ];

    /// Name used in JSON documents
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::ExactScore => "getScore",
            Self::BombAtCells => "placeBombAt",
            Self::AnyCellEquals => "anyCellValue",
            Self::CellEquals => "cellValues",
            Self::EmptyCellCount => "emptyCellsCount",
            Self::SwitchState => "setSwitches",
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Facts about one placement that conditions are checked against
#[derive(Debug, Clone, Copy)]
pub struct ConditionContext<'a> {
    /// Placement score
    pub score: i64,
    /// Cells holding any bomb, forced bombs included
    pub occupied: &'a CellBitset,
    /// Displayed value per cell; `None` for bombs and closed cells
    pub cell_values: &'a [Option<i32>],
    /// Open non-bomb cells displaying zero
    pub empty_cells: usize,
    /// Switches closed in this branch
    pub closed_switches: &'a [usize],
}

impl StarCondition {
    /// Variant of this condition
    pub const fn kind(&self) -> ConditionKind {
        match self {
            Self::ExactScore { .. } => ConditionKind::ExactScore,
            Self::BombAtCells { .. } => ConditionKind::BombAtCells,
            Self::AnyCellEquals { .. } => ConditionKind::AnyCellEquals,
            Self::CellEquals { .. } => ConditionKind::CellEquals,
            Self::EmptyCellCount { .. } => ConditionKind::EmptyCellCount,
            Self::SwitchState { .. } => ConditionKind::SwitchState,
        }
    }

    /// Whether the placement described by `ctx` satisfies this condition
    pub fn is_satisfied(&self, ctx: &ConditionContext<'_>) -> bool {
        match self {
            Self::ExactScore { value } => ctx.score == *value,
            Self::BombAtCells { cells } => cells.iter().all(|&cell| ctx.occupied.contains(cell)),
            Self::AnyCellEquals { value } => ctx.cell_values.iter().any(|v| *v == Some(*value)),
            Self::CellEquals { requirements } => requirements.iter().all(|requirement| {
                ctx.cell_values.get(requirement.id).copied().flatten() == Some(requirement.value)
            }),
            Self::EmptyCellCount { value } => ctx.empty_cells == *value,
            Self::SwitchState { requirements } => requirements.iter().all(|requirement| {
                let closed = ctx.closed_switches.contains(&requirement.id);
                match requirement.state {
                    SwitchPosition::Off => closed,
                    SwitchPosition::On => !closed,
                }
            }),
        }
    }
}

/// Evaluate an optional condition slot
///
/// An empty slot is never satisfied.
pub fn evaluate(condition: Option<&StarCondition>, ctx: &ConditionContext<'_>) -> bool {
    condition.is_some_and(|condition| condition.is_satisfied(ctx))
}

impl fmt::Display for StarCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactScore { value } => write!(f, "Exact Score = {value}"),
            Self::BombAtCells { cells } => write!(f, "Bomb at Cell(s) = {cells:?}"),
            Self::AnyCellEquals { value } => write!(f, "Any Cell Value = {value}"),
            Self::CellEquals { requirements } => {
                write!(f, "Specific Cell Value:")?;
                for requirement in requirements {
                    write!(f, " ID {} = {}", requirement.id, requirement.value)?;
                }
                Ok(())
            }
            Self::EmptyCellCount { value } => write!(f, "Empty Cells Count = {value}"),
            Self::SwitchState { requirements } => {
                write!(f, "Switch State:")?;
                for requirement in requirements {
                    write!(f, " ID {} is {}", requirement.id, requirement.state)?;
                }
                Ok(())
            }
        }
    }
}

/// The three condition slots of a level
pub type StarSlots = [Option<StarCondition>; STAR_SLOT_COUNT];

/// Number of filled slots
pub fn configured_count(slots: &StarSlots) -> usize {
    slots.iter().flatten().count()
}

/// Serde adapter writing slots as `[[condition], [], ...]`
///
/// Missing trailing slots read as empty; entries beyond the third slot and
/// extra conditions inside one slot are ignored.
pub mod star_slots {
    use serde::de::Deserializer;
    use serde::ser::{SerializeSeq, Serializer};
    use serde::Deserialize;

    use super::{StarCondition, StarSlots};

    /// Serialize slots as nested arrays
    ///
    /// # Errors
    ///
    /// Propagates serializer failures
    pub fn serialize<S: Serializer>(slots: &StarSlots, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(slots.len()))?;
        for slot in slots {
            let inner: Vec<&StarCondition> = slot.iter().collect();
            seq.serialize_element(&inner)?;
        }
        seq.end()
    }

    /// Deserialize slots from nested arrays
    ///
    /// # Errors
    ///
    /// Fails when an entry is not a valid condition
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StarSlots, D::Error> {
        let raw: Vec<Vec<StarCondition>> = Vec::deserialize(deserializer)?;
        let mut slots = StarSlots::default();
        for (slot, entries) in slots.iter_mut().zip(raw) {
            *slot = entries.into_iter().next();
        }
        Ok(slots)
    }
}
